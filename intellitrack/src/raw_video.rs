use crate::error::FrameSourceError;
use crate::frame::Frame;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::mpsc::SyncSender;

/// Reads back-to-back RGBA frames of a fixed size, e.g. the output of
/// `ffmpeg -i <src> -f rawvideo -pix_fmt rgba <fifo>`.
pub struct RawVideoReader<R: Read> {
    reader: R,
    width: usize,
    height: usize,
}

impl RawVideoReader<BufReader<File>> {
    pub fn open(path: &Path, width: usize, height: usize) -> Result<Self, FrameSourceError> {
        let file = File::open(path).map_err(|err| FrameSourceError::Open {
            input: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self::new(BufReader::new(file), width, height))
    }
}

impl<R: Read> RawVideoReader<R> {
    pub fn new(reader: R, width: usize, height: usize) -> Self {
        Self {
            reader,
            width,
            height,
        }
    }

    /// `Ok(None)` at end of input. A trailing partial frame is discarded.
    pub fn read_frame(&mut self) -> Result<Option<Frame>, FrameSourceError> {
        let mut data = vec![0u8; Frame::byte_len(self.width, self.height)];
        match self.reader.read_exact(&mut data) {
            Ok(()) => Frame::from_rgba(self.width, self.height, data).map(Some),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn run(mut self, tx: SyncSender<Frame>) -> Result<(), FrameSourceError> {
        let mut count = 0u64;
        while let Some(frame) = self.read_frame()? {
            if tx.send(frame).is_err() {
                break;
            }
            count += 1;
        }
        tracing::info!("raw video input ended after {} frames", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    mod success {
        use crate::raw_video::RawVideoReader;
        use std::io::Cursor;
        use std::sync::mpsc;

        #[test]
        fn reads_whole_frames_until_eof() {
            let mut bytes = vec![1u8; 2 * 2 * 4];
            bytes.extend(vec![2u8; 2 * 2 * 4]);
            bytes.extend(vec![3u8; 5]); // partial trailing frame
            let mut reader = RawVideoReader::new(Cursor::new(bytes), 2, 2);

            let first = reader.read_frame().unwrap().unwrap();
            assert_eq!((first.width, first.height), (2, 2));
            assert!(first.data.iter().all(|b| *b == 1));
            let second = reader.read_frame().unwrap().unwrap();
            assert!(second.data.iter().all(|b| *b == 2));
            assert!(reader.read_frame().unwrap().is_none());
        }

        #[test]
        fn run_forwards_every_frame() {
            let bytes = vec![7u8; 3 * 4 * 3];
            let reader = RawVideoReader::new(Cursor::new(bytes), 3, 1);
            let (tx, rx) = mpsc::sync_channel(8);
            reader.run(tx).unwrap();
            assert_eq!(rx.iter().count(), 3);
        }
    }

    mod failure {
        use crate::error::FrameSourceError;
        use crate::raw_video::RawVideoReader;
        use std::path::Path;

        #[test]
        fn missing_input_reported() {
            let result = RawVideoReader::open(Path::new("/nonexistent/intellitrack.rgba"), 4, 4);
            assert!(matches!(result, Err(FrameSourceError::Open { .. })));
        }
    }
}
