use crate::error::FrameSourceError;
use crate::frame::Frame;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread;

/// Supplies decoded frames to the control loop. `None` means no frame is
/// ready yet; the caller skips the tick.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<Frame>;
}

/// Frames produced on a worker thread, handed over one slot at a time.
pub struct FrameFeed {
    rx: Receiver<Frame>,
    err_rx: Receiver<FrameSourceError>,
    closed: bool,
}

impl FrameFeed {
    pub fn spawn<F>(producer: F) -> Self
    where
        F: FnOnce(SyncSender<Frame>) -> Result<(), FrameSourceError> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let (err_tx, err_rx) = mpsc::channel();
        thread::spawn(move || {
            // Holds the channel open until any error is queued, so a reader
            // that sees the feed close also sees why.
            let open = tx.clone();
            if let Err(err) = producer(tx) {
                let _ = err_tx.send(err);
            }
            drop(open);
        });
        Self {
            rx,
            err_rx,
            closed: false,
        }
    }

    pub fn recv_latest(&mut self) -> Option<Frame> {
        let mut last = None;
        loop {
            match self.rx.try_recv() {
                Ok(frame) => last = Some(frame),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        last
    }

    pub fn try_recv_error(&self) -> Option<FrameSourceError> {
        self.err_rx.try_recv().ok()
    }

    /// True once the producer has finished and every frame has been taken.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FrameSource for FrameFeed {
    fn next_frame(&mut self) -> Option<Frame> {
        self.recv_latest()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    pub(super) fn wait_for<T>(mut poll: impl FnMut() -> Option<T>) -> Option<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(value) = poll() {
                return Some(value);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    mod success {
        use super::wait_for;
        use crate::error::FrameSourceError;
        use crate::frame::Frame;
        use crate::frame_feed::{FrameFeed, FrameSource};

        #[test]
        fn delivers_frames_then_closes() {
            let mut feed = FrameFeed::spawn(|tx| {
                for shade in [10u8, 20] {
                    let frame = Frame::from_rgba(1, 1, vec![shade, shade, shade, 255])?;
                    if tx.send(frame).is_err() {
                        break;
                    }
                }
                Ok(())
            });
            let mut shades = Vec::new();
            let closed = wait_for(|| {
                if let Some(frame) = feed.next_frame() {
                    shades.push(frame.data[0]);
                }
                feed.is_closed().then_some(())
            });
            assert!(closed.is_some());
            // Older frames may be skipped, the newest one never is.
            assert_eq!(shades.last(), Some(&20));
            assert!(shades.len() <= 2);
            assert!(feed.try_recv_error().is_none());
        }

        #[test]
        fn producer_error_is_reported() {
            let mut feed = FrameFeed::spawn(|_| {
                Err(FrameSourceError::Decode("no video stream".to_string()))
            });
            let err = wait_for(|| feed.try_recv_error()).unwrap();
            assert_eq!(err.to_string(), "frame decode failed: no video stream");
            assert!(feed.next_frame().is_none());
        }
    }

    mod failure {
        use super::wait_for;
        use crate::error::FrameSourceError;
        use crate::frame::Frame;
        use crate::frame_feed::{FrameFeed, FrameSource};

        #[test]
        fn closed_feed_already_holds_producer_error() {
            for _ in 0..50 {
                let mut feed = FrameFeed::spawn(|tx| {
                    let _ = tx.send(Frame::from_rgba(1, 1, vec![0; 4])?);
                    Err(FrameSourceError::Decode("stream ended".to_string()))
                });
                let closed = wait_for(|| {
                    feed.next_frame();
                    feed.is_closed().then_some(())
                });
                assert!(closed.is_some());
                let err = feed.try_recv_error();
                assert!(
                    matches!(err, Some(FrameSourceError::Decode(_))),
                    "{err:?}"
                );
            }
        }
    }
}
