use crate::error::FrameSourceError;
use crate::frame::{Frame, BYTES_PER_PIXEL};
use ffmpeg_next as ffmpeg;
use std::sync::mpsc::SyncSender;

/// Decodes the best video stream of `input` into RGBA frames until the input
/// ends or the receiving side goes away.
pub fn run(input: &str, tx: SyncSender<Frame>) -> Result<(), FrameSourceError> {
    ffmpeg::init().map_err(|err| decode_error("ffmpeg init failed", err))?;
    let mut opts = ffmpeg::Dictionary::new();
    if input.starts_with("rtsp://") {
        opts.set("rtsp_transport", "tcp");
    }
    let mut context =
        ffmpeg::format::input_with_dictionary(input, opts).map_err(|err| FrameSourceError::Open {
            input: input.to_string(),
            reason: err.to_string(),
        })?;
    let stream = context
        .streams()
        .best(ffmpeg::media::Type::Video)
        .ok_or_else(|| FrameSourceError::Decode("no video stream found".to_string()))?;
    let stream_index = stream.index();
    let codec = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
        .map_err(|err| decode_error("codec parameters", err))?;
    let mut decoder = codec
        .decoder()
        .video()
        .map_err(|err| decode_error("video decoder", err))?;
    let mut scaler = ffmpeg::software::scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg::format::Pixel::RGBA,
        decoder.width(),
        decoder.height(),
        ffmpeg::software::scaling::Flags::BILINEAR,
    )
    .map_err(|err| decode_error("scaler", err))?;
    tracing::info!(
        "decoding {} at {}x{}",
        input,
        decoder.width(),
        decoder.height()
    );

    let mut decoded = ffmpeg::util::frame::Video::empty();
    let mut rgba = ffmpeg::util::frame::Video::empty();
    for (stream, packet) in context.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if decoder.send_packet(&packet).is_err() {
            continue;
        }
        while decoder.receive_frame(&mut decoded).is_ok() {
            if scaler.run(&decoded, &mut rgba).is_err() {
                continue;
            }
            let Some(frame) = copy_frame(&rgba, decoder.width(), decoder.height()) else {
                continue;
            };
            if tx.send(frame).is_err() {
                return Ok(());
            }
        }
    }
    Ok(())
}

fn copy_frame(frame: &ffmpeg::util::frame::Video, width: u32, height: u32) -> Option<Frame> {
    let width = width as usize;
    let height = height as usize;
    let row_len = width * BYTES_PER_PIXEL;
    let stride = frame.stride(0);
    let data = frame.data(0);
    if width == 0 || height == 0 || stride < row_len || data.len() < stride * (height - 1) + row_len {
        return None;
    }
    let mut out = Vec::with_capacity(row_len * height);
    for row in data.chunks(stride).take(height) {
        out.extend_from_slice(&row[..row_len]);
    }
    Frame::from_rgba(width, height, out).ok()
}

fn decode_error(what: &str, err: ffmpeg::Error) -> FrameSourceError {
    FrameSourceError::Decode(format!("{what}: {err}"))
}
