use crate::framing::Framing;
use crate::geometry::BoundingBox;
use crate::servo::DEFAULT_GAIN;
use crate::template_tracker::{DEFAULT_MATCH_THRESHOLD, DEFAULT_SEARCH_RADIUS};
use crate::transport::DEFAULT_VISCA_PORT;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Raw RGBA frames of --width x --height from a file or FIFO
    Raw,
    /// Anything ffmpeg can open (needs the `ffmpeg` feature)
    Ffmpeg,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Keep a tracked subject centered with a VISCA PTZ camera")]
pub struct Args {
    /// IP address or hostname of the camera
    #[arg(long)]
    pub camera_host: String,

    /// VISCA control port
    #[arg(long, default_value_t = DEFAULT_VISCA_PORT)]
    pub camera_port: u16,

    /// Datagram framing expected by the camera
    #[arg(long, value_enum, default_value_t = Framing::Raw)]
    pub framing: Framing,

    /// Video input: a path for raw input, a URL or path for ffmpeg
    #[arg(long)]
    pub input: String,

    /// How to read --input
    #[arg(long, value_enum, default_value_t = InputFormat::Raw)]
    pub input_format: InputFormat,

    /// Frame width in pixels (raw input)
    #[arg(long)]
    pub width: Option<usize>,

    /// Frame height in pixels (raw input)
    #[arg(long)]
    pub height: Option<usize>,

    /// Region to track as x,y,w,h (default: centered quarter of the frame)
    #[arg(long)]
    pub roi: Option<BoundingBox>,

    /// Select the ROI on the first frame instead of waiting for the `r` key
    #[arg(long)]
    pub select_on_start: bool,

    /// Proportional gain from normalized offset to VISCA speed
    #[arg(long, default_value_t = DEFAULT_GAIN)]
    pub gain: f64,

    /// Normalized offset below which an axis is not driven
    #[arg(long, default_value_t = 0.0)]
    pub deadband: f64,

    /// Control loop period in milliseconds
    #[arg(long, default_value_t = 20)]
    pub tick_ms: u64,

    /// Send a stop command when tracking is lost, muted or shut down
    #[arg(long)]
    pub explicit_stop: bool,

    /// Template tracker search radius in pixels
    #[arg(long, default_value_t = DEFAULT_SEARCH_RADIUS)]
    pub search_radius: u32,

    /// Template tracker loss threshold (mean absolute luma difference)
    #[arg(long, default_value_t = DEFAULT_MATCH_THRESHOLD)]
    pub match_threshold: f64,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
