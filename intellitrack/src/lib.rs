pub mod cli;
pub mod config;
pub mod control_loop;
pub mod error;
mod extensions;
#[cfg(feature = "ffmpeg")]
pub mod ffmpeg_decoder;
pub mod frame;
pub mod frame_feed;
pub mod framing;
pub mod geometry;
pub mod logging;
pub mod operator_input;
pub mod ptz;
pub mod raw_video;
pub mod runner;
pub mod servo;
pub mod template_tracker;
pub mod tracker;
pub mod transport;
pub mod visca;

pub use control_loop::{ControlLoop, LoopOptions, TickOutcome, TrackState};
pub use frame::Frame;
pub use frame_feed::FrameSource;
pub use geometry::{BoundingBox, TargetOffset};
pub use ptz::PtzController;
pub use tracker::ObjectTracker;
pub use transport::{CommandSink, Endpoint, UdpSink};
pub use visca::PtzCommand;
