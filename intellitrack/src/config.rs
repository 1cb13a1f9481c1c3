use crate::cli::{Args, InputFormat};
use crate::control_loop::LoopOptions;
use crate::framing::Framing;
use crate::geometry::BoundingBox;
use crate::servo::ServoConfig;
use crate::template_tracker::TemplateConfig;
use crate::transport::Endpoint;
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

const MAX_TICK_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Raw {
        path: PathBuf,
        width: usize,
        height: usize,
    },
    Ffmpeg {
        url: String,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    endpoint: Endpoint,
    framing: Framing,
    input: Input,
    roi: Option<BoundingBox>,
    select_on_start: bool,
    servo: ServoConfig,
    tracker: TemplateConfig,
    explicit_stop: bool,
    tick_interval: Duration,
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self> {
        let host = args.camera_host.trim().to_string();
        if host.is_empty() {
            bail!("camera host is required");
        }
        if args.camera_port == 0 {
            bail!("camera port must be non-zero");
        }
        if !(1..=MAX_TICK_MS).contains(&args.tick_ms) {
            bail!("tick interval must be 1..={MAX_TICK_MS} ms");
        }
        if !(args.gain.is_finite() && args.gain > 0.0) {
            bail!("gain must be positive");
        }
        if !(0.0..1.0).contains(&args.deadband) {
            bail!("deadband must be in [0, 1)");
        }
        if !(args.match_threshold.is_finite() && args.match_threshold >= 0.0) {
            bail!("match threshold must be non-negative");
        }
        Ok(Self {
            endpoint: Endpoint::new(host, args.camera_port),
            framing: args.framing,
            input: input_from_args(args)?,
            roi: args.roi,
            select_on_start: args.select_on_start,
            servo: ServoConfig {
                gain: args.gain,
                deadband: args.deadband,
            },
            tracker: TemplateConfig {
                search_radius: args.search_radius,
                match_threshold: args.match_threshold,
            },
            explicit_stop: args.explicit_stop,
            tick_interval: Duration::from_millis(args.tick_ms),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    /// The configured region, or a centered one sized for this frame.
    pub fn roi_for(&self, frame_width: usize, frame_height: usize) -> Option<BoundingBox> {
        self.roi
            .or_else(|| BoundingBox::centered(frame_width, frame_height).ok())
    }

    pub fn select_on_start(&self) -> bool {
        self.select_on_start
    }

    pub fn tracker(&self) -> TemplateConfig {
        self.tracker
    }

    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            servo: self.servo,
            explicit_stop: self.explicit_stop,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

fn input_from_args(args: &Args) -> Result<Input> {
    let input = args.input.trim();
    if input.is_empty() {
        bail!("input is required");
    }
    match args.input_format {
        InputFormat::Raw => {
            let (Some(width), Some(height)) = (args.width, args.height) else {
                bail!("raw input needs --width and --height");
            };
            if width == 0 || height == 0 {
                bail!("frame size must be non-zero");
            }
            Ok(Input::Raw {
                path: PathBuf::from(input),
                width,
                height,
            })
        }
        InputFormat::Ffmpeg => {
            if cfg!(not(feature = "ffmpeg")) {
                bail!("ffmpeg input needs a build with the `ffmpeg` feature");
            }
            Ok(Input::Ffmpeg {
                url: input.to_string(),
            })
        }
    }
}
