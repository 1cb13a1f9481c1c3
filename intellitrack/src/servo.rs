use crate::geometry::{BoundingBox, TargetOffset};
use crate::visca::PtzCommand;

pub const DEFAULT_GAIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoConfig {
    /// Proportional gain from normalized offset to protocol speed units.
    pub gain: f64,
    /// Offsets with a smaller magnitude than this produce no motion on that axis.
    pub deadband: f64,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            gain: DEFAULT_GAIN,
            deadband: 0.0,
        }
    }
}

/// Proportional controller turning a tracked box into a pan/tilt velocity.
#[derive(Debug, Clone, Copy)]
pub struct VisualServo {
    config: ServoConfig,
}

impl VisualServo {
    pub fn new(config: ServoConfig) -> Self {
        Self { config }
    }

    pub fn offset(bbox: &BoundingBox, frame_width: usize, frame_height: usize) -> TargetOffset {
        let (cx, cy) = bbox.center();
        TargetOffset {
            dx: normalize(cx, frame_width),
            dy: normalize(cy, frame_height),
        }
    }

    pub fn command(&self, bbox: &BoundingBox, frame_width: usize, frame_height: usize) -> PtzCommand {
        let offset = Self::offset(bbox, frame_width, frame_height);
        // Image y grows downward while tilt-up is the positive direction.
        let pan = self.axis_speed(offset.dx);
        let tilt = self.axis_speed(-offset.dy);
        tracing::trace!(dx = offset.dx, dy = offset.dy, pan, tilt, "servo output");
        PtzCommand::from_speeds(pan, tilt)
    }

    fn axis_speed(&self, offset: f64) -> i32 {
        if offset.abs() < self.config.deadband {
            return 0;
        }
        (offset * self.config.gain).round() as i32
    }
}

fn normalize(position: f64, extent: usize) -> f64 {
    if extent == 0 {
        return 0.0;
    }
    let half = extent as f64 / 2.0;
    ((position - half) / half).clamp(-1.0, 1.0)
}
