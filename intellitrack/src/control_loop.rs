use crate::error::RoiError;
use crate::frame::Frame;
use crate::frame_feed::FrameSource;
use crate::geometry::BoundingBox;
use crate::ptz::PtzController;
use crate::servo::{ServoConfig, VisualServo};
use crate::tracker::ObjectTracker;
use crate::transport::CommandSink;
use crate::visca::PtzCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    Idle,
    Tracking,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No frame was ready; nothing else happened.
    NoFrame,
    /// A frame arrived but there is no active track.
    Idle,
    /// The target was relocated. `command` is what went to the camera, if
    /// actuation is enabled.
    Tracked {
        bbox: BoundingBox,
        command: Option<PtzCommand>,
    },
    /// The tracker lost the target this tick; the loop is Idle again.
    Lost,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopOptions {
    pub servo: ServoConfig,
    /// Send a stop command when motion commands cease (target lost, actuation
    /// muted, shutdown) instead of relying on the camera to halt on silence.
    pub explicit_stop: bool,
}

/// Owns the tracker and the camera link and steps them once per tick.
pub struct ControlLoop<T: ObjectTracker, S: CommandSink> {
    tracker: T,
    ptz: PtzController<S>,
    servo: VisualServo,
    explicit_stop: bool,
    state: TrackState,
    actuation_enabled: bool,
    latest_frame: Option<Frame>,
}

impl<T: ObjectTracker, S: CommandSink> ControlLoop<T, S> {
    pub fn new(tracker: T, ptz: PtzController<S>, options: LoopOptions) -> Self {
        Self {
            tracker,
            ptz,
            servo: VisualServo::new(options.servo),
            explicit_stop: options.explicit_stop,
            state: TrackState::Idle,
            actuation_enabled: false,
            latest_frame: None,
        }
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn actuation_enabled(&self) -> bool {
        self.actuation_enabled
    }

    pub fn latest_frame(&self) -> Option<&Frame> {
        self.latest_frame.as_ref()
    }

    /// The only way into Tracking. Degenerate regions never reach the tracker.
    /// Actuation is switched on when the tracker accepts the region.
    pub fn select_roi(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), RoiError> {
        bbox.validate()?;
        if !self.tracker.init(frame, bbox) {
            self.enter_idle("tracker rejected region");
            return Err(RoiError::Rejected);
        }
        self.state = TrackState::Tracking;
        self.actuation_enabled = true;
        tracing::info!("tracking {} on {}x{} frame", bbox, frame.width, frame.height);
        Ok(())
    }

    /// Selects `bbox` on the most recent frame seen by [`tick`](Self::tick).
    pub fn select_roi_on_latest(&mut self, bbox: BoundingBox) -> Result<(), RoiError> {
        let frame = self.latest_frame.take().ok_or(RoiError::NoFrame)?;
        let result = self.select_roi(&frame, bbox);
        self.latest_frame = Some(frame);
        result
    }

    /// Mutes or resumes camera commands without touching the tracker.
    pub fn toggle_actuation(&mut self) -> bool {
        self.actuation_enabled = !self.actuation_enabled;
        tracing::info!(
            "actuation {}",
            if self.actuation_enabled { "on" } else { "off" }
        );
        if !self.actuation_enabled && self.state == TrackState::Tracking && self.explicit_stop {
            self.ptz.stop();
        }
        self.actuation_enabled
    }

    pub fn tick(&mut self, source: &mut impl FrameSource) -> TickOutcome {
        let Some(frame) = source.next_frame() else {
            return TickOutcome::NoFrame;
        };
        let outcome = self.process_frame(&frame);
        self.latest_frame = Some(frame);
        outcome
    }

    pub fn process_frame(&mut self, frame: &Frame) -> TickOutcome {
        if self.state == TrackState::Idle {
            return TickOutcome::Idle;
        }
        let Some(bbox) = self.tracker.update(frame) else {
            self.enter_idle("target lost");
            return TickOutcome::Lost;
        };
        if !self.actuation_enabled {
            return TickOutcome::Tracked {
                bbox,
                command: None,
            };
        }
        let command = self.servo.command(&bbox, frame.width, frame.height);
        tracing::debug!(
            "target {} -> pan {} tilt {}",
            bbox,
            command.pan_speed(),
            command.tilt_speed()
        );
        self.ptz.send_command(&command);
        TickOutcome::Tracked {
            bbox,
            command: Some(command),
        }
    }

    /// Halts the camera if configured to, then releases the socket.
    pub fn shutdown(&mut self) {
        self.enter_idle("shutdown");
        self.ptz.close();
        tracing::info!("control loop shut down");
    }

    /// Every Tracking -> Idle transition goes through here, so a moving
    /// camera gets its single stop when `explicit_stop` is set.
    fn enter_idle(&mut self, reason: &str) {
        if self.state == TrackState::Tracking {
            tracing::info!("tracking -> idle: {}", reason);
            if self.explicit_stop && self.actuation_enabled {
                self.ptz.stop();
            }
        }
        self.state = TrackState::Idle;
    }
}
