use crate::extensions::result_ext::ResultExt;
use crate::framing::{Framer, Framing};
use crate::transport::CommandSink;
use crate::visca::PtzCommand;

/// Best-effort pan/tilt actuation. Nothing here ever reports a send failure
/// to the caller.
pub struct PtzController<S: CommandSink> {
    sink: S,
    framer: Framer,
    closed: bool,
    failing: bool,
}

impl<S: CommandSink> PtzController<S> {
    pub fn new(sink: S, framing: Framing) -> Self {
        Self {
            sink,
            framer: Framer::new(framing),
            closed: false,
            failing: false,
        }
    }

    /// Positive speeds pan right and tilt up; out-of-range values saturate.
    pub fn pan_tilt(&mut self, pan_speed: i32, tilt_speed: i32) {
        self.send_command(&PtzCommand::from_speeds(pan_speed, tilt_speed));
    }

    pub fn send_command(&mut self, command: &PtzCommand) {
        if self.closed {
            return;
        }
        let payload = self.framer.wrap(command);
        let result = self.sink.send(&payload);
        // Only the first failure of a run is a warning.
        let result = if self.failing {
            result.debug_context("pan/tilt send")
        } else {
            result.warn_context("pan/tilt send")
        };
        if result.is_ok() && self.failing {
            tracing::info!("camera link recovered");
        }
        self.failing = result.is_err();
    }

    pub fn stop(&mut self) {
        self.send_command(&PtzCommand::stop());
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.sink.close();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
