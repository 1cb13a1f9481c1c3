use crate::frame::Frame;
use crate::geometry::BoundingBox;

/// Any single-target visual tracker.
///
/// `init` locks onto `bbox` in `frame` and reports whether the region was
/// accepted. `update` relocates the target in a later frame and returns
/// `None` once it can no longer be found (occlusion, exit from the frame,
/// unrecoverable drift); the tracker must then be re-initialised.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> bool;
    fn update(&mut self, frame: &Frame) -> Option<BoundingBox>;
}
