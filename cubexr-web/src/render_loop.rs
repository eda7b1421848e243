use glam::Vec3;

use crate::app::AppContext;
use crate::renderer::Renderer;
use crate::scene::RenderableObject;

/// Whether the frame scheduler should request another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Turn `object` by `step` radians about X and Y.
///
/// The step is per frame, not per second, so spin speed follows the display's
/// refresh rate.
pub fn spin(object: &mut RenderableObject, step: f32) {
    object.rotate_by(Vec3::new(step, step, 0.0));
}

/// One scheduler callback. A render error ends the loop: it is logged and no
/// further frame is requested.
pub fn drive<R: Renderer>(ctx: &mut AppContext<R>) -> LoopControl {
    match ctx.frame() {
        Ok(()) => LoopControl::Continue,
        Err(e) => {
            log::error!("Render loop stopped after {} frames: {e}", ctx.frames());
            LoopControl::Stop
        }
    }
}

/// Frame-request bookkeeping for the scheduler callback.
///
/// Frames always come from the window's refresh. An XR session only marks the
/// gate as presenting; the loop keeps its cadence. Once a frame fails the gate
/// is closed for good and later callbacks draw nothing.
#[derive(Debug, Default)]
pub struct FrameGate {
    stopped: bool,
    presenting: bool,
}

impl FrameGate {
    /// Run one frame unless the loop has stopped. Returns whether another
    /// frame should be requested.
    pub fn tick<R: Renderer>(&mut self, ctx: &mut AppContext<R>) -> bool {
        if self.stopped {
            return false;
        }
        if drive(ctx) == LoopControl::Stop {
            self.stopped = true;
        }
        !self.stopped
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn session_started(&mut self) {
        self.presenting = true;
    }

    pub fn session_ended(&mut self) {
        self.presenting = false;
    }

    pub fn is_presenting(&self) -> bool {
        self.presenting
    }
}
