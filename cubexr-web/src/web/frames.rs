use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{describe, SharedApp};
use crate::render_loop::FrameGate;

/// Per-refresh driver for the render loop, fed by
/// `window.requestAnimationFrame`.
///
/// An XR session started from the entry-point button does not take over
/// scheduling: the session has no base layer, so its own frame callbacks would
/// never fire. The loop keeps drawing to the page canvas while it presents.
#[derive(Clone)]
pub struct AnimationLoop {
    window: Window,
    gate: Rc<RefCell<FrameGate>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(JsValue)>>>>,
}

impl AnimationLoop {
    pub fn new(window: Window, app: SharedApp) -> Self {
        let this = AnimationLoop {
            window,
            gate: Rc::new(RefCell::new(FrameGate::default())),
            callback: Rc::new(RefCell::new(None)),
        };

        // The closure holds a handle to its own loop, so it is never freed.
        let looper = this.clone();
        *this.callback.borrow_mut() = Some(Closure::new(move |_time: JsValue| {
            let again = looper.gate.borrow_mut().tick(&mut *app.borrow_mut());
            if again {
                if let Err(e) = looper.schedule() {
                    log::error!("Failed to schedule next frame: {}", describe(&e));
                }
            }
        }));

        this
    }

    pub fn start(&self) -> Result<(), JsValue> {
        log::info!("Render loop started");
        self.schedule()
    }

    pub fn enter_session(&self) {
        self.gate.borrow_mut().session_started();
        log::info!("XR session started, frames stay on the page canvas");
    }

    pub fn exit_session(&self) {
        let mut gate = self.gate.borrow_mut();
        if !gate.is_presenting() {
            return;
        }
        gate.session_ended();
        log::info!("XR session ended");
    }

    fn schedule(&self) -> Result<(), JsValue> {
        if self.gate.borrow().is_stopped() {
            return Ok(());
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        self.window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(())
    }
}
