use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use super::SharedApp;
use crate::bridge::StatusDisplay;
use crate::viewport::{handle_resize, Viewport};

/// The page element that shows bridge text, looked up by id on every write.
pub struct StatusElement {
    document: Document,
    id: String,
}

impl StatusElement {
    pub fn new(document: Document, id: &str) -> Self {
        Self {
            document,
            id: id.to_string(),
        }
    }
}

impl StatusDisplay for StatusElement {
    fn set_text(&self, text: &str) {
        match self.document.get_element_by_id(&self.id) {
            Some(element) => element.set_text_content(Some(text)),
            None => log::error!("No #{} element in the page, dropped status text {text:?}", self.id),
        }
    }
}

/// Current `innerWidth` x `innerHeight` of the window.
pub fn viewport(window: &Window) -> Viewport {
    let px = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    Viewport::new(px(window.inner_width()), px(window.inner_height()))
}

/// Re-fit camera and canvas on every `resize` event.
pub fn watch_resize(window: &Window, app: SharedApp) -> Result<(), JsValue> {
    let source = window.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let mut app = app.borrow_mut();
        handle_resize(&mut *app, viewport(&source));
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}
