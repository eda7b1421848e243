use std::future::Future;

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, EventTarget, HtmlCanvasElement, HtmlElement, Navigator};

use super::describe;
use super::frames::AnimationLoop;
use crate::error::XrLoadError;
use crate::xr::XrPlatform;

#[wasm_bindgen(inline_js = "export function import_module(url) { return import(url); }")]
extern "C" {
    fn import_module(url: &str) -> Promise;
}

/// Browser side of the XR loader: `navigator.xr` probe, dynamic `import()` of
/// the helper module, and insertion of its button into the page body.
pub struct WebXrPlatform {
    navigator: Navigator,
    body: HtmlElement,
    binding: JsValue,
}

impl WebXrPlatform {
    /// `binding` is what the helper's factory receives as its renderer.
    pub fn new(navigator: Navigator, body: HtmlElement, binding: JsValue) -> Self {
        Self { navigator, body, binding }
    }
}

impl XrPlatform for WebXrPlatform {
    type Module = JsValue;
    type Control = Element;

    fn xr_available(&self) -> bool {
        Reflect::get(&self.navigator, &JsValue::from_str("xr"))
            .map(|xr| !xr.is_undefined() && !xr.is_null())
            .unwrap_or(false)
    }

    fn load_module(&self, url: &str) -> impl Future<Output = Result<JsValue, XrLoadError>> {
        let url = url.to_string();
        let import = JsFuture::from(import_module(&url));
        async move {
            import.await.map_err(|e| XrLoadError::Fetch {
                url,
                reason: describe(&e),
            })
        }
    }

    fn create_control(&self, module: &JsValue) -> Result<Element, XrLoadError> {
        let xr_button = Reflect::get(module, &JsValue::from_str("XRButton"))
            .ok()
            .filter(|v| v.is_object() || v.is_function())
            .ok_or(XrLoadError::MissingExport("XRButton"))?;
        let create_button = Reflect::get(&xr_button, &JsValue::from_str("createButton"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(XrLoadError::MissingExport("XRButton.createButton"))?;

        create_button
            .call1(&xr_button, &self.binding)
            .map_err(|e| XrLoadError::Factory(describe(&e)))?
            .dyn_into::<Element>()
            .map_err(|_| XrLoadError::Factory("createButton did not return an element".into()))
    }

    fn attach_control(&self, control: &Element) -> Result<(), XrLoadError> {
        self.body
            .append_child(control)
            .map(|_| ())
            .map_err(|e| XrLoadError::Factory(describe(&e)))
    }
}

/// The object handed to the entry-point factory in place of a renderer.
///
/// Exposes `domElement`, `xr.enabled`, and `xr.setSession(session)`. A session
/// passed to `setSession` is tracked until it emits `end`; frames keep coming
/// from the window.
pub fn renderer_binding(canvas: &HtmlCanvasElement, animation: &AnimationLoop) -> Result<JsValue, JsValue> {
    let xr = Object::new();
    Reflect::set(&xr, &JsValue::from_str("enabled"), &JsValue::TRUE)?;

    let looper = animation.clone();
    let set_session = Closure::<dyn FnMut(JsValue) -> Promise>::new(move |session: JsValue| {
        if session.is_null() || session.is_undefined() {
            looper.exit_session();
            return Promise::resolve(&JsValue::UNDEFINED);
        }

        let ended = looper.clone();
        let on_end = Closure::once_into_js(move || ended.exit_session());
        if let Some(target) = session.dyn_ref::<EventTarget>() {
            if let Err(e) = target.add_event_listener_with_callback("end", on_end.unchecked_ref()) {
                log::warn!("Could not watch XR session end: {}", describe(&e));
            }
        }

        looper.enter_session();
        Promise::resolve(&JsValue::UNDEFINED)
    });
    Reflect::set(&xr, &JsValue::from_str("setSession"), set_session.as_ref())?;
    set_session.forget();

    let binding = Object::new();
    Reflect::set(&binding, &JsValue::from_str("xr"), &xr)?;
    Reflect::set(&binding, &JsValue::from_str("domElement"), canvas)?;
    Ok(binding.into())
}
