use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{describe, SharedApp};
use crate::bridge::{BridgeReceiver, HostCommand, MessageChannel};
use crate::bridge::{PUSH_TEXT_ENTRY_POINT, RESET_ENTRY_POINT, START_ENTRY_POINT};

/// `window.webkit.messageHandlers.<name>`, injected by a `WKWebView` host.
pub struct WebKitChannel {
    handler: JsValue,
    post: Function,
}

impl WebKitChannel {
    /// Look the handler up once. `None` when the page is not hosted or the
    /// host registered no handler under `name`.
    pub fn resolve(window: &Window, name: &str) -> Option<Self> {
        let webkit = property(window, "webkit")?;
        let handlers = property(&webkit, "messageHandlers")?;
        let handler = property(&handlers, name)?;
        let post = Reflect::get(&handler, &JsValue::from_str("postMessage"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(Self { handler, post })
    }
}

impl MessageChannel for WebKitChannel {
    fn post_message(&self, message: &str) {
        if let Err(e) = self.post.call1(&self.handler, &JsValue::from_str(message)) {
            log::error!("postMessage to native host failed: {}", describe(&e));
        }
    }
}

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).ok().filter(|v| v.is_object())
}

/// Publish the host-callable functions as globals on `window`.
pub fn register_entry_points(window: &Window, app: &SharedApp, receiver: &Rc<BridgeReceiver>) -> Result<(), JsValue> {
    let (start_app, start_receiver) = (app.clone(), receiver.clone());
    expose(
        window,
        START_ENTRY_POINT,
        Closure::<dyn Fn()>::new(move || {
            start_receiver.dispatch(&mut *start_app.borrow_mut(), HostCommand::Start);
        }),
    )?;

    let (reset_app, reset_receiver) = (app.clone(), receiver.clone());
    expose(
        window,
        RESET_ENTRY_POINT,
        Closure::<dyn Fn()>::new(move || {
            reset_receiver.dispatch(&mut *reset_app.borrow_mut(), HostCommand::Reset);
        }),
    )?;

    let (push_app, push_receiver) = (app.clone(), receiver.clone());
    expose(
        window,
        PUSH_TEXT_ENTRY_POINT,
        Closure::<dyn Fn(JsValue)>::new(move |text: JsValue| {
            push_receiver.dispatch(&mut *push_app.borrow_mut(), HostCommand::PushText(js_string(&text)));
        }),
    )?;

    log::debug!("Registered {START_ENTRY_POINT}, {RESET_ENTRY_POINT}, {PUSH_TEXT_ENTRY_POINT}");
    Ok(())
}

fn expose<F: ?Sized + WasmClosure>(window: &Window, name: &str, closure: Closure<F>) -> Result<(), JsValue> {
    Reflect::set(window, &JsValue::from_str(name), closure.as_ref())?;
    // Host entry points live as long as the page.
    closure.forget();
    Ok(())
}

/// JS `String(value)`.
fn js_string(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    Reflect::get(&js_sys::global(), &JsValue::from_str("String"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .and_then(|f| f.call1(&JsValue::UNDEFINED, value).ok())
        .and_then(|s| s.as_string())
        .unwrap_or_default()
}
