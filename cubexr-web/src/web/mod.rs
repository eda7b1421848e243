//! Browser wiring: everything that touches `window`, the DOM, or the GPU.

mod dom;
mod frames;
mod gpu;
mod host;
mod xr;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::app::AppContext;
use crate::bridge::{BridgeReceiver, BridgeSender, MessageChannel, StatusDisplay};
use crate::config::DemoConfig;
use crate::error::LaunchError;
use crate::xr::{load_entry_point, XrStatus};

pub(crate) type SharedApp = Rc<RefCell<AppContext<gpu::GpuRenderer>>>;

/// Build the renderer, scene, bridge, and loops in the current page.
pub async fn launch(config: DemoConfig) -> Result<(), LaunchError> {
    let window = web_sys::window().ok_or(LaunchError::NoWindow)?;
    let document = window.document().ok_or(LaunchError::NoDocument)?;
    let body = document.body().ok_or(LaunchError::NoBody)?;

    let canvas = document
        .create_element("canvas")
        .map_err(dom_error)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| LaunchError::Dom("created element is not a canvas".into()))?;
    body.append_child(&canvas).map_err(dom_error)?;

    let viewport = dom::viewport(&window);
    let renderer = gpu::GpuRenderer::new(canvas.clone(), viewport, config.antialias).await?;
    let app: SharedApp = Rc::new(RefCell::new(AppContext::bootstrap(&config, viewport, renderer)));
    let animation = frames::AnimationLoop::new(window.clone(), app.clone());

    if config.xr_enabled {
        let binding = xr::renderer_binding(&canvas, &animation).map_err(dom_error)?;
        let platform = xr::WebXrPlatform::new(window.navigator(), body.clone(), binding);
        let module_url = config.xr_module_url.clone();
        let status = XrStatus::default();
        let loader = status.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = load_entry_point(&platform, &module_url, &loader).await;
            log::info!("XR loader finished: {:?}", outcome.state());
        });
        log::debug!("XR loader spawned in state {:?}", status.get());
    }

    let status: Rc<dyn StatusDisplay> = Rc::new(dom::StatusElement::new(document, &config.status_element_id));
    let channel = host::WebKitChannel::resolve(&window, &config.host_handler);
    match &channel {
        Some(_) => log::info!("Native host channel `{}` found", config.host_handler),
        None => log::info!("No native host channel, bridge messages go to the console and #{}", config.status_element_id),
    }
    let sender = BridgeSender::new(channel.map(|c| Box::new(c) as Box<dyn MessageChannel>), status.clone());
    let receiver = Rc::new(BridgeReceiver::new(sender, status));
    host::register_entry_points(&window, &app, &receiver).map_err(dom_error)?;

    dom::watch_resize(&window, app).map_err(dom_error)?;
    animation.start().map_err(dom_error)?;

    Ok(())
}

fn dom_error(e: JsValue) -> LaunchError {
    LaunchError::Dom(describe(&e))
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
