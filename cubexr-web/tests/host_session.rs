//! End-to-end runs of the page logic against in-memory host services.

use std::cell::RefCell;
use std::future::Future;
use std::pin::{pin, Pin};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use cubexr_web::app::AppContext;
use cubexr_web::bridge::{BridgeReceiver, BridgeSender, HostCommand, MessageChannel, StatusDisplay, RESET_ACK, START_ACK};
use cubexr_web::config::DemoConfig;
use cubexr_web::error::{RenderError, XrLoadError};
use cubexr_web::render_loop::{drive, LoopControl};
use cubexr_web::renderer::Renderer;
use cubexr_web::scene::{PerspectiveCamera, Scene};
use cubexr_web::viewport::{handle_resize, Viewport};
use cubexr_web::xr::{load_entry_point, XrOutcome, XrPlatform, XrState, XrStatus};
use glam::Vec3;

#[derive(Default)]
struct HeadlessRenderer {
    size: (u32, u32),
    frames: usize,
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        assert_eq!(scene.len(), 1);
        assert!(camera.aspect.is_finite());
        self.frames += 1;
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

/// Page body: records text and appended controls.
#[derive(Default)]
struct Page {
    status: RefCell<String>,
    controls: RefCell<Vec<String>>,
}

impl StatusDisplay for Page {
    fn set_text(&self, text: &str) {
        *self.status.borrow_mut() = text.to_string();
    }
}

#[derive(Clone, Default)]
struct NativeHost(Rc<RefCell<Vec<String>>>);

impl MessageChannel for NativeHost {
    fn post_message(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

/// Browser without `navigator.xr`.
struct NoXr<'a>(&'a Page);

impl XrPlatform for NoXr<'_> {
    type Module = ();
    type Control = String;

    fn xr_available(&self) -> bool {
        false
    }

    fn load_module(&self, _url: &str) -> impl Future<Output = Result<(), XrLoadError>> {
        std::future::ready(Ok(()))
    }

    fn create_control(&self, _module: &()) -> Result<String, XrLoadError> {
        Ok("ENTER XR".into())
    }

    fn attach_control(&self, control: &String) -> Result<(), XrLoadError> {
        self.0.controls.borrow_mut().push(control.clone());
        Ok(())
    }
}

/// Browser with `navigator.xr` whose helper module fails to import.
struct OfflineXr<'a>(&'a Page);

impl XrPlatform for OfflineXr<'_> {
    type Module = ();
    type Control = String;

    fn xr_available(&self) -> bool {
        true
    }

    fn load_module(&self, url: &str) -> impl Future<Output = Result<(), XrLoadError>> {
        std::future::ready(Err(XrLoadError::Fetch {
            url: url.to_string(),
            reason: "network unreachable".into(),
        }))
    }

    fn create_control(&self, _module: &()) -> Result<String, XrLoadError> {
        Ok("ENTER XR".into())
    }

    fn attach_control(&self, control: &String) -> Result<(), XrLoadError> {
        self.0.controls.borrow_mut().push(control.clone());
        Ok(())
    }
}

type Pending = Rc<RefCell<Option<Result<(), XrLoadError>>>>;

/// Module import that completes only when the test fills the slot.
struct SlowImport(Pending);

impl Future for SlowImport {
    type Output = Result<(), XrLoadError>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.0.borrow_mut().take() {
            Some(result) => Poll::Ready(result),
            None => Poll::Pending,
        }
    }
}

/// Browser with `navigator.xr` on a slow network.
struct SlowXr<'a>(&'a Page, Pending);

impl XrPlatform for SlowXr<'_> {
    type Module = ();
    type Control = String;

    fn xr_available(&self) -> bool {
        true
    }

    fn load_module(&self, _url: &str) -> impl Future<Output = Result<(), XrLoadError>> {
        SlowImport(self.1.clone())
    }

    fn create_control(&self, _module: &()) -> Result<String, XrLoadError> {
        Ok("ENTER XR".into())
    }

    fn attach_control(&self, control: &String) -> Result<(), XrLoadError> {
        self.0.controls.borrow_mut().push(control.clone());
        Ok(())
    }
}

struct NoopWake;

impl Wake for NoopWake {
    fn wake(self: Arc<Self>) {}
}

fn context() -> AppContext<HeadlessRenderer> {
    AppContext::bootstrap(&DemoConfig::default(), Viewport::new(1170, 2532), HeadlessRenderer::default())
}

#[test]
fn xr_absent_attaches_nothing_and_frames_still_render() {
    let page = Page::default();
    let status = XrStatus::default();
    let mut ctx = context();

    let outcome = pollster::block_on(load_entry_point(&NoXr(&page), &DemoConfig::default().xr_module_url, &status));

    assert!(matches!(outcome, XrOutcome::Unsupported));
    assert_eq!(status.get(), XrState::Unsupported);
    assert!(page.controls.borrow().is_empty());
    assert_eq!(drive(&mut ctx), LoopControl::Continue);
    assert_eq!(ctx.renderer.frames, 1);
}

#[test]
fn xr_load_failure_leaves_rendering_untouched() {
    let page = Page::default();
    let status = XrStatus::default();
    let mut ctx = context();

    drive(&mut ctx);
    let outcome = pollster::block_on(load_entry_point(&OfflineXr(&page), "https://cdn.invalid/XRButton.js", &status));
    drive(&mut ctx);

    assert!(matches!(outcome, XrOutcome::LoadFailed(XrLoadError::Fetch { .. })));
    assert_eq!(status.get(), XrState::LoadFailed);
    assert!(page.controls.borrow().is_empty());
    assert_eq!(ctx.renderer.frames, 2);
}

#[test]
fn frames_render_while_xr_module_is_loading() {
    let page = Page::default();
    let slot = Pending::default();
    let platform = SlowXr(&page, slot.clone());
    let status = XrStatus::default();
    let mut ctx = context();
    let waker = Waker::from(Arc::new(NoopWake));
    let mut cx = Context::from_waker(&waker);

    let config = DemoConfig::default();
    let mut load = pin!(load_entry_point(&platform, &config.xr_module_url, &status));
    assert!(load.as_mut().poll(&mut cx).is_pending());
    assert_eq!(status.get(), XrState::Checking);

    for _ in 0..3 {
        assert_eq!(drive(&mut ctx), LoopControl::Continue);
        assert!(load.as_mut().poll(&mut cx).is_pending());
    }
    assert_eq!(status.get(), XrState::Checking);
    assert!(page.controls.borrow().is_empty());

    *slot.borrow_mut() = Some(Ok(()));
    assert!(matches!(load.as_mut().poll(&mut cx), Poll::Ready(XrOutcome::Attached(_))));
    assert_eq!(status.get(), XrState::Attached);
    assert_eq!(*page.controls.borrow(), vec!["ENTER XR".to_string()]);

    assert_eq!(drive(&mut ctx), LoopControl::Continue);
    assert_eq!(ctx.renderer.frames, 4);
}

#[test]
fn unhosted_session_mirrors_bridge_traffic_to_status() {
    let page = Rc::new(Page::default());
    let receiver = BridgeReceiver::new(BridgeSender::new(None, page.clone()), page.clone());
    let mut ctx = context();

    for _ in 0..90 {
        drive(&mut ctx);
    }
    receiver.dispatch(&mut ctx, HostCommand::Start);
    assert_eq!(ctx.cube().rotation(), Vec3::ZERO);
    assert_eq!(*page.status.borrow(), START_ACK);

    receiver.dispatch(&mut ctx, HostCommand::PushText("Hello from Swift".into()));
    assert_eq!(*page.status.borrow(), "Hello from Swift");

    drive(&mut ctx);
    receiver.dispatch(&mut ctx, HostCommand::Reset);
    assert_eq!(ctx.cube().rotation(), Vec3::ZERO);
    assert_eq!(*page.status.borrow(), RESET_ACK);
}

#[test]
fn hosted_session_forwards_acks_and_keeps_status() {
    let page = Rc::new(Page::default());
    let host = NativeHost::default();
    let receiver = BridgeReceiver::new(BridgeSender::new(Some(Box::new(host.clone())), page.clone()), page.clone());
    let mut ctx = context();

    drive(&mut ctx);
    receiver.dispatch(&mut ctx, HostCommand::Start);
    drive(&mut ctx);
    receiver.dispatch(&mut ctx, HostCommand::Reset);

    assert_eq!(*host.0.borrow(), vec![START_ACK.to_string(), RESET_ACK.to_string()]);
    assert_eq!(*page.status.borrow(), "");

    receiver.dispatch(&mut ctx, HostCommand::PushText("status from host".into()));
    assert_eq!(*page.status.borrow(), "status from host");
    assert_eq!(host.0.borrow().len(), 2);
}

#[test]
fn resizes_interleave_with_frames() {
    let mut ctx = context();
    let sizes = [(1170, 2532), (2532, 1170), (800, 600), (800, 601)];

    for &(w, h) in &sizes {
        drive(&mut ctx);
        handle_resize(&mut ctx, Viewport::new(w, h));
        assert_eq!(ctx.camera.aspect, w as f32 / h as f32);
        assert_eq!(ctx.renderer.size(), (w, h));
    }
    assert_eq!(ctx.renderer.frames, sizes.len());
}
