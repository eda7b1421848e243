//! Optional immersive-display entry point.
//!
//! When the browser exposes WebXR, an entry-point helper module is fetched at
//! run time and asked to build a control (the "Enter XR" button) bound to the
//! renderer. Nothing else waits on this: the render loop runs in non-immersive
//! mode whether the load succeeds, fails, or is still in flight.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::error::XrLoadError;

/// Loader progress. `Unsupported`, `Attached` and `LoadFailed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XrState {
    #[default]
    Unchecked,
    Unsupported,
    Checking,
    Attached,
    LoadFailed,
}

/// Final result of a load.
#[derive(Debug)]
pub enum XrOutcome<C> {
    Attached(C),
    Unsupported,
    LoadFailed(XrLoadError),
}

impl<C> XrOutcome<C> {
    pub fn state(&self) -> XrState {
        match self {
            XrOutcome::Attached(_) => XrState::Attached,
            XrOutcome::Unsupported => XrState::Unsupported,
            XrOutcome::LoadFailed(_) => XrState::LoadFailed,
        }
    }
}

/// Shared view of the loader state, so the spawner can observe progress
/// without awaiting the load.
#[derive(Debug, Clone, Default)]
pub struct XrStatus(Rc<Cell<XrState>>);

impl XrStatus {
    pub fn get(&self) -> XrState {
        self.0.get()
    }

    fn set(&self, state: XrState) {
        log::debug!("XR loader: {:?} -> {:?}", self.0.get(), state);
        self.0.set(state);
    }
}

/// Host services the loader needs.
pub trait XrPlatform {
    /// The fetched helper module.
    type Module;
    /// The entry-point control built by the module.
    type Control;

    /// Whether the host advertises immersive display at all.
    fn xr_available(&self) -> bool;

    fn load_module(&self, url: &str) -> impl Future<Output = Result<Self::Module, XrLoadError>>;

    /// Build the entry-point control, bound to the renderer.
    fn create_control(&self, module: &Self::Module) -> Result<Self::Control, XrLoadError>;

    /// Insert the control into the page.
    fn attach_control(&self, control: &Self::Control) -> Result<(), XrLoadError>;
}

/// Check for XR support and, if present, fetch the helper module and attach
/// its control. Dropping the returned future cancels the load.
pub async fn load_entry_point<P: XrPlatform>(
    platform: &P,
    module_url: &str,
    status: &XrStatus,
) -> XrOutcome<P::Control> {
    if !platform.xr_available() {
        status.set(XrState::Unsupported);
        log::warn!("WebXR not supported on this device");
        return XrOutcome::Unsupported;
    }

    status.set(XrState::Checking);
    match build_control(platform, module_url).await {
        Ok(control) => {
            status.set(XrState::Attached);
            log::info!("WebXR supported");
            XrOutcome::Attached(control)
        }
        Err(e) => {
            status.set(XrState::LoadFailed);
            log::error!("XR entry point failed to load: {e}");
            XrOutcome::LoadFailed(e)
        }
    }
}

async fn build_control<P: XrPlatform>(platform: &P, module_url: &str) -> Result<P::Control, XrLoadError> {
    let module = platform.load_module(module_url).await?;
    let control = platform.create_control(&module)?;
    platform.attach_control(&control)?;
    Ok(control)
}
