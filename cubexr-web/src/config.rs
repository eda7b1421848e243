use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where the WebXR entry-point helper is fetched from.
pub const DEFAULT_XR_MODULE_URL: &str = "https://unpkg.com/three@0.158.0/examples/jsm/webxr/XRButton.js";

/// Launch configuration. Every field has a default, so a page may pass any
/// subset as JSON (or nothing at all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance the camera sits back from the origin along +Z.
    pub camera_z: f32,
    /// Radians added to the cube's X and Y rotation every frame.
    pub rotation_step: f32,
    pub antialias: bool,
    pub clear_color: [f64; 4],
    /// Id of the page element that mirrors bridge traffic.
    pub status_element_id: String,
    /// Name under `window.webkit.messageHandlers` the native host listens on.
    pub host_handler: String,
    pub xr_enabled: bool,
    pub xr_module_url: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 3.0,
            rotation_step: 0.01,
            antialias: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            status_element_id: "status".to_string(),
            host_handler: "iosListener".to_string(),
            xr_enabled: true,
            xr_module_url: DEFAULT_XR_MODULE_URL.to_string(),
        }
    }
}

impl DemoConfig {
    /// Parse a JSON override document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0) {
            return Err(ConfigError::Invalid(format!("near must be positive, got {}", self.near)));
        }
        if !(self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "far ({}) must be greater than near ({})",
                self.far, self.near
            )));
        }
        if !self.rotation_step.is_finite() {
            return Err(ConfigError::Invalid("rotation_step must be finite".into()));
        }
        if self.status_element_id.is_empty() {
            return Err(ConfigError::Invalid("status_element_id is empty".into()));
        }
        if self.host_handler.is_empty() {
            return Err(ConfigError::Invalid("host_handler is empty".into()));
        }
        Ok(())
    }
}
