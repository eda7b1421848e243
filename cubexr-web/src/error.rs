use thiserror::Error;

/// Invalid or unparseable launch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure while drawing a frame. Fatal to the render loop.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface texture error: {0}")]
    Surface(String),
    #[error("device lost: {0}")]
    DeviceLost(String),
}

/// Failure while fetching or instantiating the XR entry-point helper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum XrLoadError {
    #[error("failed to load module from {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("module does not export `{0}`")]
    MissingExport(&'static str),
    #[error("entry-point factory failed: {0}")]
    Factory(String),
}

/// Failure while building the demo in the page.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("GPU initialization failed: {0}")]
    Gpu(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
