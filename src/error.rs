//! Error type for the fallible edges of the crate: configuration and the browser canvas.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("config parse failed: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("canvas call failed: {0}")]
    Js(String),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
