use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while mounting or configuring the page effects.
#[derive(Error, Debug)]
pub enum FxError {
    /// No global `window` (not running in a browser).
    #[error("no window")]
    NoWindow,

    /// Window has no `document`.
    #[error("no document")]
    NoDocument,

    /// Rejected configuration value.
    #[error("invalid config: {0}")]
    Config(String),

    /// Exception surfaced by a DOM call.
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for FxError {
    fn from(value: JsValue) -> Self {
        FxError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<FxError> for JsValue {
    fn from(err: FxError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type FxResult<T> = Result<T, FxError>;
