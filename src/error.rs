use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("WebGL2 is not available on surface `{0}`")]
    WebGlUnavailable(String),

    #[error("shader compilation failed: {0}")]
    Shader(String),

    #[error("program link failed: {0}")]
    Link(String),

    #[error("GPU resource allocation failed: {0}")]
    Gpu(&'static str),

    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("browser call failed: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(target_arch = "wasm32")]
mod js {
    use super::Error;
    use wasm_bindgen::JsValue;

    impl From<JsValue> for Error {
        fn from(value: JsValue) -> Self {
            Error::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
        }
    }

    impl From<Error> for JsValue {
        fn from(err: Error) -> Self {
            JsValue::from_str(&err.to_string())
        }
    }
}
