//! Single-page portfolio: content rendered from compiled-in data, two
//! decorative WebGL scenes and scroll-driven reveal animations.
//!
//! Everything outside `wasm` is plain Rust and runs under `cargo test` on
//! the host; `wasm` binds it to the browser.

pub mod choreography;
pub mod config;
pub mod content;
pub mod error;
pub mod pointer;
pub mod scene;
pub mod tilt;

// Only compile browser bindings when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{Error, Result};
