//! Interaction and motion layer of a single-page portfolio.
//!
//! The modules at the top level are plain state machines and geometry with
//! no browser dependency, so they run under `cargo test` natively. The yew
//! app and the `requestAnimationFrame` runtime that feed them DOM events are
//! only compiled for `wasm32`.

pub mod config;
pub mod contact;
pub mod cursor;
pub mod logging;
pub mod nav;
pub mod particles;
pub mod reveal;
pub mod scheduler;
pub mod theme;
pub mod tilt;
pub mod timeline;
pub mod tween;
pub mod typed;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(target_arch = "wasm32")]
pub use frontend::run;
