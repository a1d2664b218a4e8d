//! Rendering Adapter: renderer-agnostic playback interface and mode dispatch.
//!
//! # Invariants
//! - Renderers never mutate the scene; they read the robot and obstacles.
//! - Each request selects exactly one entry point: show, animate, or animate_dynamic.
//! - Backend choice is explicit configuration, never ambient process state.
//!
//! [`FrameLogRenderer`] is a headless backend that writes a text or JSON
//! frame log. The [`Renderer`] trait is stable; windowed backends implement
//! it without changing consumers.

mod dispatch;
mod renderer;
mod request;
mod visualize;

pub use dispatch::{DispatchError, dispatch};
pub use renderer::{
    FrameFormat, FrameLogRenderer, MAX_DYNAMIC_FRAMES, RenderConfig, RenderError, Renderer,
};
pub use request::{
    DEFAULT_FPS, PoseInput, RenderMode, RenderRequest, RequestError, VisualizeArgs,
};
pub use visualize::{VisualizeError, visualize};

pub fn crate_info() -> &'static str {
    "planarvis-render v0.1.0"
}
