//! Terminal visualization of the board

pub mod renderer;

pub use renderer::Renderer;
