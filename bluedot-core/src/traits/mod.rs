//! Output abstraction traits
//!
//! These traits define the interface between the session logic and
//! whatever presents the surface to the user.

pub mod renderer;

pub use renderer::Renderer;
