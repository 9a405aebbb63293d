//! Core abstractions shared by every diagram kind
//!
//! This module defines the renderer and diagram traits, the Mermaid syntax
//! enumerations, style bundles, the implicit ID registry and error types.

mod diagram;
mod error;
pub mod ids;
pub mod logging;
mod renderer;
mod style;
mod text;
mod types;

pub use diagram::*;
pub use error::*;
pub use ids::next_id;
pub use logging::*;
pub use renderer::*;
pub use style::*;
pub use text::*;
pub use types::*;
