//! Diagram kinds
//!
//! Each plugin owns its model (`database`) and its text serializer
//! (`renderer`), and ties them together through [`crate::core::Diagram`].

pub mod flowchart;
pub mod gantt;

pub use flowchart::*;
pub use gantt::*;

/// Names of the diagram kinds this crate can build
pub fn kinds() -> [&'static str; 2] {
    use crate::core::Diagram;

    [Flowchart::name(), Gantt::name()]
}
