//! Core diagram trait for all diagram kinds
//!
//! Each diagram kind pairs a model (the object graph callers build) with a
//! renderer that serializes it.

use super::Renderer;

/// Core trait for diagram models
///
/// # Example
/// ```
/// use mermaidgen::core::Diagram;
/// use mermaidgen::plugins::gantt::Gantt;
///
/// assert_eq!(Gantt::name(), "gantt");
/// let text = Gantt::new().render();
/// assert!(text.starts_with("gantt\n"));
/// ```
pub trait Diagram {
    /// The renderer type for this diagram
    type Renderer: Renderer<Self>;

    /// Create a new renderer instance
    fn create_renderer() -> Self::Renderer;

    /// Get the name of this diagram kind
    fn name() -> &'static str;

    /// Render this diagram with its default renderer
    fn render(&self) -> String {
        Self::create_renderer().render(self)
    }
}
