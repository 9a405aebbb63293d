//! Core renderer trait for diagram output
//!
//! A renderer turns a diagram model into Mermaid source text. Rendering is a
//! read-only traversal: it never fails and never mutates the model, so two
//! calls on an unchanged diagram produce identical output.

/// Core trait for diagram renderers
///
/// # Example
/// ```
/// use mermaidgen::core::Renderer;
/// use mermaidgen::plugins::flowchart::{Flowchart, FlowchartRenderer};
///
/// let chart = Flowchart::new();
/// let renderer = FlowchartRenderer::new();
/// assert_eq!(renderer.render(&chart), "graph TB\n");
/// ```
pub trait Renderer<D: ?Sized>: Send + Sync {
    /// Render the diagram into Mermaid source text
    fn render(&self, diagram: &D) -> String;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;
}
