//! Gantt diagram plugin
//!
//! Builds Mermaid `gantt` charts: a title, an axis format, and tasks that
//! are either loose or grouped into sections.

use std::fmt;

use crate::core::Diagram;

mod database;
mod renderer;
mod task;

pub use database::*;
pub use renderer::*;
pub use task::*;

impl Diagram for Gantt {
    type Renderer = GanttRenderer;

    fn create_renderer() -> Self::Renderer {
        GanttRenderer::new()
    }

    fn name() -> &'static str {
        "gantt"
    }
}

impl fmt::Display for Gantt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Diagram::render(self))
    }
}
