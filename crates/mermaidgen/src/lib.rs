//! Mermaidgen - Build Mermaid.js diagram text from Rust
//!
//! A library for assembling flowcharts and gantt charts in memory and
//! serializing them into the text a Mermaid renderer consumes.
//!
//! # Quick Start
//!
//! ```rust
//! use mermaidgen::prelude::*;
//!
//! let mut chart = Flowchart::with_direction(Direction::LeftRight);
//! let start = chart.add_node("start").unwrap();
//! chart[start].set_shape(NodeShape::Stadium).set_title("Start");
//! let finish = chart.add_node("finish").unwrap();
//! chart.add_edge(start, finish).unwrap();
//!
//! assert_eq!(chart.render(), "graph LR\nstart([Start])\nfinish[finish]\nstart-->finish\n");
//! ```
//!
//! # Gantt charts
//!
//! ```rust
//! use mermaidgen::prelude::*;
//! use time::{macros::datetime, Duration};
//!
//! let mut gantt = Gantt::new();
//! gantt.set_title("Launch");
//! let prep = gantt.add_section("prep").unwrap();
//! gantt
//!     .section_mut(prep)
//!     .add_task(
//!         "draft",
//!         TaskOptions::new()
//!             .start(datetime!(2024-05-01 0:00 UTC))
//!             .duration(Duration::days(2)),
//!     )
//!     .unwrap();
//!
//! assert!(gantt.render().ends_with("section prep\ndraft :draft, 2024-05-01T00:00:00Z, 2d\n"));
//! ```

pub mod core;
pub mod export;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        AxisFormat, Diagram, DiagramError, Direction, EdgeType, NodeShape, Renderer, Style,
        TaskStatus,
    };
    pub use crate::plugins::flowchart::{
        EdgeId, Flowchart, FlowchartRenderer, NodeId, SubgraphId, SubgraphMut,
    };
    pub use crate::plugins::gantt::{
        Gantt, GanttRenderer, SectionId, SectionMut, TaskId, TaskOptions,
    };
}
