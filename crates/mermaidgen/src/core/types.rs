//! Core type definitions shared by the diagram builders
//!
//! This module contains the enumerations that map one-to-one onto Mermaid
//! syntax: flow direction, node shapes, link glyphs, gantt axis formats and
//! task states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flow direction written into the `graph <DIR>` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top to bottom (TB)
    #[default]
    #[serde(rename = "TB", alias = "TD")]
    TopDown,
    /// Bottom to top (BT)
    #[serde(rename = "BT")]
    BottomUp,
    /// Right to left (RL)
    #[serde(rename = "RL")]
    RightLeft,
    /// Left to right (LR)
    #[serde(rename = "LR")]
    LeftRight,
}

impl Direction {
    /// The keyword emitted after `graph`
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopDown => "TB",
            Direction::BottomUp => "BT",
            Direction::RightLeft => "RL",
            Direction::LeftRight => "LR",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node shapes matching Mermaid.js syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rectangle,
    /// Rounded rectangle: `A(label)`
    RoundedRect,
    /// Stadium: `A([label])`
    Stadium,
    /// Subroutine: `A[[label]]`
    Subroutine,
    /// Cylinder (database): `A[(label)]`
    Cylinder,
    /// Circle: `A((label))`
    Circle,
    /// Asymmetric (flag): `A>label]`
    Asymmetric,
    /// Diamond (decision): `A{label}`
    Diamond,
    /// Hexagon: `A{{label}}`
    Hexagon,
    /// Parallelogram: `A[/label/]`
    Parallelogram,
    /// Alternate parallelogram: `A[\label\]`
    ParallelogramAlt,
    /// Trapezoid: `A[/label\]`
    Trapezoid,
    /// Alternate trapezoid: `A[\label/]`
    TrapezoidAlt,
}

impl NodeShape {
    /// Opening and closing delimiters wrapped around the node title
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rectangle => ("[", "]"),
            NodeShape::RoundedRect => ("(", ")"),
            NodeShape::Stadium => ("([", "])"),
            NodeShape::Subroutine => ("[[", "]]"),
            NodeShape::Cylinder => ("[(", ")]"),
            NodeShape::Circle => ("((", "))"),
            NodeShape::Asymmetric => (">", "]"),
            NodeShape::Diamond => ("{", "}"),
            NodeShape::Hexagon => ("{{", "}}"),
            NodeShape::Parallelogram => ("[/", "/]"),
            NodeShape::ParallelogramAlt => ("[\\", "\\]"),
            NodeShape::Trapezoid => ("[/", "\\]"),
            NodeShape::TrapezoidAlt => ("[\\", "/]"),
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Rectangle => write!(f, "rectangle"),
            NodeShape::RoundedRect => write!(f, "rounded"),
            NodeShape::Stadium => write!(f, "stadium"),
            NodeShape::Subroutine => write!(f, "subroutine"),
            NodeShape::Cylinder => write!(f, "cylinder"),
            NodeShape::Circle => write!(f, "circle"),
            NodeShape::Asymmetric => write!(f, "asymmetric"),
            NodeShape::Diamond => write!(f, "diamond"),
            NodeShape::Hexagon => write!(f, "hexagon"),
            NodeShape::Parallelogram => write!(f, "parallelogram"),
            NodeShape::ParallelogramAlt => write!(f, "parallelogram-alt"),
            NodeShape::Trapezoid => write!(f, "trapezoid"),
            NodeShape::TrapezoidAlt => write!(f, "trapezoid-alt"),
        }
    }
}

/// Edge types matching Mermaid.js link syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeType {
    /// Solid arrow: `-->`
    #[default]
    Arrow,
    /// Solid line (no arrow): `---`
    Line,
    /// Dotted arrow: `-.->`
    DottedArrow,
    /// Dotted line: `-.-`
    DottedLine,
    /// Thick arrow: `==>`
    ThickArrow,
    /// Thick line: `===`
    ThickLine,
    /// Invisible edge: `~~~`
    Invisible,
    /// Open circle end: `--o`
    OpenArrow,
    /// Cross end: `--x`
    CrossArrow,
}

impl EdgeType {
    /// The link glyph placed between the two node IDs
    pub fn glyph(&self) -> &'static str {
        match self {
            EdgeType::Arrow => "-->",
            EdgeType::Line => "---",
            EdgeType::DottedArrow => "-.->",
            EdgeType::DottedLine => "-.-",
            EdgeType::ThickArrow => "==>",
            EdgeType::ThickLine => "===",
            EdgeType::Invisible => "~~~",
            EdgeType::OpenArrow => "--o",
            EdgeType::CrossArrow => "--x",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Tick label format for the gantt x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisFormat {
    /// `%Y-%m-%d`, what Mermaid uses when no `axisFormat` is given
    #[serde(rename = "%Y-%m-%d")]
    DateOnly,
    /// `%H:%M`
    #[serde(rename = "%H:%M")]
    TimeOnly24h,
    /// `%H:%M:%S`
    #[serde(rename = "%H:%M:%S")]
    TimeOnly24hWithSeconds,
}

impl AxisFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisFormat::DateOnly => "%Y-%m-%d",
            AxisFormat::TimeOnly24h => "%H:%M",
            AxisFormat::TimeOnly24hWithSeconds => "%H:%M:%S",
        }
    }
}

impl fmt::Display for AxisFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress marker rendered as a gantt task tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Active,
    Done,
}

impl TaskStatus {
    /// The tag written into the task line, if any
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            TaskStatus::Pending => None,
            TaskStatus::Active => Some("active"),
            TaskStatus::Done => Some("done"),
        }
    }
}
