//! CSS-like style bundles attached to nodes and edges by ID

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named style definition
///
/// Node styles render to `classDef <id> <props>`, edge styles to
/// `linkStyle <index> <props>`. Instances are owned by a chart's style
/// registry and handed out through its get-or-create accessors; nodes and
/// edges only store the style ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    id: String,
    /// Renders to something like `fill:#f9f`
    pub fill: Option<String>,
    /// Renders to something like `stroke:#333`
    pub stroke: Option<String>,
    /// Renders to `stroke-width:<n>px`, always present
    pub stroke_width: u8,
    /// Renders to `stroke-dasharray:<n>px` when non-zero
    pub stroke_dash: u8,
    /// Extra declarations appended verbatim, e.g. `color:#fff,font-size:12px`
    pub more: Option<String>,
}

impl Style {
    /// Create a style with the default stroke width of 1
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fill: None,
            stroke: None,
            stroke_width: 1,
            stroke_dash: 0,
            more: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_fill(&mut self, fill: impl Into<String>) -> &mut Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn set_stroke(&mut self, stroke: impl Into<String>) -> &mut Self {
        self.stroke = Some(stroke.into());
        self
    }

    pub fn set_stroke_width(&mut self, width: u8) -> &mut Self {
        self.stroke_width = width;
        self
    }

    pub fn set_stroke_dash(&mut self, dash: u8) -> &mut Self {
        self.stroke_dash = dash;
        self
    }

    pub fn set_more(&mut self, more: impl Into<String>) -> &mut Self {
        self.more = Some(more.into());
        self
    }

    /// Overwrite the visual properties with the ones from `props`
    pub fn apply(&mut self, props: &StyleProps) -> &mut Self {
        if let Some(fill) = &props.fill {
            self.fill = Some(fill.clone());
        }
        if let Some(stroke) = &props.stroke {
            self.stroke = Some(stroke.clone());
        }
        if let Some(width) = props.stroke_width {
            self.stroke_width = width;
        }
        if let Some(dash) = props.stroke_dash {
            self.stroke_dash = dash;
        }
        if let Some(more) = &props.more {
            self.more = Some(more.clone());
        }
        self
    }

    /// The comma separated property list, e.g. `stroke-width:1px,fill:#f9f`
    pub fn declarations(&self) -> String {
        let mut parts = vec![format!("stroke-width:{}px", self.stroke_width)];
        if let Some(fill) = self.fill.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("fill:{fill}"));
        }
        if let Some(stroke) = self.stroke.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("stroke:{stroke}"));
        }
        if self.stroke_dash != 0 {
            parts.push(format!("stroke-dasharray:{}px", self.stroke_dash));
        }
        if let Some(more) = self.more.as_deref().filter(|s| !s.is_empty()) {
            parts.push(more.to_string());
        }
        parts.join(",")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declarations())
    }
}

/// Partial style properties, as read from a chart document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleProps {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<u8>,
    pub stroke_dash: Option<u8>,
    pub more: Option<String>,
}
