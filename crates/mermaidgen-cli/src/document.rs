//! JSON chart documents
//!
//! A document describes one chart and is tagged by `kind`. Building it goes
//! through the library's public API, so every uniqueness rule applies.
//!
//! ```json
//! {
//!   "kind": "flowchart",
//!   "direction": "LR",
//!   "node-styles": { "hot": { "fill": "#f96" } },
//!   "items": [
//!     { "type": "node", "id": "a", "title": "Start", "shape": "stadium", "style": "hot" },
//!     { "type": "subgraph", "id": "grp", "title": "Group", "items": [
//!       { "type": "node", "id": "b" }
//!     ] }
//!   ],
//!   "edges": [ { "from": "a", "to": "b", "label": "go" } ]
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::debug;

use mermaidgen::plugins::flowchart::{Flowchart, SubgraphId};
use mermaidgen::plugins::gantt::{parse_duration, Gantt, TaskOptions};
use mermaidgen::{AxisFormat, Diagram, Direction, EdgeType, NodeShape, StyleProps, TaskStatus};

/// One chart of either kind
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartDocument {
    Flowchart(FlowchartDocument),
    Gantt(GanttDocument),
}

impl ChartDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse chart document")
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChartDocument::Flowchart(_) => Flowchart::name(),
            ChartDocument::Gantt(_) => Gantt::name(),
        }
    }

    /// Build the chart and render it to Mermaid text
    pub fn render(&self) -> Result<String> {
        let text = match self {
            ChartDocument::Flowchart(doc) => doc.build()?.render(),
            ChartDocument::Gantt(doc) => doc.build()?.render(),
        };
        debug!(kind = self.kind(), output_len = text.len(), "Rendered document");
        Ok(text)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FlowchartDocument {
    pub direction: Direction,
    pub node_styles: BTreeMap<String, StyleProps>,
    pub edge_styles: BTreeMap<String, StyleProps>,
    pub items: Vec<ItemDocument>,
    pub edges: Vec<EdgeDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemDocument {
    Node(NodeDocument),
    Subgraph(SubgraphDocument),
}

/// A node; without an `id` one is minted and edges cannot refer to it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct NodeDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub shape: NodeShape,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SubgraphDocument {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EdgeDocument {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub shape: EdgeType,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

impl FlowchartDocument {
    pub fn build(&self) -> Result<Flowchart> {
        let mut chart = Flowchart::with_direction(self.direction);
        for (id, props) in &self.node_styles {
            chart.node_style(id.as_str()).apply(props);
        }
        for (id, props) in &self.edge_styles {
            chart.edge_style(id.as_str()).apply(props);
        }

        add_items(&mut chart, None, &self.items)?;

        for (position, doc) in self.edges.iter().enumerate() {
            let from = chart
                .get_node(&doc.from)
                .ok_or_else(|| anyhow!("Edge {position} starts at unknown node '{}'", doc.from))?;
            let to = chart
                .get_node(&doc.to)
                .ok_or_else(|| anyhow!("Edge {position} ends at unknown node '{}'", doc.to))?;
            let handle = chart
                .add_typed_edge(from, to, doc.shape)
                .ok_or_else(|| anyhow!("Edge {position} could not be added"))?;
            let edge = &mut chart[handle];
            if let Some(label) = &doc.label {
                edge.set_label(label.as_str());
            }
            if let Some(style) = &doc.style {
                edge.set_style(style.as_str());
            }
        }
        Ok(chart)
    }
}

fn add_items(chart: &mut Flowchart, parent: Option<SubgraphId>, items: &[ItemDocument]) -> Result<()> {
    for item in items {
        match item {
            ItemDocument::Node(doc) => {
                let handle = match (doc.id.as_deref(), parent) {
                    (Some(id), None) => chart.add_node(id),
                    (Some(id), Some(parent)) => chart.subgraph_mut(parent).add_node(id),
                    (None, None) => Some(chart.add_anonymous_node()),
                    (None, Some(parent)) => Some(chart.subgraph_mut(parent).add_anonymous_node()),
                };
                let handle = handle.ok_or_else(|| {
                    anyhow!("Duplicate id '{}' in flowchart", doc.id.as_deref().unwrap_or_default())
                })?;

                let node = &mut chart[handle];
                node.set_shape(doc.shape);
                if let Some(title) = &doc.title {
                    node.set_title(title.as_str());
                }
                if let Some(style) = &doc.style {
                    node.set_style(style.as_str());
                }
                if let Some(url) = &doc.link {
                    node.set_link(url.as_str(), doc.tooltip.clone());
                }
            }
            ItemDocument::Subgraph(doc) => {
                let handle = match parent {
                    None => chart.add_subgraph(doc.id.as_str()),
                    Some(parent) => chart.subgraph_mut(parent).add_subgraph(doc.id.as_str()),
                }
                .ok_or_else(|| anyhow!("Duplicate id '{}' in flowchart", doc.id))?;

                if let Some(title) = &doc.title {
                    chart.subgraph_mut(handle).set_title(title.as_str());
                }
                add_items(chart, Some(handle), &doc.items)?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GanttDocument {
    pub title: Option<String>,
    pub axis_format: Option<AxisFormat>,
    /// Section-less tasks
    pub tasks: Vec<TaskDocument>,
    pub sections: Vec<SectionDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SectionDocument {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskDocument>,
}

/// A task; dates are RFC 3339, durations look like `3d` or `90m`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TaskDocument {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub critical: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start: Option<OffsetDateTime>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end: Option<OffsetDateTime>,
    #[serde(default)]
    pub after: Vec<String>,
}

impl TaskDocument {
    fn options(&self) -> Result<TaskOptions> {
        let mut options = TaskOptions::new().status(self.status).critical(self.critical);
        if let Some(title) = &self.title {
            options = options.title(title.as_str());
        }
        if let Some(start) = self.start {
            options = options.start(start);
        }
        if let Some(text) = &self.duration {
            let duration = parse_duration(text)
                .ok_or_else(|| anyhow!("Invalid duration '{}' for task '{}'", text, self.id))?;
            options = options.duration(duration);
        }
        if let Some(end) = self.end {
            options = options.end(end);
        }
        for dep in &self.after {
            options = options.after(dep.as_str());
        }
        Ok(options)
    }
}

impl GanttDocument {
    pub fn build(&self) -> Result<Gantt> {
        let mut gantt = Gantt::new();
        gantt.title = self.title.clone();
        gantt.axis_format = self.axis_format;

        for task in &self.tasks {
            gantt.add_task(task.id.as_str(), task.options()?)?;
        }
        for section in &self.sections {
            let handle = gantt
                .add_section(section.id.as_str())
                .ok_or_else(|| anyhow!("Duplicate section id '{}' in gantt", section.id))?;
            let mut view = gantt.section_mut(handle);
            if let Some(title) = &section.title {
                view.set_title(title.as_str());
            }
            for task in &section.tasks {
                view.add_task(task.id.as_str(), task.options()?)
                    .with_context(|| format!("In section '{}'", section.id))?;
            }
        }
        Ok(gantt)
    }
}
