//! Mermaid text emission for flowcharts
//!
//! Output order is fixed: header, `classDef` lines, items depth first in
//! insertion order, edges in append order, then `linkStyle` lines.

use tracing::debug;

use super::{Flowchart, Item};
use crate::core::{escape_label, escape_quoted, Renderer};

/// Serializes a [`Flowchart`] into `graph` syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowchartRenderer;

impl FlowchartRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_items(&self, chart: &Flowchart, items: &[Item], out: &mut String) {
        for item in items {
            match *item {
                Item::Node(handle) => {
                    let Some(node) = chart.node(handle) else {
                        continue;
                    };
                    let (open, close) = node.shape.delimiters();
                    out.push_str(node.id());
                    out.push_str(open);
                    out.push_str(&escape_label(&node.title));
                    out.push_str(close);
                    out.push('\n');

                    if let Some(style) = node.style.as_deref() {
                        if chart.get_node_style(style).is_some() {
                            out.push_str(&format!("class {} {}\n", node.id(), style));
                        } else {
                            debug!(node_id = %node.id(), style_id = %style, "Node style not defined, skipping");
                        }
                    }

                    if let Some(link) = &node.link {
                        out.push_str(&format!("click {} \"{}\"", node.id(), escape_quoted(&link.url)));
                        if let Some(tooltip) = &link.tooltip {
                            out.push_str(&format!(" \"{}\"", escape_quoted(tooltip)));
                        }
                        out.push('\n');
                    }
                }
                Item::Subgraph(handle) => {
                    let Some(subgraph) = chart.subgraph(handle) else {
                        continue;
                    };
                    out.push_str(&format!("subgraph {}\n", escape_label(&subgraph.title)));
                    self.render_items(chart, subgraph.items(), out);
                    out.push_str("end\n");
                }
            }
        }
    }
}

impl Renderer<Flowchart> for FlowchartRenderer {
    fn render(&self, chart: &Flowchart) -> String {
        let mut out = format!("graph {}\n", chart.direction());

        for style in chart.node_styles() {
            out.push_str(&format!("classDef {} {}\n", style.id(), style));
        }

        self.render_items(chart, chart.items(), &mut out);

        let mut link_styles = Vec::new();
        for edge in chart.edges() {
            let (from, to) = (&chart[edge.from()], &chart[edge.to()]);
            out.push_str(from.id());
            out.push_str(edge.shape.glyph());
            if let Some(label) = edge.label.as_deref() {
                out.push('|');
                out.push_str(&escape_label(label));
                out.push('|');
            }
            out.push_str(to.id());
            out.push('\n');

            if let Some(style) = edge.style.as_deref().and_then(|id| chart.get_edge_style(id)) {
                link_styles.push(format!("linkStyle {} {}\n", edge.index(), style));
            }
        }
        for line in link_styles {
            out.push_str(&line);
        }

        debug!(
            node_count = chart.node_count(),
            edge_count = chart.edge_count(),
            output_len = out.len(),
            "Rendered flowchart"
        );
        out
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }
}
