//! Flowchart diagram plugin
//!
//! Builds Mermaid `graph` diagrams: nodes, nested subgraphs, edges and
//! styles.

use std::fmt;

use crate::core::Diagram;

mod database;
mod renderer;

pub use database::*;
pub use renderer::*;

impl Diagram for Flowchart {
    type Renderer = FlowchartRenderer;

    fn create_renderer() -> Self::Renderer {
        FlowchartRenderer::new()
    }

    fn name() -> &'static str {
        "flowchart"
    }
}

impl fmt::Display for Flowchart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Diagram::render(self))
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::core::{Direction, EdgeType, NodeShape};

    /// The vpc example: two availability zones inside a vpc
    fn vpc_chart() -> Flowchart {
        let mut chart = Flowchart::new();
        let sg1 = chart.add_subgraph("sg1").unwrap();
        chart.subgraph_mut(sg1).set_title("vpc-123");
        let sg2 = chart.subgraph_mut(sg1).add_subgraph("sg2").unwrap();
        chart.subgraph_mut(sg1).add_subgraph("sg3").unwrap();
        let sg3 = chart.get_subgraph("sg3").unwrap();
        chart.subgraph_mut(sg2).set_title("AZ a");
        chart.subgraph_mut(sg3).set_title("AZ b");

        let i123 = chart.subgraph_mut(sg2).add_node("i-123").unwrap();
        let mydb = chart.subgraph_mut(sg2).add_node("mydb").unwrap();
        chart.add_edge(i123, mydb).unwrap();
        let i456 = chart.subgraph_mut(sg3).add_node("i-456").unwrap();
        let mydb = chart.get_node("mydb").unwrap();
        chart.add_edge(i456, mydb).unwrap();
        chart
    }

    #[test]
    fn test_nested_subgraphs_render() {
        let chart = vpc_chart();
        let expected = "graph TB
subgraph vpc-123
subgraph AZ a
i-123[i-123]
mydb[mydb]
end
subgraph AZ b
i-456[i-456]
end
end
i-123-->mydb
i-456-->mydb
";
        assert_eq!(chart.render(), expected);
        assert_eq!(chart.to_string(), expected);
    }

    #[test]
    fn test_cross_subgraph_duplicate_fails() {
        let mut chart = vpc_chart();
        let sg3 = chart.get_subgraph("sg3").unwrap();
        let before = chart.render();

        assert!(chart.subgraph_mut(sg3).add_node("mydb").is_none());
        assert_eq!(chart.render(), before);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut chart = vpc_chart();
        chart.node_style("a").set_fill("#fff");
        chart.node_style("b").set_stroke("#000");
        chart.node_style("c");
        assert_eq!(chart.render(), chart.render());
    }

    #[test]
    fn test_full_pipeline_with_all_shapes_and_links() {
        let mut chart = Flowchart::with_direction(Direction::LeftRight);
        let shapes = [
            NodeShape::Rectangle,
            NodeShape::RoundedRect,
            NodeShape::Stadium,
            NodeShape::Subroutine,
            NodeShape::Cylinder,
            NodeShape::Circle,
            NodeShape::Asymmetric,
            NodeShape::Diamond,
            NodeShape::Hexagon,
            NodeShape::Parallelogram,
            NodeShape::ParallelogramAlt,
            NodeShape::Trapezoid,
            NodeShape::TrapezoidAlt,
        ];
        let mut handles = Vec::new();
        for (i, shape) in shapes.iter().enumerate() {
            let n = chart.add_node(format!("n{i}")).unwrap();
            chart[n].set_shape(*shape);
            handles.push(n);
        }
        let links = [
            EdgeType::Arrow,
            EdgeType::Line,
            EdgeType::DottedArrow,
            EdgeType::DottedLine,
            EdgeType::ThickArrow,
            EdgeType::ThickLine,
            EdgeType::Invisible,
            EdgeType::OpenArrow,
            EdgeType::CrossArrow,
        ];
        for (i, link) in links.iter().enumerate() {
            chart.add_typed_edge(handles[i], handles[i + 1], *link).unwrap();
        }

        let out = chart.render();
        assert!(out.starts_with("graph LR\n"));
        assert!(out.contains("n7{n7}\n"));
        assert!(out.contains("n4[(n4)]\n"));
        assert!(out.contains("n6~~~n7\n"));
        assert!(out.contains("n8--xn9\n"));
        assert_eq!(out.lines().count(), 1 + shapes.len() + links.len());
    }
}
