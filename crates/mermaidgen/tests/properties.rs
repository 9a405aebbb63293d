//! Property tests for chart construction and rendering

use std::collections::HashSet;

use mermaidgen::prelude::*;
use proptest::prelude::*;
use time::macros::datetime;

proptest! {
    #[test]
    fn duplicate_ids_never_added(ids in prop::collection::vec("[a-e]{1,2}", 1..40)) {
        let mut chart = Flowchart::new();
        let sg = chart.add_subgraph("sg").unwrap();
        let mut seen: HashSet<String> = HashSet::from(["sg".to_string()]);

        for (i, id) in ids.iter().enumerate() {
            let added = if i % 2 == 0 {
                chart.add_node(id.as_str()).is_some()
            } else {
                chart.subgraph_mut(sg).add_node(id.as_str()).is_some()
            };
            prop_assert_eq!(added, seen.insert(id.clone()));
        }
        prop_assert_eq!(chart.node_count(), seen.len() - 1);
    }

    #[test]
    fn edges_render_in_append_order(pairs in prop::collection::vec((0..5usize, 0..5usize), 0..30)) {
        let mut chart = Flowchart::new();
        let nodes: Vec<_> = (0..5).map(|i| chart.add_node(format!("n{i}")).unwrap()).collect();
        for (from, to) in &pairs {
            prop_assert!(chart.add_edge(nodes[*from], nodes[*to]).is_some());
        }

        let out = chart.render();
        let edge_lines: Vec<_> = out.lines().filter(|l| l.contains("-->")).collect();
        let expected: Vec<_> = pairs.iter().map(|(f, t)| format!("n{f}-->n{t}")).collect();
        prop_assert_eq!(edge_lines, expected);
        for (i, edge) in chart.list_edges().iter().enumerate() {
            prop_assert_eq!(edge.index(), i);
        }
    }

    #[test]
    fn render_is_idempotent(titles in prop::collection::vec(".{0,12}", 0..10)) {
        let mut chart = Flowchart::new();
        for (i, title) in titles.iter().enumerate() {
            let n = chart.add_node(format!("n{i}")).unwrap();
            chart[n].set_title(title.as_str());
            chart.node_style(format!("s{}", i % 3)).set_stroke_width((i % 5) as u8);
        }
        prop_assert_eq!(chart.render(), chart.render());

        let mut gantt = Gantt::new();
        for (i, title) in titles.iter().enumerate() {
            let options = TaskOptions::new()
                .title(title.as_str())
                .start(datetime!(2024-01-01 0:00 UTC));
            gantt.add_task(format!("t{i}"), options).unwrap();
        }
        prop_assert_eq!(gantt.render(), gantt.render());
    }

    #[test]
    fn task_ids_unique_across_gantt(ids in prop::collection::vec("[a-d]", 1..20)) {
        let mut gantt = Gantt::new();
        let section = gantt.add_section("s").unwrap();
        let mut seen = HashSet::new();
        let options = TaskOptions::new().start(datetime!(2024-01-01 0:00 UTC));

        for (i, id) in ids.iter().enumerate() {
            let result = if i % 2 == 0 {
                gantt.add_task(id.as_str(), options.clone())
            } else {
                gantt.section_mut(section).add_task(id.as_str(), options.clone())
            };
            prop_assert_eq!(result.is_ok(), seen.insert(id.clone()));
        }
        prop_assert_eq!(gantt.task_count(), seen.len());
    }

    #[test]
    fn dependencies_point_at_declared_ids(
        plan in prop::collection::vec((0..3usize, prop::option::of(0..20usize), any::<bool>()), 1..20)
    ) {
        let mut gantt = Gantt::new();
        let sections = [gantt.add_section("s0").unwrap(), gantt.add_section("s1").unwrap()];
        for (i, &(place, dep, started)) in plan.iter().enumerate() {
            let options = match (dep, started) {
                (_, true) => TaskOptions::new().start(datetime!(2024-01-01 0:00 UTC)),
                (Some(dep), false) => TaskOptions::new().after(format!("t{dep}")),
                (None, false) => TaskOptions::new(),
            };
            let id = format!("t{i}");
            // Rejected adds leave the chart as it was
            let _ = match place {
                0 => gantt.add_task(id, options),
                n => gantt.section_mut(sections[n - 1]).add_task(id, options),
            };
        }

        let out = gantt.render();
        let task_lines: Vec<Vec<&str>> = out
            .lines()
            .filter_map(|line| line.split_once(" :"))
            .map(|(_, data)| data.split(", ").collect())
            .collect();
        let declared: HashSet<&str> = task_lines
            .iter()
            .filter_map(|fields| {
                fields
                    .iter()
                    .position(|f| f.starts_with("after ") || f.starts_with("20"))
                    .map(|at| fields[at - 1])
            })
            .collect();
        prop_assert_eq!(declared.len(), gantt.task_count());
        for fields in &task_lines {
            for deps in fields.iter().filter_map(|f| f.strip_prefix("after ")) {
                for dep in deps.split(' ') {
                    prop_assert!(declared.contains(dep), "{} is not declared in:\n{}", dep, out);
                }
            }
        }
    }
}
