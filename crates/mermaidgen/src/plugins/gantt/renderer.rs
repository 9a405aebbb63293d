//! Mermaid text emission for gantt charts
//!
//! Loose tasks come first, then every section with its tasks, all in
//! insertion order. Every task line carries the task ID. A task with no
//! start and no resolved dependency is chained explicitly after the task
//! rendered before it.

use tracing::{debug, trace, warn};

use super::{format_duration, format_instant, Gantt, Task, TaskId, TaskSpan};
use crate::core::{flatten_text, Renderer};

/// The `dateFormat` every rendered chart declares
pub const DATE_FORMAT: &str = "YYYY-MM-DDTHH:mm:ssZ";

/// Serializes a [`Gantt`] into `gantt` syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct GanttRenderer;

impl GanttRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_task(&self, gantt: &Gantt, task: &Task, previous: Option<&str>, out: &mut String) {
        let mut fields: Vec<String> = Vec::new();
        if task.critical {
            fields.push("crit".to_string());
        }
        if let Some(tag) = task.status.tag() {
            fields.push(tag.to_string());
        }

        let deps: Vec<&str> = task
            .after()
            .iter()
            .map(String::as_str)
            .filter(|dep| gantt.get_task(dep).is_some())
            .collect();
        if deps.len() < task.after().len() {
            trace!(task_id = %task.id(), "Dropping unresolved dependencies");
        }

        // Mermaid reads the id only when a start field follows it
        let start = if !deps.is_empty() {
            Some(format!("after {}", deps.join(" ")))
        } else if let Some(start) = task.start() {
            Some(format_instant(start))
        } else {
            previous.map(|previous| format!("after {previous}"))
        };
        match start {
            Some(start) => {
                fields.push(task.id().to_string());
                fields.push(start);
            }
            None => {
                warn!(task_id = %task.id(), "Task has nothing to schedule from, writing it without its id");
            }
        }

        fields.push(match task.span() {
            TaskSpan::Duration(duration) => format_duration(duration),
            TaskSpan::Until(end) => format_instant(end),
        });

        out.push_str(&format!("{} :{}\n", flatten_text(&task.title), fields.join(", ")));
    }

    /// Render `tasks` in order; `previous` carries the last rendered task ID
    fn render_tasks<'a>(
        &self,
        gantt: &'a Gantt,
        tasks: &[TaskId],
        previous: &mut Option<&'a str>,
        out: &mut String,
    ) {
        for handle in tasks {
            if let Some(task) = gantt.task(*handle) {
                self.render_task(gantt, task, *previous, out);
                *previous = Some(task.id());
            }
        }
    }
}

impl Renderer<Gantt> for GanttRenderer {
    fn render(&self, gantt: &Gantt) -> String {
        let mut out = format!("gantt\ndateFormat {DATE_FORMAT}\n");
        if let Some(format) = gantt.axis_format {
            out.push_str(&format!("axisFormat {format}\n"));
        }
        if let Some(title) = gantt.title.as_deref().filter(|t| !t.is_empty()) {
            out.push_str(&format!("title {}\n", flatten_text(title)));
        }

        let mut previous = None;
        self.render_tasks(gantt, gantt.loose_tasks(), &mut previous, &mut out);
        for section in gantt.sections() {
            out.push_str(&format!("section {}\n", flatten_text(&section.title)));
            self.render_tasks(gantt, section.tasks(), &mut previous, &mut out);
        }

        debug!(
            section_count = gantt.section_count(),
            task_count = gantt.task_count(),
            output_len = out.len(),
            "Rendered gantt"
        );
        out
    }

    fn name(&self) -> &'static str {
        "gantt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AxisFormat, TaskStatus};
    use crate::plugins::gantt::TaskOptions;
    use time::macros::datetime;
    use time::Duration;

    #[test]
    fn test_header_only() {
        let gantt = Gantt::new();
        assert_eq!(
            GanttRenderer::new().render(&gantt),
            "gantt\ndateFormat YYYY-MM-DDTHH:mm:ssZ\n"
        );
    }

    #[test]
    fn test_axis_format_and_title() {
        let mut gantt = Gantt::new();
        gantt
            .set_axis_format(AxisFormat::TimeOnly24h)
            .set_title("Release");
        assert_eq!(
            GanttRenderer::new().render(&gantt),
            "gantt\ndateFormat YYYY-MM-DDTHH:mm:ssZ\naxisFormat %H:%M\ntitle Release\n"
        );
    }

    #[test]
    fn test_task_with_start_and_duration() {
        let mut gantt = Gantt::new();
        gantt
            .add_task(
                "design",
                TaskOptions::new()
                    .title("Design")
                    .start(datetime!(2024-01-01 9:00 UTC))
                    .duration(Duration::days(3))
                    .critical(true)
                    .status(TaskStatus::Done),
            )
            .unwrap();

        let out = GanttRenderer::new().render(&gantt);
        assert!(out.ends_with("Design :crit, done, design, 2024-01-01T09:00:00Z, 3d\n"));
    }

    #[test]
    fn test_task_with_dependencies_and_end() {
        let mut gantt = Gantt::new();
        gantt
            .add_task("a", TaskOptions::new().start(datetime!(2024-01-01 0:00 UTC)))
            .unwrap();
        gantt
            .add_task(
                "b",
                TaskOptions::new()
                    .after("a")
                    .after("ghost")
                    .end(datetime!(2024-02-01 0:00 UTC))
                    .status(TaskStatus::Active),
            )
            .unwrap();

        let out = GanttRenderer::new().render(&gantt);
        assert!(out.ends_with(
            "a :a, 2024-01-01T00:00:00Z, 1d\nb :active, b, after a, 2024-02-01T00:00:00Z\n"
        ));
    }

    #[test]
    fn test_unanchored_task_chains_after_previous() {
        let mut gantt = Gantt::new();
        gantt
            .add_task("a", TaskOptions::new().start(datetime!(2024-01-01 0:00 UTC)))
            .unwrap();
        let s = gantt.add_section("s").unwrap();
        gantt.section_mut(s).add_task("b", TaskOptions::new()).unwrap();
        gantt.section_mut(s).add_task("c", TaskOptions::new().after("a")).unwrap();

        let out = GanttRenderer::new().render(&gantt);
        assert!(out.ends_with("section s\nb :b, after a, 1d\nc :c, after a, 1d\n"));
    }

    #[test]
    fn test_unresolved_dependencies_only() {
        let mut gantt = Gantt::new();
        gantt
            .add_task("kick", TaskOptions::new().start(datetime!(2024-01-01 0:00 UTC)))
            .unwrap();
        gantt
            .add_task("c", TaskOptions::new().after("later").duration(Duration::hours(4)))
            .unwrap();
        let out = GanttRenderer::new().render(&gantt);
        assert!(out.ends_with("c :c, after kick, 4h\n"));

        // Resolves once the referenced task exists
        gantt.add_task("later", TaskOptions::new()).unwrap();
        let out = GanttRenderer::new().render(&gantt);
        assert!(out.contains("c :c, after later, 4h\n"));
    }

    #[test]
    fn test_every_dependency_is_declared() {
        let mut gantt = Gantt::new();
        let s = gantt.add_section("s").unwrap();
        gantt
            .section_mut(s)
            .add_task("a", TaskOptions::new().start(datetime!(2024-01-01 0:00 UTC)))
            .unwrap();
        gantt.section_mut(s).add_task("b", TaskOptions::new()).unwrap();
        gantt.add_task("c", TaskOptions::new().after("b")).unwrap();
        gantt.add_task("d", TaskOptions::new().after("missing")).unwrap();
        gantt.section_mut(s).add_task("e", TaskOptions::new().after("a").after("c")).unwrap();

        let out = GanttRenderer::new().render(&gantt);
        let task_lines: Vec<Vec<&str>> = out
            .lines()
            .filter_map(|line| line.split_once(" :"))
            .map(|(_, data)| data.split(", ").collect())
            .collect();
        assert_eq!(task_lines.len(), 5);

        // The ID is the field right before the start field
        let declared: Vec<&str> = task_lines
            .iter()
            .map(|fields| {
                let at = fields
                    .iter()
                    .position(|f| f.starts_with("after ") || f.starts_with("20"))
                    .unwrap();
                fields[at - 1]
            })
            .collect();
        assert_eq!(declared, ["c", "d", "a", "b", "e"]);
        for fields in &task_lines {
            for field in fields {
                if let Some(deps) = field.strip_prefix("after ") {
                    for dep in deps.split(' ') {
                        assert!(declared.contains(&dep), "{dep} is not declared in:\n{out}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_titles_are_flattened() {
        let mut gantt = Gantt::new();
        gantt.set_title("Q1; plan");
        let s = gantt.add_section("s").unwrap();
        gantt.section_mut(s).set_title("Phase: one");
        gantt
            .section_mut(s)
            .add_task(
                "t",
                TaskOptions::new()
                    .title("Ship: v1\nfinal")
                    .start(datetime!(2024-01-01 0:00 UTC)),
            )
            .unwrap();

        let out = GanttRenderer::new().render(&gantt);
        assert!(out.contains("title Q1  plan\n"));
        assert!(out.ends_with("section Phase  one\nShip  v1 final :t, 2024-01-01T00:00:00Z, 1d\n"));
    }
}
