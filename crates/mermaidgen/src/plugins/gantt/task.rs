//! Gantt tasks and their scheduling options

use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::core::{DiagramError, TaskStatus};

/// How long a task runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSpan {
    /// Fixed length, rendered like `3d` or `90m`
    Duration(Duration),
    /// Fixed end instant
    Until(OffsetDateTime),
}

impl Default for TaskSpan {
    fn default() -> Self {
        TaskSpan::Duration(Duration::days(1))
    }
}

/// Initializer for [`Gantt::add_task`](super::Gantt::add_task)
///
/// Every field is optional. A task with neither `start` nor a resolved
/// `after` runs after the task rendered before it, so a task that would
/// render first needs one of the two.
///
/// # Example
/// ```
/// use mermaidgen::plugins::gantt::TaskOptions;
/// use time::{macros::datetime, Duration};
///
/// let opts = TaskOptions::new()
///     .title("Design")
///     .start(datetime!(2024-01-01 0:00 UTC))
///     .duration(Duration::days(3))
///     .critical(true);
/// assert_eq!(opts.title.as_deref(), Some("Design"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOptions {
    pub title: Option<String>,
    pub status: TaskStatus,
    pub critical: bool,
    pub start: Option<OffsetDateTime>,
    pub duration: Option<Duration>,
    pub end: Option<OffsetDateTime>,
    pub after: Vec<String>,
}

impl TaskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn start(mut self, start: OffsetDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn end(mut self, end: OffsetDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn after(mut self, task_id: impl Into<String>) -> Self {
        self.after.push(task_id.into());
        self
    }

    /// Validate the options and build the task
    pub(crate) fn build(self, id: &str) -> Result<Task, DiagramError> {
        if self.start.is_some() && !self.after.is_empty() {
            return Err(DiagramError::invalid_task(
                id,
                "a task takes either a start time or dependencies, not both",
            ));
        }
        if self.after.iter().any(|dep| dep == id) {
            return Err(DiagramError::invalid_task(id, "a task cannot depend on itself"));
        }

        let span = match (self.duration, self.end) {
            (Some(_), Some(_)) => {
                return Err(DiagramError::invalid_task(
                    id,
                    "a task takes either a duration or an end time, not both",
                ));
            }
            (Some(duration), None) => {
                if !duration.is_positive() {
                    return Err(DiagramError::invalid_task(id, "duration must be positive"));
                }
                if duration.whole_nanoseconds() % 1_000_000 != 0 {
                    return Err(DiagramError::invalid_task(
                        id,
                        "duration must be a whole number of milliseconds",
                    ));
                }
                TaskSpan::Duration(duration)
            }
            (None, Some(end)) => {
                if self.start.is_some_and(|start| end <= start) {
                    return Err(DiagramError::invalid_task(id, "end time is not after start time"));
                }
                TaskSpan::Until(end)
            }
            (None, None) => TaskSpan::default(),
        };

        Ok(Task {
            id: id.to_string(),
            title: self.title.unwrap_or_else(|| id.to_string()),
            status: self.status,
            critical: self.critical,
            start: self.start,
            span,
            after: self.after,
        })
    }
}

/// A scheduled bar of a gantt chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: String,
    /// Display text, defaults to the ID
    pub title: String,
    pub status: TaskStatus,
    /// Rendered as the `crit` tag
    pub critical: bool,
    start: Option<OffsetDateTime>,
    span: TaskSpan,
    after: Vec<String>,
}

impl Task {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> Option<OffsetDateTime> {
        self.start
    }

    pub fn span(&self) -> TaskSpan {
        self.span
    }

    /// IDs of the tasks this one runs after, unresolved ones included
    pub fn after(&self) -> &[String] {
        &self.after
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn set_status(&mut self, status: TaskStatus) -> &mut Self {
        self.status = status;
        self
    }

    pub fn set_critical(&mut self, critical: bool) -> &mut Self {
        self.critical = critical;
        self
    }
}

/// Format an instant as `YYYY-MM-DDTHH:MM:SSZ` in UTC
pub fn format_instant(instant: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
    instant
        .to_offset(UtcOffset::UTC)
        .format(format)
        .unwrap_or_default()
}

/// Format a duration with the largest unit that divides it evenly
///
/// # Example
/// ```
/// use mermaidgen::plugins::gantt::format_duration;
/// use time::Duration;
///
/// assert_eq!(format_duration(Duration::days(2)), "2d");
/// assert_eq!(format_duration(Duration::minutes(90)), "90m");
/// ```
pub fn format_duration(duration: Duration) -> String {
    if duration.subsec_milliseconds() != 0 {
        return format!("{}ms", duration.whole_milliseconds());
    }
    let secs = duration.whole_seconds();
    if secs % 86_400 == 0 {
        format!("{}d", secs / 86_400)
    } else if secs % 3_600 == 0 {
        format!("{}h", secs / 3_600)
    } else if secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

/// Parse a Mermaid duration such as `3d`, `12h`, `30m`, `45s`, `500ms` or `2w`
///
/// Returns `None` for unknown units and for values too large to represent.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    let split = text.find(|c: char| !c.is_ascii_digit())?;
    let (number, unit) = text.split_at(split);
    let value: i64 = number.parse().ok()?;
    let unit_seconds: i64 = match unit {
        "ms" => return Some(Duration::milliseconds(value)),
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        _ => return None,
    };
    value.checked_mul(unit_seconds).map(Duration::seconds)
}
