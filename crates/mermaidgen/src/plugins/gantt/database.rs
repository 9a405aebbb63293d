//! Gantt model
//!
//! A [`Gantt`] owns ordered sections and ordered section-less ("loose")
//! tasks. Task IDs form one namespace across the whole chart, whether the
//! task sits in a section or not; section IDs are unique among sections.
//!
//! Every task is anchored: it has a start, a dependency on a task that
//! already exists, or a task rendered before it to chain after. Tasks are
//! never removed, so a task stays anchored once added.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use super::{Task, TaskOptions};
use crate::core::ids::next_chart_tag;
use crate::core::{AxisFormat, DiagramError};

/// Handle to a section of a specific [`Gantt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId {
    chart: u64,
    index: usize,
}

/// Handle to a task of a specific [`Gantt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    chart: u64,
    index: usize,
}

/// A titled group of tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: String,
    /// Text of the `section` line, defaults to the ID
    pub title: String,
    tasks: Vec<TaskId>,
}

impl Section {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tasks in the order they were added
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }
}

/// Root container of a gantt diagram
///
/// # Example
/// ```
/// use mermaidgen::prelude::*;
///
/// use time::macros::datetime;
///
/// let mut gantt = Gantt::new();
/// let kickoff = TaskOptions::new().start(datetime!(2024-01-08 9:00 UTC));
/// gantt.add_task("kickoff", kickoff.clone()).unwrap();
/// assert!(gantt.add_task("kickoff", kickoff).is_err());
/// gantt.add_task("review", TaskOptions::new()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Gantt {
    tag: u64,
    /// Rendered as `title <text>` when set
    pub title: Option<String>,
    /// Rendered as `axisFormat <fmt>` when set
    pub axis_format: Option<AxisFormat>,
    sections: Vec<Section>,
    section_index: HashMap<String, SectionId>,
    tasks: Vec<Task>,
    task_index: HashMap<String, TaskId>,
    /// Section-less tasks in insertion order
    loose: Vec<TaskId>,
}

impl Default for Gantt {
    fn default() -> Self {
        Self {
            tag: next_chart_tag(),
            title: None,
            axis_format: None,
            sections: Vec::new(),
            section_index: HashMap::new(),
            tasks: Vec::new(),
            task_index: HashMap::new(),
            loose: Vec::new(),
        }
    }
}

impl Gantt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_axis_format(&mut self, format: AxisFormat) -> &mut Self {
        self.axis_format = Some(format);
        self
    }

    fn insert_task(
        &mut self,
        section: Option<SectionId>,
        id: String,
        options: TaskOptions,
    ) -> Result<TaskId, DiagramError> {
        if self.task_index.contains_key(&id) {
            debug!(task_id = %id, "Rejected task with duplicate id");
            return Err(DiagramError::duplicate_id("task", id));
        }
        let task = options.build(&id)?;
        let anchored = task.start().is_some()
            || task.after().iter().any(|dep| self.task_index.contains_key(dep))
            || self.has_predecessor(section);
        if !anchored {
            debug!(task_id = %id, "Rejected task with nothing to schedule from");
            return Err(DiagramError::invalid_task(
                id,
                "the first task needs a start time or a dependency on an existing task",
            ));
        }
        trace!(task_id = %id, section = ?section, "Adding task to gantt");

        let handle = TaskId {
            chart: self.tag,
            index: self.tasks.len(),
        };
        self.tasks.push(task);
        self.task_index.insert(id, handle);
        match section {
            Some(section) => self.sections[section.index].tasks.push(handle),
            None => self.loose.push(handle),
        }
        Ok(handle)
    }

    /// Returns true if some task renders before a task appended to `section`
    fn has_predecessor(&self, section: Option<SectionId>) -> bool {
        if !self.loose.is_empty() {
            return true;
        }
        section.is_some_and(|section| {
            self.sections[..=section.index]
                .iter()
                .any(|earlier| !earlier.tasks.is_empty())
        })
    }

    /// Add a section at the end of the chart
    ///
    /// Returns `None` if a section with this ID already exists.
    pub fn add_section(&mut self, id: impl Into<String>) -> Option<SectionId> {
        let id = id.into();
        if self.section_index.contains_key(&id) {
            debug!(section_id = %id, "Rejected section with duplicate id");
            return None;
        }
        trace!(section_id = %id, "Adding section to gantt");

        let handle = SectionId {
            chart: self.tag,
            index: self.sections.len(),
        };
        self.sections.push(Section {
            title: id.clone(),
            id: id.clone(),
            tasks: Vec::new(),
        });
        self.section_index.insert(id, handle);
        Some(handle)
    }

    /// Add a section-less task
    ///
    /// Fails with [`DiagramError::DuplicateId`] if any task already uses
    /// `id`, or [`DiagramError::InvalidTask`] if `options` are inconsistent
    /// or the task would render first without a start or a dependency on an
    /// existing task. Nothing is added on failure.
    pub fn add_task(
        &mut self,
        id: impl Into<String>,
        options: TaskOptions,
    ) -> Result<TaskId, DiagramError> {
        self.insert_task(None, id.into(), options)
    }

    /// Mutable view of a section, used to add tasks to it
    ///
    /// # Panics
    /// If `id` was not issued by this chart.
    pub fn section_mut(&mut self, id: SectionId) -> SectionMut<'_> {
        assert!(self.section(id).is_some(), "section handle belongs to another chart");
        SectionMut { gantt: self, id }
    }

    pub fn get_section(&self, id: &str) -> Option<SectionId> {
        self.section_index.get(id).copied()
    }

    pub fn get_task(&self, id: &str) -> Option<TaskId> {
        self.task_index.get(id).copied()
    }

    /// Returns `None` for a handle issued by another chart
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        if id.chart != self.tag {
            return None;
        }
        self.sections.get(id.index)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        if id.chart != self.tag {
            return None;
        }
        self.tasks.get(id.index)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        if id.chart != self.tag {
            return None;
        }
        self.tasks.get_mut(id.index)
    }

    /// All sections, in no particular order
    pub fn list_sections(&self) -> Vec<SectionId> {
        self.section_index.values().copied().collect()
    }

    /// All tasks, sectioned or not, in no particular order
    pub fn list_tasks(&self) -> Vec<TaskId> {
        self.task_index.values().copied().collect()
    }

    /// Sections in insertion order
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Section-less tasks in insertion order
    pub fn loose_tasks(&self) -> &[TaskId] {
        &self.loose
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Index<SectionId> for Gantt {
    type Output = Section;

    fn index(&self, id: SectionId) -> &Section {
        assert_eq!(id.chart, self.tag, "section handle belongs to another chart");
        &self.sections[id.index]
    }
}

impl Index<TaskId> for Gantt {
    type Output = Task;

    fn index(&self, id: TaskId) -> &Task {
        assert_eq!(id.chart, self.tag, "task handle belongs to another chart");
        &self.tasks[id.index]
    }
}

impl IndexMut<TaskId> for Gantt {
    fn index_mut(&mut self, id: TaskId) -> &mut Task {
        assert_eq!(id.chart, self.tag, "task handle belongs to another chart");
        &mut self.tasks[id.index]
    }
}

/// Mutable view of one section together with its owning chart
pub struct SectionMut<'a> {
    gantt: &'a mut Gantt,
    id: SectionId,
}

impl SectionMut<'_> {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn section(&self) -> &Section {
        &self.gantt.sections[self.id.index]
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.gantt.sections[self.id.index].title = title.into();
        self
    }

    /// Add a task at the end of this section
    ///
    /// Task IDs are checked against every task of the chart.
    pub fn add_task(
        &mut self,
        id: impl Into<String>,
        options: TaskOptions,
    ) -> Result<TaskId, DiagramError> {
        self.gantt.insert_task(Some(self.id), id.into(), options)
    }
}
