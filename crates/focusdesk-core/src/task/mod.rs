//! Task store with Eisenhower-matrix quadrant assignment.
//!
//! Operations are addressed by position in the display order; removing a
//! task shifts every later position down by one. Each task additionally
//! carries a stable opaque `id` minted at creation, so anything that wants
//! identity across mutations holds the id rather than a position.
//! Out-of-range positions and empty-after-trim text are silent no-ops, the
//! same validation-rejection class as everywhere else in the core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Eisenhower-matrix bucket. A task with no quadrant sits in the free list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    /// Cyclic order: Q1 -> Q2 -> Q3 -> Q4 -> Q1.
    pub fn next(self) -> Self {
        match self {
            Quadrant::Q1 => Quadrant::Q2,
            Quadrant::Q2 => Quadrant::Q3,
            Quadrant::Q3 => Quadrant::Q4,
            Quadrant::Q4 => Quadrant::Q1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::Q1 => "Urgente e importante",
            Quadrant::Q2 => "Importante, não urgente",
            Quadrant::Q3 => "Urgente, não importante",
            Quadrant::Q4 => "Nem urgente nem importante",
        }
    }

    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quadrant::Q1 => f.write_str("q1"),
            Quadrant::Q2 => f.write_str("q2"),
            Quadrant::Q3 => f.write_str("q3"),
            Quadrant::Q4 => f.write_str("q4"),
        }
    }
}

#[derive(Error, Debug)]
#[error("unknown quadrant: {0}")]
pub struct UnknownQuadrant(pub String);

impl FromStr for Quadrant {
    type Err = UnknownQuadrant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "q1" => Ok(Quadrant::Q1),
            "q2" => Ok(Quadrant::Q2),
            "q3" => Ok(Quadrant::Q3),
            "q4" => Ok(Quadrant::Q4),
            other => Err(UnknownQuadrant(other.to_string())),
        }
    }
}

/// A sub-step owned by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubStep {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// A single task. Older saved records may lack `id`, `sub_steps` or
/// `quadrant`; deserialization backfills them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "new_task_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub sub_steps: Vec<SubStep>,
    #[serde(default)]
    pub quadrant: Option<Quadrant>,
}

fn new_task_id() -> String {
    format!("task-{}", uuid::Uuid::new_v4())
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_task_id(),
            text: text.into(),
            completed: false,
            sub_steps: Vec::new(),
            quadrant: None,
        }
    }
}

/// Ordered task collection. Serializes as a plain JSON array so the
/// persisted payload is the task sequence itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    // ── Mutations ────────────────────────────────────────────────────

    /// Append a free-list task. Returns false (no-op) for empty text.
    pub fn add_task(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.tasks.push(Task::new(text));
        true
    }

    /// Append a task directly into Q2, the schedule/focus default for
    /// tasks entered from the matrix input.
    pub fn add_matrix_task(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let mut task = Task::new(text);
        task.quadrant = Some(Quadrant::Q2);
        self.tasks.push(task);
        true
    }

    pub fn toggle_completed(&mut self, pos: usize) -> bool {
        match self.tasks.get_mut(pos) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn add_sub_step(&mut self, pos: usize, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.tasks.get_mut(pos) {
            Some(task) => {
                task.sub_steps.push(SubStep {
                    text: text.to_string(),
                    completed: false,
                });
                true
            }
            None => false,
        }
    }

    pub fn toggle_sub_step_completed(&mut self, pos: usize, sub_pos: usize) -> bool {
        match self
            .tasks
            .get_mut(pos)
            .and_then(|task| task.sub_steps.get_mut(sub_pos))
        {
            Some(step) => {
                step.completed = !step.completed;
                true
            }
            None => false,
        }
    }

    pub fn assign_quadrant(&mut self, pos: usize, quadrant: Quadrant) -> bool {
        match self.tasks.get_mut(pos) {
            Some(task) => {
                task.quadrant = Some(quadrant);
                true
            }
            None => false,
        }
    }

    /// Advance along the Q1 -> Q2 -> Q3 -> Q4 -> Q1 cycle. A free-list task
    /// enters the cycle at Q1. Returns the new quadrant.
    pub fn advance_quadrant(&mut self, pos: usize) -> Option<Quadrant> {
        let task = self.tasks.get_mut(pos)?;
        let next = match task.quadrant {
            Some(q) => q.next(),
            None => Quadrant::Q1,
        };
        task.quadrant = Some(next);
        Some(next)
    }

    /// Return a task to the free list.
    pub fn unassign(&mut self, pos: usize) -> bool {
        match self.tasks.get_mut(pos) {
            Some(task) => {
                task.quadrant = None;
                true
            }
            None => false,
        }
    }

    /// Remove the task at `pos`; later positions shift down by one.
    pub fn remove(&mut self, pos: usize) -> Option<Task> {
        if pos < self.tasks.len() {
            Some(self.tasks.remove(pos))
        } else {
            None
        }
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, pos: usize) -> Option<&Task> {
        self.tasks.get(pos)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks with no quadrant, in original order, with their positions.
    pub fn free_tasks(&self) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.quadrant.is_none())
            .collect()
    }

    /// Tasks assigned to `quadrant`, in original order, with their positions.
    pub fn quadrant_tasks(&self, quadrant: Quadrant) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.quadrant == Some(quadrant))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_a_noop() {
        let mut store = TaskStore::default();
        assert!(!store.add_task(""));
        assert!(!store.add_task("   "));
        assert!(!store.add_matrix_task("\t"));
        assert!(store.is_empty());
    }

    #[test]
    fn add_task_lands_in_free_list() {
        let mut store = TaskStore::default();
        assert!(store.add_task("Write report"));
        assert_eq!(store.len(), 1);
        let task = store.get(0).unwrap();
        assert_eq!(task.text, "Write report");
        assert_eq!(task.quadrant, None);
        assert!(!task.completed);
        assert!(task.sub_steps.is_empty());
    }

    #[test]
    fn matrix_task_defaults_to_q2() {
        let mut store = TaskStore::default();
        store.add_matrix_task("Plan sprint");
        assert_eq!(store.get(0).unwrap().quadrant, Some(Quadrant::Q2));
        assert_eq!(store.quadrant_tasks(Quadrant::Q2).len(), 1);
        assert!(store.free_tasks().is_empty());
    }

    #[test]
    fn advance_is_a_four_cycle_from_q1() {
        let mut store = TaskStore::default();
        store.add_task("cycle me");
        store.assign_quadrant(0, Quadrant::Q1);
        let visited: Vec<_> = (0..4).map(|_| store.advance_quadrant(0).unwrap()).collect();
        assert_eq!(
            visited,
            vec![Quadrant::Q2, Quadrant::Q3, Quadrant::Q4, Quadrant::Q1]
        );
    }

    #[test]
    fn advance_enters_cycle_at_q1() {
        let mut store = TaskStore::default();
        store.add_task("free");
        assert_eq!(store.advance_quadrant(0), Some(Quadrant::Q1));
    }

    #[test]
    fn unassign_returns_to_free_list() {
        let mut store = TaskStore::default();
        store.add_matrix_task("demote me");
        assert!(store.unassign(0));
        assert_eq!(store.free_tasks().len(), 1);
    }

    #[test]
    fn remove_preserves_survivor_order() {
        let mut store = TaskStore::default();
        for text in ["a", "b", "c", "d"] {
            store.add_task(text);
        }
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.text, "b");
        let texts: Vec<_> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c", "d"]);
    }

    #[test]
    fn out_of_range_positions_are_noops() {
        let mut store = TaskStore::default();
        store.add_task("only");
        assert!(!store.toggle_completed(5));
        assert!(!store.assign_quadrant(5, Quadrant::Q1));
        assert!(store.advance_quadrant(5).is_none());
        assert!(store.remove(5).is_none());
        assert!(!store.toggle_sub_step_completed(0, 0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sub_steps_toggle_independently() {
        let mut store = TaskStore::default();
        store.add_task("parent");
        assert!(store.add_sub_step(0, "step one"));
        assert!(store.add_sub_step(0, "step two"));
        assert!(!store.add_sub_step(0, "  "));
        assert!(store.toggle_sub_step_completed(0, 1));
        let task = store.get(0).unwrap();
        assert!(!task.sub_steps[0].completed);
        assert!(task.sub_steps[1].completed);
        assert!(!task.completed);
    }

    #[test]
    fn backfills_older_saved_records() {
        let json = r#"[{"text":"legacy","completed":true}]"#;
        let store: TaskStore = serde_json::from_str(json).unwrap();
        let task = store.get(0).unwrap();
        assert!(task.completed);
        assert!(task.sub_steps.is_empty());
        assert_eq!(task.quadrant, None);
        assert!(task.id.starts_with("task-"));
    }

    #[test]
    fn ids_survive_reindexing() {
        let mut store = TaskStore::default();
        store.add_task("a");
        store.add_task("b");
        let id_b = store.get(1).unwrap().id.clone();
        store.remove(0);
        assert_eq!(store.get(0).unwrap().id, id_b);
    }
}
