//! Visibility filter over the task mirror.

use tasklist_services::Task;

/// The two independent filter toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub important_only: bool,
    pub pending_only: bool,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match (self.important_only, self.pending_only) {
            (true, true) => task.important && !task.completed,
            (true, false) => task.important,
            (false, true) => !task.completed,
            (false, false) => true,
        }
    }

    /// Visible subset of `tasks`, in mirror order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_services::TaskId;

    fn task(id: i64, important: bool, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            title: format!("task {}", id),
            important,
            completed,
            is_editing: false,
        }
    }

    fn visible_ids(filter: TaskFilter, tasks: &[Task]) -> Vec<String> {
        filter
            .apply(tasks)
            .into_iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[test]
    fn both_toggles_show_important_pending_only() {
        let tasks = vec![task(1, true, false), task(2, false, false), task(3, true, true)];
        let filter = TaskFilter {
            important_only: true,
            pending_only: true,
        };
        assert_eq!(visible_ids(filter, &tasks), vec!["1"]);
    }

    #[test]
    fn matches_predicate_table_for_every_toggle_state() {
        let tasks = vec![
            task(1, false, false),
            task(2, false, true),
            task(3, true, false),
            task(4, true, true),
        ];

        for important_only in [false, true] {
            for pending_only in [false, true] {
                let filter = TaskFilter {
                    important_only,
                    pending_only,
                };
                for t in &tasks {
                    let expected = (!important_only || t.important) && (!pending_only || !t.completed);
                    assert_eq!(
                        filter.matches(t),
                        expected,
                        "filter {:?} on task {:?}",
                        filter,
                        t
                    );
                }
            }
        }
    }

    #[test]
    fn no_toggles_show_everything_in_order() {
        let tasks = vec![task(3, false, true), task(1, true, false)];
        assert_eq!(visible_ids(TaskFilter::default(), &tasks), vec!["3", "1"]);
    }
}
