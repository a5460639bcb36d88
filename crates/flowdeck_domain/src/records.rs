use crate::{ColumnId, ProjectId, Task, TaskId, TaskPriority, UserId};

/// Task shape at the remote-store boundary. Column membership arrives
/// as the legacy `status`/`column_id` pair; [`ensure_task_fields`] must
/// run before anything branches on either field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date_unix_seconds: Option<u64>,
    pub completed: bool,
    pub user_id: String,
    pub project_id: Option<String>,
    pub status: Option<String>,
    pub column_id: Option<String>,
    pub created_at_unix_seconds: u64,
    pub updated_at_unix_seconds: u64,
}

/// What normalizing a record's legacy lane pair did, or would do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LaneRepair {
    /// Both fields unset, or both set to the same value.
    Consistent,
    CopiedFromStatus,
    CopiedFromColumnId,
    /// Both set to different values. `column_id` wins; the pair is only
    /// rewritten by the next explicit task update.
    Divergent,
}

pub fn lane_repair(record: &TaskRecord) -> LaneRepair {
    match (&record.status, &record.column_id) {
        (Some(_), None) => LaneRepair::CopiedFromStatus,
        (None, Some(_)) => LaneRepair::CopiedFromColumnId,
        (Some(status), Some(column_id)) if status != column_id => LaneRepair::Divergent,
        _ => LaneRepair::Consistent,
    }
}

/// Copies whichever of `status`/`column_id` is set onto the other.
/// Records with both or neither set are returned unchanged.
pub fn ensure_task_fields(mut record: TaskRecord) -> TaskRecord {
    match (&record.status, &record.column_id) {
        (Some(status), None) => record.column_id = Some(status.clone()),
        (None, Some(column_id)) => record.status = Some(column_id.clone()),
        _ => {}
    }
    record
}

impl Task {
    pub fn from_record(record: TaskRecord) -> Self {
        let record = ensure_task_fields(record);
        Self {
            id: TaskId::new(record.id),
            title: record.title,
            description: record.description,
            priority: record
                .priority
                .as_deref()
                .and_then(TaskPriority::parse)
                .unwrap_or_default(),
            due_date_unix_seconds: record.due_date_unix_seconds,
            completed: record.completed,
            user_id: UserId::new(record.user_id),
            project_id: record.project_id.map(ProjectId::new),
            lane: record.column_id.map(ColumnId::new),
            created_at_unix_seconds: record.created_at_unix_seconds,
            updated_at_unix_seconds: record.updated_at_unix_seconds,
        }
    }

    /// Both legacy fields are written from the canonical lane, so an
    /// update repairs any divergent pair left at rest.
    pub fn to_record(&self) -> TaskRecord {
        let lane = self.lane.as_ref().map(|lane| lane.as_str().to_owned());
        TaskRecord {
            id: self.id.as_str().to_owned(),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: Some(self.priority.as_str().to_owned()),
            due_date_unix_seconds: self.due_date_unix_seconds,
            completed: self.completed,
            user_id: self.user_id.as_str().to_owned(),
            project_id: self
                .project_id
                .as_ref()
                .map(|id| id.as_str().to_owned()),
            status: lane.clone(),
            column_id: lane,
            created_at_unix_seconds: self.created_at_unix_seconds,
            updated_at_unix_seconds: self.updated_at_unix_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: Option<&str>, column_id: Option<&str>) -> TaskRecord {
        TaskRecord {
            id: "t1".to_owned(),
            title: "Write release notes".to_owned(),
            description: None,
            priority: Some("high".to_owned()),
            due_date_unix_seconds: None,
            completed: false,
            user_id: "u1".to_owned(),
            project_id: Some("p1".to_owned()),
            status: status.map(ToOwned::to_owned),
            column_id: column_id.map(ToOwned::to_owned),
            created_at_unix_seconds: 1_700_000_000,
            updated_at_unix_seconds: 1_700_000_100,
        }
    }

    #[test]
    fn ensure_task_fields_copies_status_into_column_id() {
        let normalized = ensure_task_fields(record(Some("todo"), None));
        assert_eq!(normalized.status.as_deref(), Some("todo"));
        assert_eq!(normalized.column_id.as_deref(), Some("todo"));
    }

    #[test]
    fn ensure_task_fields_copies_column_id_into_status() {
        let normalized = ensure_task_fields(record(None, Some("done")));
        assert_eq!(normalized.status.as_deref(), Some("done"));
        assert_eq!(normalized.column_id.as_deref(), Some("done"));
    }

    #[test]
    fn ensure_task_fields_leaves_complete_and_empty_pairs_alone() {
        let both = record(Some("todo"), Some("todo"));
        assert_eq!(ensure_task_fields(both.clone()), both);

        let neither = record(None, None);
        assert_eq!(ensure_task_fields(neither.clone()), neither);

        let divergent = record(Some("todo"), Some("done"));
        assert_eq!(ensure_task_fields(divergent.clone()), divergent);
    }

    #[test]
    fn lane_repair_classifies_the_pair() {
        assert_eq!(lane_repair(&record(None, None)), LaneRepair::Consistent);
        assert_eq!(
            lane_repair(&record(Some("todo"), Some("todo"))),
            LaneRepair::Consistent
        );
        assert_eq!(
            lane_repair(&record(Some("todo"), None)),
            LaneRepair::CopiedFromStatus
        );
        assert_eq!(
            lane_repair(&record(None, Some("done"))),
            LaneRepair::CopiedFromColumnId
        );
        assert_eq!(
            lane_repair(&record(Some("todo"), Some("done"))),
            LaneRepair::Divergent
        );
    }

    #[test]
    fn from_record_prefers_column_id_on_divergence() {
        let task = Task::from_record(record(Some("todo"), Some("done")));
        assert_eq!(task.lane, Some(ColumnId::new("done")));
    }

    #[test]
    fn from_record_treats_missing_pair_as_unclassified() {
        let task = Task::from_record(record(None, None));
        assert_eq!(task.lane, None);
    }

    #[test]
    fn from_record_defaults_unknown_priority_to_medium() {
        let mut raw = record(None, Some("todo"));
        raw.priority = Some("urgent".to_owned());
        assert_eq!(Task::from_record(raw).priority, TaskPriority::Medium);

        let mut raw = record(None, Some("todo"));
        raw.priority = None;
        assert_eq!(Task::from_record(raw).priority, TaskPriority::Medium);
    }

    #[test]
    fn to_record_writes_both_legacy_fields_from_lane() {
        let task = Task::from_record(record(Some("todo"), Some("done")));
        let written = task.to_record();
        assert_eq!(written.status.as_deref(), Some("done"));
        assert_eq!(written.column_id.as_deref(), Some("done"));

        let unclassified = Task::from_record(record(None, None));
        let written = unclassified.to_record();
        assert_eq!(written.status, None);
        assert_eq!(written.column_id, None);
    }
}
