use crate::{ColumnId, Project, ProjectId, TaskId, TaskPriority, TaskRecord, UserId};

/// Failure reported by the hosted board store. The store signals errors
/// either as a completed call carrying a rejection or as a failed
/// transport; both arrive here so nothing downstream branches on which
/// channel delivered the failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RemoteError {
    /// The call completed and the store reported failure.
    Rejected { message: String },
    /// The call itself failed: network error, malformed response, or an
    /// unexpected fault in the client.
    Transport { message: String },
}

impl RemoteError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message } | Self::Transport { message } => message,
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RemoteError {}

/// Fields the client supplies when creating a task; ids and timestamps
/// are assigned by the store.
#[derive(Clone, Debug, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date_unix_seconds: Option<u64>,
    pub project_id: Option<ProjectId>,
    pub lane: Option<ColumnId>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeSeverity {
    Success,
    Error,
}

/// A short-lived, dismissible user-facing notification. Emitted beside
/// every action outcome; never the only success/failure signal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub title: String,
    pub message: String,
}

/// The hosted task/project store. Calls block; the engine drives them
/// from blocking threads.
pub trait BoardService: Send + Sync {
    /// `project_id: None` selects tasks that belong to no project.
    fn fetch_tasks(
        &self,
        user_id: UserId,
        project_id: Option<ProjectId>,
    ) -> Result<Vec<TaskRecord>, RemoteError>;

    fn create_task(&self, user_id: UserId, draft: TaskDraft) -> Result<TaskRecord, RemoteError>;

    fn update_task(&self, record: TaskRecord) -> Result<TaskRecord, RemoteError>;

    fn delete_task(&self, task_id: TaskId) -> Result<(), RemoteError>;

    fn fetch_projects(&self, user_id: UserId) -> Result<Vec<Project>, RemoteError>;

    fn update_project(&self, project: Project) -> Result<Project, RemoteError>;

    /// Deleting a project cascade-deletes its tasks inside the store;
    /// callers rely on that and never issue per-task deletes.
    fn delete_project(&self, project_id: ProjectId) -> Result<(), RemoteError>;

    /// Records with `column_id` null and `status` non-null, the sweep's
    /// work list.
    fn fetch_unmigrated_tasks(&self, user_id: UserId) -> Result<Vec<TaskRecord>, RemoteError>;

    fn assign_task_lane(&self, task_id: TaskId, lane: ColumnId) -> Result<(), RemoteError>;
}

/// Local key-value persistence for client-side settings (the column
/// registry lives under one fixed key).
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_is_channel_agnostic() {
        assert_eq!(RemoteError::rejected("row not found").message(), "row not found");
        assert_eq!(RemoteError::transport("connection reset").message(), "connection reset");
        assert_eq!(format!("{}", RemoteError::rejected("denied")), "denied");
    }
}
