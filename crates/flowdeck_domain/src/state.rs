use crate::Column;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UserId(pub(crate) String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskId(pub(crate) String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ProjectId(pub(crate) String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Slug identifier of a board column, unique within the registry.
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ColumnId(pub(crate) String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationStatus {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Canonical task model. Column membership lives in the single `lane`
/// field; the legacy `status`/`column_id` pair exists only on
/// [`crate::TaskRecord`] at the store boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date_unix_seconds: Option<u64>,
    pub completed: bool,
    pub user_id: UserId,
    pub project_id: Option<ProjectId>,
    /// `None` means unclassified: the task belongs to no column.
    pub lane: Option<ColumnId>,
    pub created_at_unix_seconds: u64,
    pub updated_at_unix_seconds: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub created_at_unix_seconds: u64,
    pub updated_at_unix_seconds: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub user_id: UserId,
}

/// The authoritative client-side view of the board. One instance per
/// engine; consumers read published snapshots and write only by
/// dispatching [`crate::Action`]s.
#[derive(Clone, Debug)]
pub struct BoardState {
    pub(crate) refresh_generation: u64,

    pub session: Option<Session>,
    pub tasks: Vec<Task>,
    pub columns: Vec<Column>,
    pub projects: Vec<Project>,
    pub active_project: Option<ProjectId>,
    pub load_status: OperationStatus,
    pub mutation_status: OperationStatus,
    pub last_error: Option<String>,
}

impl BoardState {
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *task_id)
    }

    pub fn project(&self, project_id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *project_id)
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == *column_id)
    }

    pub fn refresh_generation(&self) -> u64 {
        self.refresh_generation
    }
}
