use crate::{Column, Project, ProjectId, Task, TaskDraft, TaskId, TaskRecord, UserId};

/// Everything that can change the board state. Intents come from the
/// UI; `…Loaded`/`…ed`/`…Failed` completions come back from the engine
/// when an effect settles.
#[derive(Clone, Debug)]
pub enum Action {
    AppStarted,

    SessionEstablished {
        user_id: UserId,
    },
    SessionCleared,

    LoadProjects,
    ProjectsLoaded {
        projects: Vec<Project>,
    },
    ProjectsLoadFailed {
        message: String,
    },

    UpdateProject {
        project: Project,
    },
    ProjectUpdated {
        project: Project,
    },
    ProjectUpdateFailed {
        message: String,
    },

    DeleteProject {
        project_id: ProjectId,
    },
    ProjectDeleted {
        project_id: ProjectId,
    },
    ProjectDeleteFailed {
        message: String,
    },

    ActivateProject {
        project_id: Option<ProjectId>,
    },

    RefreshTasks,
    LoadUnassignedTasks,
    TasksLoaded {
        generation: u64,
        records: Vec<TaskRecord>,
    },
    TasksLoadFailed {
        generation: u64,
        message: String,
    },

    CreateTask {
        draft: TaskDraft,
    },
    TaskCreated {
        record: TaskRecord,
    },
    TaskCreateFailed {
        message: String,
    },

    UpdateTask {
        task: Task,
    },
    TaskUpdated {
        record: TaskRecord,
    },
    TaskUpdateFailed {
        message: String,
    },

    DeleteTask {
        task_id: TaskId,
    },
    TaskDeleted {
        task_id: TaskId,
    },
    TaskDeleteFailed {
        message: String,
    },

    CreateColumn {
        title: String,
    },
    ColumnsLoaded {
        columns: Vec<Column>,
    },

    ClearError,
}
