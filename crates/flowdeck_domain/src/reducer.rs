use crate::columns::{create_column, default_columns};
use crate::{
    Action, BoardState, Effect, NoticeSeverity, OperationStatus, ProjectId, Session, Task, UserId,
};

const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

fn notify(severity: NoticeSeverity, title: &str, message: impl Into<String>) -> Effect {
    Effect::Notify {
        severity,
        title: title.to_owned(),
        message: message.into(),
    }
}

fn notify_success(title: &str, message: impl Into<String>) -> Effect {
    notify(NoticeSeverity::Success, title, message)
}

fn notify_error(title: &str, message: impl Into<String>) -> Effect {
    notify(NoticeSeverity::Error, title, message)
}

fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            refresh_generation: 0,
            session: None,
            tasks: Vec::new(),
            columns: default_columns(),
            projects: Vec::new(),
            active_project: None,
            load_status: OperationStatus::Idle,
            mutation_status: OperationStatus::Idle,
            last_error: None,
        }
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::AppStarted => vec![Effect::LoadColumns],

            Action::SessionEstablished { user_id } => {
                self.session = Some(Session {
                    user_id: user_id.clone(),
                });
                self.last_error = None;
                self.load_status = OperationStatus::Running;
                self.refresh_generation += 1;
                vec![
                    Effect::FetchProjects {
                        user_id: user_id.clone(),
                    },
                    Effect::FetchTasks {
                        user_id: user_id.clone(),
                        project_id: self.active_project.clone(),
                        generation: self.refresh_generation,
                    },
                    Effect::SweepLegacyLanes { user_id },
                ]
            }
            Action::SessionCleared => {
                self.session = None;
                self.tasks = Vec::new();
                self.projects = Vec::new();
                self.active_project = None;
                self.load_status = OperationStatus::Idle;
                self.mutation_status = OperationStatus::Idle;
                self.last_error = None;
                Vec::new()
            }

            Action::LoadProjects => {
                let mut effects = Vec::new();
                let Some(user_id) = self.require_session(&mut effects) else {
                    return effects;
                };
                self.load_status = OperationStatus::Running;
                effects.push(Effect::FetchProjects { user_id });
                effects
            }
            Action::ProjectsLoaded { projects } => {
                self.load_status = OperationStatus::Idle;
                self.projects = projects;
                vec![notify_success(
                    "Projects loaded",
                    count_label(self.projects.len(), "project"),
                )]
            }
            Action::ProjectsLoadFailed { message } => {
                self.fail_load("Failed to load projects", message)
            }

            Action::UpdateProject { project } => {
                let mut effects = Vec::new();
                if self.require_session(&mut effects).is_none() {
                    return effects;
                }
                self.mutation_status = OperationStatus::Running;
                effects.push(Effect::UpdateProject { project });
                effects
            }
            Action::ProjectUpdated { project } => {
                self.mutation_status = OperationStatus::Idle;
                let name = project.name.clone();
                self.projects = self
                    .projects
                    .iter()
                    .map(|p| if p.id == project.id { project.clone() } else { p.clone() })
                    .collect();
                vec![notify_success("Project updated", name)]
            }
            Action::ProjectUpdateFailed { message } => {
                self.fail_mutation("Failed to update project", message)
            }

            Action::DeleteProject { project_id } => {
                let mut effects = Vec::new();
                if self.require_session(&mut effects).is_none() {
                    return effects;
                }
                self.mutation_status = OperationStatus::Running;
                effects.push(Effect::DeleteProject { project_id });
                effects
            }
            Action::ProjectDeleted { project_id } => {
                self.mutation_status = OperationStatus::Idle;
                self.projects = self
                    .projects
                    .iter()
                    .filter(|p| p.id != project_id)
                    .cloned()
                    .collect();
                // The store cascade-deletes the project's tasks; mirror it locally.
                self.tasks = self
                    .tasks
                    .iter()
                    .filter(|t| t.project_id.as_ref() != Some(&project_id))
                    .cloned()
                    .collect();
                if self.active_project.as_ref() == Some(&project_id) {
                    self.active_project = None;
                }
                vec![notify_success(
                    "Project deleted",
                    "The project and its tasks were removed",
                )]
            }
            Action::ProjectDeleteFailed { message } => {
                self.fail_mutation("Failed to delete project", message)
            }

            Action::ActivateProject { project_id } => {
                self.active_project = project_id;
                let scope = self.active_project.clone();
                if self.session.is_none() {
                    return Vec::new();
                }
                self.start_task_fetch(scope)
            }

            Action::RefreshTasks => {
                let scope = self.active_project.clone();
                let mut effects = Vec::new();
                if self.require_session(&mut effects).is_none() {
                    return effects;
                }
                let mut fetch = self.start_task_fetch(scope);
                effects.append(&mut fetch);
                effects
            }
            Action::LoadUnassignedTasks => {
                let mut effects = Vec::new();
                if self.require_session(&mut effects).is_none() {
                    return effects;
                }
                let mut fetch = self.start_task_fetch(None);
                effects.append(&mut fetch);
                effects
            }
            Action::TasksLoaded { generation, records } => {
                // A completion from a superseded fetch never touches state.
                if generation != self.refresh_generation {
                    return Vec::new();
                }
                self.load_status = OperationStatus::Idle;
                self.tasks = records.into_iter().map(Task::from_record).collect();
                vec![notify_success(
                    "Tasks loaded",
                    count_label(self.tasks.len(), "task"),
                )]
            }
            Action::TasksLoadFailed {
                generation,
                message,
            } => {
                if generation != self.refresh_generation {
                    return Vec::new();
                }
                self.fail_load("Failed to load tasks", message)
            }

            Action::CreateTask { draft } => {
                let mut effects = Vec::new();
                let Some(user_id) = self.require_session(&mut effects) else {
                    return effects;
                };
                self.mutation_status = OperationStatus::Running;
                effects.push(Effect::CreateTask { user_id, draft });
                effects
            }
            Action::TaskCreated { record } => {
                self.mutation_status = OperationStatus::Idle;
                let task = Task::from_record(record);
                let title = task.title.clone();
                self.tasks = self.tasks.iter().cloned().chain([task]).collect();
                vec![notify_success("Task created", title)]
            }
            Action::TaskCreateFailed { message } => {
                self.fail_mutation("Failed to create task", message)
            }

            Action::UpdateTask { task } => {
                let mut effects = Vec::new();
                if self.require_session(&mut effects).is_none() {
                    return effects;
                }
                self.mutation_status = OperationStatus::Running;
                effects.push(Effect::UpdateTask {
                    record: task.to_record(),
                });
                effects
            }
            Action::TaskUpdated { record } => {
                self.mutation_status = OperationStatus::Idle;
                let task = Task::from_record(record);
                let title = task.title.clone();
                self.tasks = self
                    .tasks
                    .iter()
                    .map(|t| if t.id == task.id { task.clone() } else { t.clone() })
                    .collect();
                vec![notify_success("Task updated", title)]
            }
            Action::TaskUpdateFailed { message } => {
                self.fail_mutation("Failed to update task", message)
            }

            Action::DeleteTask { task_id } => {
                let mut effects = Vec::new();
                if self.require_session(&mut effects).is_none() {
                    return effects;
                }
                self.mutation_status = OperationStatus::Running;
                effects.push(Effect::DeleteTask { task_id });
                effects
            }
            Action::TaskDeleted { task_id } => {
                self.mutation_status = OperationStatus::Idle;
                let title = self
                    .task(&task_id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.tasks = self
                    .tasks
                    .iter()
                    .filter(|t| t.id != task_id)
                    .cloned()
                    .collect();
                vec![notify_success("Task deleted", title)]
            }
            Action::TaskDeleteFailed { message } => {
                self.fail_mutation("Failed to delete task", message)
            }

            Action::CreateColumn { title } => match create_column(&title, &self.columns) {
                Some(column) => {
                    let label = column.title.clone();
                    self.columns = self.columns.iter().cloned().chain([column]).collect();
                    vec![
                        Effect::SaveColumns {
                            columns: self.columns.clone(),
                        },
                        notify_success("Column added", label),
                    ]
                }
                None => {
                    let message = if title.trim().is_empty() {
                        "A column needs a title".to_owned()
                    } else {
                        format!("A column named \"{}\" already exists", title.trim())
                    };
                    self.last_error = Some(message.clone());
                    vec![notify_error("Column not added", message)]
                }
            },
            Action::ColumnsLoaded { columns } => {
                self.columns = columns;
                Vec::new()
            }

            Action::ClearError => {
                self.last_error = None;
                Vec::new()
            }
        }
    }

    /// Without a session, surface the failure and emit nothing that
    /// would reach the remote store.
    fn require_session(&mut self, effects: &mut Vec<Effect>) -> Option<UserId> {
        match &self.session {
            Some(session) => Some(session.user_id.clone()),
            None => {
                self.last_error = Some(AUTH_REQUIRED_MESSAGE.to_owned());
                effects.push(notify_error(
                    AUTH_REQUIRED_MESSAGE,
                    "Sign in to continue",
                ));
                None
            }
        }
    }

    fn start_task_fetch(&mut self, project_id: Option<ProjectId>) -> Vec<Effect> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let user_id = session.user_id.clone();
        self.load_status = OperationStatus::Running;
        self.refresh_generation += 1;
        vec![Effect::FetchTasks {
            user_id,
            project_id,
            generation: self.refresh_generation,
        }]
    }

    fn fail_load(&mut self, title: &str, message: String) -> Vec<Effect> {
        self.load_status = OperationStatus::Idle;
        self.last_error = Some(message.clone());
        vec![notify_error(title, message)]
    }

    fn fail_mutation(&mut self, title: &str, message: String) -> Vec<Effect> {
        self.mutation_status = OperationStatus::Idle;
        self.last_error = Some(message.clone());
        vec![notify_error(title, message)]
    }
}
