use anyhow::Context as _;
use flowdeck_domain::{
    Action, BoardService, BoardState, COLUMNS_SETTING_KEY, Column, ColumnId, Effect, LaneRepair,
    Notice, OperationStatus, Project, ProjectId, RemoteError, SettingsStore, Task, TaskId, UserId,
    decode_columns, encode_columns, lane_repair,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};

#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub async fn current_rev(&self) -> anyhow::Result<u64> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::GetRev { reply: tx })
            .await
            .context("engine unavailable")?;
        rx.await.context("engine stopped")
    }

    pub async fn snapshot(&self) -> anyhow::Result<BoardSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::GetSnapshot { reply: tx })
            .await
            .context("engine unavailable")?;
        rx.await.context("engine stopped")
    }

    /// Applies the action and every effect it cascades into, then
    /// returns the new revision.
    pub async fn dispatch(&self, action: Action) -> anyhow::Result<u64> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::Dispatch {
                action: Box::new(action),
                reply: Some(tx),
            })
            .await
            .context("engine unavailable")?;
        rx.await.context("engine stopped")
    }
}

pub enum EngineCommand {
    GetRev {
        reply: oneshot::Sender<u64>,
    },
    GetSnapshot {
        reply: oneshot::Sender<BoardSnapshot>,
    },
    Dispatch {
        action: Box<Action>,
        reply: Option<oneshot::Sender<u64>>,
    },
}

/// Read-only view of the board published after every applied action.
#[derive(Clone, Debug)]
pub struct BoardSnapshot {
    pub rev: u64,
    pub tasks: Vec<Task>,
    pub columns: Vec<Column>,
    pub projects: Vec<Project>,
    pub active_project: Option<ProjectId>,
    pub is_loading: bool,
    pub is_processing: bool,
    pub last_error: Option<String>,
}

#[derive(Clone, Debug)]
pub enum EngineEvent {
    StateChanged { rev: u64, snapshot: BoardSnapshot },
    Notice { rev: u64, notice: Notice },
}

pub struct Engine {
    state: BoardState,
    rev: u64,
    remote: Arc<dyn BoardService>,
    settings: Arc<dyn SettingsStore>,
    events: broadcast::Sender<EngineEvent>,
}

impl Engine {
    pub fn start(
        remote: Arc<dyn BoardService>,
        settings: Arc<dyn SettingsStore>,
    ) -> (EngineHandle, broadcast::Sender<EngineEvent>) {
        let (tx, mut rx) = mpsc::channel::<EngineCommand>(256);
        let (events, _) = broadcast::channel::<EngineEvent>(256);

        let mut engine = Self {
            state: BoardState::new(),
            rev: 0,
            remote,
            settings,
            events: events.clone(),
        };

        tokio::spawn(async move {
            engine.bootstrap().await;
            while let Some(cmd) = rx.recv().await {
                engine.handle(cmd).await;
            }
        });

        (EngineHandle { tx }, events)
    }

    async fn bootstrap(&mut self) {
        self.process_action_queue(Action::AppStarted).await;
    }

    async fn handle(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::GetRev { reply } => {
                let _ = reply.send(self.rev);
            }
            EngineCommand::GetSnapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            EngineCommand::Dispatch { action, reply } => {
                self.process_action_queue(*action).await;
                if let Some(reply) = reply {
                    let _ = reply.send(self.rev);
                }
            }
        }
    }

    async fn process_action_queue(&mut self, initial: Action) {
        let mut actions = VecDeque::from([initial]);
        let mut effects = VecDeque::<Effect>::new();

        while let Some(action) = actions.pop_front() {
            self.rev = self.rev.saturating_add(1);
            let new_effects = self.state.apply(action);
            self.publish_state();

            effects.extend(new_effects);

            while let Some(effect) = effects.pop_front() {
                let mut followups = self.run_effect(effect).await;
                actions.append(&mut followups);
            }
        }
    }

    async fn run_effect(&mut self, effect: Effect) -> VecDeque<Action> {
        match effect {
            Effect::LoadColumns => {
                let settings = self.settings.clone();
                let loaded =
                    tokio::task::spawn_blocking(move || settings.get(COLUMNS_SETTING_KEY))
                        .await
                        .ok()
                        .unwrap_or_else(|| Err("failed to join load columns task".to_owned()));
                let columns = match loaded {
                    Ok(raw) => decode_columns(raw.as_deref()),
                    Err(message) => {
                        tracing::warn!(error = %message, "failed to load column registry");
                        decode_columns(None)
                    }
                };
                VecDeque::from([Action::ColumnsLoaded { columns }])
            }
            Effect::SaveColumns { columns } => {
                let settings = self.settings.clone();
                let encoded = encode_columns(&columns);
                let saved = tokio::task::spawn_blocking(move || {
                    settings.set(COLUMNS_SETTING_KEY, &encoded)
                })
                .await
                .ok()
                .unwrap_or_else(|| Err("failed to join save columns task".to_owned()));
                if let Err(message) = saved {
                    tracing::error!(error = %message, "failed to persist column registry");
                }
                VecDeque::new()
            }

            Effect::FetchProjects { user_id } => {
                let remote = self.remote.clone();
                let result = tokio::task::spawn_blocking(move || remote.fetch_projects(user_id))
                    .await
                    .ok()
                    .unwrap_or_else(|| {
                        Err(RemoteError::transport("failed to join fetch projects task"))
                    });
                let action = match result {
                    Ok(projects) => Action::ProjectsLoaded { projects },
                    Err(err) => Action::ProjectsLoadFailed {
                        message: err.message().to_owned(),
                    },
                };
                VecDeque::from([action])
            }
            Effect::UpdateProject { project } => {
                let remote = self.remote.clone();
                let result = tokio::task::spawn_blocking(move || remote.update_project(project))
                    .await
                    .ok()
                    .unwrap_or_else(|| {
                        Err(RemoteError::transport("failed to join update project task"))
                    });
                let action = match result {
                    Ok(project) => Action::ProjectUpdated { project },
                    Err(err) => Action::ProjectUpdateFailed {
                        message: err.message().to_owned(),
                    },
                };
                VecDeque::from([action])
            }
            Effect::DeleteProject { project_id } => {
                let remote = self.remote.clone();
                let id = project_id.clone();
                let result = tokio::task::spawn_blocking(move || remote.delete_project(id))
                    .await
                    .ok()
                    .unwrap_or_else(|| {
                        Err(RemoteError::transport("failed to join delete project task"))
                    });
                let action = match result {
                    Ok(()) => Action::ProjectDeleted { project_id },
                    Err(err) => Action::ProjectDeleteFailed {
                        message: err.message().to_owned(),
                    },
                };
                VecDeque::from([action])
            }

            Effect::FetchTasks {
                user_id,
                project_id,
                generation,
            } => {
                let remote = self.remote.clone();
                let result =
                    tokio::task::spawn_blocking(move || remote.fetch_tasks(user_id, project_id))
                        .await
                        .ok()
                        .unwrap_or_else(|| {
                            Err(RemoteError::transport("failed to join fetch tasks task"))
                        });
                let action = match result {
                    Ok(records) => {
                        for record in &records {
                            if lane_repair(record) == LaneRepair::Divergent {
                                tracing::warn!(
                                    task_id = %record.id,
                                    status = ?record.status,
                                    column_id = ?record.column_id,
                                    "task carries divergent lane fields"
                                );
                            }
                        }
                        Action::TasksLoaded {
                            generation,
                            records,
                        }
                    }
                    Err(err) => Action::TasksLoadFailed {
                        generation,
                        message: err.message().to_owned(),
                    },
                };
                VecDeque::from([action])
            }
            Effect::CreateTask { user_id, draft } => {
                let remote = self.remote.clone();
                let result =
                    tokio::task::spawn_blocking(move || remote.create_task(user_id, draft))
                        .await
                        .ok()
                        .unwrap_or_else(|| {
                            Err(RemoteError::transport("failed to join create task task"))
                        });
                let action = match result {
                    Ok(record) => Action::TaskCreated { record },
                    Err(err) => Action::TaskCreateFailed {
                        message: err.message().to_owned(),
                    },
                };
                VecDeque::from([action])
            }
            Effect::UpdateTask { record } => {
                let remote = self.remote.clone();
                let result = tokio::task::spawn_blocking(move || remote.update_task(record))
                    .await
                    .ok()
                    .unwrap_or_else(|| {
                        Err(RemoteError::transport("failed to join update task task"))
                    });
                let action = match result {
                    Ok(record) => Action::TaskUpdated { record },
                    Err(err) => Action::TaskUpdateFailed {
                        message: err.message().to_owned(),
                    },
                };
                VecDeque::from([action])
            }
            Effect::DeleteTask { task_id } => {
                let remote = self.remote.clone();
                let id = task_id.clone();
                let result = tokio::task::spawn_blocking(move || remote.delete_task(id))
                    .await
                    .ok()
                    .unwrap_or_else(|| {
                        Err(RemoteError::transport("failed to join delete task task"))
                    });
                let action = match result {
                    Ok(()) => Action::TaskDeleted { task_id },
                    Err(err) => Action::TaskDeleteFailed {
                        message: err.message().to_owned(),
                    },
                };
                VecDeque::from([action])
            }

            Effect::SweepLegacyLanes { user_id } => {
                self.sweep_legacy_lanes(user_id).await;
                VecDeque::new()
            }

            Effect::Notify {
                severity,
                title,
                message,
            } => {
                self.publish_notice(Notice {
                    severity,
                    title,
                    message,
                });
                VecDeque::new()
            }
        }
    }

    /// Best-effort repair of records still missing `column_id`: each
    /// failure is logged and skipped, never aborting the batch.
    async fn sweep_legacy_lanes(&self, user_id: UserId) {
        let remote = self.remote.clone();
        let fetched =
            tokio::task::spawn_blocking(move || remote.fetch_unmigrated_tasks(user_id))
                .await
                .ok()
                .unwrap_or_else(|| Err(RemoteError::transport("failed to join sweep fetch task")));

        let records = match fetched {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "legacy lane sweep could not list records");
                return;
            }
        };
        if records.is_empty() {
            return;
        }

        let mut migrated = 0usize;
        let mut failed = 0usize;
        for record in records {
            let Some(status) = record.status.clone() else {
                continue;
            };
            if record.column_id.is_some() {
                continue;
            }

            let remote = self.remote.clone();
            let task_id = TaskId::new(record.id.clone());
            let lane = ColumnId::new(status);
            let result =
                tokio::task::spawn_blocking(move || remote.assign_task_lane(task_id, lane))
                    .await
                    .ok()
                    .unwrap_or_else(|| {
                        Err(RemoteError::transport("failed to join sweep update task"))
                    });

            match result {
                Ok(()) => migrated += 1,
                Err(err) => {
                    failed += 1;
                    tracing::warn!(task_id = %record.id, error = %err, "legacy lane repair failed");
                }
            }
        }

        tracing::info!(migrated, failed, "legacy lane sweep finished");
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rev: self.rev,
            tasks: self.state.tasks.clone(),
            columns: self.state.columns.clone(),
            projects: self.state.projects.clone(),
            active_project: self.state.active_project.clone(),
            is_loading: self.state.load_status == OperationStatus::Running,
            is_processing: self.state.mutation_status == OperationStatus::Running,
            last_error: self.state.last_error.clone(),
        }
    }

    fn publish_state(&self) {
        let _ = self.events.send(EngineEvent::StateChanged {
            rev: self.rev,
            snapshot: self.snapshot(),
        });
    }

    fn publish_notice(&self, notice: Notice) {
        let _ = self.events.send(EngineEvent::Notice {
            rev: self.rev,
            notice,
        });
    }
}
