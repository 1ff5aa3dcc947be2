//! Reconciliation between the Asana task list and Telegram messages.
//!
//! The [`TaskSource`] and [`MessageSink`] traits decouple the reconciler
//! from the HTTP clients so passes can be driven by fakes in tests. One
//! pass lists the project's tasks, compares each against the persisted
//! snapshot, and creates or edits the mirroring Telegram message.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::asana::client::TaskRef;
use crate::models::{TaskDetails, TaskSnapshot};
use crate::persistence::StateStore;
use crate::Result;

/// Read side of the bridge: the external project-management system.
pub trait TaskSource: Send + Sync {
    /// List the tasks currently in a project.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Asana`](crate::AppError::Asana) on request or
    /// decoding failure; the reconciler skips the whole cycle.
    fn list_tasks(
        &self,
        project_gid: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TaskRef>>> + Send + '_>>;

    /// Fetch normalized detail for one task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Asana`](crate::AppError::Asana) on request or
    /// decoding failure; the reconciler skips that task for this cycle.
    fn fetch_details(
        &self,
        gid: &str,
    ) -> Pin<Box<dyn Future<Output = Result<TaskDetails>> + Send + '_>>;
}

/// Write side of the bridge: the chat channel mirroring the tasks.
pub trait MessageSink: Send + Sync {
    /// Post a new message for a task and return its message id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Telegram`](crate::AppError::Telegram) on failure;
    /// the reconciler records no state entry so the send retries next cycle.
    fn send_task(
        &self,
        task: &TaskDetails,
    ) -> Pin<Box<dyn Future<Output = Result<i64>> + Send + '_>>;

    /// Overwrite the text of an existing message for a task.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Telegram`](crate::AppError::Telegram) on failure;
    /// the reconciler leaves the stored snapshot untouched so the edit
    /// retries next cycle.
    fn edit_task(
        &self,
        message_id: i64,
        task: &TaskDetails,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Drives one source/sink pair against the persisted state store.
pub struct Reconciler<S, K> {
    source: S,
    sink: K,
    project_gid: String,
    store: StateStore,
}

impl<S, K> Reconciler<S, K>
where
    S: TaskSource,
    K: MessageSink,
{
    /// Assemble a reconciler over a loaded state store.
    #[must_use]
    pub fn new(source: S, sink: K, project_gid: impl Into<String>, store: StateStore) -> Self {
        Self {
            source,
            sink,
            project_gid: project_gid.into(),
            store,
        }
    }

    /// Read access to the state store, for inspection after a pass.
    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Run one reconciliation pass.
    ///
    /// A listing failure skips the entire cycle without persisting. All
    /// per-task failures are logged and skipped; the pass itself only fails
    /// when the state store cannot be written at the end.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`](crate::AppError::Store) if persisting the
    /// state file fails.
    pub async fn run_pass(&mut self) -> Result<()> {
        let tasks = match self.source.list_tasks(&self.project_gid).await {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(%err, "task listing failed; skipping cycle");
                return Ok(());
            }
        };

        for task in &tasks {
            self.reconcile_task(&task.gid).await;
        }

        // Persisted once per cycle even when nothing changed.
        self.store.save()
    }

    async fn reconcile_task(&mut self, gid: &str) {
        let details = match self.source.fetch_details(gid).await {
            Ok(details) => details,
            Err(err) => {
                error!(gid, %err, "task detail fetch failed; skipping task");
                return;
            }
        };

        match self.store.get(gid) {
            None => self.send_new(details).await,
            Some(existing) => match existing.message_id {
                // Legacy entries written without a message id get repaired
                // with a fresh send.
                None => self.send_new(details).await,
                Some(message_id) if existing.details.differs_from(&details) => {
                    self.edit_existing(message_id, details).await;
                }
                Some(_) => {}
            },
        }
    }

    async fn send_new(&mut self, details: TaskDetails) {
        match self.sink.send_task(&details).await {
            Ok(message_id) => {
                info!(gid = %details.gid, message_id, "task mirrored to chat");
                let gid = details.gid.clone();
                self.store.insert(gid, TaskSnapshot::new(details, message_id));
            }
            Err(err) => {
                // No entry recorded; the task stays unknown and the send
                // retries on the next cycle.
                error!(gid = %details.gid, %err, "message send failed");
            }
        }
    }

    async fn edit_existing(&mut self, message_id: i64, details: TaskDetails) {
        match self.sink.edit_task(message_id, &details).await {
            Ok(()) => {
                info!(gid = %details.gid, message_id, "task change mirrored to chat");
                let gid = details.gid.clone();
                self.store.insert(gid, TaskSnapshot::new(details, message_id));
            }
            Err(err) => {
                // Stored snapshot left untouched so the difference is
                // detected again and the edit retries next cycle.
                error!(gid = %details.gid, message_id, %err, "message edit failed");
            }
        }
    }
}

/// Spawn the polling loop that runs one pass per period.
///
/// The pass is awaited inside the tick arm, so a slow pass delays the next
/// tick instead of overlapping it. The first pass runs immediately.
#[must_use]
pub fn spawn_poll_task<S, K>(
    mut reconciler: Reconciler<S, K>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: TaskSource + 'static,
    K: MessageSink + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("poll task shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(err) = reconciler.run_pass().await {
                        error!(%err, "reconciliation pass failed");
                    }
                }
            }
        }
    })
}
