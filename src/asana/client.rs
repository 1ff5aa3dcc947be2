//! Asana REST client for project task listings and task detail fetches.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;

use super::notes;
use crate::models::task::{NOT_ASSIGNED, NOT_SPECIFIED, NO_DESCRIPTION};
use crate::models::TaskDetails;
use crate::reconcile::TaskSource;
use crate::{AppError, Result};

const ASANA_API_BASE: &str = "https://app.asana.com/api/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fields requested from the task detail endpoint.
const DETAIL_OPT_FIELDS: &str = "name,notes,assignee.name,due_on,custom_fields,permalink_url";

/// Generic Asana response envelope; every payload sits under `data`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    /// The wrapped payload.
    pub data: T,
}

/// One entry of a project task listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TaskRef {
    /// Stable task identifier.
    pub gid: String,
}

/// Assignee object as returned by the detail endpoint.
#[derive(Debug, Deserialize)]
pub struct WireAssignee {
    /// Display name of the assignee.
    pub name: String,
}

/// Task detail object as returned by the detail endpoint.
///
/// Every field other than `gid` may be absent or null depending on task
/// state and requested `opt_fields`.
#[derive(Debug, Deserialize)]
pub struct WireTask {
    /// Stable task identifier.
    pub gid: String,
    /// Task title.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw free-text description.
    #[serde(default)]
    pub notes: Option<String>,
    /// Assignee, when the task is assigned.
    #[serde(default)]
    pub assignee: Option<WireAssignee>,
    /// Calendar due date.
    #[serde(default)]
    pub due_on: Option<String>,
    /// URL of the task in Asana.
    #[serde(default)]
    pub permalink_url: Option<String>,
}

impl From<WireTask> for TaskDetails {
    fn from(task: WireTask) -> Self {
        let sanitized = notes::sanitize(&task.notes.unwrap_or_default());
        Self {
            gid: task.gid,
            name: task.name.unwrap_or_default(),
            notes: if sanitized.is_empty() {
                NO_DESCRIPTION.to_owned()
            } else {
                sanitized
            },
            assignee: task
                .assignee
                .map_or_else(|| NOT_ASSIGNED.to_owned(), |assignee| assignee.name),
            due_on: task.due_on.unwrap_or_else(|| NOT_SPECIFIED.to_owned()),
            permalink_url: task.permalink_url.unwrap_or_default(),
            priority: None,
        }
    }
}

/// Asana REST client authenticated with a personal access token.
pub struct AsanaClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl AsanaClient {
    /// Build a client against the production Asana API.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Asana` if the HTTP client cannot be constructed.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(access_token, ASANA_API_BASE)
    }

    /// Build a client against an alternate base URL (used by tests).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Asana` if the HTTP client cannot be constructed.
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Asana(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    /// Fetch the task listing for a project.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Asana` on request, status, or decoding failure.
    pub async fn list_project_tasks(&self, project_gid: &str) -> Result<Vec<TaskRef>> {
        let url = format!("{}/projects/{project_gid}/tasks", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|err| AppError::Asana(format!("task listing request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Asana(format!(
                "task listing returned {status}: {body}"
            )));
        }

        let envelope: DataEnvelope<Vec<TaskRef>> = response
            .json()
            .await
            .map_err(|err| AppError::Asana(format!("task listing decode failed: {err}")))?;
        Ok(envelope.data)
    }

    /// Fetch full detail for one task and normalize it into [`TaskDetails`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Asana` on request, status, or decoding failure.
    pub async fn task_details(&self, gid: &str) -> Result<TaskDetails> {
        let url = format!(
            "{}/tasks/{gid}?opt_fields={DETAIL_OPT_FIELDS}",
            self.base_url
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|err| AppError::Asana(format!("task detail request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Asana(format!(
                "task detail returned {status}: {body}"
            )));
        }

        let envelope: DataEnvelope<WireTask> = response
            .json()
            .await
            .map_err(|err| AppError::Asana(format!("task detail decode failed: {err}")))?;
        Ok(envelope.data.into())
    }
}

impl TaskSource for AsanaClient {
    fn list_tasks(
        &self,
        project_gid: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<TaskRef>>> + Send + '_>> {
        let project_gid = project_gid.to_owned();
        Box::pin(async move { self.list_project_tasks(&project_gid).await })
    }

    fn fetch_details(
        &self,
        gid: &str,
    ) -> Pin<Box<dyn Future<Output = Result<TaskDetails>> + Send + '_>> {
        let gid = gid.to_owned();
        Box::pin(async move { self.task_details(&gid).await })
    }
}
