use derive_builder::Builder;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{client::AgentClient, ApiResponseOrError};

use super::messages::Message;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Run {
    #[serde(alias = "run_id")]
    pub id: String,
    /// The status of the run.
    pub status: RunStatus,
    #[serde(default)]
    pub thread_id: Option<String>,
    /// The ID of the assistant used for this run.
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Run lifecycle as reported by the server. Statuses this crate doesn't know
/// about are kept verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Pending,
    Running,
    Error,
    Success,
    Timeout,
    Interrupted,
    Other(String),
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Pending | RunStatus::Running)
    }
}

impl From<String> for RunStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => RunStatus::Pending,
            "running" => RunStatus::Running,
            "error" => RunStatus::Error,
            "success" => RunStatus::Success,
            "timeout" => RunStatus::Timeout,
            "interrupted" => RunStatus::Interrupted,
            _ => RunStatus::Other(value),
        }
    }
}

impl From<RunStatus> for String {
    fn from(value: RunStatus) -> Self {
        match value {
            RunStatus::Pending => "pending".to_string(),
            RunStatus::Running => "running".to_string(),
            RunStatus::Error => "error".to_string(),
            RunStatus::Success => "success".to_string(),
            RunStatus::Timeout => "timeout".to_string(),
            RunStatus::Interrupted => "interrupted".to_string(),
            RunStatus::Other(other) => other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct RunInput {
    pub messages: Vec<Message>,
}

#[derive(Serialize, Builder, Debug, Clone, Default, PartialEq)]
#[builder(pattern = "owned")]
#[builder(name = "CreateRunBuilder")]
#[builder(setter(strip_option, into))]
pub struct CreateRunRequest {
    /// Left out of the body entirely when unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub assistant_id: Option<String>,
    pub input: RunInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub metadata: Option<Map<String, Value>>,
    /// Graph configuration, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub config: Option<Value>,
}

impl CreateRunRequest {
    /// A run whose input is the given messages, in order.
    pub fn new(assistant_id: Option<String>, messages: Vec<Message>) -> Self {
        Self {
            assistant_id,
            input: RunInput { messages },
            ..Default::default()
        }
    }

    pub fn builder(input: impl Into<RunInput>) -> CreateRunBuilder {
        CreateRunBuilder::create_empty().input(input)
    }
}

impl From<Vec<Message>> for RunInput {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl AgentClient {
    /// Creates a run and blocks until the server resolves it. The final state
    /// comes back exactly as sent.
    pub async fn create_run_and_wait(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
    ) -> ApiResponseOrError<Value> {
        self.request_raw(
            Method::POST,
            format!("threads/{thread_id}/runs/wait"),
            Some(request),
        )
        .await
    }

    pub async fn create_run(
        &self,
        thread_id: &str,
        request: CreateRunRequest,
    ) -> ApiResponseOrError<Run> {
        self.post(format!("threads/{thread_id}/runs"), request)
            .await
    }

    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> ApiResponseOrError<Run> {
        self.get(format!("threads/{thread_id}/runs/{run_id}")).await
    }
}
