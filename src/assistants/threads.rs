use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    client::{AgentClient, Empty},
    ApiResponseOrError,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Thread {
    pub thread_id: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    /// Busy, idle, interrupted or error, depending on the latest run.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What the server does when `thread_id` names an existing thread.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IfExists {
    #[default]
    Raise,
    DoNothing,
}

/// An empty `thread_id` asks the server to mint a fresh one.
#[derive(Serialize, Builder, Debug, Clone, Default, PartialEq)]
#[builder(pattern = "owned")]
#[builder(name = "CreateThreadBuilder")]
#[builder(setter(into))]
pub struct CreateThreadRequest {
    #[builder(default)]
    pub thread_id: String,
    #[builder(default)]
    pub metadata: Map<String, Value>,
    #[builder(default)]
    pub if_exists: IfExists,
}

impl CreateThreadRequest {
    pub fn builder() -> CreateThreadBuilder {
        CreateThreadBuilder::create_empty()
    }
}

impl AgentClient {
    pub async fn create_thread(&self, request: CreateThreadRequest) -> ApiResponseOrError<Thread> {
        self.post("threads", request).await
    }

    pub async fn get_thread(&self, thread_id: &str) -> ApiResponseOrError<Thread> {
        self.get(format!("threads/{thread_id}")).await
    }

    pub async fn delete_thread(&self, thread_id: &str) -> ApiResponseOrError<Empty> {
        self.delete(format!("threads/{thread_id}")).await
    }
}
