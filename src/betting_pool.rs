//! The betting pool generator sequence: find the generator assistant, open a
//! fresh thread and block on a single run.
//!
//! Each step runs only after the previous one succeeded. Nothing is retried.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    assistants::{
        messages::Message, runs::CreateRunRequest, select_assistant, threads::CreateThreadRequest,
        SearchAssistantsRequest,
    },
    client::AgentClient,
    ApiResponseOrError, Error,
};

/// Name the generator assistant is registered under.
pub const ASSISTANT_NAME: &str = "betting_pool_generator";

/// The one message every run is started with.
pub const RUN_PROMPT: &str = "Generate a betting pool for me";

/// Runs the whole sequence and returns the final run state unmodified.
///
/// Failures are logged here, with the server's payload when there is one, and
/// then handed back to the caller.
pub async fn search_and_create_run(client: &AgentClient) -> ApiResponseOrError<Value> {
    let result = run_sequence(client).await;

    if let Err(error) = &result {
        match error {
            Error::Api { status, payload } => log::error!("API Error ({status}): {payload}"),
            Error::Transport(source) => log::error!("API Error: {source}"),
            _ => {}
        }
    }

    result
}

async fn run_sequence(client: &AgentClient) -> ApiResponseOrError<Value> {
    let assistants = client
        .search_assistants(SearchAssistantsRequest::new(ASSISTANT_NAME))
        .await?;

    log::info!("search response: {}", to_log(&assistants));

    let assistant = select_assistant(&assistants, ASSISTANT_NAME);

    log::info!("betting pool assistant: {}", to_log(&assistant));

    let assistant = assistant.ok_or(Error::AssistantNotFound)?;

    let thread = client
        .create_thread(CreateThreadRequest::default())
        .await?;

    log::info!("betting pool assistant id: {:?}", assistant.id);
    log::info!("thread id: {}", thread.thread_id);
    log::info!("thread response: {}", to_log(&thread));

    if assistant.assistant_id.is_none() {
        log::warn!("assistant `{ASSISTANT_NAME}` has no assistant_id, creating the run without one");
    }

    let request = CreateRunRequest::new(
        assistant.assistant_id.clone(),
        vec![Message::user(RUN_PROMPT)],
    );
    let run = client
        .create_run_and_wait(&thread.thread_id, request)
        .await?;

    log::info!("run response: {run}");

    Ok(run)
}

fn to_log<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// The pool the generator proposes, found under `betting_pool_idea` in the
/// final run state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BettingPoolIdea {
    /// The question bettors pick a side on.
    pub betting_pool_idea: String,
    pub options: Vec<String>,
    pub closure_summary: String,
    pub closure_instructions: String,
    pub category: String,
    #[serde(default)]
    pub odds_format: String,
    #[serde(default)]
    pub odds_type: String,
    #[serde(default)]
    pub odds_value: String,
    /// ISO-8601, with or without a trailing `Z`.
    #[serde(default)]
    pub closure_date: Option<String>,
}

impl BettingPoolIdea {
    pub fn from_run_output(output: &Value) -> Option<Self> {
        let idea = output.get("betting_pool_idea")?;

        serde_json::from_value(idea.clone()).ok()
    }
}
