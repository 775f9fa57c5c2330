use std::collections::HashMap;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{client::AgentClient, ApiResponseOrError};

/// An assistant record as returned by `assistants/search`.
///
/// Deployments disagree on which identifier a run should reference, so both
/// `id` and `assistant_id` are optional and nothing is inferred from one to
/// the other.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Assistant {
    #[serde(default)]
    pub id: Option<String>,
    /// The name the assistant is registered under, e.g. `betting_pool_generator`.
    #[serde(default)]
    pub name: Option<String>,
    /// The identifier runs are created against.
    #[serde(default)]
    pub assistant_id: Option<String>,
    /// The graph backing this assistant.
    #[serde(default)]
    pub graph_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, Value>>,
    /// Any other fields the server sent, kept so the record logs in full.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Builder, Debug, Clone, Default)]
#[builder(pattern = "owned")]
#[builder(name = "SearchAssistantsBuilder")]
#[builder(setter(strip_option, into))]
pub struct SearchAssistantsRequest {
    /// Free-text query; the server matches it against assistant names.
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub graph_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub metadata: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub offset: Option<u32>,
}

impl SearchAssistantsRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn builder(query: impl Into<String>) -> SearchAssistantsBuilder {
        SearchAssistantsBuilder::create_empty().query(query)
    }
}

/// Returns the first assistant whose name is exactly `name`.
pub fn select_assistant<'a>(assistants: &'a [Assistant], name: &str) -> Option<&'a Assistant> {
    assistants
        .iter()
        .find(|assistant| assistant.name.as_deref() == Some(name))
}

impl AgentClient {
    /// The response body is treated as the collection itself; a body wrapped
    /// in an object fails to decode.
    pub async fn search_assistants(
        &self,
        request: SearchAssistantsRequest,
    ) -> ApiResponseOrError<Vec<Assistant>> {
        self.post("assistants/search", request).await
    }

    pub async fn get_assistant(&self, assistant_id: &str) -> ApiResponseOrError<Assistant> {
        self.get(format!("assistants/{assistant_id}")).await
    }

    /// Searches for `name` and picks the exact match, if any.
    pub async fn find_assistant(&self, name: &str) -> ApiResponseOrError<Option<Assistant>> {
        let assistants = self
            .search_assistants(SearchAssistantsRequest::new(name))
            .await?;

        Ok(select_assistant(&assistants, name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{transport::mock::MockTransport, Credentials, Error};
    use serde_json::json;
    use std::sync::Arc;

    fn client(mock: &Arc<MockTransport>) -> AgentClient {
        AgentClient::with_transport(Credentials::new("http://agent.test", None), mock.clone())
    }

    fn named(name: &str) -> Assistant {
        Assistant {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn select_requires_exact_name() {
        let assistants = vec![
            named("betting_pool_generator_v2"),
            named("Betting_Pool_Generator"),
            named("betting_pool_generator"),
        ];

        assert_eq!(
            select_assistant(&assistants, "betting_pool_generator"),
            Some(&assistants[2])
        );
        assert_eq!(select_assistant(&assistants, "grader"), None);
    }

    #[test]
    fn select_picks_the_first_of_duplicates() {
        let mut first = named("betting_pool_generator");
        first.assistant_id = Some("first".to_string());
        let mut second = named("betting_pool_generator");
        second.assistant_id = Some("second".to_string());
        let assistants = vec![first, second];

        let selected = select_assistant(&assistants, "betting_pool_generator").unwrap();

        assert_eq!(selected.assistant_id.as_deref(), Some("first"));
    }

    #[test]
    fn assistant_keeps_unknown_fields() {
        let assistant: Assistant = serde_json::from_value(json!({
            "assistant_id": "a-1",
            "graph_id": "betting_pool_generator",
            "name": "betting_pool_generator",
            "version": 3,
        }))
        .unwrap();

        assert_eq!(assistant.id, None);
        assert_eq!(assistant.assistant_id.as_deref(), Some("a-1"));
        assert_eq!(assistant.extra.get("version"), Some(&json!(3)));
    }

    #[test]
    fn search_request_omits_unset_fields() {
        let request = SearchAssistantsRequest::builder("betting_pool_generator")
            .limit(10u32)
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "betting_pool_generator", "limit": 10 })
        );
    }

    #[tokio::test]
    async fn find_assistant_searches_by_name() {
        let mock = Arc::new(MockTransport::new().respond(json!([
            { "assistant_id": "a-0", "name": "betting_idea_grader" },
            { "assistant_id": "a-1", "name": "betting_pool_generator" },
        ])));

        let found = client(&mock)
            .find_assistant("betting_pool_generator")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.assistant_id.as_deref(), Some("a-1"));

        let requests = mock.requests();
        assert_eq!(requests[0].url, "http://agent.test/assistants/search");
        assert_eq!(
            requests[0].body,
            Some(json!({ "query": "betting_pool_generator" }))
        );
    }

    #[tokio::test]
    async fn find_assistant_returns_none_on_miss() {
        let mock = Arc::new(MockTransport::new().respond(json!([])));

        let found = client(&mock).find_assistant("nobody").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn wrapped_search_response_does_not_decode() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "assistants": [{ "name": "betting_pool_generator" }]
        })));

        let result = client(&mock)
            .search_assistants(SearchAssistantsRequest::new("betting_pool_generator"))
            .await;

        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn get_assistant_uses_its_id() {
        let mock = Arc::new(MockTransport::new().respond(json!({ "assistant_id": "a-1" })));

        client(&mock).get_assistant("a-1").await.unwrap();

        assert_eq!(mock.requests()[0].url, "http://agent.test/assistants/a-1");
    }
}
