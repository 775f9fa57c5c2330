//! The HTTP seam between [`AgentClient`](crate::AgentClient) and the network.

use crate::{Credentials, Error};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde_json::Value;

/// Sends one JSON request and hands back the decoded JSON body.
///
/// Implementations must turn non-2xx responses into [`Error::Api`] carrying
/// whatever body the server sent.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<Value, Error>;
}

/// Default transport backed by a single `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqwestTransport")
    }
}

impl ReqwestTransport {
    pub fn new(credentials: &Credentials) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = credentials.api_key() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {api_key}"))?,
            );
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<Value, Error> {
        log::debug!("Request[{}] {}", method, url);

        let mut request = self.client.request(method.clone(), url);

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        log::debug!("Response[{}] {} {url}", method, status.as_str());

        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                payload: error_payload(&text),
            });
        }

        decode_body(&text)
    }
}

fn decode_body(text: &str) -> Result<Value, Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(text)?)
}

fn error_payload(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
