use std::sync::Arc;

use crate::{
    transport::{ReqwestTransport, Transport},
    ApiResponseOrError, Credentials,
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone)]
pub struct AgentClient {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for AgentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AgentClient({})", self.credentials.base_url())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Empty {}

impl AgentClient {
    pub fn default() -> ApiResponseOrError<Self> {
        Self::new(Credentials::default())
    }

    pub fn from_env() -> ApiResponseOrError<Self> {
        Self::new(Credentials::from_env())
    }

    pub fn new(credentials: Credentials) -> ApiResponseOrError<Self> {
        let transport = ReqwestTransport::new(&credentials)?;

        Ok(Self::with_transport(credentials, Arc::new(transport)))
    }

    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sends a request and returns the body exactly as the server sent it.
    pub async fn request_raw<S, R>(
        &self,
        method: Method,
        route: R,
        body: Option<S>,
    ) -> ApiResponseOrError<Value>
    where
        R: Into<String>,
        S: Serialize,
    {
        let url = self.credentials.url(&route.into());
        let body = body.map(|body| serde_json::to_value(body)).transpose()?;

        self.transport.send(method, &url, body).await
    }

    pub async fn request<S, R, T>(
        &self,
        method: Method,
        route: R,
        body: Option<S>,
    ) -> ApiResponseOrError<T>
    where
        R: Into<String>,
        S: Serialize,
        T: DeserializeOwned,
    {
        let value = self.request_raw(method, route, body).await?;

        Ok(serde_json::from_value(value)?)
    }

    pub async fn get<R, T>(&self, route: R) -> ApiResponseOrError<T>
    where
        R: Into<String>,
        T: DeserializeOwned,
    {
        self.request::<(), R, T>(Method::GET, route, None).await
    }

    pub async fn post<S, R, T>(&self, route: R, body: S) -> ApiResponseOrError<T>
    where
        R: Into<String>,
        S: Serialize,
        T: DeserializeOwned,
    {
        self.request(Method::POST, route, Some(body)).await
    }

    pub async fn delete<R>(&self, route: R) -> ApiResponseOrError<Empty>
    where
        R: Into<String>,
    {
        // The server answers deletes with an empty body.
        self.request_raw::<(), R>(Method::DELETE, route, None)
            .await
            .map(|_| Empty {})
    }
}
