//! # Nexus REST Client
//!
//! reqwest-based implementation of [`NexusApi`].
//!
//! Every call:
//! - authenticates with HTTP basic auth
//! - is bounded by the client-wide request timeout
//! - aborts with [`NexusError::Cancelled`] once the shutdown token fires
//! - is timed and counted per kind and operation

use super::{NexusApi, NexusError};
use crate::config::NexusConfig;
use crate::constants::NEXUS_API_PREFIX;
use crate::observability::metrics;
use crate::translate::{ContentSelectorPayload, PrivilegePayload, RepositoryPayload, RolePayload};
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, Instrument};
use zeroize::Zeroizing;

const REPOSITORY: &str = "Repository";
const PRIVILEGE: &str = "Privilege";
const ROLE: &str = "Role";
const CONTENT_SELECTOR: &str = "ContentSelector";

pub struct NexusClient {
    http_client: Client,
    base_url: Url,
    username: String,
    password: Zeroizing<String>,
    cancellation: CancellationToken,
}

impl std::fmt::Debug for NexusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NexusClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl NexusClient {
    /// Create a client for the Nexus instance described by `config`.
    ///
    /// # Errors
    /// The base URL does not parse, or the HTTP client cannot be built.
    pub fn new(
        config: &NexusConfig,
        timeout: Duration,
        cancellation: CancellationToken,
    ) -> Result<Self, NexusError> {
        let base = format!("{}{}", config.url, NEXUS_API_PREFIX);
        let base_url =
            Url::parse(&base).map_err(|e| NexusError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(NexusError::InvalidBaseUrl(base));
        }

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            cancellation,
        })
    }

    /// Base URL joined with percent-encoded path segments
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .basic_auth(&self.username, Some(self.password.as_str()))
            .header(header::ACCEPT, "application/json")
    }

    /// Run one API call under a span, racing it against shutdown.
    async fn execute<T, F>(
        &self,
        kind: &'static str,
        operation: &'static str,
        call: F,
    ) -> Result<T, NexusError>
    where
        F: Future<Output = Result<T, NexusError>>,
    {
        let span = debug_span!("nexus.request", nexus.kind = kind, nexus.operation = operation);
        let start = Instant::now();

        let result = async {
            tokio::select! {
                biased;
                () = self.cancellation.cancelled() => Err(NexusError::Cancelled),
                result = call => result,
            }
        }
        .instrument(span)
        .await;

        metrics::record_remote_operation(kind, operation, start.elapsed().as_secs_f64());
        match &result {
            Ok(_) | Err(NexusError::NotFound) => {}
            Err(e) => {
                debug!(nexus.kind = kind, nexus.operation = operation, error = %e, "Nexus call failed");
                metrics::increment_remote_operation_errors(kind, operation);
            }
        }
        result
    }

    async fn get_optional(
        &self,
        kind: &'static str,
        segments: &[&str],
    ) -> Result<Option<Value>, NexusError> {
        let url = self.url(segments);
        self.execute(kind, "get", async move {
            let response = self.request(Method::GET, url).send().await?;
            read_optional(response).await
        })
        .await
    }

    async fn delete(
        &self,
        kind: &'static str,
        segments: &[&str],
        accepted: &[StatusCode],
    ) -> Result<(), NexusError> {
        let url = self.url(segments);
        self.execute(kind, "delete", async move {
            let response = self.request(Method::DELETE, url).send().await?;
            expect_deleted(response, accepted).await
        })
        .await
    }
}

#[async_trait]
impl NexusApi for NexusClient {
    async fn get_repository(&self, name: &str) -> Result<Option<Value>, NexusError> {
        self.get_optional(REPOSITORY, &["repositories", name]).await
    }

    async fn create_repository(&self, payload: &RepositoryPayload) -> Result<(), NexusError> {
        let repository_type = payload.repository_type;
        let url = self.url(&[
            "repositories",
            repository_type.format.as_str(),
            repository_type.flavor.as_str(),
        ]);
        self.execute(REPOSITORY, "create", async move {
            let response = self.request(Method::POST, url).json(payload).send().await?;
            expect_status(response, &[StatusCode::CREATED]).await
        })
        .await
    }

    async fn update_repository(&self, payload: &RepositoryPayload) -> Result<(), NexusError> {
        let repository_type = payload.repository_type;
        let url = self.url(&[
            "repositories",
            repository_type.format.as_str(),
            repository_type.flavor.as_str(),
            payload.name.as_str(),
        ]);
        self.execute(REPOSITORY, "update", async move {
            let response = self.request(Method::PUT, url).json(payload).send().await?;
            expect_status(response, &[StatusCode::OK, StatusCode::NO_CONTENT]).await
        })
        .await
    }

    async fn delete_repository(&self, name: &str) -> Result<(), NexusError> {
        self.delete(REPOSITORY, &["repositories", name], &[StatusCode::NO_CONTENT])
            .await
    }

    async fn get_privilege(&self, name: &str) -> Result<Option<Value>, NexusError> {
        self.get_optional(PRIVILEGE, &["security", "privileges", name])
            .await
    }

    async fn create_privilege(&self, payload: &PrivilegePayload) -> Result<(), NexusError> {
        let url = self.url(&["security", "privileges", payload.privilege_type().as_str()]);
        self.execute(PRIVILEGE, "create", async move {
            let response = self.request(Method::POST, url).json(payload).send().await?;
            expect_status(response, &[StatusCode::CREATED]).await
        })
        .await
    }

    async fn update_privilege(&self, payload: &PrivilegePayload) -> Result<(), NexusError> {
        let url = self.url(&[
            "security",
            "privileges",
            payload.privilege_type().as_str(),
            payload.name.as_str(),
        ]);
        self.execute(PRIVILEGE, "update", async move {
            let response = self.request(Method::PUT, url).json(payload).send().await?;
            expect_status(response, &[StatusCode::NO_CONTENT]).await
        })
        .await
    }

    async fn delete_privilege(&self, name: &str) -> Result<(), NexusError> {
        self.delete(
            PRIVILEGE,
            &["security", "privileges", name],
            &[StatusCode::NO_CONTENT],
        )
        .await
    }

    async fn get_role(&self, id: &str) -> Result<Option<Value>, NexusError> {
        self.get_optional(ROLE, &["security", "roles", id]).await
    }

    async fn create_role(&self, payload: &RolePayload) -> Result<(), NexusError> {
        let url = self.url(&["security", "roles"]);
        self.execute(ROLE, "create", async move {
            let response = self.request(Method::POST, url).json(payload).send().await?;
            expect_status(response, &[StatusCode::CREATED]).await
        })
        .await
    }

    async fn update_role(&self, payload: &RolePayload) -> Result<(), NexusError> {
        let url = self.url(&["security", "roles", payload.id.as_str()]);
        self.execute(ROLE, "update", async move {
            let response = self.request(Method::PUT, url).json(payload).send().await?;
            expect_status(response, &[StatusCode::NO_CONTENT]).await
        })
        .await
    }

    async fn delete_role(&self, id: &str) -> Result<(), NexusError> {
        self.delete(ROLE, &["security", "roles", id], &[StatusCode::NO_CONTENT])
            .await
    }

    async fn content_selector_exists(&self, name: &str) -> Result<bool, NexusError> {
        let url = self.url(&["security", "content-selectors", name]);
        self.execute(CONTENT_SELECTOR, "exists", async move {
            let response = self.request(Method::HEAD, url).send().await?;
            match response.status() {
                StatusCode::OK => Ok(true),
                StatusCode::NOT_FOUND => Ok(false),
                _ => Err(unexpected(response).await),
            }
        })
        .await
    }

    async fn get_content_selector(&self, name: &str) -> Result<Option<Value>, NexusError> {
        self.get_optional(CONTENT_SELECTOR, &["security", "content-selectors", name])
            .await
    }

    async fn create_content_selector(
        &self,
        payload: &ContentSelectorPayload,
    ) -> Result<(), NexusError> {
        let url = self.url(&["security", "content-selectors"]);
        self.execute(CONTENT_SELECTOR, "create", async move {
            let response = self.request(Method::POST, url).json(payload).send().await?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(unexpected(response).await)
            }
        })
        .await
    }

    async fn update_content_selector(
        &self,
        payload: &ContentSelectorPayload,
    ) -> Result<(), NexusError> {
        let url = self.url(&["security", "content-selectors", payload.name.as_str()]);
        self.execute(CONTENT_SELECTOR, "update", async move {
            let response = self
                .request(Method::PUT, url)
                .json(&payload.update_body())
                .send()
                .await?;
            expect_status(response, &[StatusCode::OK, StatusCode::NO_CONTENT]).await
        })
        .await
    }

    async fn delete_content_selector(&self, name: &str) -> Result<(), NexusError> {
        self.delete(
            CONTENT_SELECTOR,
            &["security", "content-selectors", name],
            &[StatusCode::OK, StatusCode::NO_CONTENT],
        )
        .await
    }
}

async fn unexpected(response: Response) -> NexusError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    NexusError::UnexpectedResponse { status, body }
}

async fn expect_status(response: Response, accepted: &[StatusCode]) -> Result<(), NexusError> {
    if accepted.contains(&response.status()) {
        Ok(())
    } else {
        Err(unexpected(response).await)
    }
}

async fn expect_deleted(response: Response, accepted: &[StatusCode]) -> Result<(), NexusError> {
    match response.status() {
        status if accepted.contains(&status) => Ok(()),
        StatusCode::NOT_FOUND => Err(NexusError::NotFound),
        _ => Err(unexpected(response).await),
    }
}

async fn read_optional(response: Response) -> Result<Option<Value>, NexusError> {
    match response.status() {
        StatusCode::OK => {
            let body = response.bytes().await?;
            Ok(Some(serde_json::from_slice(&body)?))
        }
        StatusCode::NOT_FOUND => Ok(None),
        _ => Err(unexpected(response).await),
    }
}
