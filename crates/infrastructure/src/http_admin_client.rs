use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use warden_application::{AdminSession, Page, PageInfo, PageQuery};
use warden_core::{AppError, AppResult};

mod auth;
mod organizations;
mod permissions;
mod roles;
mod tickets;


/// HTTP implementation of every remote administration port.
///
/// Authorized calls carry the session's bearer token. Successful payloads are
/// read from the `data` member of the response envelope; failures are mapped
/// from the status code and the `message` member of the error body.
#[derive(Debug, Clone)]
pub struct HttpAdminClient {
    http_client: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpAdminClient {
    /// Creates a client rooted at the API base URL, e.g. `http://host/api`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: Url) -> Self {
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(path.as_str());
        }

        Self {
            http_client,
            base_url,
        }
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| AppError::Internal(format!("invalid endpoint '{path}': {error}")))
    }

    fn listing_endpoint(
        &self,
        path: &str,
        query: &PageQuery,
        status: Option<&str>,
    ) -> AppResult<Url> {
        let mut url = self.endpoint(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", query.page.to_string().as_str());
            pairs.append_pair("limit", query.limit.to_string().as_str());
            if let Some(search) = query.search.as_deref() {
                pairs.append_pair("search", search);
            }
            if let Some(status) = status {
                pairs.append_pair("status", status);
            }
        }

        Ok(url)
    }

    fn request(&self, method: Method, url: Url, session: Option<&AdminSession>) -> RequestBuilder {
        debug!(method = %method, path = url.path(), "sending api request");
        let builder = self.http_client.request(method, url);
        match session {
            Some(session) => builder.bearer_auth(session.access_token().expose()),
            None => builder,
        }
    }

    fn authorized(
        &self,
        method: Method,
        path: &str,
        session: &AdminSession,
    ) -> AppResult<RequestBuilder> {
        Ok(self.request(method, self.endpoint(path)?, Some(session)))
    }

    async fn execute(&self, request: RequestBuilder) -> AppResult<Vec<u8>> {
        let response = request
            .send()
            .await
            .map_err(|error| AppError::Network(format!("api request failed: {error}")))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| AppError::Network(format!("api response unreadable: {error}")))?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|error_body| error_body.message)
            .filter(|message| !message.trim().is_empty());
        let error = error_for_status(status, message);
        warn!(status = status.as_u16(), error = %error, "api request failed");
        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body)
            .map_err(|error| AppError::Network(format!("api response has unexpected shape: {error}")))
    }

    async fn send_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let envelope: Envelope<T> = self.send_json(request).await?;
        Ok(envelope.data)
    }

    async fn send_page<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<Page<T>> {
        let envelope: Envelope<Vec<T>> = self.send_json(request).await?;
        Ok(Page {
            items: envelope.data,
            info: envelope.pagination,
        })
    }

    async fn send_ignoring_body(&self, request: RequestBuilder) -> AppResult<()> {
        self.execute(request).await.map(|_| ())
    }
}

fn error_for_status(status: StatusCode, message: Option<String>) -> AppError {
    let describe = |message: Option<String>| {
        message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        })
    };

    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(describe(message)),
        StatusCode::FORBIDDEN => AppError::Forbidden(describe(message)),
        StatusCode::NOT_FOUND => AppError::NotFound(describe(message)),
        StatusCode::CONFLICT => AppError::Conflict(describe(message)),
        status if status.is_client_error() => match message {
            Some(message) => AppError::Rejected(message),
            None => AppError::Network(format!("api answered {status} without a message")),
        },
        status => AppError::Network(format!("api answered {status}")),
    }
}
