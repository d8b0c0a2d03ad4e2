use crate::error::{WidgetError, WidgetResult};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Thin JSON-over-HTTP client shared by the widgets.
///
/// Transport failures, non-2xx statuses and payloads that do not match the
/// expected shape all come back as a [`WidgetError`]; callers decide which
/// static message to show.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new() -> WidgetResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| WidgetError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url
    ) -> WidgetResult<T> {
        debug!("GET {}", url);
        let request = self.http.get(url.clone());
        let body = Self::send(request, &url).await?;
        validate(endpoint, &body)
    }

    /// `POST` without a body.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url
    ) -> WidgetResult<T> {
        debug!("POST {}", url);
        let request = self.http.post(url.clone());
        let body = Self::send(request, &url).await?;
        validate(endpoint, &body)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
        payload: &B
    ) -> WidgetResult<T> {
        debug!("POST {} (json)", url);
        let request = self.http.post(url.clone()).json(payload);
        let body = Self::send(request, &url).await?;
        validate(endpoint, &body)
    }

    /// `POST` a JSON body and only check the status; the response is discarded.
    pub async fn post_json_discard<B: Serialize + ?Sized>(
        &self,
        url: Url,
        payload: &B
    ) -> WidgetResult<()> {
        debug!("POST {} (json, response ignored)", url);
        let request = self.http.post(url.clone()).json(payload);
        Self::send(request, &url).await.map(|_| ())
    }

    async fn send(request: reqwest::RequestBuilder, url: &Url) -> WidgetResult<String> {
        let response = request.send().await.map_err(|source| WidgetError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().await.map_err(|source| WidgetError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

/// Decodes an untrusted response body into its expected shape.
pub fn validate<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> WidgetResult<T> {
    serde_json::from_str(body).map_err(|source| WidgetError::Validation { endpoint, source })
}
