//! Superset REST API client
//!
//! Wraps the handful of endpoints supersync needs: login, CSRF token,
//! paginated listing, export and import. No `reqwest` types escape this
//! module; failures surface as [`SupersetError`] variants.

use super::models::{
    CsrfTokenResponse, ListResponse, LoginRequest, LoginResponse, ResourceSummary,
};
use crate::config::{RetryConfig, SupersetConfig};
use crate::domain::{ResourceKind, Result, SupersetError, SupersyncError};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Client for one Superset server
///
/// Create it with [`SupersetClient::new`], then call [`login`] followed by
/// [`fetch_csrf_token`] if imports are planned. The access token is attached
/// to every subsequent request.
///
/// [`login`]: SupersetClient::login
/// [`fetch_csrf_token`]: SupersetClient::fetch_csrf_token
pub struct SupersetClient {
    base_url: String,
    client: Client,
    access_token: Option<String>,
    csrf_token: Option<String>,
    config: SupersetConfig,
}

impl SupersetClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: SupersetConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            SupersyncError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url,
            client,
            access_token: None,
            csrf_token: None,
            config,
        })
    }

    /// Base URL of the Superset server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a login has succeeded on this client
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Log in and store the bearer token for later requests
    ///
    /// # Errors
    ///
    /// Returns [`SupersetError::AuthenticationFailed`] on a non-success
    /// status, [`SupersetError::Timeout`] when the request times out and
    /// [`SupersetError::ConnectionFailed`] on other transport errors.
    pub async fn login(&mut self) -> Result<()> {
        let url = format!("{}/api/v1/security/login", self.base_url);
        let body = LoginRequest {
            username: self.config.username.clone(),
            password: self.config.password.expose_secret().as_ref().to_string(),
            provider: self.config.auth_provider.clone(),
            refresh: true,
        };

        tracing::info!(
            base_url = %self.base_url,
            username = %self.config.username,
            "Logging in to Superset"
        );

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(SupersetError::AuthenticationFailed(format!(
                "login returned status {status}: {text}"
            ))
            .into());
        }

        let login: LoginResponse = resp
            .json()
            .await
            .map_err(|e| SupersetError::InvalidResponse(e.to_string()))?;

        self.access_token = Some(login.access_token);
        tracing::info!("Login successful");
        Ok(())
    }

    /// Fetch the CSRF token required by the import endpoint
    ///
    /// Must be called after [`login`](SupersetClient::login); the token is
    /// sent as `X-CSRFToken` on every import request.
    pub async fn fetch_csrf_token(&mut self) -> Result<()> {
        let url = format!("{}/api/v1/security/csrf_token/", self.base_url);

        let resp = self
            .authorized(self.client.get(&url))?
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(SupersetError::CsrfTokenFailed(format!(
                "status {status}: {text}"
            ))
            .into());
        }

        let token: CsrfTokenResponse = resp
            .json()
            .await
            .map_err(|e| SupersetError::InvalidResponse(e.to_string()))?;

        self.csrf_token = Some(token.result);
        tracing::debug!("CSRF token obtained");
        Ok(())
    }

    /// List every object of a resource kind, page by page
    ///
    /// Pages until the server returns fewer rows than the configured
    /// page size.
    pub async fn list_all(&self, kind: ResourceKind) -> Result<Vec<ResourceSummary>> {
        let mut items = Vec::new();
        let mut page = 0usize;
        let page_size = self.config.page_size;

        tracing::info!(resource = %kind, "Fetching object list from Superset");

        loop {
            let rows = self.list_page(kind, page).await?;
            let row_count = rows.len();
            items.extend(rows);

            if row_count < page_size {
                break;
            }
            page += 1;
        }

        tracing::info!(resource = %kind, count = items.len(), "Object list fetched");
        Ok(items)
    }

    /// Fetch one page of a resource listing
    pub async fn list_page(&self, kind: ResourceKind, page: usize) -> Result<Vec<ResourceSummary>> {
        let url = format!("{}/api/v1/{}/", self.base_url, kind.api_name());
        let query = format!(
            "{{\"page\":{},\"page_size\":{}}}",
            page, self.config.page_size
        );

        let response = self
            .retry_request(|| async {
                let resp = self
                    .authorized(self.client.get(&url).query(&[("q", query.as_str())]))?
                    .send()
                    .await
                    .map_err(|e| SupersyncError::Superset(transport_error(e)))?;

                if !resp.status().is_success() {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    let err = if status.is_server_error() {
                        SupersetError::ServerError {
                            status: status.as_u16(),
                            message: format!("listing {}: {body}", kind.api_name()),
                        }
                    } else {
                        SupersetError::ListFailed {
                            resource: kind.api_name().to_string(),
                            message: format!("status {}: {body}", status.as_u16()),
                        }
                    };
                    return Err(err.into());
                }

                resp.json::<ListResponse>().await.map_err(|e| {
                    SupersyncError::Superset(SupersetError::InvalidResponse(e.to_string()))
                })
            })
            .await?;

        tracing::debug!(
            resource = %kind,
            page = page,
            rows = response.result.len(),
            "Fetched list page"
        );

        Ok(response.result)
    }

    /// Download the export bundle (a zip of YAML files) for one object
    pub async fn export_bundle(&self, kind: ResourceKind, id: u64) -> Result<Vec<u8>> {
        let url = format!("{}/api/v1/{}/export/", self.base_url, kind.api_name());
        // Superset expects a rison list of IDs, e.g. q=!(9)
        let query = format!("!({id})");

        tracing::debug!(resource = %kind, id = id, "Exporting object");

        self.retry_request(|| async {
            let resp = self
                .authorized(self.client.get(&url).query(&[("q", query.as_str())]))?
                .send()
                .await
                .map_err(|e| SupersyncError::Superset(transport_error(e)))?;

            match resp.status() {
                StatusCode::OK => {
                    let bytes = resp.bytes().await.map_err(|e| {
                        SupersyncError::Superset(SupersetError::InvalidResponse(e.to_string()))
                    })?;
                    Ok(bytes.to_vec())
                }
                status if status.is_server_error() => {
                    let body = resp.text().await.unwrap_or_default();
                    Err(SupersetError::ServerError {
                        status: status.as_u16(),
                        message: format!("exporting {} {id}: {body}", kind.api_name()),
                    }
                    .into())
                }
                status => {
                    let body = resp.text().await.unwrap_or_default();
                    Err(SupersetError::ExportFailed {
                        resource: kind.api_name().to_string(),
                        id,
                        message: format!("status {status}: {body}"),
                    }
                    .into())
                }
            }
        })
        .await
    }

    /// Upload a zip bundle to the import endpoint
    ///
    /// The form carries the archive as `formData` plus an `overwrite` flag.
    /// Imports are not retried: a failed upload may still have been applied
    /// server-side, so the caller decides whether to run again.
    pub async fn import_bundle(
        &self,
        kind: ResourceKind,
        zip_name: &str,
        bytes: Vec<u8>,
        overwrite: bool,
    ) -> Result<()> {
        let url = format!("{}/api/v1/{}/import/", self.base_url, kind.api_name());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(zip_name.to_string())
            .mime_str("application/zip")
            .map_err(|e| SupersetError::InvalidResponse(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("formData", part)
            .text("overwrite", if overwrite { "true" } else { "false" });

        let mut request = self
            .authorized(self.client.post(&url).query(&[("format", "json")]))?
            .multipart(form);

        if let Some(ref csrf) = self.csrf_token {
            request = request.header("X-CSRFToken", csrf);
        }

        tracing::info!(resource = %kind, bundle = %zip_name, "Importing bundle");

        let resp = request
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(SupersetError::ServerError {
                    status: status.as_u16(),
                    message: format!("importing {zip_name}: {body}"),
                }
                .into());
            }
            return Err(SupersetError::ImportFailed {
                name: zip_name.to_string(),
                message: format!("status {}: {body}", status.as_u16()),
            }
            .into());
        }

        tracing::info!(resource = %kind, bundle = %zip_name, "Import succeeded");
        Ok(())
    }

    /// Attach the bearer token to a request
    fn authorized(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        match self.access_token {
            Some(ref token) => Ok(request.header("Authorization", format!("Bearer {token}"))),
            None => Err(SupersetError::AuthenticationFailed(
                "not logged in; call login() first".to_string(),
            )
            .into()),
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries {
                        return Err(e);
                    }

                    let delay_ms = backoff_delay_ms(&self.config.retry, attempt);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

/// Classify a reqwest transport failure
fn transport_error(e: reqwest::Error) -> SupersetError {
    if e.is_timeout() {
        SupersetError::Timeout(e.to_string())
    } else {
        SupersetError::ConnectionFailed(e.to_string())
    }
}

/// Exponential backoff delay for the given attempt, capped at `max_delay_ms`
///
/// Computed in floating point so fractional multipliers like 1.5 grow
/// the delay instead of truncating to a constant.
fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let delay = retry.initial_delay_ms as f64 * retry.backoff_multiplier.powf((attempt - 1) as f64);
    (delay as u64).min(retry.max_delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn test_config(base_url: &str) -> SupersetConfig {
        SupersetConfig {
            base_url: base_url.to_string(),
            auth_provider: "db".to_string(),
            username: "admin".to_string(),
            password: secret_string("admin".to_string()),
            tls_verify: true,
            timeout_seconds: 5,
            page_size: 100,
            retry: Default::default(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = SupersetClient::new(test_config("http://localhost:8090/")).unwrap();
        assert!(!client.is_authenticated());
        // trailing slash is trimmed so joined URLs stay clean
        assert_eq!(client.base_url(), "http://localhost:8090");
    }

    #[tokio::test]
    async fn test_requests_require_login() {
        let client = SupersetClient::new(test_config("http://localhost:8090")).unwrap();
        let err = client.list_page(ResourceKind::Dashboard, 0).await;
        assert!(err.is_err());
        assert!(err
            .unwrap_err()
            .to_string()
            .contains("not logged in"));
    }

    #[test]
    fn test_backoff_delay_grows_with_fractional_multiplier() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 1.5,
        };
        assert_eq!(backoff_delay_ms(&retry, 1), 1000);
        assert_eq!(backoff_delay_ms(&retry, 2), 1500);
        assert_eq!(backoff_delay_ms(&retry, 3), 2250);
    }

    #[test]
    fn test_backoff_delay_capped_at_max() {
        let retry = RetryConfig {
            max_retries: 10,
            initial_delay_ms: 1000,
            max_delay_ms: 4000,
            backoff_multiplier: 2.0,
        };
        assert_eq!(backoff_delay_ms(&retry, 4), 4000);
        assert_eq!(backoff_delay_ms(&retry, 9), 4000);
    }
}
