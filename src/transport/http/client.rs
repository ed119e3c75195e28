//! HTTP transport for the verification API.

use super::errors::{HttpTransportError, Result};
use super::response::{ApiEmptyResponse, ApiResponse};
use super::types::{
    ExchangeCodeRequest, ExchangeCodeResponse, RegistrationStatusResponse, SendSmsRequest,
};
use crate::config::SdkConfig;
use crate::transport::traits::Transport;
use crate::types::{SmsToken, VerificationCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

#[cfg(feature = "tracing")]
use opentelemetry::trace::Status;
#[cfg(feature = "tracing")]
use tracing::Span;
#[cfg(feature = "tracing")]
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Request timeout used when no custom HTTP client is supplied.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the player's SMS token.
pub const PLAYER_TOKEN_HEADER: &str = "X-Player-Token";

const TOKEN_PATH: &str = "v1/sms/token";
const SEND_PATH: &str = "v1/sms/send";
const STATUS_PATH: &str = "v1/sms/token/status";

/// HTTP-backed [`Transport`].
///
/// Every request carries the game API key as a bearer credential. Calls made
/// on behalf of a player also carry the SMS token in the `X-Player-Token`
/// header. Bodies are JSON.
///
/// # Example
///
/// ```rust,ignore
/// use sms_verify_sdk::{HttpTransport, SdkConfig, Transport, VerificationCode};
///
/// let config = SdkConfig::from_env()?;
/// let transport = HttpTransport::from_config(&config)?;
///
/// let token = transport.exchange_code(&VerificationCode::from("tb_verify_...")).await?;
/// let registered = transport.check_registered(&token).await?;
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
    api_key: SecretString,
    base_url: Url,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Builder for configuring a [`HttpTransport`].
pub struct HttpTransportBuilder {
    api_key: String,
    base_url: Url,
    timeout: Option<Duration>,
    http_client: Option<ClientWithMiddleware>,
}

impl HttpTransportBuilder {
    /// Create a new builder for the given base URL and API key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            timeout: None,
            http_client: None,
        }
    }

    /// Set the request timeout.
    ///
    /// Default: 30 seconds. Ignored when a custom HTTP client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom HTTP client with middleware.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the [`HttpTransport`].
    pub fn build(self) -> Result<HttpTransport> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let client = reqwest::Client::builder()
                    .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                    .build()
                    .map_err(HttpTransportError::BuildHttpClient)?;
                ClientBuilder::new(client).build()
            }
        };

        Ok(HttpTransport {
            http_client,
            api_key: SecretString::from(self.api_key),
            base_url: with_trailing_slash(self.base_url),
        })
    }
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the verification API
    /// * `api_key` - Game API key for authentication
    pub fn new(base_url: impl AsRef<str>, api_key: impl Into<String>) -> Result<Self> {
        let url = Url::parse(base_url.as_ref()).map_err(HttpTransportError::BuildRequestUrl)?;
        Self::builder(url, api_key).build()
    }

    /// Create a transport from a validated SDK configuration.
    pub fn from_config(config: &SdkConfig) -> Result<Self> {
        Self::builder(config.base_url().clone(), config.api_key().expose_secret()).build()
    }

    /// Create a builder for configuring the transport.
    pub fn builder(base_url: Url, api_key: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url, api_key)
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(HttpTransportError::BuildRequestUrl)
    }

    fn with_player_token(&self, request: RequestBuilder, token: &SmsToken) -> RequestBuilder {
        request.header(PLAYER_TOKEN_HEADER, token.value())
    }

    /// Send an authenticated request and return the status and body text.
    async fn send_request(&self, request: RequestBuilder) -> Result<(u16, String)> {
        let response = request
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(HttpTransportError::HttpRequest)?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(HttpTransportError::ParseResponse)?;

        Ok((status, text))
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        let (status, text) = self.send_request(request).await?;
        ApiEmptyResponse::from_parts(status, &text)
            .into_result()
            .map_err(HttpTransportError::Api)?;

        #[cfg(feature = "tracing")]
        Span::current().set_status(Status::Ok);

        Ok(())
    }
}

impl Transport for HttpTransport {
    type Error = HttpTransportError;

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "HttpTransport::exchange_code",
            skip_all,
            fields(expires_at = tracing::field::Empty)
        )
    )]
    async fn exchange_code(&self, code: &VerificationCode) -> Result<SmsToken> {
        let url = self.endpoint(TOKEN_PATH)?;
        let request = self.http_client.post(url).json(&ExchangeCodeRequest {
            code: code.as_str(),
        });

        let (status, text) = self.send_request(request).await?;

        let data = ApiResponse::<ExchangeCodeResponse>::from_parts(status, &text)
            .map_err(HttpTransportError::DeserializeJson)?
            .into_result()
            .map_err(HttpTransportError::Api)?;

        let token = SmsToken::new(data.token, data.expires_at)
            .map_err(HttpTransportError::InvalidToken)?;

        #[cfg(feature = "tracing")]
        {
            Span::current()
                .record("expires_at", token.expiration().to_rfc3339())
                .set_status(Status::Ok);
        }

        Ok(token)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "HttpTransport::send_sms", skip_all, fields(body_len = body.len()))
    )]
    async fn send_sms(&self, token: &SmsToken, body: &str) -> Result<()> {
        let url = self.endpoint(SEND_PATH)?;
        let request = self
            .with_player_token(self.http_client.post(url), token)
            .json(&SendSmsRequest { body });

        self.send_empty(request).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "HttpTransport::unregister", skip_all)
    )]
    async fn unregister(&self, token: &SmsToken) -> Result<()> {
        let url = self.endpoint(TOKEN_PATH)?;
        let request = self.with_player_token(self.http_client.delete(url), token);

        self.send_empty(request).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "HttpTransport::check_registered",
            skip_all,
            fields(registered = tracing::field::Empty)
        )
    )]
    async fn check_registered(&self, token: &SmsToken) -> Result<bool> {
        let url = self.endpoint(STATUS_PATH)?;
        let request = self.with_player_token(self.http_client.get(url), token);

        let (status, text) = self.send_request(request).await?;

        let data = ApiResponse::<RegistrationStatusResponse>::from_parts(status, &text)
            .map_err(HttpTransportError::DeserializeJson)?
            .into_result()
            .map_err(HttpTransportError::Api)?;

        #[cfg(feature = "tracing")]
        {
            Span::current()
                .record("registered", data.registered)
                .set_status(Status::Ok);
        }

        Ok(data.registered)
    }
}

/// `Url::join` drops the last path segment unless the base ends with `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RetryableError;
    use chrono::{TimeDelta, Utc};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token() -> SmsToken {
        SmsToken::new("player-token", Utc::now() + TimeDelta::hours(1)).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let transport = HttpTransport::new("https://api.example.com/game", "key").unwrap();
        assert_eq!(transport.base_url().as_str(), "https://api.example.com/game/");
        assert_eq!(
            transport.endpoint(TOKEN_PATH).unwrap().as_str(),
            "https://api.example.com/game/v1/sms/token"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let transport = HttpTransport::new("https://api.example.com", "very-secret").unwrap();
        assert!(!format!("{:?}", transport).contains("very-secret"));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/sms/token"))
            .and(header("authorization", "Bearer test_key"))
            .and(body_json(serde_json::json!({ "code": "tb_verify_abc" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "issued-token",
                "expiresAt": "2099-01-01T00:00:00Z"
            })))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri(), "test_key").unwrap();
        let token = transport
            .exchange_code(&VerificationCode::from("tb_verify_abc"))
            .await
            .unwrap();

        assert_eq!(token.value(), "issued-token");
        assert!(!token.is_expired());
    }

    #[tokio::test]
    async fn test_exchange_code_blank_token_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/sms/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": " ",
                "expiresAt": "2099-01-01T00:00:00Z"
            })))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri(), "test_key").unwrap();
        let result = transport
            .exchange_code(&VerificationCode::from("code"))
            .await;

        assert!(matches!(result, Err(HttpTransportError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_send_sms_sends_player_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/sms/send"))
            .and(header("authorization", "Bearer test_key"))
            .and(header(PLAYER_TOKEN_HEADER, "player-token"))
            .and(body_json(serde_json::json!({ "body": "hello" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri(), "test_key").unwrap();
        transport.send_sms(&token(), "hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_unregister_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/sms/token"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": { "code": "TOKEN_NOT_FOUND", "message": "Unknown token" }
            })))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri(), "test_key").unwrap();
        let err = transport.unregister(&token()).await.unwrap_err();

        match &err {
            HttpTransportError::Api(api) => {
                assert_eq!(api.status, 404);
                assert_eq!(api.code.as_deref(), Some("TOKEN_NOT_FOUND"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_check_registered() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/sms/token/status"))
            .and(header(PLAYER_TOKEN_HEADER, "player-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "registered": true })),
            )
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri(), "test_key").unwrap();
        assert!(transport.check_registered(&token()).await.unwrap());
    }

    #[tokio::test]
    async fn test_server_error_is_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/sms/token/status"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(mock_server.uri(), "test_key").unwrap();
        let err = transport.check_registered(&token()).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
