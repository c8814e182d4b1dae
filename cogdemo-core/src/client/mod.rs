use bytes::Bytes;
use reqwest::{
    StatusCode,
    blocking::{Client, RequestBuilder},
    header::CONTENT_TYPE,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use snafu::ResultExt;
use tracing::*;

use crate::{config::ServiceConfig, consts::*, error::*};

pub mod conversation;
pub mod entities;
pub mod vision;

/// A single cloud analysis capability.
///
/// Every capability runs the same pipeline: the input is turned into a
/// request, the request makes one round trip to the service, and the
/// decoded response is postprocessed into the output handed to callers.
pub trait Service {
    type Input: ?Sized;
    type Request;
    type Response: DeserializeOwned;
    type Output;

    /// Name used in logs and error stages.
    const NAME: &'static str;

    fn session(&self) -> &ServiceSession;

    fn build_request(&self, input: &Self::Input) -> Result<Self::Request, CogdemoError>;

    fn send(&self, request: Self::Request) -> Result<Self::Response, CogdemoError>;

    fn postprocess(
        &self,
        input: &Self::Input,
        response: Self::Response,
    ) -> Result<Self::Output, CogdemoError>;

    /// Runs the whole pipeline for one input.
    ///
    /// The request is built and validated before anything is sent, so bad
    /// input never reaches the network.
    ///
    /// # Arguments
    ///
    /// * `input` - Query, documents or image path, depending on the service
    ///
    /// # Returns
    ///
    /// * `Ok(Self::Output)` - Postprocessed result
    /// * `Err(CogdemoError)` - Failure at any stage, classified by [`CogdemoError::kind`]
    fn analyze(&self, input: &Self::Input) -> Result<Self::Output, CogdemoError> {
        let request = self.build_request(input)?;

        info!(
            endpoint = self.session().config().endpoint(),
            "sending {} request",
            Self::NAME
        );
        let response = self.send(request)?;

        self.postprocess(input, response)
    }
}

/// Blocking HTTP session bound to one service resource.
#[derive(Debug)]
pub struct ServiceSession {
    http: Client,
    config: ServiceConfig,
}

/// Error envelope returned by Azure AI services on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl ServiceSession {
    /// Creates the HTTP client with the configured timeout.
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceSession)` - Ready to send requests
    /// * `Err(CogdemoError::Transport)` - The TLS backend failed to initialize
    pub fn new(config: ServiceConfig) -> Result<Self, CogdemoError> {
        debug!(
            endpoint = config.endpoint(),
            timeout_ms = config.timeout().as_millis() as u64,
            "creating service session"
        );

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("cogdemo/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(TransportSnafu {
                stage: "client-builder",
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// POSTs `body` as JSON to `path` and decodes the JSON answer.
    ///
    /// # Arguments
    ///
    /// * `stage` - Name recorded in logs and error contexts
    /// * `path` - Path relative to the configured endpoint
    /// * `query` - Query string pairs, usually just `api-version`
    /// * `body` - Request payload
    ///
    /// # Returns
    ///
    /// * `Ok(R)` - Decoded 2xx body
    /// * `Err(CogdemoError::Transport)` - Connection or timeout failure
    /// * `Err(CogdemoError::UnexpectedStatus)` - Non-2xx answer
    /// * `Err(CogdemoError::Decode)` - Body does not match `R`
    pub fn post_json<B, R>(
        &self,
        stage: &str,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<R, CogdemoError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.http.post(self.config.url(path)).query(query).json(body);
        self.execute(stage, request)
    }

    /// POSTs raw bytes to `path` as `application/octet-stream` and decodes
    /// the JSON answer. Errors are the same as for [`Self::post_json`].
    pub fn post_binary<R>(
        &self,
        stage: &str,
        path: &str,
        query: &[(&str, &str)],
        body: Bytes,
    ) -> Result<R, CogdemoError>
    where
        R: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.config.url(path))
            .query(query)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body);
        self.execute(stage, request)
    }

    fn execute<R>(&self, stage: &str, request: RequestBuilder) -> Result<R, CogdemoError>
    where
        R: DeserializeOwned,
    {
        let response = request
            .header(SUBSCRIPTION_KEY_HEADER, self.config.key())
            .send()
            .context(TransportSnafu { stage })?;

        let status = response.status();
        let body = response.text().context(TransportSnafu { stage })?;
        debug!(stage, status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let (code, message) = error_details(status, &body);
            warn!(stage, status = status.as_u16(), %code, "request rejected: {}", message);
            return UnexpectedStatusSnafu {
                status: status.as_u16(),
                code,
                message,
            }
            .fail();
        }

        serde_json::from_str(&body).context(DecodeSnafu { stage })
    }
}

/// Extracts `(code, message)` from an error body, falling back to the
/// status reason and a truncated body when it is not an Azure envelope.
fn error_details(status: StatusCode, body: &str) -> (String, String) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message),
        Err(_) => {
            let code = status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();
            let message = body.chars().take(ERROR_BODY_LIMIT).collect();
            (code, message)
        }
    }
}
