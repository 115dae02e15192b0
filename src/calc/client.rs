//! HTTP client for the serviceability calculation service.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, error};
use url::Url;

use super::Calculator;
use crate::config::ApiConfig;
use crate::error::CalculationError;
use crate::model::{ApplicationState, CalculationResult};

const ENDPOINT: &str = "v7/serviceability";
const MAX_ERROR_BODY: usize = 1024;

/// POSTs the application as JSON and decodes a [`CalculationResult`].
pub struct ServiceabilityClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    timeout_secs: u64,
}

/// `<base_url>/v7/serviceability`, keeping any path prefix on the base.
pub fn endpoint_url(base_url: &str) -> Result<Url, CalculationError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|url| url.join(ENDPOINT))
        .map_err(|e| CalculationError::InvalidEndpoint(format!("{}: {}", base_url, e)))
}

/// Map a non-success response to the matching error.
pub fn classify_status(status: StatusCode, body: String) -> CalculationError {
    let body = if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body
    };

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            CalculationError::Validation(body)
        }
        _ => CalculationError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

impl ServiceabilityClient {
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self, CalculationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CalculationError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint_url(&config.base_url)?,
            api_key: api_key.into(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Calculator for ServiceabilityClient {
    async fn calculate(
        &self,
        application: &ApplicationState,
    ) -> Result<CalculationResult, CalculationError> {
        debug!("POST {}", self.endpoint);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(application)
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    CalculationError::Timeout(self.timeout_secs)
                } else {
                    CalculationError::Transport(e.to_string())
                };
                error!("{}", err);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            let err = classify_status(status, body);
            error!("{}", err);
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| CalculationError::Transport(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| CalculationError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("https://calc.example.com").unwrap().as_str(),
            "https://calc.example.com/v7/serviceability"
        );
        assert_eq!(
            endpoint_url("https://calc.example.com/api/").unwrap().as_str(),
            "https://calc.example.com/api/v7/serviceability"
        );
        assert!(matches!(
            endpoint_url("not a url"),
            Err(CalculationError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::UNPROCESSABLE_ENTITY, "loanAmount missing".into()),
            CalculationError::Validation(msg) if msg == "loanAmount missing"
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, String::new()),
            CalculationError::Validation(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "upstream".into()),
            CalculationError::Status { status: 502, .. }
        ));
    }

    #[test]
    fn test_long_error_body_truncated() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "x".repeat(5000));
        match err {
            CalculationError::Status { body, .. } => {
                assert_eq!(body.len(), MAX_ERROR_BODY + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = ServiceabilityClient::new(&config, "test-key").unwrap();
        let app: ApplicationState = serde_json::from_str(
            r#"{"loan": {"loanAmount": 1, "loanTerm": 30, "interestRateOngoing": 6.0}}"#,
        )
        .unwrap();

        let err = client.calculate(&app).await.unwrap_err();
        assert!(matches!(
            err,
            CalculationError::Transport(_) | CalculationError::Timeout(_)
        ));
    }
}
