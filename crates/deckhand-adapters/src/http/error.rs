use thiserror::Error;

use deckhand_core::{application::ApplicationError, error::DeckhandError};

/// Low-level HTTP client failures, before they are given meaning.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid catalog URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Response decode error: {0}")]
    DecodeError(#[from] serde_json::Error),
}

/// The call a [`ClientError`] came from.
///
/// The same status code means different things on different endpoints: a
/// 404 on a deployment status is an expired request, a 404 on a submission
/// is a template the backend no longer offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    ListTemplates,
    SubmitDeployment { template_id: u64 },
    DeploymentStatus { request_id: String },
}

impl ClientError {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Translate into the catalog error taxonomy.
    pub fn into_deckhand(self, endpoint: &Endpoint) -> DeckhandError {
        match self {
            Self::RequestFailed(e) if e.is_decode() => ApplicationError::malformed(e).into(),
            Self::RequestFailed(e) => ApplicationError::unavailable(e.to_string()).into(),
            Self::DecodeError(e) => ApplicationError::malformed(e).into(),
            Self::InvalidUrl { url, reason } => DeckhandError::Configuration {
                message: format!("Invalid catalog URL '{url}': {reason}"),
            },
            Self::ApiError { status, message } => map_status(status, message, endpoint).into(),
        }
    }
}

fn map_status(status: u16, message: String, endpoint: &Endpoint) -> ApplicationError {
    match (status, endpoint) {
        (500..=599, _) => {
            ApplicationError::unavailable(format!("backend answered HTTP {status}"))
        }
        (404, Endpoint::DeploymentStatus { request_id }) => ApplicationError::NotFound {
            request_id: request_id.clone(),
        },
        (404 | 409 | 422, Endpoint::SubmitDeployment { template_id }) => {
            ApplicationError::UnknownTemplate { id: *template_id }
        }
        _ => ApplicationError::Rejected { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_endpoint() -> Endpoint {
        Endpoint::DeploymentStatus {
            request_id: "req-1".into(),
        }
    }

    fn app(err: DeckhandError) -> ApplicationError {
        err.as_application().cloned().expect("application error")
    }

    #[test]
    fn server_errors_are_unavailable() {
        for status in [500, 502, 503] {
            let err = ClientError::api_error(status, "").into_deckhand(&Endpoint::ListTemplates);
            assert!(err.is_retryable(), "HTTP {status} should be retryable");
        }
    }

    #[test]
    fn not_found_depends_on_endpoint() {
        let err = ClientError::api_error(404, "gone").into_deckhand(&status_endpoint());
        assert_eq!(
            app(err),
            ApplicationError::NotFound {
                request_id: "req-1".into()
            }
        );

        let err = ClientError::api_error(404, "gone")
            .into_deckhand(&Endpoint::SubmitDeployment { template_id: 4 });
        assert_eq!(app(err), ApplicationError::UnknownTemplate { id: 4 });

        let err = ClientError::api_error(404, "gone").into_deckhand(&Endpoint::ListTemplates);
        assert!(matches!(app(err), ApplicationError::Rejected { status: 404, .. }));
    }

    #[test]
    fn conflict_on_submit_is_unknown_template() {
        for status in [409, 422] {
            let err = ClientError::api_error(status, "retired")
                .into_deckhand(&Endpoint::SubmitDeployment { template_id: 2 });
            assert_eq!(app(err), ApplicationError::UnknownTemplate { id: 2 });
        }
    }

    #[test]
    fn other_client_errors_are_rejected_and_permanent() {
        let err = ClientError::api_error(403, "forbidden").into_deckhand(&status_endpoint());
        assert!(!err.is_retryable());
        assert_eq!(
            app(err),
            ApplicationError::Rejected {
                status: 403,
                message: "forbidden".into()
            }
        );
    }

    #[test]
    fn decode_errors_are_malformed() {
        let json_err = serde_json::from_str::<Vec<u64>>("not json").unwrap_err();
        let err = ClientError::from(json_err).into_deckhand(&Endpoint::ListTemplates);
        assert!(matches!(app(err), ApplicationError::MalformedData { .. }));
    }

    #[test]
    fn invalid_url_is_configuration() {
        let err = ClientError::invalid_url("ftp://x", "unsupported scheme")
            .into_deckhand(&Endpoint::ListTemplates);
        assert!(matches!(err, DeckhandError::Configuration { .. }));
    }
}
