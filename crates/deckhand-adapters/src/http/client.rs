use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use deckhand_core::{
    application::ports::CatalogAuthority,
    domain::{RequestId, StatusReport, SubmissionReceipt, TemplateId, TemplateRecord},
    error::{Context, DeckhandError, DeckhandResult},
};

use super::{
    error::{ClientError, Endpoint},
    wire::{DeployBody, ReceiptDto, StatusDto, TemplateDto},
};

const USER_AGENT: &str = concat!("deckhand/", env!("CARGO_PKG_VERSION"));

/// Catalog authority reached over HTTP/JSON.
///
/// Every call is a single request bounded by the configured timeout; nothing
/// is retried here.
#[derive(Debug, Clone)]
pub struct HttpCatalogAuthority {
    client: Client,
    base_url: Url,
}

impl HttpCatalogAuthority {
    /// Create a client for the authority at `base_url`.
    ///
    /// Fails with a configuration error if the URL is not an absolute
    /// `http`/`https` URL.
    pub fn new(base_url: &str, timeout: Duration) -> DeckhandResult<Self> {
        let base_url = parse_base_url(base_url).map_err(configuration)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` joined with `segments`, each percent-encoded as exactly
    /// one path segment. `.` and `..` would be dropped by the join, which
    /// [`RequestId`] rules out.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::invalid_url(self.base_url.as_str(), "cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(&self, segments: &[&str]) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T>(response: Response) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!(status = status.as_u16(), "Authority refused request");
            Err(ClientError::api_error(status.as_u16(), message))
        }
    }
}

#[async_trait]
impl CatalogAuthority for HttpCatalogAuthority {
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn fetch_templates(&self) -> DeckhandResult<Vec<TemplateRecord>> {
        let templates: Vec<TemplateDto> = self
            .get(&["templates"])
            .await
            .map_err(|e| e.into_deckhand(&Endpoint::ListTemplates))?;

        Ok(templates.into_iter().map(TemplateRecord::from).collect())
    }

    #[instrument(skip_all, fields(base_url = %self.base_url, template_id = %template_id))]
    async fn submit_deployment(
        &self,
        template_id: TemplateId,
    ) -> DeckhandResult<SubmissionReceipt> {
        let body = DeployBody {
            template_id: template_id.get(),
        };
        let receipt: ReceiptDto = self.post(&["deployments"], &body).await.map_err(|e| {
            e.into_deckhand(&Endpoint::SubmitDeployment {
                template_id: template_id.get(),
            })
        })?;

        Ok(receipt.into())
    }

    #[instrument(skip_all, fields(base_url = %self.base_url, request_id = %request_id))]
    async fn deployment_status(&self, request_id: &RequestId) -> DeckhandResult<StatusReport> {
        let status: StatusDto = self
            .get(&["deployments", request_id.as_str()])
            .await
            .map_err(|e| {
                e.into_deckhand(&Endpoint::DeploymentStatus {
                    request_id: request_id.to_string(),
                })
            })?;

        Ok(status.into())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw.trim()).map_err(|e| ClientError::invalid_url(raw, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::invalid_url(raw, "scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(ClientError::invalid_url(raw, "cannot be a base"));
    }

    Ok(url)
}

fn configuration(err: ClientError) -> DeckhandError {
    DeckhandError::Configuration {
        message: err.to_string(),
    }
}
