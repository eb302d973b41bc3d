//! `FhirStore` over the FHIR REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value as JsonValue;

use arogya_fhir::Bundle;

use crate::{Error, FhirStore, Result, SearchQuery, StoreConfig};

/// REST-backed store client.
///
/// One instance per remote server; cheap to clone. Requests carry
/// `Prefer: return=representation` so mutations echo the stored document
/// back, which the services decode as the operation result.
#[derive(Clone)]
pub struct RestFhirStore {
    http: reqwest::Client,
    base_url: String,
}

impl RestFhirStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn type_url(&self, resource_type: &str) -> String {
        format!("{}/{resource_type}", self.base_url)
    }

    fn instance_url(&self, resource_type: &str, id: &str) -> String {
        format!(
            "{}/{resource_type}/{}",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    async fn expect_document(&self, response: Response) -> Result<JsonValue> {
        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(status, response).await);
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn upstream_error(status: StatusCode, response: Response) -> Error {
    let message = response.text().await.unwrap_or_default();
    Error::Upstream {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl FhirStore for RestFhirStore {
    async fn create(&self, resource_type: &str, document: JsonValue) -> Result<JsonValue> {
        let response = self
            .http
            .post(self.type_url(resource_type))
            .header("Prefer", "return=representation")
            .json(&document)
            .send()
            .await?;
        self.expect_document(response).await
    }

    async fn read(&self, resource_type: &str, id: &str) -> Result<Option<JsonValue>> {
        let response = self
            .http
            .get(self.instance_url(resource_type, id))
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => Ok(None),
            status if status.is_success() => {
                let body = response.text().await?;
                Ok(Some(serde_json::from_str(&body)?))
            }
            status => Err(upstream_error(status, response).await),
        }
    }

    async fn update(
        &self,
        resource_type: &str,
        id: &str,
        document: JsonValue,
    ) -> Result<JsonValue> {
        let response = self
            .http
            .put(self.instance_url(resource_type, id))
            .header("Prefer", "return=representation")
            .json(&document)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::not_found(resource_type, id));
        }
        self.expect_document(response).await
    }

    async fn delete(&self, resource_type: &str, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.instance_url(resource_type, id))
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::not_found(resource_type, id)),
            status if status.is_success() => Ok(()),
            status => Err(upstream_error(status, response).await),
        }
    }

    async fn search(&self, resource_type: &str, query: &SearchQuery) -> Result<Vec<JsonValue>> {
        let mut url = self.type_url(resource_type);
        let query_string = query.to_query_string();
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(status, response).await);
        }

        let body = response.text().await?;
        let bundle: Bundle = serde_json::from_str(&body)?;
        let documents = bundle
            .resources_of_type(resource_type)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        tracing::debug!(
            resource_type,
            matches = documents.len(),
            "search returned bundle"
        );
        Ok(documents)
    }
}
