//! Remote persistence contract for departamentos and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Departamento, DepartamentoId, DepartamentoPayload},
    error::ApiError,
    protocol::{ListResponse, DEPARTAMENTOS_PATH},
};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::RemoteError};

#[async_trait]
pub trait RemoteCatalogService: Send + Sync {
    async fn list(&self) -> Result<Vec<Departamento>, RemoteError>;
    async fn create(&self, payload: &DepartamentoPayload) -> Result<Departamento, RemoteError>;
    async fn update(
        &self,
        id: DepartamentoId,
        payload: &DepartamentoPayload,
    ) -> Result<Departamento, RemoteError>;
    async fn delete(&self, id: DepartamentoId) -> Result<(), RemoteError>;
}

pub struct HttpCatalogService {
    http: Client,
    base_url: Url,
}

impl HttpCatalogService {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, RemoteError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: with_trailing_slash(base_url),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, RemoteError> {
        Self::new(settings.base_url()?, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> Result<Url, RemoteError> {
        Ok(self.base_url.join(DEPARTAMENTOS_PATH)?)
    }

    fn record_url(&self, id: DepartamentoId) -> Result<Url, RemoteError> {
        Ok(self
            .base_url
            .join(&format!("{DEPARTAMENTOS_PATH}/{}", id.0))?)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => api_error.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body,
    };
    Err(RemoteError::status(status.as_u16(), message))
}

#[async_trait]
impl RemoteCatalogService for HttpCatalogService {
    async fn list(&self) -> Result<Vec<Departamento>, RemoteError> {
        let url = self.collection_url()?;
        debug!(%url, "GET departamentos");
        let response = ensure_success(self.http.get(url).send().await?).await?;
        let body: ListResponse = response.json().await?;
        Ok(body.data)
    }

    async fn create(&self, payload: &DepartamentoPayload) -> Result<Departamento, RemoteError> {
        let url = self.collection_url()?;
        debug!(%url, nombre = payload.nombre(), "POST departamento");
        let response = ensure_success(self.http.post(url).json(payload).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn update(
        &self,
        id: DepartamentoId,
        payload: &DepartamentoPayload,
    ) -> Result<Departamento, RemoteError> {
        let url = self.record_url(id)?;
        debug!(%url, nombre = payload.nombre(), "PUT departamento");
        let response = ensure_success(self.http.put(url).json(payload).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: DepartamentoId) -> Result<(), RemoteError> {
        let url = self.record_url(id)?;
        debug!(%url, "DELETE departamento");
        ensure_success(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
