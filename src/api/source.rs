//! Record source abstraction used by the terminal screens

use async_trait::async_trait;

use super::client::ApiClient;
use super::errors::ApiError;
use super::resource::{AdminResource, ResourcePayload};
use crate::models::Document;

/// Where the screens get their records from
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, resource: AdminResource) -> Result<ResourcePayload, ApiError>;

    async fn delete(&self, resource: AdminResource, id: &str) -> Result<(), ApiError>;

    async fn search_documents(&self, query: &str) -> Result<Vec<Document>, ApiError>;
}

#[async_trait]
impl RecordSource for ApiClient {
    async fn fetch(&self, resource: AdminResource) -> Result<ResourcePayload, ApiError> {
        self.fetch_resource(resource).await
    }

    async fn delete(&self, resource: AdminResource, id: &str) -> Result<(), ApiError> {
        ApiClient::delete(self, resource, id).await
    }

    async fn search_documents(&self, query: &str) -> Result<Vec<Document>, ApiError> {
        ApiClient::search_documents(self, query).await
    }
}
