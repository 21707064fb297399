//! Events delivered to the app by background tasks

use crate::api::{AdminResource, ApiError, ResourcePayload};
use crate::models::Document;

/// Results of spawned API calls, sent back over the app channel
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Admin records fetched
    RecordsLoaded(ResourcePayload),
    /// Document search finished
    DocumentsLoaded { query: String, documents: Vec<Document> },
    /// A record was deleted on the server
    RecordDeleted { resource: AdminResource, id: String },
    /// Any API call failed
    LoadFailed(RequestFailure),
}

/// What went wrong and where
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFailure {
    /// What the app was doing, e.g. "Chargement des années"
    pub context: String,
    pub message: String,
    /// Token missing, expired or rejected
    pub auth: bool,
    /// Resource screen to take out of its loading state, if any
    pub resource: Option<AdminResource>,
}

impl RequestFailure {
    pub fn new(context: impl Into<String>, error: &ApiError) -> Self {
        Self {
            context: context.into(),
            message: error.to_string(),
            auth: error.is_auth_failure(),
            resource: None,
        }
    }

    pub fn for_resource(mut self, resource: AdminResource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Message for the status bar
    pub fn describe(&self) -> String {
        if self.auth {
            format!(
                "{}: session invalide, reconnectez-vous avec `perfect-research login` ({})",
                self.context, self.message
            )
        } else {
            format!("{}: {}", self.context, self.message)
        }
    }
}
