//! Perfect Research REST API
//!
//! Client side of the remote API: session handling, the HTTP client and the
//! typed admin resources. Screens only see the [`RecordSource`] trait.

pub mod client;
pub mod errors;
pub mod resource;
pub mod session;
pub mod source;

pub use client::ApiClient;
pub use errors::ApiError;
pub use resource::{AdminResource, ResourcePayload};
pub use session::Session;
pub use source::RecordSource;
