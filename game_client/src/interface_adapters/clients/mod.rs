// Outbound HTTP clients for the command endpoints.

pub mod api;

pub use api::{ApiClient, ApiClientError};
