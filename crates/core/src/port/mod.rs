// Port Layer - Interfaces for external dependencies

pub mod document_query;
pub mod http_transport;

// Re-exports
pub use document_query::{DocumentQuery, ExtractError};
pub use http_transport::{HttpResponse, HttpTransport, TransportError};
