// httpcheck Infrastructure - System Adapters
// Implements: HttpTransport (reqwest), DocumentQuery (tokio::fs + sxd-xpath)

pub mod reqwest_transport;
pub mod xpath_extractor;

pub use reqwest_transport::ReqwestTransport;
pub use xpath_extractor::XPathExtractor;
