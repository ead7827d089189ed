//! Shared fixtures for the end-to-end probe tests
//!
//! Everything here wires the real adapters (reqwest + sxd-xpath), so the
//! tests exercise the same stack the `httpcheck` binary runs.

use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use url::Url;

use httpcheck_core::application::{ProbeService, ProbeTask};
use httpcheck_core::domain::ProbeConfig;
use httpcheck_infra_system::{ReqwestTransport, XPathExtractor};

/// Service bound to the production adapters
pub fn service() -> ProbeService {
    ProbeService::new(
        Arc::new(ReqwestTransport::new()),
        Arc::new(XPathExtractor::new()),
    )
}

pub fn task(config: ProbeConfig) -> ProbeTask {
    service().task(config)
}

/// Write `content` to a fresh temp file that is removed on drop
pub fn xml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// `host:port` of a server uri such as `http://127.0.0.1:41234`
pub fn authority(uri: &str) -> String {
    let url = Url::parse(uri).expect("Invalid server uri");
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => panic!("Server uri has no host: {}", uri),
    }
}

/// A local port nothing listens on
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("No local address").port()
}
