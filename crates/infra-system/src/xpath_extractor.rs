// XPath document query implementation
// reason: sxd-document parses, sxd-xpath evaluates XPath 1.0 expressions,
// encoding_rs turns the file bytes into text before either sees them
use async_trait::async_trait;
use encoding_rs::{Encoding, REPLACEMENT, UTF_16BE, UTF_16LE, UTF_8};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;
use sxd_xpath::Value;
use tracing::debug;

use httpcheck_core::port::document_query::{DocumentQuery, ExtractError};

/// Reads an XML file and evaluates an XPath expression against it
///
/// One open-read-close per call; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct XPathExtractor;

impl XPathExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentQuery for XPathExtractor {
    async fn extract(&self, path: &Path, query: &str) -> Result<String, ExtractError> {
        let bytes = read_document(path).await?;
        let text = decode(path, &bytes)?;
        let value = evaluate(path, &text, query)?;

        debug!(file = %path.display(), query = %query, value = %value, "Extracted value");
        Ok(value)
    }
}

async fn read_document(path: &Path) -> Result<Vec<u8>, ExtractError> {
    let err = match tokio::fs::read(path).await {
        Ok(bytes) => return Ok(bytes),
        Err(e) => e,
    };

    let err = match err.kind() {
        ErrorKind::NotFound => ExtractError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => ExtractError::PermissionDenied(path.to_path_buf()),
        _ => ExtractError::Malformed {
            path: path.to_path_buf(),
            detail: err.to_string(),
        },
    };

    // A directory is not a file to get the uri from
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Err(ExtractError::NotFound(path.to_path_buf())),
        _ => Err(err),
    }
}

/// Decode the file bytes into text
///
/// A byte order mark takes precedence over the XML declaration. Without
/// either the document is UTF-8.
fn decode(path: &Path, bytes: &[u8]) -> Result<String, ExtractError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(path, bytes)?, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| ExtractError::Malformed {
            path: path.to_path_buf(),
            detail: format!("content is not valid {}", encoding.name()),
        })
}

fn declared_encoding(path: &Path, bytes: &[u8]) -> Result<&'static Encoding, ExtractError> {
    let Some(label) = declared_label(bytes) else {
        return Ok(UTF_8);
    };

    match Encoding::for_label(label.as_bytes()) {
        // The declaration was readable byte-per-char, so the file is not UTF-16
        Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => Ok(UTF_8),
        Some(encoding) if encoding != REPLACEMENT => Ok(encoding),
        _ => Err(ExtractError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: label.to_string(),
        }),
    }
}

/// `encoding` pseudo-attribute of a leading `<?xml ...?>` declaration
fn declared_label(bytes: &[u8]) -> Option<&str> {
    let head = bytes.strip_prefix(b"<?xml")?;
    let end = head.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&head[..end]).ok()?;

    let rest = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    Some(&value[..value.find(quote)?])
}

fn evaluate(path: &Path, text: &str, query: &str) -> Result<String, ExtractError> {
    let package = sxd_document::parser::parse(text).map_err(|e| ExtractError::Malformed {
        path: path.to_path_buf(),
        detail: format!("{:?}", e),
    })?;

    // Parse check only
    if query.is_empty() {
        return Ok(String::new());
    }

    let document = package.as_document();
    let value =
        sxd_xpath::evaluate_xpath(&document, query).map_err(|e| ExtractError::InvalidQuery {
            path: path.to_path_buf(),
            query: query.to_string(),
            detail: e.to_string(),
        })?;

    match value {
        Value::Nodeset(nodes) => nodes
            .document_order_first()
            .map(|node| node.string_value())
            .ok_or_else(|| ExtractError::NoMatch {
                path: path.to_path_buf(),
                query: query.to_string(),
            }),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
    }
}
