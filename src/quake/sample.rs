//! Bundled sample document, used when no API token is configured.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::FeedError;

const BOM: char = '\u{feff}';

/// Read and parse the sample file. The file is read on every call.
#[instrument]
pub async fn load_sample(path: &str) -> Result<Value, FeedError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FeedError::SampleRead {
            path: path.to_string(),
            source,
        })?;

    debug!(bytes = text.len(), "Read sample data");
    parse_document(&text)
}

/// Parse a JSON document, ignoring one leading byte order mark.
pub fn parse_document(text: &str) -> Result<Value, FeedError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    Ok(serde_json::from_str(text)?)
}
