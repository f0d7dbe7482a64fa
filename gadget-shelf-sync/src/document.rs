//! Wire format of the remote document store.
//!
//! A document holds named files; our payload lives in one of them as a JSON
//! string `{items, lastUpdated, version}`.

use std::collections::HashMap;

use gadget_shelf_catalog::Collection;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Version tag written into every payload.
pub const PAYLOAD_VERSION: &str = "1.0";

/// Response body of a read, create or update.
#[derive(Debug, Deserialize)]
pub struct DocumentResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub files: HashMap<String, Option<DocumentFile>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    #[serde(default)]
    pub content: Option<String>,
}

/// Request body for create (`POST`) and update (`PATCH`).
#[derive(Debug, Serialize)]
pub struct WriteRequest<'a> {
    pub description: &'a str,
    pub public: bool,
    pub files: HashMap<&'a str, DocumentFile>,
}

/// The JSON object stored as the payload file's content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload<'a> {
    pub items: &'a Collection,
    pub last_updated: String,
    pub version: &'a str,
}

/// Pull the collection out of a read response body.
///
/// `Ok(None)` means the document exists but carries no usable data (payload
/// file missing, empty, or without an `items` array). Bodies or payloads that
/// are not JSON at all, or items that do not decode, are
/// [`SyncError::MalformedDocument`].
pub fn parse_document(body: &str, file_name: &str) -> Result<Option<Collection>, SyncError> {
    let response: DocumentResponse = serde_json::from_str(body)
        .map_err(|e| SyncError::MalformedDocument(format!("response body: {e}")))?;

    let Some(content) = response
        .files
        .get(file_name)
        .and_then(|f| f.as_ref())
        .and_then(|f| f.content.as_deref())
        .filter(|c| !c.is_empty())
    else {
        log::debug!("Document has no '{}' payload", file_name);
        return Ok(None);
    };

    let mut payload: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| SyncError::MalformedDocument(format!("payload {file_name}: {e}")))?;

    let items = match payload.get_mut("items") {
        Some(items) if items.is_array() => items.take(),
        _ => {
            log::debug!("Payload '{}' has no items array", file_name);
            return Ok(None);
        }
    };

    let collection: Collection = serde_json::from_value(items)
        .map_err(|e| SyncError::MalformedDocument(format!("items: {e}")))?;
    Ok(Some(collection))
}

/// Serialize `collection` into a create/update request body.
pub fn build_write_body(
    collection: &Collection,
    file_name: &str,
    description: &str,
    last_updated: String,
) -> Result<String, SyncError> {
    let payload = Payload {
        items: collection,
        last_updated,
        version: PAYLOAD_VERSION,
    };
    let content = serde_json::to_string_pretty(&payload)?;

    let mut files = HashMap::new();
    files.insert(
        file_name,
        DocumentFile {
            content: Some(content),
        },
    );
    let request = WriteRequest {
        description,
        public: true,
        files,
    };
    Ok(serde_json::to_string(&request)?)
}

/// Pull the document id out of a successful write response.
pub fn parse_write_response(body: &str) -> Result<String, SyncError> {
    let response: DocumentResponse = serde_json::from_str(body)
        .map_err(|e| SyncError::MalformedDocument(format!("write response: {e}")))?;
    response
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SyncError::MalformedDocument("write response has no id".to_string()))
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
