use serde_json::Value;
use tracing::{debug, warn};

use crate::error::IndexError;
use crate::parser::content::fragment_title;
use crate::storage::Storage;

/// Raw page fields pulled out of one fjson document.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: String,
    pub title: String,
    pub body: String,
}

/// Reads fjson page documents out of a store.
pub struct Loader<S: Storage> {
    storage: S,
}

impl<S: Storage> Loader<S> {
    pub fn new(storage: S) -> Self {
        Loader { storage }
    }

    /// Fetch and decode one page document. Missing fields degrade to empty
    /// strings with a warning; unreadable bytes or non-JSON content do not.
    pub fn load(&self, path: &str) -> Result<Document, IndexError> {
        debug!("processing page document: {}", path);
        let bytes = self.storage.read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| IndexError::Malformed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let data: Value = serde_json::from_str(&text).map_err(|e| IndexError::Malformed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let page_name = match string_field(&data, "current_page_name") {
            Some(name) => name.to_string(),
            None => {
                warn!("no page name in {}, record will be unindexable by path", path);
                String::new()
            }
        };

        let body = match string_field(&data, "body").filter(|b| !b.is_empty()) {
            Some(body) => body.to_string(),
            None => {
                warn!("no body content in {}", path);
                String::new()
            }
        };

        let title = match string_field(&data, "title") {
            Some(raw) => fragment_title(raw),
            None => {
                warn!("no title in {}", path);
                String::new()
            }
        };

        Ok(Document {
            path: page_name,
            title,
            body,
        })
    }
}

/// Absent or non-string values are None, never a silent default.
fn string_field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}
