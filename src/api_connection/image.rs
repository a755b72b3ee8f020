use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_MIME_TYPE: &str = "image/jpeg";
const KNOWN_MIME_TYPES: [&str; 3] = ["image/png", "image/webp", "image/gif"];

/// Base64 image payload ready to be inlined into a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub mime_type: String,
    pub base64: String,
}

impl ImageData {
    /// Accepts either a `data:` URL or a bare base64 payload. The MIME type is
    /// sniffed from the data-URL header and defaults to JPEG.
    pub fn from_data_url(input: &str) -> Self {
        if let Some(rest) = input.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').unwrap_or(("", rest));
            let mime_type = KNOWN_MIME_TYPES
                .iter()
                .find(|mime| header.contains(*mime))
                .copied()
                .unwrap_or(DEFAULT_MIME_TYPE);
            return Self {
                mime_type: mime_type.to_string(),
                base64: payload.to_string(),
            };
        }
        Self {
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            base64: input.to_string(),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image file {:?}", path))?;
        if bytes.is_empty() {
            return Err(anyhow!("Image file {:?} is empty", path));
        }
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let data_url = format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(&bytes));
        Ok(Self::from_data_url(&data_url))
    }
}
