//! Script catalog
//!
//! Resolves symbolic script names to transport-safe payloads (gzip
//! compressed, base64 encoded) that are embedded into cloud-init data.

pub mod scripts;

use crate::NodeBakeError;
use base64::Engine;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Read-only lookup of encoded script bodies
///
/// Implementations must be deterministic and safe for concurrent reads.
pub trait ScriptCatalog: Send + Sync {
    /// Encoded payload of the named script
    fn encode(&self, name: &str) -> String;
}

/// Gzip and base64 encode a script body
pub fn encode_payload(body: &[u8]) -> Result<String, NodeBakeError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(body)?;
    let compressed = encoder.finish()?;
    Ok(base64::engine::general_purpose::STANDARD.encode(compressed))
}

/// Reverse of [`encode_payload`]
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, NodeBakeError> {
    let compressed = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| NodeBakeError::Catalog(format!("Base64 decode error: {}", e)))?;

    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut body = Vec::new();
    decoder
        .read_to_end(&mut body)
        .map_err(|e| NodeBakeError::Catalog(format!("Gzip decompression failed: {}", e)))?;
    Ok(body)
}

/// In-memory catalog holding pre-encoded payloads
#[derive(Debug, Clone, Default)]
pub struct GzipCatalog {
    payloads: HashMap<String, String>,
}

impl GzipCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and store a script body under `name`
    pub fn insert(&mut self, name: impl Into<String>, body: &[u8]) -> Result<(), NodeBakeError> {
        let payload = encode_payload(body)?;
        self.payloads.insert(name.into(), payload);
        Ok(())
    }

    /// Builder form of [`GzipCatalog::insert`]
    pub fn with_script(
        mut self,
        name: impl Into<String>,
        body: &str,
    ) -> Result<Self, NodeBakeError> {
        self.insert(name, body.as_bytes())?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.payloads.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Load every file below `dir`, keyed by its `/`-separated relative path
    pub async fn from_dir(dir: impl AsRef<Path>) -> Result<Self, NodeBakeError> {
        let root = dir.as_ref();

        if !root.is_dir() {
            return Err(NodeBakeError::Catalog(format!(
                "script directory {} does not exist",
                root.display()
            )));
        }

        let mut catalog = Self::new();
        let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

        while let Some(current) = pending.pop() {
            let mut read_dir = fs::read_dir(&current).await?;
            while let Some(entry) = read_dir.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                    continue;
                }

                let name = script_name(root, &path)?;
                let body = fs::read(&path).await?;
                debug!("Loaded script {} ({} bytes)", name, body.len());
                catalog.insert(name, &body)?;
            }
        }

        info!("Loaded {} scripts from {}", catalog.len(), root.display());
        Ok(catalog)
    }
}

fn script_name(root: &Path, path: &Path) -> Result<String, NodeBakeError> {
    let relative = path.strip_prefix(root).map_err(|e| {
        NodeBakeError::Catalog(format!("{} is outside the script root: {}", path.display(), e))
    })?;

    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

impl ScriptCatalog for GzipCatalog {
    fn encode(&self, name: &str) -> String {
        match self.payloads.get(name) {
            Some(payload) => payload.clone(),
            None => {
                warn!("Script {} not found in catalog", name);
                String::new()
            }
        }
    }
}
