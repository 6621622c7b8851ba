//! Blob digests in the `sha256:<hex>` form the server uses to address blobs.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Digest of an in-memory blob.
pub fn sha256_digest(bytes: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes.as_ref());
    let hex: String = hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect();
    format!("sha256:{}", hex)
}

/// Digest of a file on disk, e.g. a GGUF file about to be referenced by `create`.
pub async fn file_digest(path: impl AsRef<Path>) -> crate::Result<String> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(sha256_digest(bytes))
}
