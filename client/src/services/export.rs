//! Saving exported documents as downloads

use crate::error::ClientResult;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `contents` to `dir/file_name`, creating `dir` if needed
///
/// An existing file of the same name is replaced, as a browser download
/// prompt would after confirmation.
pub async fn save_download(dir: &Path, file_name: &str, contents: &[u8]) -> ClientResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, contents).await?;
    info!(path = %path.display(), bytes = contents.len(), "Saved download");
    Ok(path)
}
