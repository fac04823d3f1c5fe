//! PDF text extraction and upload staging.
//!
//! `pdf_extract` panics on some malformed documents instead of returning an
//! error, so every call runs under `catch_unwind` on the blocking pool and a
//! panic surfaces as [`Error::Pdf`].

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use ns_core::{Error, Result};

fn guarded<T>(what: &str, f: impl FnOnce() -> std::result::Result<T, pdf_extract::OutputError>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Error::Pdf(format!("{} failed: {}", what, e))),
        Err(_) => Err(Error::Pdf(format!("{} panicked (malformed document)", what))),
    }
}

fn extract_pages(data: &[u8]) -> Result<Vec<String>> {
    guarded("page extraction", || pdf_extract::extract_text_from_mem_by_pages(data))
}

fn extract_document(data: &[u8]) -> Result<String> {
    guarded("text extraction", || pdf_extract::extract_text_from_mem(data))
}

/// Each non-blank page followed by a newline.
fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|p| !p.trim().is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    text
}

async fn read_pdf(path: &Path) -> Result<Vec<u8>> {
    let data = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

async fn blocking<T: Send + 'static>(f: impl FnOnce() -> Result<T> + Send + 'static) -> Result<T> {
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Pdf(format!("extraction task failed: {}", e)))?
}

/// Text of every page of the PDF at `path`, page by page.
pub async fn get_text_from_pdf(path: impl AsRef<Path>) -> Result<String> {
    let data = read_pdf(path.as_ref()).await?;
    let pages = blocking(move || extract_pages(&data)).await?;
    info!("📄 Extracted {} pages from {}", pages.len(), path.as_ref().display());
    Ok(join_pages(&pages))
}

/// Whole-document text in layout order, used to look for headlines.
pub async fn extract_text_blocks_from_pdf(path: impl AsRef<Path>) -> Result<String> {
    let data = read_pdf(path.as_ref()).await?;
    blocking(move || extract_document(&data)).await
}

/// Write an uploaded PDF to `dir`, keeping only the last component of the
/// client supplied `file_name`. Existing files with the same name are replaced.
pub async fn stage_pdf(dir: impl AsRef<Path>, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Pdf(format!("invalid upload file name: {:?}", file_name)))?;

    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, bytes).await?;
    debug!("Staged upload at {}", path.display());
    Ok(path)
}
