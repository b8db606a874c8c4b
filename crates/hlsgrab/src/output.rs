use std::path::Path;

use reqwest::Response;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::error;

use crate::DownloadError;

/// Opens the recording at `path` for appending, creating it if needed.
/// Recordings are never truncated or rewritten, only extended.
pub async fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .append(true)
        .open(path)
        .await
}

/// Streams the body of an already accepted response onto the end of `out`
/// and returns the number of bytes appended.
///
/// A body that breaks off is an error. Whatever arrived before the break
/// stays in the file.
pub async fn append_body(mut response: Response, out: &mut File) -> Result<u64, DownloadError> {
    let mut written = 0u64;
    loop {
        let chunk = match response.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                error!(
                    uri = %response.url(),
                    bytes = written,
                    error = %e,
                    "Response body interrupted"
                );
                out.flush().await?;
                return Err(e.into());
            }
        };
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    out.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_to_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.aac");
        tokio::fs::write(&path, b"first").await.unwrap();

        let mut file = open_append(&path).await.unwrap();
        file.write_all(b"second").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"firstsecond");
    }
}
