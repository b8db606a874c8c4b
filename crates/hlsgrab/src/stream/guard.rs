use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{info, warn};

/// Outputs touched within this window are treated as being written by someone else.
pub const IN_PROGRESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Checks whether another recorder appears to be writing to `path`.
///
/// A missing file, or one whose metadata cannot be read, is not in progress.
pub async fn download_in_progress(path: &Path, window: Duration) -> bool {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not get stats for output file");
            return false;
        }
    };
    let modified = match metadata.modified() {
        Ok(modified) => modified,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Output file has no modification time");
            return false;
        }
    };

    let now = SystemTime::now();
    let in_progress = is_recent_modification(modified, now, window);
    match now.duration_since(modified) {
        Ok(age) => info!("File {} modified {:?} ago.", path.display(), age),
        Err(_) => info!("File {} modified in the future.", path.display()),
    }
    in_progress
}

/// True when `modified` is less than `window` before `now`. Exactly `window`
/// ago is not recent; a timestamp after `now` is.
pub fn is_recent_modification(modified: SystemTime, now: SystemTime, window: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age < window,
        Err(_) => true,
    }
}
