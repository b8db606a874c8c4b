use std::path::PathBuf;

/// A raw stream and the file it is recorded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTarget {
    pub source_uri: String,
    pub destination: PathBuf,
}

impl StreamTarget {
    pub fn new(source_uri: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source_uri: source_uri.into(),
            destination: destination.into(),
        }
    }
}

impl std::fmt::Display for StreamTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source_uri, self.destination.display())
    }
}
