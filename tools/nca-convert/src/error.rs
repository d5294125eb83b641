//! Import errors the build treats differently from hard failures

/// A requested item inside a source file does not exist
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("{kind} '{name}' not found in {source_file}")]
    MissingInternal {
        kind: &'static str,
        name: String,
        source_file: String,
    },
}

impl ImportError {
    pub fn missing(kind: &'static str, name: &str, source: &std::path::Path) -> Self {
        Self::MissingInternal {
            kind,
            name: name.to_string(),
            source_file: source.display().to_string(),
        }
    }
}
