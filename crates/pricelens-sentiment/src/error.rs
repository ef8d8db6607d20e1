use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lexicon line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("lexicon is empty")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("review source {source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
}
