use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignError {
    /// Accepted anchors, sorted by Arabic position, are not increasing on the Hebrew side.
    #[error(
        "anchor order violated: '{prev_word}' (ar {prev_ar}, he {prev_he}) precedes '{word}' (ar {pos_ar}, he {pos_he})"
    )]
    AnchorOrder {
        prev_word: String,
        prev_ar: usize,
        prev_he: usize,
        word: String,
        pos_ar: usize,
        pos_he: usize,
    },
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl AlignError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
