use std::fmt;

/// Which question the processing service is asked about the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Answer a free-form question about the sources.
    #[default]
    Query,
    /// Summarize the sources; no question is sent.
    Summary,
}

impl Mode {
    /// Whether the payload for this mode carries a `query` field.
    pub fn carries_query(self) -> bool {
        matches!(self, Mode::Query)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Query => write!(f, "query"),
            Mode::Summary => write!(f, "summary"),
        }
    }
}
