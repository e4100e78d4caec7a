use std::fmt;

/// Machine-readable error codes for callers that map failures to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyLabelChange,
    EmptyReviewRequest,
    InvalidLabel,
    InvalidPrincipal,
    InconsistentSummary,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyLabelChange => "E1001",
            Self::EmptyReviewRequest => "E1002",
            Self::InvalidLabel => "E1003",
            Self::InvalidPrincipal => "E1004",
            Self::InconsistentSummary => "E1005",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyLabelChange => "Label change names no label",
            Self::EmptyReviewRequest => "Review request names neither a user nor a team",
            Self::InvalidLabel => "Label reference has an invalid id",
            Self::InvalidPrincipal => "Review target has an invalid id",
            Self::InconsistentSummary => "Aggregated summary has overlapping or duplicate entries",
        }
    }

    /// Optional remediation hint for whoever produced the timeline.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EmptyLabelChange | Self::InvalidLabel => {
                Some("Load the label row together with the timeline entry.")
            }
            Self::EmptyReviewRequest | Self::InvalidPrincipal => Some(
                "Resolve the requested user or team; use the ghost principal for deleted ones.",
            ),
            Self::InconsistentSummary => {
                Some("Summaries must come from this engine; do not edit them by hand.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A timeline entry whose payload contradicts its declared kind.
///
/// These are bugs in whatever produced the timeline, never recoverable
/// conditions: one bad entry fails the whole compaction call. `position` is
/// the entry's index in the input, `entry_id` its storage id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompactError {
    #[error("entry {entry_id} at position {position}: label change names no label")]
    EmptyLabelChange { position: usize, entry_id: i64 },

    #[error(
        "entry {entry_id} at position {position}: review request names neither a user nor a team"
    )]
    EmptyReviewRequest { position: usize, entry_id: i64 },

    #[error("entry {entry_id} at position {position}: invalid label id {label_id}")]
    InvalidLabel {
        position: usize,
        entry_id: i64,
        label_id: i64,
    },

    #[error("entry {entry_id} at position {position}: invalid {kind} id {principal_id}")]
    InvalidPrincipal {
        position: usize,
        entry_id: i64,
        kind: &'static str,
        principal_id: i64,
    },

    #[error(
        "entry {entry_id} at position {position}: aggregated summary lists an item twice or on both sides"
    )]
    InconsistentSummary { position: usize, entry_id: i64 },
}

impl CompactError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyLabelChange { .. } => ErrorCode::EmptyLabelChange,
            Self::EmptyReviewRequest { .. } => ErrorCode::EmptyReviewRequest,
            Self::InvalidLabel { .. } => ErrorCode::InvalidLabel,
            Self::InvalidPrincipal { .. } => ErrorCode::InvalidPrincipal,
            Self::InconsistentSummary { .. } => ErrorCode::InconsistentSummary,
        }
    }

    /// Input position of the offending entry.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::EmptyLabelChange { position, .. }
            | Self::EmptyReviewRequest { position, .. }
            | Self::InvalidLabel { position, .. }
            | Self::InvalidPrincipal { position, .. }
            | Self::InconsistentSummary { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompactError, ErrorCode};
    use std::collections::HashSet;

    const ALL: [ErrorCode; 5] = [
        ErrorCode::EmptyLabelChange,
        ErrorCode::EmptyReviewRequest,
        ErrorCode::InvalidLabel,
        ErrorCode::InvalidPrincipal,
        ErrorCode::InconsistentSummary,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let code = code.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn every_code_has_a_message_and_hint() {
        for code in ALL {
            assert!(!code.message().is_empty(), "{code} has no message");
            assert!(code.hint().is_some(), "{code} has no hint");
        }
    }

    #[test]
    fn error_reports_position_and_code() {
        let err = CompactError::InvalidPrincipal {
            position: 4,
            entry_id: 99,
            kind: "team",
            principal_id: 0,
        };
        assert_eq!(err.position(), 4);
        assert_eq!(err.code(), ErrorCode::InvalidPrincipal);
        assert_eq!(
            err.to_string(),
            "entry 99 at position 4: invalid team id 0"
        );
    }
}
