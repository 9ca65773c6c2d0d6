//! Error types for key parsing and validation.

use std::fmt;

use thiserror::Error;

use crate::SegmentKind;

/// The kind of identifier being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Amtlicher Gemeindeschlüssel (municipality key).
    Ags,
    /// Amtlicher Regionalschlüssel (regional key).
    Ars,
}

impl KeyKind {
    /// Returns the conventional abbreviation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Ags => "AGS",
            KeyKind::Ars => "ARS",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single segment string failed its width or character-class rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {segment} segment: {value:?}")]
pub struct SegmentError {
    /// The segment kind that was being parsed.
    pub segment: SegmentKind,
    /// The rejected input.
    pub value: String,
}

/// Errors that can occur when parsing or reducing an AGS or ARS.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The input is not 2 to N ASCII digits.
    #[error("invalid {kind} string: {input:?}")]
    Shape { kind: KeyKind, input: String },

    /// An extracted segment failed its own rule.
    #[error("{kind}: {source}")]
    Segment {
        kind: KeyKind,
        #[source]
        source: SegmentError,
    },

    /// A present segment follows an absent one, so the key has no
    /// unambiguous digit form.
    #[error("{kind} is not contiguous: {segment} is set but an earlier segment is missing")]
    Gap { kind: KeyKind, segment: SegmentKind },
}

impl FormatError {
    pub(crate) fn segment_error(kind: KeyKind, source: SegmentError) -> Self {
        FormatError::Segment { kind, source }
    }

    /// Returns the identifier kind that failed.
    pub fn kind(&self) -> KeyKind {
        match self {
            FormatError::Shape { kind, .. }
            | FormatError::Segment { kind, .. }
            | FormatError::Gap { kind, .. } => *kind,
        }
    }

    /// Returns the segment that failed, if the failure is segment-specific.
    pub fn segment(&self) -> Option<SegmentKind> {
        match self {
            FormatError::Shape { .. } => None,
            FormatError::Segment { source, .. } => Some(source.segment),
            FormatError::Gap { segment, .. } => Some(*segment),
        }
    }

    /// Returns true if the input failed the overall shape check.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, FormatError::Shape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_error_message() {
        let err = FormatError::segment_error(
            KeyKind::Ags,
            SegmentError {
                segment: SegmentKind::State,
                value: "15".to_string(),
            },
        );
        assert_eq!(err.to_string(), "AGS: invalid Bundesland segment: \"15\"");
        assert_eq!(err.kind(), KeyKind::Ags);
        assert_eq!(err.segment(), Some(SegmentKind::State));
        assert!(!err.is_shape_error());
    }

    #[test]
    fn test_shape_error_message() {
        let err = FormatError::Shape {
            kind: KeyKind::Ars,
            input: "1".to_string(),
        };
        assert_eq!(err.to_string(), "invalid ARS string: \"1\"");
        assert!(err.is_shape_error());
        assert_eq!(err.segment(), None);
    }
}
