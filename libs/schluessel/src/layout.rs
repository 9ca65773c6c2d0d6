//! Positional layout shared by the AGS and ARS codecs.

use std::ops::Range;

use crate::{FormatError, KeyKind, SegmentKind};

/// Shortest accepted key: the state segment alone.
pub(crate) const MIN_LEN: usize = 2;

pub(crate) const STATE: Range<usize> = 0..2;
pub(crate) const DISTRICT: Range<usize> = 2..3;
pub(crate) const COUNTY: Range<usize> = 3..5;

/// Checks that `input` is `MIN_LEN..=max_len` ASCII digits.
pub(crate) fn check_shape(input: &str, kind: KeyKind, max_len: usize) -> Result<(), FormatError> {
    let shape_ok = (MIN_LEN..=max_len).contains(&input.len())
        && input.bytes().all(|b| b.is_ascii_digit());
    if shape_ok {
        Ok(())
    } else {
        Err(FormatError::Shape {
            kind,
            input: input.to_string(),
        })
    }
}

/// Returns the first present segment that follows an absent one.
///
/// `segments` lists the optional segments in key order.
pub(crate) fn first_gap(segments: &[(SegmentKind, bool)]) -> Option<SegmentKind> {
    let mut missing = false;
    for &(kind, present) in segments {
        if present && missing {
            return Some(kind);
        }
        missing |= !present;
    }
    None
}
