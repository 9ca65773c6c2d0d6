//! Fixed-width segment types shared by AGS and ARS.
//!
//! Every segment is a run of ASCII digits of a fixed width. A value of one of
//! these types has always passed its segment rule, so codecs and callers can
//! hold them without re-validating.

use std::fmt;

use crate::define_segment;
use crate::AssociationType;

/// The administrative level a segment denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    /// Bundesland.
    State,
    /// Regierungsbezirk.
    District,
    /// Kreis.
    County,
    /// Gemeindeverband.
    Association,
    /// Gemeinde.
    Municipality,
}

impl SegmentKind {
    /// Returns the German name of the level.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            SegmentKind::State => "Bundesland",
            SegmentKind::District => "Regierungsbezirk",
            SegmentKind::County => "Kreis",
            SegmentKind::Association => "Verband",
            SegmentKind::Municipality => "Gemeinde",
        }
    }

    /// Returns the number of digits a segment of this kind occupies.
    #[must_use]
    pub const fn width(&self) -> usize {
        match self {
            SegmentKind::State => StateKey::WIDTH,
            SegmentKind::District => DistrictKey::WIDTH,
            SegmentKind::County => CountyKey::WIDTH,
            SegmentKind::Association => AssociationKey::WIDTH,
            SegmentKind::Municipality => MunicipalityKey::WIDTH,
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

define_segment!(
    /// Federal state key, `01` through `14`.
    #[doc(alias = "Bundesland")]
    StateKey,
    SegmentKind::State,
    2,
    |d| matches!(d, [b'0', b'1'..=b'9'] | [b'1', b'0'..=b'4'])
);

define_segment!(
    /// Administrative district key, a single digit.
    #[doc(alias = "Regierungsbezirk")]
    DistrictKey,
    SegmentKind::District,
    1,
    |_| true
);

define_segment!(
    /// County key, two digits.
    #[doc(alias = "Kreis")]
    CountyKey,
    SegmentKind::County,
    2,
    |_| true
);

define_segment!(
    /// Municipal association key, four digits.
    ///
    /// The leading digit encodes the [`AssociationType`] and must be `0`, `5`
    /// or `9`.
    #[doc(alias = "Verband")]
    AssociationKey,
    SegmentKind::Association,
    4,
    |d| matches!(d[0], b'0' | b'5' | b'9')
);

define_segment!(
    /// Municipality key, three digits.
    #[doc(alias = "Gemeinde")]
    MunicipalityKey,
    SegmentKind::Municipality,
    3,
    |_| true
);

impl AssociationKey {
    /// Returns the association type encoded by the leading digit.
    #[must_use]
    pub fn association_type(&self) -> AssociationType {
        match self.0[0] {
            b'0' => AssociationType::FreeMunicipality,
            b'5' => AssociationType::AssociatedMunicipality,
            _ => AssociationType::MunicipalityFreeArea,
        }
    }
}
