//! Amtlicher Regionalschlüssel (ARS), the regional key.
//!
//! Layout (12 digits at most):
//!
//! ```text
//! 14 7 30 0070 070
//! |  | |  |    +-- municipality (Gemeinde), only for 12-digit input
//! |  | |  +------- association (Verband), from 9 digits
//! |  | +---------- county (Kreis), from 5 digits
//! |  +------------ district (Regierungsbezirk), from 3 digits
//! +--------------- state (Bundesland), always
//! ```
//!
//! An ARS reduces to an AGS by dropping the association segment.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::layout::{self, COUNTY, DISTRICT, STATE};
use crate::{
    Ags, AssociationKey, AssociationType, CountyKey, DistrictKey, FormatError, KeyKind,
    MunicipalityKey, SegmentKind, StateKey,
};

const ASSOCIATION: Range<usize> = 5..9;
const MUNICIPALITY: Range<usize> = 9..12;

/// A parsed or directly constructed ARS.
#[doc(alias = "Regionalschlüssel")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ars {
    state: StateKey,
    district: Option<DistrictKey>,
    county: Option<CountyKey>,
    association: Option<AssociationKey>,
    municipality: Option<MunicipalityKey>,
}

impl Ars {
    /// Maximum number of digits.
    pub const MAX_LEN: usize = 12;

    /// Creates an ARS from already validated segments.
    #[must_use]
    pub const fn new(
        state: StateKey,
        district: Option<DistrictKey>,
        county: Option<CountyKey>,
        association: Option<AssociationKey>,
        municipality: Option<MunicipalityKey>,
    ) -> Self {
        Self {
            state,
            district,
            county,
            association,
            municipality,
        }
    }

    /// Parses an ARS from 2 to 12 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        layout::check_shape(s, KeyKind::Ars, Self::MAX_LEN)?;

        let segment_err = |e| FormatError::segment_error(KeyKind::Ars, e);
        let len = s.len();

        let state = StateKey::parse(&s[STATE]).map_err(segment_err)?;
        let district = (len >= DISTRICT.end)
            .then(|| DistrictKey::parse(&s[DISTRICT]))
            .transpose()
            .map_err(segment_err)?;
        let county = (len >= COUNTY.end)
            .then(|| CountyKey::parse(&s[COUNTY]))
            .transpose()
            .map_err(segment_err)?;
        let association = (len >= ASSOCIATION.end)
            .then(|| AssociationKey::parse(&s[ASSOCIATION]))
            .transpose()
            .map_err(segment_err)?;
        let municipality = (len == MUNICIPALITY.end)
            .then(|| MunicipalityKey::parse(&s[MUNICIPALITY]))
            .transpose()
            .map_err(segment_err)?;

        Ok(Self::new(state, district, county, association, municipality))
    }

    /// Parses an ARS, logging the failure and returning `None` on error.
    pub fn parse_or_log(s: &str) -> Option<Self> {
        match Self::parse(s) {
            Ok(ars) => Some(ars),
            Err(e) => {
                warn!(input = s, error = %e, "failed to parse ARS");
                None
            }
        }
    }

    /// Returns the state (Bundesland) segment.
    #[must_use]
    pub const fn state(&self) -> StateKey {
        self.state
    }

    /// Returns the district (Regierungsbezirk) segment, if present.
    #[must_use]
    pub const fn district(&self) -> Option<DistrictKey> {
        self.district
    }

    /// Returns the county (Kreis) segment, if present.
    #[must_use]
    pub const fn county(&self) -> Option<CountyKey> {
        self.county
    }

    /// Returns the association (Verband) segment, if present.
    #[must_use]
    pub const fn association(&self) -> Option<AssociationKey> {
        self.association
    }

    /// Returns the municipality (Gemeinde) segment, if present.
    #[must_use]
    pub const fn municipality(&self) -> Option<MunicipalityKey> {
        self.municipality
    }

    /// Returns the number of digits in the rendered key.
    #[must_use]
    pub fn len(&self) -> usize {
        StateKey::WIDTH
            + self.district.map_or(0, |_| DistrictKey::WIDTH)
            + self.county.map_or(0, |_| CountyKey::WIDTH)
            + self.association.map_or(0, |_| AssociationKey::WIDTH)
            + self.municipality.map_or(0, |_| MunicipalityKey::WIDTH)
    }

    /// Always false; the state segment is mandatory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if every segment is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.len() == Self::MAX_LEN
    }

    /// Returns true if no present segment follows an absent one.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.first_gap().is_none()
    }

    fn first_gap(&self) -> Option<SegmentKind> {
        layout::first_gap(&[
            (SegmentKind::District, self.district.is_some()),
            (SegmentKind::County, self.county.is_some()),
            (SegmentKind::Association, self.association.is_some()),
            (SegmentKind::Municipality, self.municipality.is_some()),
        ])
    }

    /// Reduces this ARS to its AGS by dropping the association segment.
    ///
    /// The remaining segments are concatenated and run through
    /// [`Ags::parse`], so the reduced digits must form a valid AGS on their
    /// own. A non-contiguous ARS has no positional reading and is rejected
    /// with [`FormatError::Gap`].
    pub fn to_ags(&self) -> Result<Ags, FormatError> {
        if let Some(segment) = self.first_gap() {
            return Err(FormatError::Gap {
                kind: KeyKind::Ars,
                segment,
            });
        }

        let mut digits = String::with_capacity(Ags::MAX_LEN);
        digits.push_str(self.state.as_str());
        for segment in [
            self.district.as_ref().map(|s| s.as_str()),
            self.county.as_ref().map(|s| s.as_str()),
            self.municipality.as_ref().map(|s| s.as_str()),
        ]
        .into_iter()
        .flatten()
        {
            digits.push_str(segment);
        }

        debug!(ars = %self, ags = %digits, "reducing ARS to AGS");
        Ags::parse(&digits)
    }

    /// Classifies the association segment, if present.
    #[must_use]
    pub fn association_type(&self) -> Option<AssociationType> {
        self.association.map(|a| a.association_type())
    }

    /// Verbandsfreie Gemeinde.
    #[must_use]
    pub fn is_free_municipality(&self) -> bool {
        self.association_type() == Some(AssociationType::FreeMunicipality)
    }

    /// Verbandsangehörige Gemeinde.
    #[must_use]
    pub fn is_associated_municipality(&self) -> bool {
        self.association_type() == Some(AssociationType::AssociatedMunicipality)
    }

    /// Gemeindefreies Gebiet.
    #[must_use]
    pub fn is_municipality_free_area(&self) -> bool {
        self.association_type() == Some(AssociationType::MunicipalityFreeArea)
    }
}

impl fmt::Display for Ars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        if let Some(district) = &self.district {
            write!(f, "{district}")?;
        }
        if let Some(county) = &self.county {
            write!(f, "{county}")?;
        }
        if let Some(association) = &self.association {
            write!(f, "{association}")?;
        }
        if let Some(municipality) = &self.municipality {
            write!(f, "{municipality}")?;
        }
        Ok(())
    }
}

impl FromStr for Ars {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Ars {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(segment) = self.first_gap() {
            return Err(serde::ser::Error::custom(FormatError::Gap {
                kind: KeyKind::Ars,
                segment,
            }));
        }
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Ars {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
