//! Amtlicher Gemeindeschlüssel (AGS), the municipality key.
//!
//! Layout (8 digits at most):
//!
//! ```text
//! 14 7 30 070
//! |  | |  +-- municipality (Gemeinde), only for 8-digit input
//! |  | +----- county (Kreis), from 5 digits
//! |  +------- district (Regierungsbezirk), from 3 digits
//! +---------- state (Bundesland), always
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use tracing::warn;

use crate::layout::{self, COUNTY, DISTRICT, STATE};
use crate::{
    CountyKey, DistrictKey, FormatError, KeyKind, MunicipalityKey, SegmentKind, StateKey,
};

const MUNICIPALITY: Range<usize> = 5..8;

/// A parsed or directly constructed AGS.
///
/// Trailing segments are absent when the source string was too short to
/// contain them.
#[doc(alias = "Gemeindeschlüssel")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ags {
    state: StateKey,
    district: Option<DistrictKey>,
    county: Option<CountyKey>,
    municipality: Option<MunicipalityKey>,
}

impl Ags {
    /// Maximum number of digits.
    pub const MAX_LEN: usize = 8;

    /// Creates an AGS from already validated segments.
    ///
    /// No consistency check is applied; see [`Ags::is_contiguous`].
    #[must_use]
    pub const fn new(
        state: StateKey,
        district: Option<DistrictKey>,
        county: Option<CountyKey>,
        municipality: Option<MunicipalityKey>,
    ) -> Self {
        Self {
            state,
            district,
            county,
            municipality,
        }
    }

    /// Parses an AGS from 2 to 8 ASCII digits.
    ///
    /// District and county are extracted once the input reaches them; the
    /// municipality only for a full 8-digit key. Lengths in between leave the
    /// remaining digits unextracted.
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        layout::check_shape(s, KeyKind::Ags, Self::MAX_LEN)?;

        let segment_err = |e| FormatError::segment_error(KeyKind::Ags, e);
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
        let municipality = (len == MUNICIPALITY.end)
            .then(|| MunicipalityKey::parse(&s[MUNICIPALITY]))
            .transpose()
            .map_err(segment_err)?;

        Ok(Self::new(state, district, county, municipality))
    }

    /// Parses an AGS, logging the failure and returning `None` on error.
    pub fn parse_or_log(s: &str) -> Option<Self> {
        match Self::parse(s) {
            Ok(ags) => Some(ags),
            Err(e) => {
                warn!(input = s, error = %e, "failed to parse AGS");
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
    ///
    /// Every parsed AGS is contiguous; only direct construction can break it.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.first_gap().is_none()
    }

    fn first_gap(&self) -> Option<SegmentKind> {
        layout::first_gap(&[
            (SegmentKind::District, self.district.is_some()),
            (SegmentKind::County, self.county.is_some()),
            (SegmentKind::Municipality, self.municipality.is_some()),
        ])
    }
}

impl fmt::Display for Ags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)?;
        if let Some(district) = &self.district {
            write!(f, "{district}")?;
        }
        if let Some(county) = &self.county {
            write!(f, "{county}")?;
        }
        if let Some(municipality) = &self.municipality {
            write!(f, "{municipality}")?;
        }
        Ok(())
    }
}

impl FromStr for Ags {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Ags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(segment) = self.first_gap() {
            return Err(serde::ser::Error::custom(FormatError::Gap {
                kind: KeyKind::Ags,
                segment,
            }));
        }
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Ags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn ags(state: &str, district: &str, county: &str, municipality: &str) -> Ags {
        Ags::new(
            state.parse().unwrap(),
            Some(district.parse().unwrap()),
            Some(county.parse().unwrap()),
            Some(municipality.parse().unwrap()),
        )
    }

    #[test]
    fn test_construct_from_segments() {
        let ags = ags("14", "7", "30", "070");
        assert_eq!(ags.state().as_str(), "14");
        assert_eq!(ags.district().unwrap().as_str(), "7");
        assert_eq!(ags.county().unwrap().as_str(), "30");
        assert_eq!(ags.municipality().unwrap().as_str(), "070");
        assert_eq!(ags.to_string(), "14730070");
        assert!(ags.is_complete());
    }

    #[test]
    fn test_parse_full() {
        let parsed = Ags::parse("14730070").unwrap();
        assert_eq!(parsed, ags("14", "7", "30", "070"));
    }

    #[rstest]
    #[case("14", None, None, None)]
    #[case("147", Some("7"), None, None)]
    #[case("1473", Some("7"), None, None)]
    #[case("14730", Some("7"), Some("30"), None)]
    #[case("147300", Some("7"), Some("30"), None)]
    #[case("1473007", Some("7"), Some("30"), None)]
    #[case("14730070", Some("7"), Some("30"), Some("070"))]
    fn test_parse_thresholds(
        #[case] input: &str,
        #[case] district: Option<&str>,
        #[case] county: Option<&str>,
        #[case] municipality: Option<&str>,
    ) {
        let ags = Ags::parse(input).unwrap();
        assert_eq!(ags.state().as_str(), "14");
        assert_eq!(ags.district().as_ref().map(DistrictKey::as_str), district);
        assert_eq!(ags.county().as_ref().map(CountyKey::as_str), county);
        assert_eq!(
            ags.municipality().as_ref().map(MunicipalityKey::as_str),
            municipality
        );
        assert!(ags.is_contiguous());
    }

    #[test]
    fn test_unextracted_tail_is_not_rendered() {
        // 6 and 7 digit inputs stop after the county.
        assert_eq!(Ags::parse("147300").unwrap().to_string(), "14730");
        assert_eq!(Ags::parse("1473007").unwrap().to_string(), "14730");
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("147300700")]
    #[case("14 730070")]
    #[case("1473007a")]
    #[case("+14730")]
    #[case("147300７0")]
    fn test_parse_rejects_shape(#[case] input: &str) {
        let err = Ags::parse(input).unwrap_err();
        assert!(err.is_shape_error());
        assert_eq!(err.kind(), KeyKind::Ags);
    }

    #[rstest]
    #[case("00", SegmentKind::State)]
    #[case("15", SegmentKind::State)]
    #[case("16730070", SegmentKind::State)]
    #[case("99", SegmentKind::State)]
    fn test_parse_rejects_segment(#[case] input: &str, #[case] segment: SegmentKind) {
        let err = Ags::parse(input).unwrap_err();
        assert!(matches!(err, FormatError::Segment { .. }));
        assert_eq!(err.segment(), Some(segment));
    }

    #[test]
    fn test_parse_or_log_returns_none() {
        assert!(Ags::parse_or_log("15").is_none());
        assert_eq!(
            Ags::parse_or_log("14730070").map(|a| a.to_string()),
            Some("14730070".to_string())
        );
    }

    #[test]
    fn test_direct_construction_skips_shape_check() {
        let gappy = Ags::new(
            "14".parse().unwrap(),
            None,
            None,
            Some("070".parse().unwrap()),
        );
        assert_eq!(gappy.to_string(), "14070");
        assert_eq!(gappy.len(), 5);
        assert!(!gappy.is_contiguous());
    }

    #[test]
    fn test_json_roundtrip() {
        let ags = Ags::parse("14730").unwrap();
        let json = serde_json::to_string(&ags).unwrap();
        assert_eq!(json, "\"14730\"");
        let parsed: Ags = serde_json::from_str(&json).unwrap();
        assert_eq!(ags, parsed);
    }

    #[test]
    fn test_json_rejects_gap() {
        // "14070" would read back as district 0, county 70.
        let gappy = Ags::new(
            "14".parse().unwrap(),
            None,
            None,
            Some("070".parse().unwrap()),
        );
        let err = serde_json::to_string(&gappy).unwrap_err();
        assert!(err.to_string().contains("AGS is not contiguous"));
    }

    #[test]
    fn test_json_rejects_invalid() {
        let result: Result<Ags, _> = serde_json::from_str("\"1573\"");
        assert!(result.is_err());
    }

    fn valid_ags() -> impl Strategy<Value = String> {
        (1u8..=14, "[0-9]{6}", 2usize..=8).prop_map(|(state, tail, len)| {
            let full = format!("{state:02}{tail}");
            full[..len].to_string()
        })
    }

    proptest! {
        #[test]
        fn prop_roundtrip(input in valid_ags()) {
            let ags = Ags::parse(&input).unwrap();
            let rendered = ags.to_string();
            prop_assert!(input.starts_with(&rendered));
            prop_assert_eq!(rendered.len(), ags.len());
            let reparsed = Ags::parse(&rendered).unwrap();
            prop_assert_eq!(ags, reparsed);
            if matches!(input.len(), 2 | 3 | 5 | 8) {
                prop_assert_eq!(rendered, input);
            }
        }

        #[test]
        fn prop_state_prefix_accepted(state in 1u8..=14, tail in "[0-9]{0,6}") {
            let input = format!("{state:02}{tail}");
            let ags = Ags::parse(&input).unwrap();
            prop_assert_eq!(ags.state().value(), u16::from(state));
        }

        #[test]
        fn prop_too_long_rejected(input in "[0-9]{9,20}") {
            prop_assert!(Ags::parse(&input).unwrap_err().is_shape_error());
        }

        #[test]
        fn prop_non_digit_rejected(input in "[0-9]{0,4}[^0-9][0-9]{0,3}") {
            prop_assert!(Ags::parse(&input).unwrap_err().is_shape_error());
        }
    }
}
