//! Association type classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The meaning of an association key's leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationType {
    /// Verbandsfreie Gemeinde, leading digit `0`.
    FreeMunicipality,
    /// Verbandsangehörige Gemeinde, leading digit `5`.
    AssociatedMunicipality,
    /// Gemeindefreies Gebiet, leading digit `9`.
    MunicipalityFreeArea,
}

impl AssociationType {
    /// Classifies a leading association digit.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(AssociationType::FreeMunicipality),
            '5' => Some(AssociationType::AssociatedMunicipality),
            '9' => Some(AssociationType::MunicipalityFreeArea),
            _ => None,
        }
    }

    /// Returns the leading digit for this type.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            AssociationType::FreeMunicipality => '0',
            AssociationType::AssociatedMunicipality => '5',
            AssociationType::MunicipalityFreeArea => '9',
        }
    }

    /// Returns the German designation.
    #[must_use]
    pub const fn designation(&self) -> &'static str {
        match self {
            AssociationType::FreeMunicipality => "Verbandsfreie Gemeinde",
            AssociationType::AssociatedMunicipality => "Verbandsangehörige Gemeinde",
            AssociationType::MunicipalityFreeArea => "Gemeindefreies Gebiet",
        }
    }
}

impl fmt::Display for AssociationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.designation())
    }
}
