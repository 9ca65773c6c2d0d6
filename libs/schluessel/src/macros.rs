//! Macros for defining fixed-width segment types.

/// Macro to define a fixed-width numeric key segment.
///
/// This generates a newtype over the segment's ASCII digits with:
/// - `WIDTH` and `KIND` constants
/// - `is_valid()` as the segment predicate
/// - `parse()` as the only way to obtain a value
/// - `Display`, `FromStr` and `AsRef<str>` implementations
/// - `Serialize` and `Deserialize` as a plain string
///
/// The trailing expression is an extra rule over the digits, applied after
/// the width and digit checks.
///
/// # Example
///
/// ```ignore
/// define_segment!(
///     /// Two digit county key.
///     CountyKey, SegmentKind::County, 2, |_| true
/// );
///
/// let county: CountyKey = "30".parse()?;
/// ```
#[macro_export]
macro_rules! define_segment {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $width:literal, $rule:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $width]);

        impl $name {
            /// Number of digits in this segment.
            pub const WIDTH: usize = $width;

            /// The administrative level this segment denotes.
            pub const KIND: $crate::SegmentKind = $kind;

            /// Returns true if `s` is a valid value for this segment.
            #[must_use]
            pub fn is_valid(s: &str) -> bool {
                Self::digits(s).is_some()
            }

            /// Parses a segment from exactly `WIDTH` ASCII digits.
            pub fn parse(s: &str) -> Result<Self, $crate::SegmentError> {
                Self::digits(s)
                    .map(Self)
                    .ok_or_else(|| $crate::SegmentError {
                        segment: Self::KIND,
                        value: s.to_string(),
                    })
            }

            fn digits(s: &str) -> Option<[u8; $width]> {
                let digits: [u8; $width] = s.as_bytes().try_into().ok()?;
                let rule: fn(&[u8; $width]) -> bool = $rule;
                (digits.iter().all(u8::is_ascii_digit) && rule(&digits)).then_some(digits)
            }

            /// Returns the segment digits.
            #[must_use]
            pub fn as_str(&self) -> &str {
                std::str::from_utf8(&self.0).unwrap_or_default()
            }

            /// Returns the segment as a number (leading zeros dropped).
            #[must_use]
            pub fn value(&self) -> u16 {
                self.0
                    .iter()
                    .fold(0, |acc, digit| acc * 10 + u16::from(digit - b'0'))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::SegmentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
