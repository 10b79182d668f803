//! The meta-identifier record and its flat-string codec.
//!
//! Decoding works from the end of the string toward the start: a trailing
//! `;N:D` scale constraint is stripped first, then a trailing `;N` page
//! number, each at most once and only when immediately adjacent to the end.
//! Whatever remains is the identifier. This keeps the priority ordering
//! explicit instead of leaning on a regex engine's backtracking.

use std::fmt;
use std::str::FromStr;

use crate::MalformedMetaIdentifier;

/// Separator between the identifier, page number, and scale constraint.
const FIELD_SEPARATOR: char = ';';

/// Separator between the scale constraint's numerator and denominator.
const RATIO_SEPARATOR: char = ':';

/// A reduction ratio limiting the maximum output scale of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleConstraint {
    /// Ratio numerator.
    pub numerator: u32,

    /// Ratio denominator.
    pub denominator: u32,
}

impl ScaleConstraint {
    /// Creates a scale constraint from a numerator and denominator.
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for ScaleConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.numerator, RATIO_SEPARATOR, self.denominator)
    }
}

/// A structured meta-identifier: an opaque resource identifier plus optional
/// page number and scale constraint.
///
/// Instances are values: constructed either from explicit fields before
/// encoding, or by [`MetaIdentifier::decode`] from an incoming flat string,
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaIdentifier {
    /// The resource identifier. Opaque; may itself contain `;` and `:`.
    pub identifier: String,

    /// 1-based page selector. `None` means unspecified, distinct from 0.
    pub page_number: Option<u32>,

    /// Maximum-scale reduction ratio. `None` means no constraint.
    pub scale_constraint: Option<ScaleConstraint>,
}

impl MetaIdentifier {
    /// Creates a meta-identifier with no page number or scale constraint.
    pub fn new<S: Into<String>>(identifier: S) -> Self {
        Self {
            identifier: identifier.into(),
            page_number: None,
            scale_constraint: None,
        }
    }

    /// Sets the page number.
    #[must_use]
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Sets the scale constraint.
    #[must_use]
    pub fn with_scale_constraint(mut self, numerator: u32, denominator: u32) -> Self {
        self.scale_constraint = Some(ScaleConstraint::new(numerator, denominator));
        self
    }

    /// Encodes this record as a flat wire string.
    ///
    /// Present fields are joined with `;` in fixed order: identifier, page
    /// number, `numerator:denominator`. Absent fields are omitted entirely.
    /// Nothing is escaped: an identifier containing `;` or `:` passes
    /// through verbatim, so the output is only guaranteed to decode back to
    /// this record when the identifier does not itself end in text shaped
    /// like a trailing field (see [`MetaIdentifier::decode`]).
    ///
    /// This operation is total; it never fails.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decodes a flat wire string into a structured record.
    ///
    /// Scans from the end of the string: a trailing `;N:D` suffix is consumed
    /// as the scale constraint, then a trailing `;N` suffix as the page
    /// number. Each is matched at most once, in that order, and only
    /// immediately adjacent to the end of the still-unconsumed string; there
    /// is no scanning for fields in the interior. The remainder, unmodified
    /// and including any `;` or `:` it still contains, becomes the
    /// identifier. A candidate suffix that is not exactly digits (or
    /// digits-colon-digits) is left in the identifier.
    ///
    /// # Errors
    ///
    /// Fails with [`MalformedMetaIdentifier`] when the input is empty, or
    /// when stripping the trailing fields leaves an empty identifier.
    pub fn decode(flat: &str) -> Result<Self, MalformedMetaIdentifier> {
        if flat.is_empty() {
            return Err(MalformedMetaIdentifier::EMPTY_INPUT);
        }

        let mut rest = flat;
        let mut scale_constraint = None;
        let mut page_number = None;

        if let Some((head, constraint)) = strip_trailing_scale_constraint(rest) {
            rest = head;
            scale_constraint = Some(constraint);
        }
        if let Some((head, page)) = strip_trailing_page_number(rest) {
            rest = head;
            page_number = Some(page);
        }

        if rest.is_empty() {
            return Err(MalformedMetaIdentifier::EMPTY_IDENTIFIER);
        }

        Ok(Self {
            identifier: rest.to_string(),
            page_number,
            scale_constraint,
        })
    }
}

impl fmt::Display for MetaIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)?;
        if let Some(page_number) = self.page_number {
            write!(f, "{}{}", FIELD_SEPARATOR, page_number)?;
        }
        if let Some(scale_constraint) = self.scale_constraint {
            write!(f, "{}{}", FIELD_SEPARATOR, scale_constraint)?;
        }
        Ok(())
    }
}

impl FromStr for MetaIdentifier {
    type Err = MalformedMetaIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl serde::Serialize for MetaIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> serde::Deserialize<'de> for MetaIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Splits a trailing `;N:D` suffix off `s`, returning the head and the
/// parsed constraint. Returns `None` when the suffix is absent or malformed.
fn strip_trailing_scale_constraint(s: &str) -> Option<(&str, ScaleConstraint)> {
    let separator = s.rfind(FIELD_SEPARATOR)?;
    let suffix = &s[separator + 1..];
    let (numerator, denominator) = suffix.split_once(RATIO_SEPARATOR)?;
    let numerator = parse_digits(numerator)?;
    let denominator = parse_digits(denominator)?;
    Some((
        &s[..separator],
        ScaleConstraint::new(numerator, denominator),
    ))
}

/// Splits a trailing `;N` suffix off `s`, returning the head and the parsed
/// page number. Returns `None` when the suffix is absent or malformed.
fn strip_trailing_page_number(s: &str) -> Option<(&str, u32)> {
    let separator = s.rfind(FIELD_SEPARATOR)?;
    let page = parse_digits(&s[separator + 1..])?;
    Some((&s[..separator], page))
}

/// Parses a non-empty, all-ASCII-digit string. A segment whose digits
/// overflow `u32` is treated as not matching, so it falls back into the
/// identifier rather than failing the decode.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_encode_identifier_only() {
        let meta_id = MetaIdentifier::new("x");
        assert_eq!(meta_id.encode(), "x");
    }

    #[test]
    fn test_encode_all_fields() {
        let meta_id = MetaIdentifier::new("a")
            .with_page_number(3)
            .with_scale_constraint(2, 1);
        assert_eq!(meta_id.encode(), "a;3;2:1");
    }

    #[test]
    fn test_encode_page_only() {
        let meta_id = MetaIdentifier::new("a").with_page_number(7);
        assert_eq!(meta_id.encode(), "a;7");
    }

    #[test]
    fn test_encode_scale_only() {
        let meta_id = MetaIdentifier::new("a").with_scale_constraint(5, 2);
        assert_eq!(meta_id.encode(), "a;5:2");
    }

    #[test]
    fn test_encode_preserves_delimiters_in_identifier() {
        let meta_id = MetaIdentifier::new("a;b:c").with_page_number(2);
        assert_eq!(meta_id.encode(), "a;b:c;2");
    }

    #[test]
    fn test_decode_identifier_only() {
        let meta_id = MetaIdentifier::decode("whatever").unwrap();
        assert_eq!(meta_id.identifier, "whatever");
        assert_eq!(meta_id.page_number, None);
        assert_eq!(meta_id.scale_constraint, None);
    }

    #[test]
    fn test_decode_all_fields() {
        let meta_id = MetaIdentifier::decode("whatever;3;2:3").unwrap();
        assert_eq!(meta_id.identifier, "whatever");
        assert_eq!(meta_id.page_number, Some(3));
        assert_eq!(meta_id.scale_constraint, Some(ScaleConstraint::new(2, 3)));
    }

    #[test]
    fn test_decode_page_only() {
        let meta_id = MetaIdentifier::decode("a;7").unwrap();
        assert_eq!(meta_id.identifier, "a");
        assert_eq!(meta_id.page_number, Some(7));
        assert_eq!(meta_id.scale_constraint, None);
    }

    #[test]
    fn test_decode_scale_only() {
        // 5:2 fails the pure-digits page pattern, so it must be read as a
        // scale constraint, not a page number.
        let meta_id = MetaIdentifier::decode("a;5:2").unwrap();
        assert_eq!(meta_id.identifier, "a");
        assert_eq!(meta_id.page_number, None);
        assert_eq!(meta_id.scale_constraint, Some(ScaleConstraint::new(5, 2)));
    }

    #[test]
    fn test_decode_identifier_containing_separator() {
        let meta_id = MetaIdentifier::decode("foo;bar;3").unwrap();
        assert_eq!(meta_id.identifier, "foo;bar");
        assert_eq!(meta_id.page_number, Some(3));
        assert_eq!(meta_id.scale_constraint, None);
    }

    #[test]
    fn test_decode_scale_must_be_rightmost() {
        // The scale constraint is only recognized as the final field; an
        // interior ratio-shaped segment belongs to the identifier.
        let meta_id = MetaIdentifier::decode("a;2:1;3").unwrap();
        assert_eq!(meta_id.identifier, "a;2:1");
        assert_eq!(meta_id.page_number, Some(3));
        assert_eq!(meta_id.scale_constraint, None);
    }

    #[test]
    fn test_decode_malformed_ratio_falls_into_identifier() {
        let meta_id = MetaIdentifier::decode("a;2:1:3").unwrap();
        assert_eq!(meta_id.identifier, "a;2:1:3");
        assert_eq!(meta_id.page_number, None);
        assert_eq!(meta_id.scale_constraint, None);
    }

    #[test]
    fn test_decode_non_digit_segment_falls_into_identifier() {
        let meta_id = MetaIdentifier::decode("a;3x").unwrap();
        assert_eq!(meta_id.identifier, "a;3x");
        assert_eq!(meta_id.page_number, None);
    }

    #[test]
    fn test_decode_trailing_separator_falls_into_identifier() {
        let meta_id = MetaIdentifier::decode("a;3;").unwrap();
        assert_eq!(meta_id.identifier, "a;3;");
        assert_eq!(meta_id.page_number, None);
    }

    #[test]
    fn test_decode_page_with_leading_zeros() {
        let meta_id = MetaIdentifier::decode("a;007").unwrap();
        assert_eq!(meta_id.page_number, Some(7));
    }

    #[test]
    fn test_decode_oversized_digits_fall_into_identifier() {
        let meta_id = MetaIdentifier::decode("a;99999999999999999999").unwrap();
        assert_eq!(meta_id.identifier, "a;99999999999999999999");
        assert_eq!(meta_id.page_number, None);
    }

    #[test]
    fn test_decode_empty_input() {
        let result = MetaIdentifier::decode("");
        assert_eq!(result, Err(MalformedMetaIdentifier::EMPTY_INPUT));
    }

    #[test]
    fn test_decode_empty_identifier_after_page_strip() {
        let result = MetaIdentifier::decode(";3");
        assert_eq!(result, Err(MalformedMetaIdentifier::EMPTY_IDENTIFIER));
    }

    #[test]
    fn test_decode_empty_identifier_after_scale_strip() {
        let result = MetaIdentifier::decode(";2:1");
        assert_eq!(result, Err(MalformedMetaIdentifier::EMPTY_IDENTIFIER));
    }

    #[test]
    fn test_decode_bare_ratio_is_identifier() {
        // No leading separator, so nothing is structural.
        let meta_id = MetaIdentifier::decode("5:2").unwrap();
        assert_eq!(meta_id.identifier, "5:2");
        assert_eq!(meta_id.scale_constraint, None);
    }

    #[test]
    fn test_from_str_roundtrip() {
        let meta_id: MetaIdentifier = "cats;2;3:4".parse().unwrap();
        assert_eq!(meta_id.to_string(), "cats;2;3:4");
    }

    #[test]
    fn test_encode_idempotent_over_decode() {
        for flat in ["cats", "cats;2", "cats;3:4", "cats;2;3:4", "a;b;2"] {
            let meta_id = MetaIdentifier::decode(flat).unwrap();
            assert_eq!(meta_id.encode(), flat);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let meta_id = MetaIdentifier::new("cats").with_page_number(2);
        let json = serde_json::to_string(&meta_id).unwrap();
        assert_eq!(json, "\"cats;2\"");
        let parsed: MetaIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(meta_id, parsed);
    }

    /// True when the identifier's literal text ends in something shaped like
    /// a trailing field, which the wire format cannot round-trip (it has no
    /// escaping mechanism).
    fn has_ambiguous_suffix(identifier: &str) -> bool {
        strip_trailing_scale_constraint(identifier).is_some()
            || strip_trailing_page_number(identifier).is_some()
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            identifier in "[a-zA-Z0-9;:_./ -]{1,40}",
            page_number in proptest::option::of(0u32..10_000),
            scale in proptest::option::of((1u32..100, 1u32..100)),
        ) {
            prop_assume!(!has_ambiguous_suffix(&identifier));

            let mut meta_id = MetaIdentifier::new(identifier);
            if let Some(page) = page_number {
                meta_id = meta_id.with_page_number(page);
            }
            if let Some((numerator, denominator)) = scale {
                meta_id = meta_id.with_scale_constraint(numerator, denominator);
            }

            let decoded = MetaIdentifier::decode(&meta_id.encode()).unwrap();
            prop_assert_eq!(decoded, meta_id);
        }

        #[test]
        fn prop_decode_never_panics(flat in "\\PC{0,60}") {
            let _ = MetaIdentifier::decode(&flat);
        }
    }
}
