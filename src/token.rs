use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed phrases that are recorded once and reused in every announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phrase {
    /// "على العميل رقم", spoken before the ticket number.
    Prefix,
    /// "و", the "and" joining two non-zero magnitude groups.
    Conjunction,
    /// Notification sound played before the prefix.
    Chime,
}

impl Phrase {
    pub const ALL: [Phrase; 3] = [Phrase::Prefix, Phrase::Conjunction, Phrase::Chime];

    /// Lower-case name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Phrase::Prefix => "prefix",
            Phrase::Conjunction => "conjunction",
            Phrase::Chime => "chime",
        }
    }
}

/// A value whose spoken form is exactly one pre-recorded segment.
///
/// Payloads carry the full numeric value (`TensMultiple(60)`, not `6`), so two
/// tokens are equal only when both variant and value match. The variants are
/// plain data; use [`CatalogToken::is_valid`] before trusting a token that did
/// not come out of the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CatalogToken {
    /// 0 through 9.
    Unit(u8),
    /// 10 through 19. Irregular lexical forms, never split into ten + unit.
    Teen(u8),
    /// 20, 30, ..., 90.
    TensMultiple(u8),
    /// 100, 200, ..., 900. Each one is its own word (dual form for 200,
    /// construct forms for 300 to 900).
    HundredsMultiple(u16),
    Phrase(Phrase),
}

/// Discriminant of a [`CatalogToken`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTag {
    Unit,
    Teen,
    TensMultiple,
    HundredsMultiple,
    Phrase,
}

impl CatalogToken {
    pub const CONJUNCTION: CatalogToken = CatalogToken::Phrase(Phrase::Conjunction);
    pub const PREFIX: CatalogToken = CatalogToken::Phrase(Phrase::Prefix);
    pub const CHIME: CatalogToken = CatalogToken::Phrase(Phrase::Chime);

    /// Which kind of segment this is.
    pub fn tag(&self) -> TokenTag {
        match self {
            CatalogToken::Unit(_) => TokenTag::Unit,
            CatalogToken::Teen(_) => TokenTag::Teen,
            CatalogToken::TensMultiple(_) => TokenTag::TensMultiple,
            CatalogToken::HundredsMultiple(_) => TokenTag::HundredsMultiple,
            CatalogToken::Phrase(_) => TokenTag::Phrase,
        }
    }

    /// Numeric payload, `None` for phrases.
    pub fn value(&self) -> Option<u32> {
        match *self {
            CatalogToken::Unit(v) | CatalogToken::Teen(v) | CatalogToken::TensMultiple(v) => {
                Some(u32::from(v))
            }
            CatalogToken::HundredsMultiple(v) => Some(u32::from(v)),
            CatalogToken::Phrase(_) => None,
        }
    }

    /// Whether the payload lies inside the domain of its variant.
    pub fn is_valid(&self) -> bool {
        match *self {
            CatalogToken::Unit(v) => v <= 9,
            CatalogToken::Teen(v) => (10..=19).contains(&v),
            CatalogToken::TensMultiple(v) => (20..=90).contains(&v) && v % 10 == 0,
            CatalogToken::HundredsMultiple(v) => (100..=900).contains(&v) && v % 100 == 0,
            CatalogToken::Phrase(_) => true,
        }
    }

    /// The single numeric token spelling `value`, if one exists.
    ///
    /// Covers 0-19, the tens multiples and the hundreds multiples. Anything
    /// else needs the composer.
    pub fn for_value(value: u32) -> Option<CatalogToken> {
        let token = match value {
            0..=9 => CatalogToken::Unit(value as u8),
            10..=19 => CatalogToken::Teen(value as u8),
            20..=90 if value % 10 == 0 => CatalogToken::TensMultiple(value as u8),
            100..=900 if value % 100 == 0 => CatalogToken::HundredsMultiple(value as u16),
            _ => return None,
        };
        Some(token)
    }

    /// Every valid numeric token followed by the three fixed phrases.
    pub fn all() -> impl Iterator<Item = CatalogToken> {
        (0..=900u32)
            .filter_map(CatalogToken::for_value)
            .chain(Phrase::ALL.into_iter().map(CatalogToken::Phrase))
    }
}

impl fmt::Display for CatalogToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogToken::Unit(v) => write!(f, "unit({v})"),
            CatalogToken::Teen(v) => write!(f, "teen({v})"),
            CatalogToken::TensMultiple(v) => write!(f, "tens({v})"),
            CatalogToken::HundredsMultiple(v) => write!(f, "hundreds({v})"),
            CatalogToken::Phrase(p) => write!(f, "phrase({})", p.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogToken, Phrase, TokenTag};

    #[test]
    fn for_value_picks_the_atomic_form() {
        assert_eq!(CatalogToken::for_value(0), Some(CatalogToken::Unit(0)));
        assert_eq!(CatalogToken::for_value(15), Some(CatalogToken::Teen(15)));
        assert_eq!(CatalogToken::for_value(60), Some(CatalogToken::TensMultiple(60)));
        assert_eq!(
            CatalogToken::for_value(200),
            Some(CatalogToken::HundredsMultiple(200))
        );
        assert_eq!(CatalogToken::for_value(68), None);
        assert_eq!(CatalogToken::for_value(1000), None);
    }

    #[test]
    fn rejects_payloads_outside_the_variant_domain() {
        assert!(!CatalogToken::Unit(10).is_valid());
        assert!(!CatalogToken::Teen(9).is_valid());
        assert!(!CatalogToken::TensMultiple(65).is_valid());
        assert!(!CatalogToken::TensMultiple(10).is_valid());
        assert!(!CatalogToken::HundredsMultiple(250).is_valid());
        assert!(!CatalogToken::HundredsMultiple(1000).is_valid());
        assert!(CatalogToken::HundredsMultiple(900).is_valid());
    }

    #[test]
    fn all_lists_every_segment_once() {
        let all: Vec<_> = CatalogToken::all().collect();
        // 10 units, 10 teens, 8 tens, 9 hundreds, 3 phrases
        assert_eq!(all.len(), 40);
        assert!(all.iter().all(CatalogToken::is_valid));
        assert!(all.contains(&CatalogToken::Phrase(Phrase::Chime)));
    }

    #[test]
    fn exposes_tag_and_payload() {
        let token = CatalogToken::HundredsMultiple(400);
        assert_eq!(token.tag(), TokenTag::HundredsMultiple);
        assert_eq!(token.value(), Some(400));
        assert_eq!(CatalogToken::CONJUNCTION.tag(), TokenTag::Phrase);
        assert_eq!(CatalogToken::CONJUNCTION.value(), None);
        assert_eq!(CatalogToken::CONJUNCTION.to_string(), "phrase(conjunction)");
    }
}
