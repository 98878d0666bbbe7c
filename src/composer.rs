//! Ticket number to segment-token decomposition.
//!
//! Numbers are spelled top-down by magnitude tier. Each tier that contributes
//! words forms one group; the groups below a hundred are the tens and the
//! units. Non-empty groups are joined by the conjunction, so it appears only
//! between two spoken groups and never twice in a row.
//!
//! ```
//! use ticket_voice::{decompose, CatalogToken, Phrase};
//!
//! let tokens = decompose(468)?;
//! assert_eq!(
//!     tokens,
//!     vec![
//!         CatalogToken::HundredsMultiple(400),
//!         CatalogToken::Phrase(Phrase::Conjunction),
//!         CatalogToken::TensMultiple(60),
//!         CatalogToken::Phrase(Phrase::Conjunction),
//!         CatalogToken::Unit(8),
//!     ]
//! );
//! # Ok::<(), ticket_voice::ComposeError>(())
//! ```

use std::collections::BTreeSet;

use crate::token::CatalogToken;

/// Largest ticket number the composer can spell.
pub const MAX_TICKET_NUMBER: u32 = 999;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeError {
    #[error("Ticket number {0} is outside the supported range 0..={MAX_TICKET_NUMBER}")]
    OutOfRange(i64),
}

/// One magnitude above the tens/units level.
///
/// `spell` receives the digit count for this tier (1..=9 for hundreds) and
/// returns the tokens for that group. Adding thousands means adding a tier in
/// front of the hundreds and raising `MAX_TICKET_NUMBER`.
struct Tier {
    scale: u32,
    spell: fn(u32) -> Vec<CatalogToken>,
}

const TIERS: &[Tier] = &[Tier {
    scale: 100,
    spell: spell_hundreds,
}];

fn spell_hundreds(count: u32) -> Vec<CatalogToken> {
    // 200 is a dual form and 300-900 are construct forms; one segment each.
    vec![CatalogToken::HundredsMultiple((count * 100) as u16)]
}

/// `n` as a ticket number, or [`ComposeError::OutOfRange`] outside
/// `0..=MAX_TICKET_NUMBER`.
pub fn checked_ticket(n: i64) -> Result<u32, ComposeError> {
    u32::try_from(n)
        .ok()
        .filter(|v| *v <= MAX_TICKET_NUMBER)
        .ok_or(ComposeError::OutOfRange(n))
}

/// Decompose `n` into the ordered tokens of its spoken Arabic form.
///
/// Fails with [`ComposeError::OutOfRange`] for anything outside
/// `0..=MAX_TICKET_NUMBER`. The result is never empty.
pub fn decompose(n: i64) -> Result<Vec<CatalogToken>, ComposeError> {
    let n = checked_ticket(n)?;

    if n == 0 {
        return Ok(vec![CatalogToken::Unit(0)]);
    }

    let mut groups = Vec::with_capacity(TIERS.len() + 2);
    let mut rest = n;
    for tier in TIERS {
        let count = rest / tier.scale;
        rest %= tier.scale;
        if count > 0 {
            groups.push((tier.spell)(count));
        }
    }
    groups.extend(below_hundred(rest));

    Ok(join_groups(groups))
}

/// Groups for 0..=99: nothing for zero, a single atomic token up to 19,
/// otherwise the tens multiple and (if non-zero) the unit as two groups.
fn below_hundred(rest: u32) -> Vec<Vec<CatalogToken>> {
    match rest {
        0 => Vec::new(),
        1..=19 => CatalogToken::for_value(rest).map(|t| vec![t]).into_iter().collect(),
        _ => {
            let tens = (rest / 10) * 10;
            let units = rest % 10;
            let mut groups = vec![vec![CatalogToken::TensMultiple(tens as u8)]];
            if units > 0 {
                groups.push(vec![CatalogToken::Unit(units as u8)]);
            }
            groups
        }
    }
}

fn join_groups(groups: Vec<Vec<CatalogToken>>) -> Vec<CatalogToken> {
    let mut tokens = Vec::new();
    for group in groups.into_iter().filter(|g| !g.is_empty()) {
        if !tokens.is_empty() {
            tokens.push(CatalogToken::CONJUNCTION);
        }
        tokens.extend(group);
    }
    tokens
}

/// Every token [`decompose`] can emit for a number in `0..=max`.
///
/// Fixed phrases are not included unless a decomposition uses them (only the
/// conjunction can appear).
pub fn required_tokens(max: u32) -> Result<BTreeSet<CatalogToken>, ComposeError> {
    if max > MAX_TICKET_NUMBER {
        return Err(ComposeError::OutOfRange(i64::from(max)));
    }
    let mut tokens = BTreeSet::new();
    for n in 0..=max {
        tokens.extend(decompose(i64::from(n))?);
    }
    Ok(tokens)
}
