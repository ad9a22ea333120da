use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Number of streets in a regular (non-Fantasyland) hand.
pub const FINAL_STREET: u8 = 5;

/// Deal and placement quota for one street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetRequirement {
    /// Cards dealt at the start of the street
    pub deal: usize,
    /// Cards that must end the street on the board
    pub place: usize,
    /// Cards that must end the street in the discard log
    pub discard: usize,
}

impl StreetRequirement {
    /// Short human-readable quota, e.g. `Place 2 (1 discard)`.
    pub fn describe(&self) -> String {
        if self.discard == 0 {
            format!("Place {}", self.place)
        } else {
            format!("Place {} ({} discard)", self.place, self.discard)
        }
    }
}

/// Returns the quota for `street` (1-based), or `None` outside 1..=5.
///
/// Street 1 deals five cards that must all be placed; streets 2-5 deal three,
/// two of which are placed and one discarded.
///
/// # Examples
///
/// ```
/// use ofc_engine::rules::street_requirement;
///
/// let first = street_requirement(1).unwrap();
/// assert_eq!((first.deal, first.place, first.discard), (5, 5, 0));
///
/// let later = street_requirement(4).unwrap();
/// assert_eq!((later.deal, later.place, later.discard), (3, 2, 1));
///
/// assert!(street_requirement(6).is_none());
/// ```
pub fn street_requirement(street: u8) -> Option<StreetRequirement> {
    match street {
        1 => Some(StreetRequirement {
            deal: 5,
            place: 5,
            discard: 0,
        }),
        2..=FINAL_STREET => Some(StreetRequirement {
            deal: 3,
            place: 2,
            discard: 1,
        }),
        _ => None,
    }
}

/// How the mandatory discard of streets 2-5 is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscardPolicy {
    /// Whatever is left in the pool once the placements are made is discarded
    /// when the street is declared.
    #[default]
    Leftover,
    /// The player must discard explicitly before declaring the street.
    Explicit,
}

impl DiscardPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscardPolicy::Leftover => "leftover",
            DiscardPolicy::Explicit => "explicit",
        }
    }
}

impl fmt::Display for DiscardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscardPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leftover" | "auto" => Ok(DiscardPolicy::Leftover),
            "explicit" | "manual" => Ok(DiscardPolicy::Explicit),
            other => Err(format!("Unknown discard policy '{}'", other)),
        }
    }
}

/// Checks a street's progress against its quota.
///
/// # Errors
///
/// - [`GameError::QuotaNotMet`] - placed or discarded counts differ from the quota
/// - [`GameError::PoolNotEmpty`] - cards remain undeclared before the final street
/// - [`GameError::WrongPhase`] - `street` is not 1-5
///
/// # Examples
///
/// ```
/// use ofc_engine::rules::validate_street_progress;
/// use ofc_engine::errors::GameError;
///
/// assert!(validate_street_progress(2, 2, 1, 0).is_ok());
/// assert!(matches!(
///     validate_street_progress(1, 4, 0, 1),
///     Err(GameError::QuotaNotMet { .. })
/// ));
/// ```
pub fn validate_street_progress(
    street: u8,
    placed: usize,
    discarded: usize,
    pool_remaining: usize,
) -> Result<(), GameError> {
    let req = street_requirement(street).ok_or_else(|| GameError::WrongPhase {
        phase: format!("street {}", street),
    })?;
    if placed != req.place || discarded != req.discard {
        return Err(GameError::QuotaNotMet {
            street,
            needs: req.describe(),
            placed,
            discarded,
        });
    }
    if street < FINAL_STREET && pool_remaining != 0 {
        return Err(GameError::PoolNotEmpty {
            street,
            remaining: pool_remaining,
        });
    }
    Ok(())
}
