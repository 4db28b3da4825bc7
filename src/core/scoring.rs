use serde::{Deserialize, Serialize};

/// Modulus for the final reduction; 101 keeps the range at 0..=100 inclusive.
const SCORE_MODULUS: u32 = 101;

/// Calculate the compatibility score (0-100) for an ordered pair of names
///
/// Scoring formula:
/// combined = lowercase(name_a ++ name_b)
/// hash     = fold(0, |h, c| h * 31 + c) over UTF-16 units, wrapping at 32 bits (signed)
/// score    = |hash| mod 101
///
/// The wrapping 32-bit arithmetic is part of the contract: stored scores were
/// produced with it, so any change here changes historical results.
/// The function is total: empty input hashes to 0.
pub fn compatibility_score(name_a: &str, name_b: &str) -> u8 {
    let mut combined = String::with_capacity(name_a.len() + name_b.len());
    combined.push_str(name_a);
    combined.push_str(name_b);

    let hash = name_hash(&combined.to_lowercase());

    // unsigned_abs keeps i32::MIN representable
    (hash.unsigned_abs() % SCORE_MODULUS) as u8
}

/// `((h << 5) - h) + c` over the UTF-16 units of `s`, truncated to i32
#[inline]
fn name_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Label bucket for a compatibility percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Soulmates,
    DeeplyConnected,
    StrongBond,
    GoodMatch,
    Potential,
    Promising,
    CouldWork,
    Interesting,
    Maybe,
    KeepLooking,
}

impl Band {
    /// Map a percentage to its band. Anything above 100 is treated as 100.
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90..=u8::MAX => Band::Soulmates,
            80..=89 => Band::DeeplyConnected,
            70..=79 => Band::StrongBond,
            60..=69 => Band::GoodMatch,
            50..=59 => Band::Potential,
            40..=49 => Band::Promising,
            30..=39 => Band::CouldWork,
            20..=29 => Band::Interesting,
            10..=19 => Band::Maybe,
            _ => Band::KeepLooking,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Soulmates => "Soulmates!",
            Band::DeeplyConnected => "Deeply Connected",
            Band::StrongBond => "Strong Bond",
            Band::GoodMatch => "Good Match",
            Band::Potential => "Potential",
            Band::Promising => "Promising",
            Band::CouldWork => "Could Work",
            Band::Interesting => "Interesting",
            Band::Maybe => "Maybe...",
            Band::KeepLooking => "Keep Looking",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Band label for a percentage
#[inline]
pub fn band(percentage: u8) -> &'static str {
    Band::from_percentage(percentage).label()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_value() {
        assert_eq!(compatibility_score("Alice", "Bob"), 60);
    }

    #[test]
    fn test_empty_names() {
        assert_eq!(compatibility_score("", ""), 0);
    }

    #[test]
    fn test_order_sensitive() {
        assert_eq!(compatibility_score("a", "b"), 75);
        assert_eq!(compatibility_score("b", "a"), 4);
        assert_eq!(compatibility_score("Bob", "Alice"), 82);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            compatibility_score("ALICE", "bob"),
            compatibility_score("alice", "BOB")
        );
    }

    #[test]
    fn test_hash_wraps() {
        // "johnjane" overflows i32 and ends negative
        assert!(name_hash("johnjane") < 0);
        assert_eq!(compatibility_score("John", "Jane"), 90);
    }

    #[test]
    fn test_min_hash_in_range() {
        assert_eq!(i32::MIN.unsigned_abs() % SCORE_MODULUS, 2147483648 % 101);
    }

    #[test]
    fn test_astral_characters_use_utf16_units() {
        assert_eq!(compatibility_score("\u{1F600}", "a"), 8);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band(100), "Soulmates!");
        assert_eq!(band(90), "Soulmates!");
        assert_eq!(band(89), "Deeply Connected");
        assert_eq!(band(80), "Deeply Connected");
        assert_eq!(band(79), "Strong Bond");
        assert_eq!(band(10), "Maybe...");
        assert_eq!(band(9), "Keep Looking");
        assert_eq!(band(0), "Keep Looking");
        assert_eq!(band(u8::MAX), "Soulmates!");
    }
}
