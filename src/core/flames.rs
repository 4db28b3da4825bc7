use serde::{Deserialize, Serialize};

/// FLAMES outcome for a pair of names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flames {
    Friends,
    Lovers,
    Affection,
    Marriage,
    Enmity,
    Siblings,
    /// Every letter cancelled out
    Destiny,
}

/// Outcomes indexed by `remaining letters % 6`
const CYCLE: [Flames; 6] = [
    Flames::Enmity,
    Flames::Siblings,
    Flames::Friends,
    Flames::Affection,
    Flames::Marriage,
    Flames::Lovers,
];

impl Flames {
    /// Ordering used for tie-breaking: Enmity (0) up to Lovers (5), Destiny above all
    pub fn rank(&self) -> u8 {
        match self {
            Flames::Enmity => 0,
            Flames::Siblings => 1,
            Flames::Friends => 2,
            Flames::Affection => 3,
            Flames::Marriage => 4,
            Flames::Lovers => 5,
            Flames::Destiny => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flames::Friends => "Friends",
            Flames::Lovers => "Lovers",
            Flames::Affection => "Affection",
            Flames::Marriage => "Marriage",
            Flames::Enmity => "Enmity",
            Flames::Siblings => "Siblings",
            Flames::Destiny => "Destiny",
        }
    }
}

impl std::fmt::Display for Flames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Play FLAMES on two names
///
/// Both names are lowercased with spaces removed. Each letter of the first
/// name (in order) that still appears in the second cancels its first
/// occurrence in both. The remaining letter count selects the outcome.
pub fn flames(name1: &str, name2: &str) -> Flames {
    let original: Vec<char> = normalize(name1);
    let mut first = original.clone();
    let mut second = normalize(name2);

    for c in original {
        if let Some(pos) = second.iter().position(|&x| x == c) {
            second.remove(pos);
            if let Some(pos) = first.iter().position(|&x| x == c) {
                first.remove(pos);
            }
        }
    }

    let count = first.len() + second.len();
    if count == 0 {
        return Flames::Destiny;
    }

    CYCLE[count % CYCLE.len()]
}

fn normalize(name: &str) -> Vec<char> {
    name.to_lowercase().chars().filter(|&c| c != ' ').collect()
}

/// Choose among equally scored candidates by best FLAMES outcome with `name`
///
/// Returns the first candidate with the highest rank, or `None` for an empty slice.
pub fn break_tie<'a>(name: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&'a str, u8)> = None;

    for &candidate in candidates {
        let rank = flames(name, candidate).rank();
        match best {
            Some((_, best_rank)) if rank <= best_rank => {}
            _ => best = Some((candidate, rank)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
