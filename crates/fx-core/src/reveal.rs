//! Order in which scrambled character positions are committed to their true value.

use crate::error::ConfigError;
use fnv::FnvHashSet;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealDirection {
    /// Left to right.
    #[default]
    Start,
    /// Right to left.
    End,
    /// Outward from the middle, alternating right then left.
    Center,
}

impl FromStr for RevealDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(RevealDirection::Start),
            "end" => Ok(RevealDirection::End),
            "center" => Ok(RevealDirection::Center),
            _ => Err(ConfigError::UnknownValue {
                option: "reveal_direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Snapshot of revealed character indices. Never mutated in place; each
/// reveal step produces a new snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealSet {
    indices: FnvHashSet<usize>,
}

impl RevealSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every index in `0..len`.
    pub fn full(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// A new snapshot that also contains `index`.
    #[must_use]
    pub fn with(&self, index: usize) -> Self {
        let mut indices = self.indices.clone();
        indices.insert(index);
        Self { indices }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices in ascending order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self.indices.iter().copied().collect();
        v.sort_unstable();
        v
    }
}

/// Next position to reveal for a text of `len` characters, or `None` when
/// every position is already revealed.
///
/// For [`RevealDirection::Center`] the k-th step (0-based) lands on the
/// middle, then `mid + 1`, `mid - 1`, `mid + 2`, `mid - 2`, ... When that
/// position falls outside the text or is taken, the first unrevealed index
/// from the left is used instead.
pub fn next_index(direction: RevealDirection, len: usize, revealed: &RevealSet) -> Option<usize> {
    let count = revealed.len();
    if count >= len {
        return None;
    }
    let candidate = match direction {
        RevealDirection::Start => Some(count),
        RevealDirection::End => Some(len - 1 - count),
        RevealDirection::Center => {
            let middle = len / 2;
            if count % 2 == 1 {
                Some(middle + (count + 1) / 2)
            } else {
                middle.checked_sub(count / 2)
            }
        }
    };
    match candidate {
        Some(i) if i < len && !revealed.contains(i) => Some(i),
        _ => (0..len).find(|i| !revealed.contains(*i)),
    }
}

/// Pure reveal step: the snapshot after one more position is committed.
pub fn reveal_step(
    direction: RevealDirection,
    len: usize,
    revealed: &RevealSet,
) -> Option<RevealSet> {
    next_index(direction, len, revealed).map(|i| revealed.with(i))
}
