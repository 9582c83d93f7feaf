use std::fmt;
use std::str::FromStr;

use cubeturn_core::{CubeState, TurnDelta};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::{ALL_MOVES, Move, ParseMoveError};

/// Ordered list of moves, written as a string of move symbols such as
/// `"RUru"`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct MoveSequence(pub Vec<Move>);

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.0 {
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

/// Strict parsing: whitespace is ignored and any other unknown character is
/// an error.
impl FromStr for MoveSequence {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.char_indices()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(index, ch)| Move::from_char(ch).ok_or(ParseMoveError::UnknownMove { ch, index }))
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Move> for MoveSequence {
    fn extend<T: IntoIterator<Item = Move>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveSequence {
    /// Returns an empty sequence.
    pub const fn new() -> Self {
        Self(vec![])
    }

    /// Parses a move string, skipping any character that is not a move
    /// symbol.
    pub fn parse_lenient(s: &str) -> Self {
        s.chars()
            .filter_map(|c| {
                let m = Move::from_char(c);
                if m.is_none() && !c.is_whitespace() {
                    log::debug!("ignoring unknown move {c:?}");
                }
                m
            })
            .collect()
    }

    /// Returns the sequence that undoes this one: every move is inverted and
    /// the order is reversed.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.0.iter().rev().map(|m| m.inverse()).collect()
    }

    /// Returns `count` moves drawn uniformly from [`ALL_MOVES`].
    pub fn random(rng: &mut impl Rng, count: usize) -> Self {
        std::iter::from_fn(|| ALL_MOVES.choose(&mut *rng).copied())
            .take(count)
            .collect()
    }
    /// Returns `count` random moves generated deterministically from `seed`.
    pub fn seeded(seed: u64, count: usize) -> Self {
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);
        Self::random(&mut rng, count)
    }

    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Appends a move.
    pub fn push(&mut self, m: Move) {
        self.0.push(m);
    }
    /// Removes every move.
    pub fn clear(&mut self) {
        self.0.clear();
    }
    /// Returns an iterator over the moves.
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Applies every move to a cube in order, without animation. Stops at the
    /// first error.
    pub fn apply(&self, state: &mut CubeState) -> cubeturn_core::Result<Vec<TurnDelta>> {
        self.0.iter().map(|m| m.apply(state)).collect()
    }
}
