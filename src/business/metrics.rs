//! Translation volume counters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Word, character, segment and whitespace counts for a job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Metric {
    pub white_spaces: u64,
    pub segments: u64,
    pub words: u64,
    pub characters: u64,
}

impl Metric {
    pub fn new(white_spaces: u64, segments: u64, words: u64, characters: u64) -> Self {
        Self {
            white_spaces,
            segments,
            words,
            characters,
        }
    }

    /// True when every counter is zero
    pub fn is_empty(&self) -> bool {
        self.white_spaces == 0 && self.segments == 0 && self.words == 0 && self.characters == 0
    }
}

impl Add for Metric {
    type Output = Metric;

    /// Counters saturate at `u64::MAX` instead of overflowing
    fn add(self, other: Metric) -> Metric {
        Metric {
            white_spaces: self.white_spaces.saturating_add(other.white_spaces),
            segments: self.segments.saturating_add(other.segments),
            words: self.words.saturating_add(other.words),
            characters: self.characters.saturating_add(other.characters),
        }
    }
}

impl AddAssign for Metric {
    fn add_assign(&mut self, other: Metric) {
        *self = *self + other;
    }
}

impl Sum for Metric {
    fn sum<I: Iterator<Item = Metric>>(iter: I) -> Metric {
        iter.fold(Metric::default(), Add::add)
    }
}

impl<'a> Sum<&'a Metric> for Metric {
    fn sum<I: Iterator<Item = &'a Metric>>(iter: I) -> Metric {
        iter.copied().sum()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "White spaces {} | Segments {} | Words {} | Characters {}",
            self.white_spaces, self.segments, self.words, self.characters
        )
    }
}
