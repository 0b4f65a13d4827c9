//! Completion calculator.
//!
//! A segment counts as completed when its translation is non-empty after
//! trimming. Percentages are `round(100 * completed / total)` with
//! half-up rounding, and 0 when there is nothing to translate.

use std::iter::Sum;
use std::ops::Add;

/// Raw completed/total counts for a file or a whole project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentTally {
    pub total: usize,
    pub completed: usize,
}

/// Where a file sits in its translation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationState {
    /// Segments parsed, nothing translated yet.
    Uploaded,
    /// Some, but not all, segments translated.
    PartiallyTranslated,
    /// Every segment translated; download is permitted.
    FullyTranslated,
}

impl SegmentTally {
    /// Tally a file: `total` comes from the originals, `completed` from the
    /// non-blank translations.
    pub fn of(original: &[String], translated: &[String]) -> Self {
        Self {
            total: original.len(),
            completed: translated.iter().filter(|s| is_translated(s)).count(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Integer percentage in `0..=100`.
    pub fn rate(&self) -> u8 {
        percentage(self.completed, self.total)
    }

    pub fn state(&self) -> TranslationState {
        if self.remaining() == 0 {
            TranslationState::FullyTranslated
        } else if self.completed == 0 {
            TranslationState::Uploaded
        } else {
            TranslationState::PartiallyTranslated
        }
    }
}

impl Add for SegmentTally {
    type Output = SegmentTally;

    fn add(self, rhs: SegmentTally) -> SegmentTally {
        SegmentTally {
            total: self.total + rhs.total,
            completed: self.completed + rhs.completed,
        }
    }
}

impl Sum for SegmentTally {
    fn sum<I: Iterator<Item = SegmentTally>>(iter: I) -> Self {
        iter.fold(SegmentTally::default(), Add::add)
    }
}

/// Whether a single translated entry counts as done.
pub fn is_translated(segment: &str) -> bool {
    !segment.trim().is_empty()
}

/// Completion percentage of one file.
pub fn file_completion(original: &[String], translated: &[String]) -> u8 {
    SegmentTally::of(original, translated).rate()
}

/// Completion percentage of a project.
///
/// Sums the per-file counts before dividing, so a one-segment file does not
/// weigh as much as a thousand-segment one.
pub fn project_completion(files: impl IntoIterator<Item = SegmentTally>) -> u8 {
    files.into_iter().sum::<SegmentTally>().rate()
}

/// `round_half_up(100 * completed / total)`, clamped to 100, or 0 for an
/// empty total.
fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    // floor(100c/t + 1/2) == floor((200c + t) / 2t)
    ((200 * completed + total) / (2 * total)) as u8
}
