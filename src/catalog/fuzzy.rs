//! Approximate substring matching.
//!
//! Finds the part of a text closest to a pattern under Levenshtein distance,
//! where the match may start and end anywhere in the text. Exact occurrences
//! are reported in full so every one can be highlighted.

use std::ops::Range;

use smallvec::{SmallVec, smallvec};

/// Percentage of the pattern length that may be misspelt.
const THRESHOLD_PERCENT: usize = 40;

/// Highlight ranges for one field, in bytes of the original text.
pub type Ranges = SmallVec<[Range<usize>; 2]>;

/// Lower-cased text with the byte offset of every character boundary.
#[derive(Debug, Clone)]
pub(crate) struct FoldedText {
    chars: Vec<char>,
    bounds: Vec<usize>,
}

impl FoldedText {
    pub(crate) fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut bounds = Vec::with_capacity(text.len() + 1);

        for (offset, c) in text.char_indices() {
            chars.push(fold(c));
            bounds.push(offset);
        }

        bounds.push(text.len());

        Self { chars, bounds }
    }

    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn byte_range(&self, chars: Range<usize>) -> Option<Range<usize>> {
        Some(*self.bounds.get(chars.start)?..*self.bounds.get(chars.end)?)
    }
}

/// Best match of a pattern within a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextMatch {
    /// Edit distance, zero for exact matches
    pub distance: usize,

    /// Matched byte ranges
    pub ranges: Ranges,
}

/// Maximum edit distance tolerated for a pattern of `len` characters.
pub(crate) fn max_distance(len: usize) -> usize {
    len * THRESHOLD_PERCENT / 100
}

/// Match a folded `pattern` against `text`, allowing up to `max_distance`
/// edits.
pub(crate) fn find(pattern: &[char], text: &FoldedText, max_distance: usize) -> Option<TextMatch> {
    if pattern.is_empty() || text.is_empty() {
        return None;
    }

    let exact: Ranges = exact_occurrences(pattern, text.chars())
        .filter_map(|chars| text.byte_range(chars))
        .collect();

    if !exact.is_empty() {
        return Some(TextMatch {
            distance: 0,
            ranges: exact,
        });
    }

    let (distance, chars) = closest_substring(pattern, text.chars())?;

    if distance > max_distance || chars.is_empty() {
        return None;
    }

    Some(TextMatch {
        distance,
        ranges: smallvec![text.byte_range(chars)?],
    })
}

/// Lower-case a single character, keeping a one-to-one char mapping.
pub(crate) fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Non-overlapping exact occurrences, as char ranges.
fn exact_occurrences<'a>(
    pattern: &'a [char],
    text: &'a [char],
) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut next_free = 0;

    text.windows(pattern.len())
        .enumerate()
        .filter_map(move |(start, window)| {
            if start < next_free || window != pattern {
                return None;
            }

            next_free = start + pattern.len();

            Some(start..next_free)
        })
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: usize,
    start: usize,
}

/// Sellers' algorithm: the text substring with the smallest edit distance to
/// `pattern`. Ties go to the earliest end position.
fn closest_substring(pattern: &[char], text: &[char]) -> Option<(usize, Range<usize>)> {
    let mut previous: Vec<Cell> = (0..=text.len())
        .map(|start| Cell { cost: 0, start })
        .collect();

    for (row, &p) in pattern.iter().enumerate() {
        let mut left = Cell {
            cost: row + 1,
            start: 0,
        };

        let mut current = Vec::with_capacity(text.len() + 1);
        current.push(left);

        for ((diagonal, up), &t) in previous.iter().zip(previous.iter().skip(1)).zip(text) {
            let substitution = Cell {
                cost: diagonal.cost + usize::from(p != t),
                start: diagonal.start,
            };

            let deletion = Cell {
                cost: up.cost + 1,
                start: up.start,
            };

            let insertion = Cell {
                cost: left.cost + 1,
                start: left.start,
            };

            left = [substitution, deletion, insertion]
                .into_iter()
                .min_by_key(|cell| cell.cost)
                .unwrap_or(substitution);

            current.push(left);
        }

        previous = current;
    }

    previous
        .iter()
        .enumerate()
        .skip(1)
        .min_by_key(|(_, cell)| cell.cost)
        .map(|(end, cell)| (cell.cost, cell.start..end))
}
