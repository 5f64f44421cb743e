//! Episode number extraction and label formatting.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A whitespace, digit or hyphen followed by `E` or `Episode`, then the episode digits.
static RE_EPISODE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\d-](?:E|[Ee]pisode\s*)([0-9]+)").expect("Failed to compile episode number regex")
});

/// Parse a run of ASCII digits, clamping values that do not fit in `u32`.
fn parse_saturating(digits: &str) -> u32 {
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Explicit episode numbers found in a file name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EpisodeNumbers {
    /// No episode number, use positional numbering.
    #[default]
    Zero,
    /// A single episode.
    One(u32),
    /// A compound file containing two episodes.
    Two(u32, u32),
    /// Three or more numbers.
    /// Treated like `Zero` for labeling and counting,
    /// but every number is still checked against the running count.
    Many(Vec<u32>),
}

impl EpisodeNumbers {
    /// Extract all explicit episode numbers from a file name.
    ///
    /// Numbers too large for `u32` saturate to `u32::MAX`
    /// so they still count towards the number of matches.
    ///
    /// ```rust
    /// use episode_rename::EpisodeNumbers;
    ///
    /// assert_eq!(EpisodeNumbers::parse("Show.S01E07.720p.mkv"), EpisodeNumbers::One(7));
    /// assert_eq!(EpisodeNumbers::parse("Show - Episode 3 - Episode 4.mkv"), EpisodeNumbers::Two(3, 4));
    /// assert_eq!(EpisodeNumbers::parse("Show - 01x02.mkv"), EpisodeNumbers::Zero);
    /// ```
    #[must_use]
    pub fn parse(file_name: &str) -> Self {
        let numbers: Vec<u32> = RE_EPISODE_NUMBER
            .captures_iter(file_name)
            .filter_map(|captures| captures.get(1))
            .map(|digits| parse_saturating(digits.as_str()))
            .collect();

        match numbers.as_slice() {
            [] => Self::Zero,
            [number] => Self::One(*number),
            [first, second] => Self::Two(*first, *second),
            _ => Self::Many(numbers),
        }
    }

    /// All explicit numbers in order of appearance.
    #[must_use]
    pub fn numbers(&self) -> Vec<u32> {
        match self {
            Self::Zero => Vec::new(),
            Self::One(number) => vec![*number],
            Self::Two(first, second) => vec![*first, *second],
            Self::Many(numbers) => numbers.clone(),
        }
    }

    /// The number the running episode count continues from, if any.
    #[must_use]
    pub const fn resync_count(&self) -> Option<u32> {
        match self {
            Self::One(number) | Self::Two(_, number) => Some(*number),
            Self::Zero | Self::Many(_) => None,
        }
    }

    /// First explicit number that is lower than the given episode count.
    #[must_use]
    pub fn first_below(&self, count: u32) -> Option<u32> {
        self.numbers().into_iter().find(|number| *number < count)
    }

    /// Episode label for this file, falling back to the positional number.
    #[must_use]
    pub const fn label(&self, position: u32) -> EpisodeLabel {
        match self {
            Self::One(number) => EpisodeLabel::Single(*number),
            Self::Two(first, second) => EpisodeLabel::Compound(*first, *second),
            Self::Zero | Self::Many(_) => EpisodeLabel::Single(position),
        }
    }
}

/// The `E<number>` part of a canonical episode file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeLabel {
    Single(u32),
    Compound(u32, u32),
}

impl fmt::Display for EpisodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(number) => write!(f, "E{number:03}"),
            Self::Compound(first, second) => write!(f, "E{first:03}-E{second:03}"),
        }
    }
}

/// Canonical file stem for an episode: `S<season>E<episode>`.
///
/// ```rust
/// use episode_rename::{EpisodeLabel, canonical_stem};
///
/// assert_eq!(canonical_stem(1, EpisodeLabel::Single(2)), "S001E002");
/// assert_eq!(canonical_stem(0, EpisodeLabel::Compound(3, 4)), "S000E003-E004");
/// ```
#[must_use]
pub fn canonical_stem(season: u32, label: EpisodeLabel) -> String {
    format!("S{season:03}{label}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_episode_number() {
        assert_eq!(EpisodeNumbers::parse("Show - 01x02.mkv"), EpisodeNumbers::Zero);
        assert_eq!(EpisodeNumbers::parse("Pilot.mp4"), EpisodeNumbers::Zero);
        assert_eq!(EpisodeNumbers::parse("E05.mkv"), EpisodeNumbers::Zero);
    }

    #[test]
    fn parse_season_episode_tag() {
        assert_eq!(EpisodeNumbers::parse("Show.S01E07.1080p.mkv"), EpisodeNumbers::One(7));
        assert_eq!(EpisodeNumbers::parse("Show - E12.mkv"), EpisodeNumbers::One(12));
        assert_eq!(EpisodeNumbers::parse("Show -E07 Title.mkv"), EpisodeNumbers::One(7));
    }

    #[test]
    fn parse_episode_word() {
        assert_eq!(EpisodeNumbers::parse("Show Episode 9.mkv"), EpisodeNumbers::One(9));
        assert_eq!(EpisodeNumbers::parse("Show episode10.mkv"), EpisodeNumbers::One(10));
        assert_eq!(EpisodeNumbers::parse("Show -Episode  11.mp4"), EpisodeNumbers::One(11));
    }

    #[test]
    fn parse_requires_separator_before_marker() {
        assert_eq!(EpisodeNumbers::parse("ShowE05.mkv"), EpisodeNumbers::Zero);
        assert_eq!(EpisodeNumbers::parse("Show.E05.mkv"), EpisodeNumbers::Zero);
    }

    #[test]
    fn parse_lowercase_e_marker_is_ignored() {
        assert_eq!(EpisodeNumbers::parse("show s01e05.mkv"), EpisodeNumbers::Zero);
    }

    #[test]
    fn parse_compound_episode() {
        assert_eq!(EpisodeNumbers::parse("Show S01E03-E04.mkv"), EpisodeNumbers::Two(3, 4));
        assert_eq!(EpisodeNumbers::parse("S001E003-E004.mkv"), EpisodeNumbers::Two(3, 4));
    }

    #[test]
    fn parse_more_than_two_numbers() {
        assert_eq!(
            EpisodeNumbers::parse("Show S01E01-E02-E03.mkv"),
            EpisodeNumbers::Many(vec![1, 2, 3])
        );
    }

    #[test]
    fn parse_canonical_names() {
        assert_eq!(EpisodeNumbers::parse("S000E001.mkv"), EpisodeNumbers::One(1));
        assert_eq!(EpisodeNumbers::parse("S012E100.mp4"), EpisodeNumbers::One(100));
    }

    #[test]
    fn parse_saturates_numbers_that_overflow() {
        assert_eq!(
            EpisodeNumbers::parse("Show 1E99999999999.mkv"),
            EpisodeNumbers::One(u32::MAX)
        );
        assert_eq!(
            EpisodeNumbers::parse("Show E4294967296 E5.mkv"),
            EpisodeNumbers::Two(u32::MAX, 5)
        );
        assert_eq!(EpisodeNumbers::parse("Show E4294967295.mkv"), EpisodeNumbers::One(u32::MAX));
    }

    #[test]
    fn resync_count_uses_last_number() {
        assert_eq!(EpisodeNumbers::Zero.resync_count(), None);
        assert_eq!(EpisodeNumbers::One(7).resync_count(), Some(7));
        assert_eq!(EpisodeNumbers::Two(3, 4).resync_count(), Some(4));
        assert_eq!(EpisodeNumbers::Many(vec![1, 2, 3]).resync_count(), None);
    }

    #[test]
    fn first_below_finds_lower_number() {
        assert_eq!(EpisodeNumbers::One(2).first_below(5), Some(2));
        assert_eq!(EpisodeNumbers::One(5).first_below(5), None);
        assert_eq!(EpisodeNumbers::Two(6, 3).first_below(5), Some(3));
        assert_eq!(EpisodeNumbers::Many(vec![9, 8, 1]).first_below(5), Some(1));
        assert_eq!(EpisodeNumbers::Zero.first_below(100), None);
    }

    #[test]
    fn label_formatting() {
        assert_eq!(EpisodeNumbers::Zero.label(4).to_string(), "E004");
        assert_eq!(EpisodeNumbers::One(7).label(1).to_string(), "E007");
        assert_eq!(EpisodeNumbers::Two(3, 4).label(1).to_string(), "E003-E004");
        assert_eq!(EpisodeNumbers::Many(vec![1, 2, 3]).label(5).to_string(), "E005");
        assert_eq!(EpisodeLabel::Single(1234).to_string(), "E1234");
    }

    #[test]
    fn canonical_stem_pads_season() {
        assert_eq!(canonical_stem(2, EpisodeLabel::Single(10)), "S002E010");
        assert_eq!(canonical_stem(0, EpisodeLabel::Single(1)), "S000E001");
    }
}
