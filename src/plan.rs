//! Episode numbering and rename planning for a single season.
//!
//! Files are processed strictly in sorted order:
//! the positional number of a file depends on the explicit numbers found before it.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::episode::{EpisodeLabel, EpisodeNumbers, canonical_stem};
use crate::error::{RenameError, Result};
use crate::season::SeasonFolder;
use crate::subtitle::{DEFAULT_SUBTITLE_LANGUAGE, find_subtitle, renamed_subtitle};

/// Media file extensions renamed by default.
pub const MEDIA_EXTENSIONS: [&str; 2] = ["mp4", "mkv"];

/// Options that control how episode numbers are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeOptions {
    /// Ignore episode numbers in file names and only number by position.
    pub ignore_filename: bool,
    /// Media file extensions without the leading dot.
    pub media_extensions: Vec<String>,
    /// Language tag added to subtitles that do not have one.
    pub subtitle_language: String,
}

impl Default for EpisodeOptions {
    fn default() -> Self {
        Self {
            ignore_filename: false,
            media_extensions: MEDIA_EXTENSIONS.iter().map(ToString::to_string).collect(),
            subtitle_language: DEFAULT_SUBTITLE_LANGUAGE.to_string(),
        }
    }
}

impl EpisodeOptions {
    fn is_media_extension(&self, extension: &str) -> bool {
        self.media_extensions
            .iter()
            .any(|media| media.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

/// A media file eligible for renaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile<'a> {
    pub name: &'a str,
    pub stem: &'a str,
    pub extension: &'a str,
    pub numbers: EpisodeNumbers,
}

impl<'a> MediaFile<'a> {
    /// Parse a file name, returning `None` if it is not a media file.
    #[must_use]
    pub fn parse(name: &'a str, options: &EpisodeOptions) -> Option<Self> {
        let (stem, extension) = name.rsplit_once('.')?;
        if stem.is_empty() || !options.is_media_extension(extension) {
            return None;
        }
        let numbers = if options.ignore_filename {
            EpisodeNumbers::Zero
        } else {
            EpisodeNumbers::parse(name)
        };
        Some(Self {
            name,
            stem,
            extension,
            numbers,
        })
    }
}

/// An explicit episode number lower than the running count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfOrder {
    pub number: u32,
    pub count: u32,
}

/// Running episode count within a season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpisodeCounter(u32);

impl EpisodeCounter {
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Count one more media file and pick its label.
    ///
    /// Returns the label and the counter for the next file.
    /// The counter continues from the last explicit number of single and compound episodes.
    ///
    /// # Errors
    /// Returns `OutOfOrder` if an explicit number is lower than the updated count.
    pub fn advance(self, numbers: &EpisodeNumbers) -> std::result::Result<(EpisodeLabel, Self), OutOfOrder> {
        let count = self.0.saturating_add(1);
        if let Some(number) = numbers.first_below(count) {
            return Err(OutOfOrder { number, count });
        }
        let label = numbers.label(count);
        let next = numbers.resync_count().unwrap_or(count);
        Ok((label, Self(next)))
    }
}

/// What kind of file a rename applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameKind {
    Media,
    Subtitle,
}

/// A single planned rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: RenameKind,
}

impl RenamePlan {
    /// True if the file already has the correct name.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.source == self.destination
    }

    /// Rename the file on disk.
    ///
    /// Checks again that the destination does not exist right before renaming.
    ///
    /// # Errors
    /// Returns an error if the destination exists or the rename fails.
    pub fn apply(&self) -> Result<()> {
        if self.is_unchanged() {
            return Ok(());
        }
        if entry_exists(&self.destination) {
            return Err(RenameError::DestinationCollision {
                path: self.destination.clone(),
            });
        }
        fs::rename(&self.source, &self.destination).map_err(|error| RenameError::io(&self.source, error))
    }
}

impl fmt::Display for RenamePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.source.display(), self.destination.display())
    }
}

/// Entry names in a season folder, updated as renames are planned.
///
/// Names outside the listing are looked up on disk,
/// so directories and other unlisted entries still block a rename.
#[derive(Debug)]
struct Namespace<'a> {
    dir: &'a Path,
    names: BTreeSet<String>,
    vacated: BTreeSet<String>,
}

impl<'a> Namespace<'a> {
    fn new(dir: &'a Path, file_names: &[String]) -> Self {
        Self {
            dir,
            names: file_names.iter().cloned().collect(),
            vacated: BTreeSet::new(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn is_occupied(&self, name: &str) -> bool {
        self.names.contains(name) || (!self.vacated.contains(name) && entry_exists(&self.dir.join(name)))
    }

    fn check(&self, source: &str, destination: &str) -> Result<()> {
        if source != destination && self.is_occupied(destination) {
            return Err(RenameError::DestinationCollision {
                path: self.dir.join(destination),
            });
        }
        Ok(())
    }

    fn rename(&mut self, source: &str, destination: String, kind: RenameKind) -> RenamePlan {
        let plan = RenamePlan {
            source: self.dir.join(source),
            destination: self.dir.join(&destination),
            kind,
        };
        if source != destination {
            self.names.remove(source);
            self.vacated.insert(source.to_string());
            self.vacated.remove(&destination);
            self.names.insert(destination);
        }
        plan
    }
}

/// True if anything exists at the path, including broken symlinks.
fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Plan the renames for all media files in a season folder.
///
/// `file_names` must be the sorted names of the files in the folder.
/// Each media file gets one plan, preceded by a plan for its subtitle if it has one.
/// Nothing is renamed.
///
/// # Errors
/// Returns an error for the first file that is numbered out of order
/// or that would be renamed onto an existing file.
pub fn plan_season(season: &SeasonFolder, file_names: &[String], options: &EpisodeOptions) -> Result<Vec<RenamePlan>> {
    let mut namespace = Namespace::new(&season.path, file_names);
    let mut plans = Vec::new();

    file_names
        .iter()
        .filter_map(|name| MediaFile::parse(name, options))
        .try_fold(EpisodeCounter::default(), |counter, media| {
            let (label, next) =
                counter
                    .advance(&media.numbers)
                    .map_err(|OutOfOrder { number, count }| RenameError::OrderingViolation {
                        path: season.path.join(media.name),
                        number,
                        count,
                    })?;

            let new_stem = canonical_stem(season.number, label);
            let new_name = format!("{new_stem}.{}", media.extension);
            namespace.check(media.name, &new_name)?;

            let subtitle = find_subtitle(
                file_names.iter().filter(|name| namespace.contains(name)),
                media.stem,
            );
            if let Some(subtitle) = subtitle {
                let new_subtitle = renamed_subtitle(subtitle, media.stem, &new_stem, &options.subtitle_language);
                namespace.check(subtitle, &new_subtitle)?;
                plans.push(namespace.rename(subtitle, new_subtitle, RenameKind::Subtitle));
            }
            plans.push(namespace.rename(media.name, new_name, RenameKind::Media));

            Ok(next)
        })?;

    Ok(plans)
}
