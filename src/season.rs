//! Season folder detection.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{RenameError, Result};

const SEASON_PREFIX: &str = "Season ";
const SPECIALS: &str = "Specials";

/// A directory holding the episodes of one season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonFolder {
    pub name: String,
    pub path: PathBuf,
    /// Season number, 0 for specials.
    pub number: u32,
}

/// How a directory name is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderKind {
    Season(u32),
    /// Starts with `Season ` but the rest is not a number.
    InvalidSeason,
    Other,
}

impl FolderKind {
    /// Classify a directory name.
    ///
    /// ```rust
    /// use episode_rename::FolderKind;
    ///
    /// assert_eq!(FolderKind::from_name("Season 3"), FolderKind::Season(3));
    /// assert_eq!(FolderKind::from_name("Specials"), FolderKind::Season(0));
    /// assert_eq!(FolderKind::from_name("Season Two"), FolderKind::InvalidSeason);
    /// assert_eq!(FolderKind::from_name("Extras"), FolderKind::Other);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == SPECIALS {
            return Self::Season(0);
        }
        name.strip_prefix(SEASON_PREFIX).map_or(Self::Other, |number| {
            number.trim().parse::<u32>().map_or(Self::InvalidSeason, Self::Season)
        })
    }
}

/// Season folders found under a show directory.
#[derive(Debug, Default)]
pub struct SeasonFolders {
    /// Valid season folders ordered by season number.
    pub seasons: Vec<SeasonFolder>,
    /// Folders named like a season that do not have a valid season number.
    pub skipped: Vec<PathBuf>,
}

/// Check that the root directory exists and resolve it to an absolute path.
///
/// # Errors
/// Returns a configuration error if the path does not exist, is not a directory or cannot be read.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(RenameError::configuration(path, "directory does not exist"));
    }
    if !path.is_dir() {
        return Err(RenameError::configuration(path, "not a directory"));
    }
    fs::read_dir(path).map_err(|error| RenameError::configuration(path, error.to_string()))?;
    dunce::canonicalize(path).map_err(|error| RenameError::configuration(path, error.to_string()))
}

/// Find all season folders directly under the root directory.
///
/// # Errors
/// Returns an error if the root directory is invalid or cannot be listed.
pub fn season_folders(root: &Path) -> Result<SeasonFolders> {
    let root = resolve_root(root)?;
    let mut folders = SeasonFolders::default();

    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !crate::is_hidden(entry))
    {
        let entry = entry.map_err(|error| walk_error(&root, error))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        match FolderKind::from_name(name) {
            FolderKind::Season(number) => folders.seasons.push(SeasonFolder {
                name: name.to_string(),
                path: entry.path().to_path_buf(),
                number,
            }),
            FolderKind::InvalidSeason => folders.skipped.push(entry.into_path()),
            FolderKind::Other => {}
        }
    }

    folders
        .seasons
        .sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.name.cmp(&b.name)));

    Ok(folders)
}

/// Sorted names of the files directly inside a season folder.
///
/// Symlinks are included when they point to a file.
/// Names that are not valid Unicode are left out.
///
/// # Errors
/// Returns an error if the directory cannot be listed.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !crate::is_hidden(entry))
    {
        let entry = entry.map_err(|error| walk_error(dir, error))?;
        let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
        if is_file
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }
    names.sort_unstable();
    Ok(names)
}

fn walk_error(root: &Path, error: walkdir::Error) -> RenameError {
    let path = error.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    RenameError::io(path, error.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;

    use tempfile::TempDir;

    #[test]
    fn folder_kind_for_seasons() {
        assert_eq!(FolderKind::from_name("Season 1"), FolderKind::Season(1));
        assert_eq!(FolderKind::from_name("Season 01"), FolderKind::Season(1));
        assert_eq!(FolderKind::from_name("Season  12"), FolderKind::Season(12));
        assert_eq!(FolderKind::from_name("Specials"), FolderKind::Season(0));
    }

    #[test]
    fn folder_kind_rejects_invalid_numbers() {
        assert_eq!(FolderKind::from_name("Season "), FolderKind::InvalidSeason);
        assert_eq!(FolderKind::from_name("Season 1 Extras"), FolderKind::InvalidSeason);
        assert_eq!(FolderKind::from_name("Season -1"), FolderKind::InvalidSeason);
    }

    #[test]
    fn folder_kind_for_other_names() {
        assert_eq!(FolderKind::from_name("season 1"), FolderKind::Other);
        assert_eq!(FolderKind::from_name("Season1"), FolderKind::Other);
        assert_eq!(FolderKind::from_name("specials"), FolderKind::Other);
        assert_eq!(FolderKind::from_name("Specials 2"), FolderKind::Other);
    }

    #[test]
    fn resolve_root_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("missing");
        let error = resolve_root(&missing).unwrap_err();
        assert!(matches!(error, RenameError::Configuration { .. }));
    }

    #[test]
    fn resolve_root_file_is_not_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("file.txt");
        File::create(&file).expect("Failed to create file");
        let error = resolve_root(&file).unwrap_err();
        assert!(matches!(error, RenameError::Configuration { .. }));
    }

    #[test]
    fn season_folders_are_filtered_and_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        for name in ["Season 10", "Season 2", "Specials", "Extras", "Season X", ".Season 3"] {
            fs::create_dir(root.join(name)).expect("Failed to create dir");
        }
        File::create(root.join("Season 4")).expect("Failed to create file");

        let folders = season_folders(root).expect("Failed to read season folders");
        let names: Vec<&str> = folders.seasons.iter().map(|season| season.name.as_str()).collect();
        assert_eq!(names, vec!["Specials", "Season 2", "Season 10"]);
        assert_eq!(folders.seasons[0].number, 0);
        assert_eq!(folders.seasons[2].number, 10);
        assert_eq!(folders.skipped.len(), 1);
        assert!(folders.skipped[0].ends_with("Season X"));
    }

    #[test]
    fn list_files_returns_sorted_file_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path();
        for name in ["b.mkv", "a.mkv", "a.en.srt", ".hidden.mkv"] {
            File::create(dir.join(name)).expect("Failed to create file");
        }
        fs::create_dir(dir.join("c.mkv")).expect("Failed to create dir");

        let files = list_files(dir).expect("Failed to list files");
        assert_eq!(files, vec!["a.en.srt", "a.mkv", "b.mkv"]);
    }

    #[cfg(unix)]
    #[test]
    fn list_files_includes_symlinked_files() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let target = temp_dir.path().join("target.mkv");
        File::create(&target).expect("Failed to create file");
        let dir = temp_dir.path().join("Season 1");
        fs::create_dir(&dir).expect("Failed to create dir");

        symlink(&target, dir.join("a.mkv")).expect("Failed to create symlink");
        File::create(dir.join("b.mkv")).expect("Failed to create file");
        symlink(temp_dir.path().join("missing.mkv"), dir.join("c.mkv")).expect("Failed to create symlink");
        symlink(temp_dir.path(), dir.join("d.mkv")).expect("Failed to create symlink");

        let files = list_files(&dir).expect("Failed to list files");
        assert_eq!(files, vec!["a.mkv", "b.mkv"]);
    }
}
