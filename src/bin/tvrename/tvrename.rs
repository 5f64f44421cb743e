use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use episode_rename::{RenamePlan, SeasonFolder};

use crate::Args;
use crate::config::Config;

#[derive(Debug)]
pub struct TvRename {
    root: PathBuf,
    config: Config,
}

impl TvRename {
    /// Init new instance with CLI args.
    pub fn new(args: &Args) -> Result<Self> {
        let config = Config::from_args(args)?;
        let path = args.path.clone().unwrap_or_default();
        let root = episode_rename::resolve_root(&path)?;
        Ok(Self { root, config })
    }

    /// Run renaming with given args.
    #[inline]
    pub fn run_with_args(args: Args) -> Result<()> {
        Self::new(&args)?.run()
    }

    /// Rename all season folders under the root directory.
    ///
    /// Seasons are handled one at a time and the whole run stops at the first error.
    /// Seasons processed before the error stay renamed.
    pub fn run(&self) -> Result<()> {
        if self.config.debug {
            println!("{}", self.config);
        }
        if self.config.dryrun {
            println!("{}", "Dryrun: only printing changes".bold());
        }

        let folders = episode_rename::season_folders(&self.root)?;
        for skipped in &folders.skipped {
            episode_rename::print_warning!(
                "Skipping folder without a valid season number: {}",
                episode_rename::get_relative_path_or_filename(skipped, &self.root)
            );
        }
        if folders.seasons.is_empty() {
            println!("No season folders found in {}", self.root.display());
            return Ok(());
        }

        let mut num_renamed: usize = 0;
        for season in &folders.seasons {
            num_renamed += self.rename_season(season)?;
        }

        let message = format!("{num_renamed} file{}", if num_renamed == 1 { "" } else { "s" });
        if self.config.dryrun {
            println!("Dryrun: would have renamed {message}");
        } else {
            println!("{}", format!("Renamed {message}").green());
        }
        Ok(())
    }

    /// Plan and apply the renames for one season folder.
    /// Returns the number of files that changed name.
    fn rename_season(&self, season: &SeasonFolder) -> Result<usize> {
        if self.config.verbose {
            println!("{}", format!("{} (season {})", season.name, season.number).bold());
        }

        let files = episode_rename::list_files(&season.path)?;
        let plans = episode_rename::plan_season(season, &files, &self.config.options)?;

        let mut num_renamed: usize = 0;
        for plan in &plans {
            if plan.is_unchanged() {
                if self.config.verbose {
                    println!("  {}", self.relative(plan).0.dimmed());
                }
                continue;
            }
            let (old, new) = self.relative(plan);
            episode_rename::show_rename(&old, &new);
            if !self.config.dryrun {
                plan.apply()?;
            }
            num_renamed += 1;
        }
        Ok(num_renamed)
    }

    /// Source and destination relative to the root directory.
    fn relative(&self, plan: &RenamePlan) -> (String, String) {
        (
            episode_rename::get_relative_path_or_filename(&plan.source, &self.root),
            episode_rename::get_relative_path_or_filename(&plan.destination, &self.root),
        )
    }
}
