use std::{fmt, fs};

use anyhow::Context;
use itertools::Itertools;
use serde::Deserialize;

use episode_rename::EpisodeOptions;
use episode_rename::plan::MEDIA_EXTENSIONS;
use episode_rename::subtitle::DEFAULT_SUBTITLE_LANGUAGE;

use crate::Args;

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Default)]
pub struct Config {
    pub(crate) debug: bool,
    pub(crate) dryrun: bool,
    pub(crate) options: EpisodeOptions,
    pub(crate) verbose: bool,
}

/// Config from a config file
#[derive(Debug, Default, Deserialize)]
struct TvRenameConfig {
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    dryrun: bool,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    ignore_filename: bool,
    #[serde(default)]
    subtitle_language: Option<String>,
    #[serde(default)]
    verbose: bool,
}

/// Wrapper needed for parsing the config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    tvrename: TvRenameConfig,
}

impl TvRenameConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = episode_rename::config_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.tvrename)
            .context("Failed to parse tvrename config TOML")
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let user_config = TvRenameConfig::get_user_config()?;
        Ok(Self::from_args_and_user_config(args, user_config))
    }

    fn from_args_and_user_config(args: &Args, user_config: TvRenameConfig) -> Self {
        // Determine which extensions to use (args > config > default)
        let media_extensions = args
            .extension
            .clone()
            .filter(|extensions| !extensions.is_empty())
            .or({
                if user_config.extensions.is_empty() {
                    None
                } else {
                    Some(user_config.extensions)
                }
            })
            .unwrap_or_else(|| MEDIA_EXTENSIONS.iter().map(ToString::to_string).collect())
            .into_iter()
            .map(|extension| extension.trim().trim_start_matches('.').to_lowercase())
            .filter(|extension| !extension.is_empty())
            .unique()
            .collect();

        let subtitle_language = args
            .language
            .clone()
            .or(user_config.subtitle_language)
            .map(|language| language.trim().trim_start_matches('.').to_string())
            .filter(|language| !language.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBTITLE_LANGUAGE.to_string());

        Self {
            debug: args.debug || user_config.debug,
            dryrun: args.print || user_config.dryrun,
            options: EpisodeOptions {
                ignore_filename: args.ignore_filename || user_config.ignore_filename,
                media_extensions,
                subtitle_language,
            },
            verbose: args.verbose || user_config.verbose,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Config:")?;
        writeln!(f, "  debug:           {}", episode_rename::colorize_bool(self.debug))?;
        writeln!(f, "  dryrun:          {}", episode_rename::colorize_bool(self.dryrun))?;
        writeln!(
            f,
            "  ignore filename: {}",
            episode_rename::colorize_bool(self.options.ignore_filename)
        )?;
        writeln!(f, "  verbose:         {}", episode_rename::colorize_bool(self.verbose))?;
        writeln!(f, "  extensions:      {}", self.options.media_extensions.iter().join(", "))?;
        write!(f, "  subtitle lang:   {}", self.options.subtitle_language)
    }
}
