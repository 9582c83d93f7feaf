//! User preferences.
//!
//! Preferences are layered from lowest to highest priority:
//! 1. built-in defaults (`default.yaml`)
//! 2. the user preferences file in the platform config directory
//! 3. a file passed on the command line
//! 4. `CUBETURN_*` environment variables, such as
//!    `CUBETURN_ANIMATION__TWIST_DURATION=0.5`

use std::path::{Path, PathBuf};

use cubeturn_view::{AnimationPreferences, DEFAULT_SCRAMBLE_LENGTH};
use directories::ProjectDirs;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

const PREFS_FILE_NAME: &str = "cubeturn";
const PREFS_FILE_EXTENSION: &str = "yaml";
const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");
const ENV_PREFIX: &str = "CUBETURN";

lazy_static! {
    static ref PROJECT_DIRS: Option<ProjectDirs> = ProjectDirs::from("", "", "Cubeturn");
    static ref PREFS_FILE_PATH: Option<PathBuf> = PROJECT_DIRS.as_ref().map(|dirs| {
        dirs.config_dir()
            .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}"))
    });
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub scramble: ScramblePreferences,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScramblePreferences {
    /// Number of moves in a scramble.
    pub length: usize,
}
impl Default for ScramblePreferences {
    fn default() -> Self {
        Self {
            length: DEFAULT_SCRAMBLE_LENGTH,
        }
    }
}

impl Preferences {
    /// Loads preferences from every source, with `extra_file` taking priority
    /// over the user preferences file.
    pub fn load(extra_file: Option<&Path>) -> Result<Self> {
        let mut config = config::Config::builder();

        // Load default preferences.
        config = config.add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        // Load user preferences.
        match &*PREFS_FILE_PATH {
            Some(path) => {
                log::debug!("loading user preferences from {}", path.display());
                config = config.add_source(config::File::from(path.as_path()).required(false));
            }
            None => log::warn!("unable to get preferences file path"),
        }

        if let Some(path) = extra_file {
            config = config.add_source(config::File::from(path));
        }

        config = config.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        config
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .wrap_err("error loading preferences")
    }
}

#[cfg(test)]
mod tests {
    use cubeturn_view::InterpolateFn;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs_match_default_impl() {
        let prefs: Preferences = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_extra_prefs_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("cubeturn-test-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "animation:\n  twist_duration: 0.05\n  twist_interpolation: lerp\n",
        )
        .unwrap();
        let prefs = Preferences::load(Some(&path));
        std::fs::remove_file(&path).unwrap();

        let prefs = prefs.unwrap();
        assert_eq!(prefs.animation.twist_duration, 0.05);
        assert_eq!(prefs.animation.twist_interpolation, InterpolateFn::Lerp);
        assert!(prefs.animation.dynamic_twist_speed);
    }

    #[test]
    fn test_missing_extra_prefs_file_is_an_error() {
        let path = Path::new("/nonexistent/cubeturn.yaml");
        assert!(Preferences::load(Some(path)).is_err());
    }
}
