//! Engine configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Policy for an interaction arriving while a transition is animating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationPolicy {
    /// Drop the interaction; the running animation completes untouched.
    /// Guarantees animation integrity.
    #[default]
    Reject,
    /// Cancel the running animation (its page change stays committed) and
    /// process the new interaction immediately
    CancelPrior,
}

/// Per-session behavior knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// What to do with interactions during an active transition
    #[serde(default)]
    pub activation_policy: ActivationPolicy,
    /// Refuse stories with warning-level validation findings (unresolvable
    /// targets, millisecond-encoded durations)
    #[serde(default)]
    pub strict_validation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            activation_policy: ActivationPolicy::Reject,
            strict_validation: false,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Session behavior
    #[serde(default)]
    pub session: SessionConfig,
}

impl PlayerConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix PLAYER_
    ///    (e.g. PLAYER_SESSION__ACTIVATION_POLICY=cancel-prior)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir();

        let mut builder = Config::builder();

        if let Some(ref dir) = config_dir {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g. PLAYER_SESSION__STRICT_VALIDATION)
        builder = builder.add_source(
            Environment::with_prefix("PLAYER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<std::path::PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = std::path::PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the PLAYER_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("PLAYER_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self {
            profile: "release".to_string(),
            session: SessionConfig::default(),
        })
    }
}
