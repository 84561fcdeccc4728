//! User configuration loaded from ~/.profile-tui/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR, CONFIG_FILE, DEFAULT_BREAKPOINT, DEFAULT_LOG_FILE, DEFAULT_NAV_ITEMS,
    DEFAULT_NOTIFICATIONS,
};
use crate::models::{
    lenient_string, AccountStatus, Gamification, ProfileDraft, ProfileForm, UserType,
};

/// Initial profile values, standing in for a session provider
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSeed {
    #[serde(flatten)]
    pub form: ProfileForm,
    #[serde(deserialize_with = "lenient_string")]
    pub date_of_birth: String,
    pub user_type: Option<UserType>,
    #[serde(deserialize_with = "lenient_string")]
    pub admin_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Terminal width below which the layout collapses
    pub breakpoint: u16,
    pub log_file: String,
    pub notifications: u32,
    pub nav_items: Vec<String>,
    pub gamification: Gamification,
    pub account: AccountStatus,
    pub profile: ProfileSeed,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            breakpoint: DEFAULT_BREAKPOINT,
            log_file: String::from(DEFAULT_LOG_FILE),
            notifications: DEFAULT_NOTIFICATIONS,
            nav_items: DEFAULT_NAV_ITEMS.iter().map(|s| s.to_string()).collect(),
            gamification: Gamification::default(),
            account: AccountStatus::default(),
            profile: ProfileSeed::default(),
        }
    }
}

impl Settings {
    /// Default config location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }

    /// Build the starting draft for a new session
    pub fn initial_draft(&self) -> ProfileDraft {
        ProfileDraft {
            form: self.profile.form.clone(),
            date_of_birth: self.profile.date_of_birth.clone(),
            user_type: self.profile.user_type,
            admin_name: self.profile.admin_name.clone(),
            gamification: Gamification::new(
                self.gamification.points,
                self.gamification.level,
                self.gamification.level_progress,
            ),
            account: self.account.clone(),
        }
    }
}
