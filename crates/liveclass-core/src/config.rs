use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Result, anyhow};

use crate::session::Role;

pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
pub const DEFAULT_ANNOUNCEMENT: &str = "EagleWise Live: Bhaiya is here!";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    #[default]
    EagleWise,
    MedQuiz,
}

impl Brand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::EagleWise => "eaglewise",
            Brand::MedQuiz => "medquiz",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "eaglewise" => Some(Brand::EagleWise),
            "medquiz" | "medquiz-pro" => Some(Brand::MedQuiz),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::EagleWise => "EAGLEWISE",
            Brand::MedQuiz => "MedQuiz Pro",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Brand::EagleWise => "Live classes with your mentors",
            Brand::MedQuiz => "Sign in to your account",
        }
    }

    /// MedQuiz offers a separate sign-up mode on the login form; the role
    /// picker only shows there.
    pub fn has_sign_up(&self) -> bool {
        matches!(self, Brand::MedQuiz)
    }

    pub fn student_greeting(&self) -> &'static str {
        match self {
            Brand::EagleWise => "Ready for today's class?",
            Brand::MedQuiz => "Welcome, Future Doctor!",
        }
    }
}

/// Optional panels. Every flag defaults to on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Features {
    pub announcements: bool,
    pub doubts: bool,
    pub quiz_panel: bool,
    pub theme_toggle: bool,
    pub microphone: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            announcements: true,
            doubts: true,
            quiz_panel: true,
            theme_toggle: true,
            microphone: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SupportContacts {
    pub academic_mentor: String,
    pub tech_support: String,
}

impl Default for SupportContacts {
    fn default() -> Self {
        Self {
            academic_mentor: "+91 XXXXX XXXXX".to_string(),
            tech_support: "+91 YYYYY YYYYY".to_string(),
        }
    }
}

/// Figures shown on the teacher dashboard cards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardStats {
    pub total_quizzes: u32,
    pub active_students: u32,
    pub average_score: u8,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_quizzes: 12,
            active_students: 45,
            average_score: 82,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub brand: Brand,
    pub login_delay_ms: u64,
    pub dark_mode: bool,
    /// Role preselected on the login form.
    pub default_role: Role,
    pub announcement: String,
    pub seed_doubts: Vec<String>,
    pub features: Features,
    pub support: SupportContacts,
    pub stats: DashboardStats,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            brand: Brand::default(),
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
            dark_mode: false,
            default_role: Role::default(),
            announcement: DEFAULT_ANNOUNCEMENT.to_string(),
            seed_doubts: vec!["Structure of Nephron?".to_string()],
            features: Features::default(),
            support: SupportContacts::default(),
            stats: DashboardStats::default(),
        }
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("invalid config {}: {}", path.display(), e))?;
        tracing::info!(path = %path.display(), brand = config.brand.as_str(), "loaded config");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("liveclass").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.login_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::new();
        config.brand = Brand::MedQuiz;
        config.login_delay_ms = 800;
        config.features.microphone = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "brand": "medquiz", "features": { "doubts": false } }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.brand, Brand::MedQuiz);
        assert!(!config.features.doubts);
        assert!(config.features.announcements);
        assert_eq!(config.login_delay_ms, DEFAULT_LOGIN_DELAY_MS);
        assert_eq!(config.stats.active_students, 45);
        assert_eq!(config.default_role, Role::Student);
    }

    #[test]
    fn test_default_role_is_read_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "default_role": "teacher" }"#).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().default_role, Role::Teacher);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_brand_parsing() {
        assert_eq!(Brand::from_str("MedQuiz"), Some(Brand::MedQuiz));
        assert_eq!(Brand::from_str("eaglewise"), Some(Brand::EagleWise));
        assert_eq!(Brand::from_str("other"), None);
        assert!(Brand::MedQuiz.has_sign_up());
        assert!(!Brand::EagleWise.has_sign_up());
    }
}
