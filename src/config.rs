use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::ScoringWeights;
use crate::services::DirectoryRoutes;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub directory: DirectorySettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Endpoint paths of the directory API
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_profile_path")]
    pub profile: String,
    #[serde(default = "default_profiles_path")]
    pub profiles: String,
    #[serde(default = "default_matches_path")]
    pub matches: String,
    #[serde(default = "default_match_mutation_path")]
    pub match_mutation: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            profile: default_profile_path(),
            profiles: default_profiles_path(),
            matches: default_matches_path(),
            match_mutation: default_match_mutation_path(),
        }
    }
}

impl From<RoutesConfig> for DirectoryRoutes {
    fn from(routes: RoutesConfig) -> Self {
        Self {
            profile: routes.profile,
            profiles: routes.profiles,
            matches: routes.matches,
            match_mutation: routes.match_mutation,
        }
    }
}

fn default_timeout_secs() -> u64 { 30 }
fn default_profile_path() -> String { "/api/users".to_string() }
fn default_profiles_path() -> String { "/users".to_string() }
fn default_matches_path() -> String { "/matches".to_string() }
fn default_match_mutation_path() -> String { "/api/matches".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_snapshot_ttl_secs")]
    pub snapshot_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            snapshot_ttl_secs: default_snapshot_ttl_secs(),
        }
    }
}

fn default_snapshot_ttl_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            top_limit: default_top_limit(),
        }
    }
}

fn default_top_limit() -> usize { crate::core::DEFAULT_TOP_LIMIT }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub points: PointsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_gender_points")]
    pub gender: u32,
    #[serde(default = "default_city_points")]
    pub city: u32,
    #[serde(default = "default_ethnicity_points")]
    pub ethnicity: u32,
    #[serde(default = "default_education_points")]
    pub education: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            gender: default_gender_points(),
            city: default_city_points(),
            ethnicity: default_ethnicity_points(),
            education: default_education_points(),
        }
    }
}

impl From<&PointsConfig> for ScoringWeights {
    fn from(points: &PointsConfig) -> Self {
        Self {
            gender: points.gender,
            city: points.city,
            ethnicity: points.ethnicity,
            education: points.education,
        }
    }
}

fn default_gender_points() -> u32 { 5 }
fn default_city_points() -> u32 { 3 }
fn default_ethnicity_points() -> u32 { 4 }
fn default_education_points() -> u32 { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCHDESK__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCHDESK__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MATCHDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_directory_url(settings)?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.points)
    }
}

/// `DIRECTORY_URL` overrides `directory.base_url` when set
fn apply_directory_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DIRECTORY_URL") {
        Ok(url) if !url.trim().is_empty() => Config::builder()
            .add_source(settings)
            .set_override("directory.base_url", url)?
            .build(),
        _ => Ok(settings),
    }
}
