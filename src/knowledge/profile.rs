// Portfolio profile loaded from TOML
// Author: kelexine (https://github.com/kelexine)

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const BUILTIN_PROFILE: &str = include_str!("../../assets/profile.toml");

/// Everything the assistant is allowed to know about the portfolio owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioProfile {
    /// Name the assistant introduces itself with.
    pub assistant_name: String,
    pub profile: Profile,
    #[serde(default)]
    pub core_skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub chat: ChatSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub experience_years: u32,
    #[serde(default)]
    pub location: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    pub product: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub stack: Vec<String>,
    pub impact: String,
}

/// Chat popup copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSettings {
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub suggested_questions: Vec<String>,
}

impl PortfolioProfile {
    /// The profile compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_PROFILE)
    }

    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| RelayError::Knowledge(e.to_string()))
    }

    /// Load from `path` when given, otherwise fall back to the built-in profile.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let source = std::fs::read_to_string(Path::new(path)).map_err(|e| {
                    RelayError::Knowledge(format!("Failed to read profile {}: {}", path, e))
                })?;
                let profile = Self::parse(&source)?;
                info!("Loaded portfolio profile for {} from {}", profile.profile.name, path);
                Ok(profile)
            }
            None => Self::builtin(),
        }
    }

    /// First word of the owner's name, used in the assistant's role line.
    pub fn first_name(&self) -> &str {
        self.profile
            .name
            .split_whitespace()
            .next()
            .unwrap_or(self.profile.name.as_str())
    }
}
