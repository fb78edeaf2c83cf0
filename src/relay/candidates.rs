// Ordered model candidate list
// Author: kelexine (https://github.com/kelexine)

use crate::config::UpstreamConfig;
use crate::error::{RelayError, Result};

/// Models to try, in priority order. Never empty, no blank or repeated ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidates(Vec<String>);

impl ModelCandidates {
    /// Build the list from an optional preferred model followed by defaults.
    ///
    /// Identifiers are trimmed; blank ones are dropped and repeats keep their
    /// first position.
    pub fn new<S: AsRef<str>>(preferred: Option<&str>, defaults: &[S]) -> Result<Self> {
        let mut models: Vec<String> = Vec::with_capacity(defaults.len() + 1);

        let all = preferred
            .into_iter()
            .chain(defaults.iter().map(|m| m.as_ref()));
        for model in all {
            let model = model.trim();
            if model.is_empty() || models.iter().any(|m| m == model) {
                continue;
            }
            models.push(model.to_string());
        }

        if models.is_empty() {
            return Err(RelayError::Configuration(
                "No upstream model candidates configured".to_string(),
            ));
        }

        Ok(Self(models))
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        Self::new(config.preferred_model.as_deref(), &config.fallback_models)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl<'a> IntoIterator for &'a ModelCandidates {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
