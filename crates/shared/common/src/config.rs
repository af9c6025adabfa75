//! Registration configuration loaded from the environment.

use std::env;

use domain::{AllowedDomains, DEFAULT_ALLOWED_DOMAINS};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Environment variable holding the comma separated email domain allow-list
pub const ENV_ALLOWED_DOMAINS: &str = "REGISTRATION_ALLOWED_DOMAINS";

/// Environment variable holding the log filter
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

/// Default log filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Registration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    /// Email domains accepted at registration
    pub allowed_domains: Vec<String>,
    /// Log filter directive
    pub log_level: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            allowed_domains: DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RegistrationConfig {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let allowed_domains = match lookup(ENV_ALLOWED_DOMAINS) {
            Some(raw) => parse_domain_list(&raw)?,
            None => defaults.allowed_domains,
        };

        Ok(Self {
            allowed_domains,
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
        })
    }

    /// Override the allow-list (e.g. from a command-line flag)
    pub fn with_allowed_domains(mut self, raw: &str) -> AppResult<Self> {
        self.allowed_domains = parse_domain_list(raw)?;
        Ok(self)
    }

    /// Normalised allow-list for validation
    pub fn allowed_domains(&self) -> AllowedDomains {
        AllowedDomains::new(&self.allowed_domains)
    }
}

/// Split a comma separated domain list, rejecting an empty result.
pub fn parse_domain_list(raw: &str) -> AppResult<Vec<String>> {
    let domains: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();

    if domains.is_empty() {
        return Err(AppError::config(format!(
            "{} must list at least one domain",
            ENV_ALLOWED_DOMAINS
        )));
    }

    Ok(domains)
}
