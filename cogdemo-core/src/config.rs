use std::{fmt, time::Duration};

use derive_builder::Builder;
use snafu::prelude::*;
use tracing::*;

use crate::{
    consts::*,
    error::{CogdemoError, InvalidConfigSnafu, MissingConfigSnafu},
};

/// A configuration value the demos may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    Key,
    Project,
    Deployment,
}

impl ConfigKey {
    /// Keys every demo needs.
    pub const SERVICE: &'static [ConfigKey] = &[ConfigKey::Endpoint, ConfigKey::Key];

    /// Keys the conversation demo needs.
    pub const CONVERSATION: &'static [ConfigKey] = &[
        ConfigKey::Endpoint,
        ConfigKey::Key,
        ConfigKey::Project,
        ConfigKey::Deployment,
    ];

    pub const fn env_name(&self) -> &'static str {
        match self {
            ConfigKey::Endpoint => ENDPOINT_ENV_NAME,
            ConfigKey::Key => KEY_ENV_NAME,
            ConfigKey::Project => PROJECT_ENV_NAME,
            ConfigKey::Deployment => DEPLOYMENT_ENV_NAME,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "endpoint",
            ConfigKey::Key => "key",
            ConfigKey::Project => "project",
            ConfigKey::Deployment => "deployment",
        }
    }

    /// Maps a [`ServiceConfig`] field name back to its key.
    pub fn from_field(field: &str) -> Option<Self> {
        [
            ConfigKey::Endpoint,
            ConfigKey::Key,
            ConfigKey::Project,
            ConfigKey::Deployment,
        ]
        .into_iter()
        .find(|key| key.name() == field)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Endpoint, credentials and model selection for one service resource.
#[derive(Clone, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "CogdemoError")
)]
pub struct ServiceConfig {
    /// Resource endpoint, e.g. `https://my-resource.cognitiveservices.azure.com`.
    endpoint: String,
    /// Resource key sent as `Ocp-Apim-Subscription-Key`.
    key: String,
    /// Conversation project name.
    #[builder(setter(into, strip_option), default)]
    project: Option<String>,
    /// Conversation deployment name.
    #[builder(setter(into, strip_option), default)]
    deployment: Option<String>,
    #[builder(default = "Duration::from_secs(DEFAULT_TIMEOUT_SECS)")]
    timeout: Duration,
}

impl ServiceConfigBuilder {
    fn validate(&self) -> Result<(), CogdemoError> {
        if let Some(endpoint) = &self.endpoint {
            ensure!(
                endpoint.starts_with("https://") || endpoint.starts_with("http://"),
                InvalidConfigSnafu {
                    message: format!("endpoint `{endpoint}` must be an http(s) URL"),
                }
            );
        }
        if let Some(timeout) = &self.timeout {
            ensure!(
                !timeout.is_zero(),
                InvalidConfigSnafu {
                    message: "timeout must be greater than zero",
                }
            );
        }
        Ok(())
    }
}

impl ServiceConfig {
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Reads the configuration from the process environment, after loading
    /// a `.env` file from the working directory if one exists.
    pub fn from_env(required: &[ConfigKey]) -> Result<Self, CogdemoError> {
        load_dotenv();
        Self::from_lookup(required, |name| std::env::var(name).ok())
    }

    /// Builds the configuration from `lookup`, which maps an environment
    /// variable name to its value.
    ///
    /// Blank values count as absent and a trailing `/` on the endpoint is
    /// dropped.
    ///
    /// # Arguments
    ///
    /// * `required` - Keys that must be present, checked in order
    /// * `lookup` - Source of values, keyed by [`ConfigKey::env_name`]
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceConfig)` - Every required key was found
    /// * `Err(CogdemoError::MissingConfig)` - First required key that is absent
    /// * `Err(CogdemoError::InvalidConfig)` - Endpoint is not an http(s) URL
    pub fn from_lookup<F>(required: &[ConfigKey], lookup: F) -> Result<Self, CogdemoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: ConfigKey| {
            lookup(key.env_name())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        for key in required {
            if value(*key).is_none() {
                error!("configuration {} is missing", key.env_name());
                return MissingConfigSnafu { key: *key }.fail();
            }
        }

        let mut builder = Self::builder();
        if let Some(endpoint) = value(ConfigKey::Endpoint) {
            builder.endpoint(endpoint.trim_end_matches('/'));
        }
        if let Some(key) = value(ConfigKey::Key) {
            builder.key(key);
        }
        if let Some(project) = value(ConfigKey::Project) {
            builder.project(project);
        }
        if let Some(deployment) = value(ConfigKey::Deployment) {
            builder.deployment(deployment);
        }

        builder.build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn deployment(&self) -> Option<&str> {
        self.deployment.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins `path` onto the endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .field("project", &self.project)
            .field("deployment", &self.deployment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Command line flags shared by every demo. Each flag falls back to its
/// environment variable.
#[derive(clap::Args, Debug, Clone)]
pub struct ServiceArgs {
    #[arg(long, env = ENDPOINT_ENV_NAME, help = "Service endpoint URL")]
    pub endpoint: Option<String>,

    #[arg(long, env = KEY_ENV_NAME, hide_env_values = true, help = "Service key")]
    pub key: Option<String>,

    #[arg(long, env = PROJECT_ENV_NAME, help = "Conversation project name")]
    pub project: Option<String>,

    #[arg(long, env = DEPLOYMENT_ENV_NAME, help = "Conversation deployment name")]
    pub deployment: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Request timeout in seconds")]
    pub timeout_secs: u64,
}

impl Default for ServiceArgs {
    fn default() -> Self {
        Self {
            endpoint: None,
            key: None,
            project: None,
            deployment: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceArgs {
    pub fn into_config(self, required: &[ConfigKey]) -> Result<ServiceConfig, CogdemoError> {
        let config = ServiceConfig::from_lookup(required, |name| match name {
            ENDPOINT_ENV_NAME => self.endpoint.clone(),
            KEY_ENV_NAME => self.key.clone(),
            PROJECT_ENV_NAME => self.project.clone(),
            DEPLOYMENT_ENV_NAME => self.deployment.clone(),
            _ => None,
        })?;

        ensure!(
            self.timeout_secs > 0,
            InvalidConfigSnafu {
                message: "timeout must be greater than zero",
            }
        );

        Ok(config.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

/// Loads `.env` from the working directory into the process environment.
/// A missing file is not an error.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => warn!("ignoring unreadable .env file: {}", err),
    }
}
