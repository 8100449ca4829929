use anyhow::Context;
use cdmcore::client::DEFAULT_TIMEOUT;
use cdmcore::decode::DecodePolicy;
use cdmcore::query::{QueryBuilder, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Settings for one fetch run. Credentials never live here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub lenient: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            lenient: false,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Command-line values win over the file.
    pub fn with_overrides(mut self, base_url: Option<String>, lenient: bool) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        self.lenient |= lenient;
        self
    }

    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.base_url.clone())
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        if self.lenient {
            DecodePolicy::Lenient
        } else {
            DecodePolicy::Strict
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
