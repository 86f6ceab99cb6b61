use crate::error::{BadEnvVarSnafu, RosterResult};
use dotenvy::var;
use snafu::ResultExt;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    source_config: Arc<SourceConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            source_config: Arc::new(SourceConfig::new()?),
        })
    }

    pub fn source_config(&self) -> Arc<SourceConfig> {
        self.source_config.clone()
    }
}

#[derive(Debug)]
pub struct SourceConfig {
    students_url: String,
    families_url: String,
    asset_root: String,
}

impl SourceConfig {
    pub fn new() -> RosterResult<Self> {
        let get_env_var = |name: &'static str| var(name).context(BadEnvVarSnafu { name });

        Ok(Self {
            students_url: get_env_var("HOGWARTS_STUDENTS_URL")?,
            families_url: get_env_var("HOGWARTS_FAMILIES_URL")?,
            asset_root: var("HOGWARTS_ASSET_ROOT")
                .unwrap_or_else(|_| "/images/students".to_string()),
        })
    }

    pub fn students_url(&self) -> &str {
        &self.students_url
    }

    pub fn families_url(&self) -> &str {
        &self.families_url
    }

    pub fn asset_root(&self) -> &str {
        &self.asset_root
    }
}
