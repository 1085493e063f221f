//! src/configuration.rs
use crate::terms::{BigramAllowList, DEFAULT_TARGET_BIGRAMS};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::Path;

#[derive(serde::Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub index: IndexSettings,
    pub cluster: ClusterSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexVariant {
    #[default]
    Unigram,
    Bigram,
}

impl IndexVariant {
    /// Name of the registered mapper building this kind of index.
    pub fn mapper_name(&self) -> &'static str {
        match self {
            IndexVariant::Unigram => "unigram",
            IndexVariant::Bigram => "bigram",
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct IndexSettings {
    pub variant: IndexVariant,
    pub target_bigrams: Vec<String>,
}

impl IndexSettings {
    pub fn allow_list(&self) -> BigramAllowList {
        BigramAllowList::new(&self.target_bigrams)
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            variant: IndexVariant::default(),
            target_bigrams: DEFAULT_TARGET_BIGRAMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    #[default]
    Parallel,
    Sequential,
}

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ClusterSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub workers: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub reduce_tasks: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub split_size_in_bytes: u64,
    pub combine: bool,
    pub executor: ExecutorKind,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            workers: 4,
            reduce_tasks: 1,
            split_size_in_bytes: 32 * 1024 * 1024,
            combine: true,
            executor: ExecutorKind::default(),
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct TelemetrySettings {
    pub otlp_endpoint: Option<String>,
}

/// Reads `configuration/base.yaml` from the working directory, if present.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let config_file = base_path.join("configuration").join("base.yaml");
    build_settings(&config_file, false)
}

/// Reads settings from `path`, which must exist.
pub fn get_configuration_from(path: &Path) -> Result<Settings, config::ConfigError> {
    build_settings(path, true)
}

fn build_settings(path: &Path, required: bool) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix("INDEX")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
