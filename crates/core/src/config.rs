//! Configuration management for askdocs.
//!
//! Configuration is merged from several sources, later sources winning:
//! - Built-in defaults
//! - A YAML config file (`askdocs.yaml` in the current directory, or the
//!   path given via `--config` / `ASKDOCS_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! The corpus artifacts themselves (vector index and chunk-mapping file)
//! are produced by an external preprocessing step; this configuration only
//! points at them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Config file looked up in the current directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "askdocs.yaml";

/// Default base URL for both the chat and embedding services.
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the vector index file
    pub index: PathBuf,

    /// Path to the chunk-mapping file (JSON array of chunk texts)
    pub chunks: PathBuf,

    /// Config file the settings were merged from, if any
    pub config_file: Option<PathBuf>,

    /// Chat-completion service settings
    pub chat: ChatSettings,

    /// Embedding service settings
    pub embedding: EmbeddingSettings,

    /// Default number of chunks to retrieve per query
    pub top_k: usize,

    /// Explicit API key override (`ASKDOCS_API_KEY`)
    pub api_key: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Settings for the chat-completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Provider identifier; "openai" covers any OpenAI-compatible endpoint
    pub provider: String,

    /// Base URL of the service
    pub endpoint: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(rename = "apiKeyEnv")]
    pub api_key_env: Option<String>,
}

/// Settings for the embedding service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Provider identifier ("openai" or "mock")
    pub provider: String,

    /// Base URL of the service
    pub endpoint: String,

    /// Model identifier sent with every embedding request
    pub model: String,

    /// Vector width used by the deterministic local provider; remote
    /// providers return their model's native width
    pub dimensions: usize,

    /// Name of the environment variable holding the API key
    #[serde(rename = "apiKeyEnv")]
    pub api_key_env: Option<String>,
}

/// Full configuration file structure.
///
/// Every field is optional so a file can override just a subset.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    index: Option<PathBuf>,
    chunks: Option<PathBuf>,
    #[serde(rename = "topK")]
    top_k: Option<usize>,
    chat: Option<ChatSection>,
    embedding: Option<EmbeddingSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatSection {
    provider: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingSection {
    provider: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index: PathBuf::from("corpus.index"),
            chunks: PathBuf::from("chunks.json"),
            config_file: None,
            chat: ChatSettings::default(),
            embedding: EmbeddingSettings::default(),
            top_k: 5,
            api_key: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 384,
            api_key_env: Some("OPENAI_API_KEY".to_string()),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// `config_file` is the path given on the command line, if any. When it
    /// is `None`, `ASKDOCS_CONFIG` is consulted, then `askdocs.yaml` in the
    /// current directory. An explicitly named file must exist; the implicit
    /// one is skipped silently when absent.
    ///
    /// Environment variables:
    /// - `ASKDOCS_CONFIG`: Path to config file
    /// - `ASKDOCS_INDEX`: Override vector index path
    /// - `ASKDOCS_CHUNKS`: Override chunk-mapping file path
    /// - `ASKDOCS_ENDPOINT`: Override both service endpoints
    /// - `ASKDOCS_MODEL`: Override the chat model
    /// - `ASKDOCS_API_KEY`: API key for both services
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use askdocs_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Index: {:?}", config.index);
    /// ```
    pub fn load(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let explicit = config_file
            .or_else(|| std::env::var("ASKDOCS_CONFIG").ok().map(PathBuf::from));

        let config_path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
            config.config_file = Some(config_path);
        } else if explicit.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override the config file
        if let Ok(index) = std::env::var("ASKDOCS_INDEX") {
            config.index = PathBuf::from(index);
        }

        if let Ok(chunks) = std::env::var("ASKDOCS_CHUNKS") {
            config.chunks = PathBuf::from(chunks);
        }

        if let Ok(endpoint) = std::env::var("ASKDOCS_ENDPOINT") {
            config.chat.endpoint = endpoint.clone();
            config.embedding.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("ASKDOCS_MODEL") {
            config.chat.model = model;
        }

        if let Ok(key) = std::env::var("ASKDOCS_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(index) = config_file.index {
            self.index = index;
        }

        if let Some(chunks) = config_file.chunks {
            self.chunks = chunks;
        }

        if let Some(top_k) = config_file.top_k {
            self.top_k = top_k;
        }

        if let Some(chat) = config_file.chat {
            if let Some(provider) = chat.provider {
                self.chat.provider = provider;
            }
            if let Some(endpoint) = chat.endpoint {
                self.chat.endpoint = endpoint;
            }
            if let Some(model) = chat.model {
                self.chat.model = model;
            }
            if chat.api_key_env.is_some() {
                self.chat.api_key_env = chat.api_key_env;
            }
        }

        if let Some(embedding) = config_file.embedding {
            if let Some(provider) = embedding.provider {
                self.embedding.provider = provider;
            }
            if let Some(endpoint) = embedding.endpoint {
                self.embedding.endpoint = endpoint;
            }
            if let Some(model) = embedding.model {
                self.embedding.model = model;
            }
            if let Some(dimensions) = embedding.dimensions {
                self.embedding.dimensions = dimensions;
            }
            if embedding.api_key_env.is_some() {
                self.embedding.api_key_env = embedding.api_key_env;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        index: Option<PathBuf>,
        chunks: Option<PathBuf>,
        endpoint: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(index) = index {
            self.index = index;
        }

        if let Some(chunks) = chunks {
            self.chunks = chunks;
        }

        if let Some(endpoint) = endpoint {
            self.chat.endpoint = endpoint.clone();
            self.embedding.endpoint = endpoint;
        }

        if let Some(model) = model {
            self.chat.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the API key for a service section.
    ///
    /// The explicit `ASKDOCS_API_KEY` override wins; otherwise the
    /// environment variable named by the section's `apiKeyEnv` is read.
    pub fn resolve_api_key(&self, api_key_env: Option<&str>) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        api_key_env.and_then(|name| std::env::var(name).ok())
    }

    /// API key for the chat-completion service.
    pub fn chat_api_key(&self) -> Option<String> {
        self.resolve_api_key(self.chat.api_key_env.as_deref())
    }

    /// API key for the embedding service.
    pub fn embedding_api_key(&self) -> Option<String> {
        self.resolve_api_key(self.embedding.api_key_env.as_deref())
    }

    /// Validate that the corpus artifacts referenced by this config exist.
    pub fn validate(&self) -> AppResult<()> {
        if !self.index.exists() {
            return Err(AppError::Config(format!(
                "Vector index file does not exist: {:?}",
                self.index
            )));
        }

        if !self.chunks.exists() {
            return Err(AppError::Config(format!(
                "Chunk-mapping file does not exist: {:?}",
                self.chunks
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.chat.provider, "openai");
        assert_eq!(config.chat.model, "gpt-4o-mini");
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.top_k, 5);
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some(PathBuf::from("/data/faq.index")),
            None,
            Some("http://localhost:8080/v1".to_string()),
            Some("gpt-4o".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.index, PathBuf::from("/data/faq.index"));
        assert_eq!(overridden.chunks, PathBuf::from("chunks.json"));
        assert_eq!(overridden.chat.endpoint, "http://localhost:8080/v1");
        assert_eq!(overridden.embedding.endpoint, "http://localhost:8080/v1");
        assert_eq!(overridden.chat.model, "gpt-4o");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
index: /corpus/handbook.index
chunks: /corpus/handbook-chunks.json
topK: 3
chat:
  model: gpt-4o
embedding:
  provider: mock
  dimensions: 64
logging:
  level: debug
  color: false
"#
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.merge_yaml(file.path()).unwrap();

        assert_eq!(config.index, PathBuf::from("/corpus/handbook.index"));
        assert_eq!(config.chunks, PathBuf::from("/corpus/handbook-chunks.json"));
        assert_eq!(config.top_k, 3);
        assert_eq!(config.chat.model, "gpt-4o");
        // Fields absent from the file keep their defaults
        assert_eq!(config.chat.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.embedding.provider, "mock");
        assert_eq!(config.embedding.dimensions, 64);
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert!(config.no_color);
    }

    #[test]
    fn test_merge_yaml_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "topK: [not, a, number]").unwrap();

        let mut config = AppConfig::default();
        let err = config.merge_yaml(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_resolve_api_key_explicit() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-explicit".to_string());
        // The explicit key wins regardless of the section variable
        assert_eq!(
            config.resolve_api_key(Some("ASKDOCS_TEST_UNSET_VAR")),
            Some("sk-explicit".to_string())
        );
    }

    #[test]
    fn test_resolve_api_key_absent() {
        let config = AppConfig::default();
        assert_eq!(config.resolve_api_key(None), None);
        assert_eq!(config.resolve_api_key(Some("ASKDOCS_TEST_UNSET_VAR")), None);
    }

    #[test]
    fn test_validate_missing_artifacts() {
        let mut config = AppConfig::default();
        config.index = PathBuf::from("/nonexistent/corpus.index");
        config.chunks = PathBuf::from("/nonexistent/chunks.json");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_existing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("corpus.index");
        let chunks = dir.path().join("chunks.json");
        std::fs::write(&index, b"").unwrap();
        std::fs::write(&chunks, b"[]").unwrap();

        let mut config = AppConfig::default();
        config.index = index;
        config.chunks = chunks;
        assert!(config.validate().is_ok());
    }
}
