//! Endpoint configuration, stored as TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives a working setup that
//! searches arXiv directly and expects the chat and download services on `localhost:5000`.
//!
//! ```toml
//! [search]
//! mode = "relay"
//! relay_url = "http://localhost:5000/info"
//!
//! [chat]
//! url = "http://localhost:5000/chat"
//! ```

use std::path::{Path, PathBuf};

use super::*;
use crate::clients::{arxiv, chat, download};

/// How topic searches reach arXiv.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
  /// Query the arXiv API directly.
  #[default]
  Direct,
  /// Query through a same-origin relay.
  Relay,
}

/// The `[search]` section.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Direct or relayed search
  pub mode:        SearchMode,
  /// arXiv query endpoint, used in direct mode and by the relay itself
  pub arxiv_url:   String,
  /// Relay endpoint, used in relay mode
  pub relay_url:   String,
  /// Number of papers per search
  pub max_results: usize,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      mode:        SearchMode::Direct,
      arxiv_url:   arxiv::ARXIV_QUERY_URL.to_string(),
      relay_url:   "http://localhost:5000/info".to_string(),
      max_results: arxiv::DEFAULT_MAX_RESULTS,
    }
  }
}

/// The `[chat]` section.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
  /// Chat endpoint URL
  pub url: String,
}

impl Default for ChatConfig {
  fn default() -> Self { Self { url: chat::DEFAULT_CHAT_URL.to_string() } }
}

/// The `[download]` section.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
  /// Download endpoint URL
  pub url: String,
}

impl Default for DownloadConfig {
  fn default() -> Self { Self { url: download::DEFAULT_DOWNLOAD_URL.to_string() } }
}

/// The `[relay]` section.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
  /// Interface to listen on
  pub host: String,
  /// Port to listen on
  pub port: u16,
}

impl Default for RelayConfig {
  fn default() -> Self { Self { host: "127.0.0.1".to_string(), port: 5000 } }
}

/// Full paperchat configuration.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Search settings
  pub search:   SearchConfig,
  /// Chat endpoint
  pub chat:     ChatConfig,
  /// Download endpoint
  pub download: DownloadConfig,
  /// Relay server settings
  pub relay:    RelayConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      search:   SearchConfig::default(),
      chat:     ChatConfig::default(),
      download: DownloadConfig::default(),
      relay:    RelayConfig::default(),
    }
  }
}

impl Config {
  /// Get default config path in user's config directory
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("paperchat").join("config.toml")
  }

  /// Reads a configuration file.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read or is not valid TOML for this shape.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, PaperchatError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let config = toml::from_str(&text)?;
    debug!("Loaded config from {}", path.as_ref().display());
    Ok(config)
  }

  /// Reads a configuration file, using the defaults if it does not exist.
  ///
  /// # Errors
  ///
  /// Fails like [`Config::load`] for a file that exists.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PaperchatError> {
    if path.as_ref().exists() {
      Self::load(path)
    } else {
      debug!("No config at {}, using defaults", path.as_ref().display());
      Ok(Self::default())
    }
  }

  /// Writes this configuration as TOML, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PaperchatError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Checks that every configured endpoint parses as a URL.
  ///
  /// # Errors
  ///
  /// Returns [`PaperchatError::InvalidUrl`] for the first endpoint that does not parse.
  pub fn validate(&self) -> Result<(), PaperchatError> {
    for endpoint in
      [&self.search.arxiv_url, &self.search.relay_url, &self.chat.url, &self.download.url]
    {
      url::Url::parse(endpoint)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.search.mode, SearchMode::Direct);
    assert_eq!(config.search.arxiv_url, "http://export.arxiv.org/api/query");
    assert_eq!(config.search.max_results, 10);
    assert_eq!(config.chat.url, "http://localhost:5000/chat");
    assert_eq!(config.download.url, "http://localhost:5000/download-arxiv-pdf");
    assert_eq!(config.relay.port, 5000);
    config.validate().unwrap();
  }

  #[test]
  fn test_partial_file() -> anyhow::Result<()> {
    let config: Config = toml::from_str(
      r#"
        [search]
        mode = "relay"
        max_results = 25
      "#,
    )?;
    assert_eq!(config.search.mode, SearchMode::Relay);
    assert_eq!(config.search.max_results, 25);
    assert_eq!(config.search.relay_url, "http://localhost:5000/info");
    assert_eq!(config.chat, Config::default().chat);
    Ok(())
  }

  #[test]
  fn test_section_headers_without_keys() -> anyhow::Result<()> {
    let config: Config = toml::from_str("[search]\n[chat]\n[download]\n[relay]\n")?;
    assert_eq!(config, Config::default());

    let config: Config = toml::from_str("[download]\n\n[chat]\nurl = \"http://chat.example/chat\"\n")?;
    assert_eq!(config.chat.url, "http://chat.example/chat");
    assert_eq!(config.download.url, "http://localhost:5000/download-arxiv-pdf");
    Ok(())
  }

  #[test]
  fn test_save_and_load() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.chat.url = "http://chat.example:8080/chat".into();
    config.save(&path)?;

    assert_eq!(Config::load(&path)?, config);
    Ok(())
  }

  #[test]
  fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let dir = tempdir()?;
    assert_eq!(Config::load_or_default(dir.path().join("absent.toml"))?, Config::default());
    assert!(matches!(Config::load(dir.path().join("absent.toml")), Err(PaperchatError::Io(_))));
    Ok(())
  }

  #[test]
  fn test_invalid_files() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("config.toml");

    std::fs::write(&path, "[search]\nmode = \"carrier-pigeon\"\n")?;
    assert!(matches!(Config::load(&path), Err(PaperchatError::Config(_))));

    let mut config = Config::default();
    config.chat.url = "not a url".into();
    assert!(matches!(config.validate(), Err(PaperchatError::InvalidUrl(_))));
    Ok(())
  }
}
