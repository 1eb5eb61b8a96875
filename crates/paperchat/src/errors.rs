//! Error types for the paperchat library.
//!
//! Every fallible operation in the crate returns [`PaperchatError`]. Most callers never see one:
//! the session-facing calls ([`SearchClient::search_papers`](crate::clients::SearchClient),
//! [`ChatClient::reply`](crate::clients::ChatClient), [`Controller::download`](crate::controller::Controller))
//! log the failure and degrade to an empty result list or a fallback message. The `try_*`
//! variants beside them return the error instead.
//!
//! # Examples
//!
//! ```no_run
//! use paperchat::{clients::SearchClient, errors::PaperchatError};
//!
//! # async fn example() -> Result<(), PaperchatError> {
//! match SearchClient::default().search("lattices").await {
//!   Ok(feed) => println!("{} bytes of feed", feed.len()),
//!   Err(PaperchatError::Status { status, .. }) => println!("arXiv answered {status}"),
//!   Err(PaperchatError::Network(e)) => println!("Network error: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Errors that can occur when searching, chatting or downloading.
#[derive(Error, Debug)]
pub enum PaperchatError {
  /// A network request failed before a response arrived, or its body could not be read or
  /// decoded.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A remote endpoint answered with a non-success HTTP status.
  #[error("{url} responded with {status}")]
  Status {
    /// The URL that was requested.
    url:    String,
    /// The status code that came back.
    status: reqwest::StatusCode,
  },

  /// The search response was not a feed we could read.
  ///
  /// The string carries the XML parser's message.
  #[error("Failed to parse feed: {0}")]
  Feed(String),

  /// A configuration file could not be parsed.
  #[error(transparent)]
  Config(#[from] toml::de::Error),

  /// A configuration could not be serialized.
  #[error(transparent)]
  ConfigWrite(#[from] toml::ser::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A configured endpoint is not a valid URL.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// An operation needed a selected paper and there was none.
  #[error("No paper selected")]
  NoSelection,

  /// No arXiv identifier could be found in the paper's URL.
  #[error("No arXiv identifier in source URL")]
  MissingIdentifier,
}

impl PaperchatError {
  /// Checks whether this error came from the remote side rather than from us.
  ///
  /// Covers transport failures and non-success statuses, the two cases where trying again later
  /// could help.
  pub fn is_remote(&self) -> bool {
    matches!(self, PaperchatError::Network(_) | PaperchatError::Status { .. })
  }
}
