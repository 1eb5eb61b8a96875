//! Error types for the paperchat CLI application.
//!
//! The CLI adds only a few failure modes of its own on top of the library: terminal prompts,
//! file system access and log file setup. All of them are wrapped transparently so the underlying
//! message is what the user sees.

use thiserror::Error;

/// Errors that can occur during CLI operations.
#[derive(Error, Debug)]
pub enum PaperchatCliError {
  /// Errors from user interaction prompts
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Errors from the underlying paperchat library
  #[error(transparent)]
  Paperchat(#[from] paperchat::errors::PaperchatError),

  /// File system and IO operation errors
  #[error(transparent)]
  IO(#[from] std::io::Error),

  /// The rolling log file could not be created
  #[error(transparent)]
  LogFile(#[from] tracing_appender::rolling::InitError),
}
