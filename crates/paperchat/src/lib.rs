//! A library for searching arXiv by topic and holding a conversation about one of the papers
//! found, backed by a remote chat service.
//!
//! The pieces fit together like this:
//! - [`clients::SearchClient`] fetches the raw Atom feed for a topic, either straight from arXiv or
//!   through the same-origin [`relay`].
//! - [`feed::parse_feed`] turns that feed into numbered [`PaperRecord`]s.
//! - [`session::Session`] is the screen state machine (topic entry, paper list, conversation).
//! - [`clients::ChatClient`] and [`clients::DownloadClient`] act on the selected paper.
//! - [`controller::Controller`] owns a session and the clients and applies network results.
//!
//! # Example
//! ```rust,no_run
//! use paperchat::{config::Config, controller::Controller};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let mut controller = Controller::new(&Config::default());
//!
//!   controller.search("homomorphic encryption").await;
//!   if let Some(paper) = controller.session().results().first().cloned() {
//!     controller.select_paper(paper);
//!     controller.send_message("What problem does this paper solve?").await;
//!   }
//!
//!   for message in controller.session().history() {
//!     println!("{}: {}", message.role, message.content);
//!   }
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod clients;
pub mod config;
pub mod controller;
pub mod errors;
pub mod feed;
pub mod format;
pub mod message;
pub mod paper;
pub mod relay;
pub mod session;
#[cfg(test)] mod tests;

use clients::{ChatClient, DownloadClient, SearchClient};
use config::Config;
use errors::PaperchatError;
pub use message::{Message, Role};
pub use paper::{extract_arxiv_id, PaperRecord};
use session::Session;
