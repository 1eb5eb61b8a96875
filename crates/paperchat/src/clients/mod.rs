//! HTTP clients for the three remote services a session talks to.
//!
//! - [`arxiv`] - topic search against the arXiv query API, directly or through the relay
//! - [`chat`] - forwards the conversation to the chat endpoint
//! - [`download`] - asks the download endpoint to fetch a paper's PDF
//!
//! Each client holds one `reqwest::Client` and is cheap to clone. Every call has a `try_*` (or
//! plain) variant that returns [`PaperchatError`] and, where the session needs it, a variant that
//! logs the failure and degrades instead.
//!
//! # Examples
//!
//! ```no_run
//! use paperchat::{
//!   clients::{ChatClient, SearchClient},
//!   Message,
//! };
//!
//! # async fn example() {
//! let papers = SearchClient::default().search_papers("zero knowledge").await;
//! if let Some(paper) = papers.first() {
//!   let history = vec![Message::framing(&paper.title), Message::user("Summarize it.")];
//!   let reply = ChatClient::default().reply(&history, paper).await;
//!   println!("{}", reply.content);
//! }
//! # }
//! ```

pub mod arxiv;
pub mod chat;
pub mod download;

pub use arxiv::{SearchClient, SearchEndpoint};
pub use chat::{ChatClient, PaperInfo};
pub use download::DownloadClient;

use super::*;

/// Turns a non-success response into [`PaperchatError::Status`].
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PaperchatError> {
  let status = response.status();
  if status.is_success() {
    Ok(response)
  } else {
    Err(PaperchatError::Status { url: response.url().to_string(), status })
  }
}
