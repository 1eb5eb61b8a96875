//! Drives a [`Session`] with real network calls.
//!
//! The [`Controller`] owns one session plus the search, chat and download clients, and is the only
//! place where request results are written back into session state. Failures never surface here:
//! a failed search lands on an empty paper list, a failed chat turn gets the fallback reply, and a
//! failed download is only logged.

use serde_json::Value;

use super::*;

/// Owns a session and the clients that act on it.
#[derive(Debug, Clone)]
pub struct Controller {
  /// The state machine
  session:  Session,
  /// Topic search
  search:   SearchClient,
  /// Chat forwarding
  chat:     ChatClient,
  /// PDF download requests
  download: DownloadClient,
}

impl Controller {
  /// Creates a controller with clients built from `config`.
  pub fn new(config: &Config) -> Self {
    Self::with_clients(
      SearchClient::from_config(&config.search),
      ChatClient::new(config.chat.url.clone()),
      DownloadClient::new(config.download.url.clone()),
    )
  }

  /// Creates a controller from already-built clients.
  pub fn with_clients(search: SearchClient, chat: ChatClient, download: DownloadClient) -> Self {
    Self { session: Session::new(), search, chat, download }
  }

  /// The current session state.
  pub fn session(&self) -> &Session { &self.session }

  /// Searches for `topic` and moves to the paper list.
  ///
  /// Ignored unless on the topic entry screen. Returns the number of papers found, or `None` if the
  /// search was ignored.
  pub async fn search(&mut self, topic: &str) -> Option<usize> {
    let ticket = self.session.begin_search(topic)?;
    let papers = self.search.search_papers(topic).await;
    let found = papers.len();
    self.session.finish_search(ticket, papers).then_some(found)
  }

  /// Opens a conversation about `paper`.
  pub fn select_paper(&mut self, paper: PaperRecord) -> bool { self.session.select_paper(paper) }

  /// Opens a conversation about the result with list position `id`.
  pub fn select_by_id(&mut self, id: usize) -> bool { self.session.select_by_id(id) }

  /// Sends `text` and waits for the reply.
  ///
  /// Ignored for blank text or outside a conversation. Returns the reply that was appended, which
  /// is the fallback message if the chat endpoint failed.
  pub async fn send_message(&mut self, text: &str) -> Option<Message> {
    let pending = self.session.begin_message(text)?;
    let reply = self.chat.reply(&pending.history, pending.paper).await;
    self.session.finish_message(pending.ticket, reply.clone()).then_some(reply)
  }

  /// Goes back one screen.
  pub fn back(&mut self) -> bool { self.session.back() }

  /// Requests a PDF download of the selected paper.
  ///
  /// The outcome is logged and returned for display, but never recorded in the session. No request
  /// is made without a selection or without an arXiv identifier.
  pub async fn download(&self) -> Result<Value, PaperchatError> {
    let result = match self.session.selected() {
      Some(paper) => self.download.request_paper(paper).await,
      None => Err(PaperchatError::NoSelection),
    };

    match &result {
      Ok(payload) => debug!("Download accepted: {payload}"),
      Err(e) if matches!(e, PaperchatError::NoSelection | PaperchatError::MissingIdentifier) =>
        warn!("Not requesting download: {e}"),
      Err(e) => error!("Error downloading PDF: {e}"),
    }
    result
  }
}

impl Default for Controller {
  fn default() -> Self { Self::new(&Config::default()) }
}
