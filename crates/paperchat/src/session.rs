//! The screen state machine behind one search-to-conversation interaction.
//!
//! A [`Session`] moves through three screens:
//!
//! ```text
//!             search              select paper
//! TopicEntry ────────▶ PaperList ──────────────▶ Conversation
//!            ◀──────── back      ◀────────────── back
//! ```
//!
//! All transitions are synchronous and do no I/O. The two that wait on the network are split in
//! half: `begin_*` records the request and hands out a [`Ticket`], `finish_*` applies the result.
//! Navigating away (back, or selecting another paper) invalidates outstanding tickets, so a result
//! that arrives late is dropped instead of landing on the wrong screen.
//!
//! Transitions attempted from the wrong screen, or a blank message, are ignored: they return
//! `None`/`false` and leave the session untouched.
//!
//! # Examples
//!
//! ```
//! use paperchat::{session::{Screen, Session}, Message, PaperRecord};
//!
//! let mut session = Session::new();
//! let ticket = session.begin_search("graphs").unwrap();
//!
//! let paper = PaperRecord {
//!   id:         1,
//!   title:      "Notes on Y".into(),
//!   summary:    "Y, briefly.".into(),
//!   source_url: None,
//! };
//! assert!(session.finish_search(ticket, vec![paper.clone()]));
//! assert_eq!(session.screen(), Screen::PaperList);
//!
//! session.select_paper(paper);
//! let pending = session.begin_message("What is Y?").unwrap();
//! session.finish_message(pending.ticket, Message::assistant("Y is a letter."));
//! assert_eq!(session.history().len(), 3);
//! ```

use super::*;
use crate::clients::PaperInfo;

/// Which screen a [`Session`] is on.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Screen {
  /// Waiting for a search topic.
  #[default]
  TopicEntry,
  /// Showing search results.
  PaperList,
  /// Discussing the selected paper.
  Conversation,
}

/// Proof that a request was started while the session was in a given state.
///
/// Returned by [`Session::begin_search`] and [`Session::begin_message`]; the matching `finish_*`
/// only applies its result if no navigation happened in between.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Ticket {
  /// Session generation when the request started
  generation: u64,
}

/// Everything needed to forward a message, captured when it was sent.
#[derive(Debug, Clone)]
pub struct PendingReply {
  /// Ticket to hand back to [`Session::finish_message`]
  pub ticket:  Ticket,
  /// History including the new user message
  pub history: Vec<Message>,
  /// The paper under discussion
  pub paper:   PaperInfo,
}

/// State of one search-to-conversation interaction.
#[derive(Debug, Clone, Default)]
pub struct Session {
  /// Active screen
  screen:     Screen,
  /// Topic of the last search, empty on the topic entry screen
  topic:      String,
  /// Papers found by the last search
  results:    Vec<PaperRecord>,
  /// Paper under discussion, only set on the conversation screen
  selected:   Option<PaperRecord>,
  /// Conversation so far, only non-empty on the conversation screen
  history:    Vec<Message>,
  /// Bumped on every navigation that makes outstanding requests irrelevant
  generation: u64,
}

impl Session {
  /// Creates a session on the topic entry screen.
  pub fn new() -> Self { Self::default() }

  /// The active screen.
  pub fn screen(&self) -> Screen { self.screen }

  /// The topic of the current search.
  pub fn topic(&self) -> &str { &self.topic }

  /// The current search results.
  pub fn results(&self) -> &[PaperRecord] { &self.results }

  /// The paper under discussion.
  pub fn selected(&self) -> Option<&PaperRecord> { self.selected.as_ref() }

  /// The conversation so far.
  pub fn history(&self) -> &[Message] { &self.history }

  /// Other papers from the same search, offered alongside the conversation.
  ///
  /// Empty outside the conversation screen.
  pub fn recommendations(&self) -> Vec<&PaperRecord> {
    match &self.selected {
      Some(selected) => self.results.iter().filter(|paper| paper.id != selected.id).collect(),
      None => Vec::new(),
    }
  }

  /// Whether a result started under `ticket` would still be applied.
  pub fn is_current(&self, ticket: Ticket) -> bool { ticket.generation == self.generation }

  /// Hands out a ticket for the current state and invalidates older ones.
  fn advance(&mut self) -> Ticket {
    self.generation += 1;
    Ticket { generation: self.generation }
  }

  /// Starts a search for `topic`.
  ///
  /// Only valid on the topic entry screen. Starting a second search before the first finishes
  /// makes the first one stale.
  pub fn begin_search(&mut self, topic: &str) -> Option<Ticket> {
    if self.screen != Screen::TopicEntry {
      debug!("Ignoring search on {:?} screen", self.screen);
      return None;
    }
    self.topic = topic.to_string();
    Some(self.advance())
  }

  /// Applies search results and moves to the paper list.
  ///
  /// A failed search should finish with an empty list. Returns `false` (and changes nothing) if
  /// the ticket is stale.
  pub fn finish_search(&mut self, ticket: Ticket, results: Vec<PaperRecord>) -> bool {
    if !self.is_current(ticket) || self.screen != Screen::TopicEntry {
      debug!("Dropping stale search results for {:?}", self.topic);
      return false;
    }
    self.results = results;
    self.screen = Screen::PaperList;
    true
  }

  /// Opens a conversation about `paper`.
  ///
  /// Only valid on the paper list screen. The history is reset to the assistant's framing message.
  pub fn select_paper(&mut self, paper: PaperRecord) -> bool {
    if self.screen != Screen::PaperList {
      debug!("Ignoring paper selection on {:?} screen", self.screen);
      return false;
    }
    self.history = vec![Message::framing(&paper.title)];
    self.selected = Some(paper);
    self.screen = Screen::Conversation;
    self.advance();
    true
  }

  /// Opens a conversation about the result with the given list position.
  ///
  /// Returns `false` if no current result has that id.
  pub fn select_by_id(&mut self, id: usize) -> bool {
    match self.results.iter().find(|paper| paper.id == id).cloned() {
      Some(paper) => self.select_paper(paper),
      None => false,
    }
  }

  /// Appends a user message and captures what the chat endpoint needs.
  ///
  /// Only valid on the conversation screen; blank text is ignored.
  pub fn begin_message(&mut self, text: &str) -> Option<PendingReply> {
    if text.trim().is_empty() {
      return None;
    }
    let paper = match (&self.screen, &self.selected) {
      (Screen::Conversation, Some(paper)) => PaperInfo::from(paper),
      _ => {
        debug!("Ignoring message on {:?} screen", self.screen);
        return None;
      },
    };

    self.history.push(Message::user(text));
    Some(PendingReply {
      ticket: Ticket { generation: self.generation },
      history: self.history.clone(),
      paper,
    })
  }

  /// Appends the assistant's reply (or the fallback) to the conversation.
  ///
  /// Returns `false` (and changes nothing) if the user left the conversation since the message was
  /// sent.
  pub fn finish_message(&mut self, ticket: Ticket, reply: Message) -> bool {
    if !self.is_current(ticket) || self.screen != Screen::Conversation {
      debug!("Dropping stale chat reply");
      return false;
    }
    self.history.push(reply);
    true
  }

  /// Goes back one screen.
  ///
  /// From the conversation, the selection and history are cleared and the results kept. From the
  /// paper list, the results and topic are cleared. On the topic entry screen this does nothing and
  /// returns `false`.
  pub fn back(&mut self) -> bool {
    match self.screen {
      Screen::Conversation => {
        self.selected = None;
        self.history.clear();
        self.screen = Screen::PaperList;
      },
      Screen::PaperList => {
        self.results.clear();
        self.topic.clear();
        self.screen = Screen::TopicEntry;
      },
      Screen::TopicEntry => return false,
    }
    self.advance();
    true
  }
}
