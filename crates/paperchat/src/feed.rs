//! Parsing of arXiv's Atom search feed into [`PaperRecord`]s.
//!
//! The feed looks like this (trimmed to the parts we read):
//!
//! ```xml
//! <feed xmlns="http://www.w3.org/2005/Atom">
//!   <entry>
//!     <id>http://arxiv.org/abs/2301.07041v1</id>
//!     <title>Verifiable Fully Homomorphic Encryption</title>
//!     <summary>  Fully Homomorphic Encryption (FHE) is seeing ... </summary>
//!   </entry>
//! </feed>
//! ```
//!
//! Every other element (`author`, `link`, `category`, the feed header) is skipped.
//!
//! Entries are found wherever they sit among the feed's other children, and each field is the
//! text content of the first matching element inside the entry, so inline markup such as
//! `<i>O</i>` in a title contributes its text.

use quick_xml::{events::Event, Reader};

use super::*;

/// The entry fields we read.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Field {
  /// `<title>`
  Title,
  /// `<summary>`
  Summary,
  /// `<id>`, the arXiv abstract URL
  Id,
}

impl Field {
  fn from_local_name(name: &[u8]) -> Option<Self> {
    match name {
      b"title" => Some(Self::Title),
      b"summary" => Some(Self::Summary),
      b"id" => Some(Self::Id),
      _ => None,
    }
  }
}

/// Text collected from one `entry` element. Only the first occurrence of each field is kept.
#[derive(Debug, Default)]
struct Entry {
  /// Paper title
  title:     Option<String>,
  /// Paper abstract
  summary:   Option<String>,
  /// arXiv URL (e.g., "http://arxiv.org/abs/2301.07041v1")
  arxiv_url: Option<String>,
}

impl Entry {
  fn set(&mut self, field: Field, text: String) {
    let slot = match field {
      Field::Title => &mut self.title,
      Field::Summary => &mut self.summary,
      Field::Id => &mut self.arxiv_url,
    };
    slot.get_or_insert(text);
  }

  fn into_record(self, id: usize) -> PaperRecord {
    PaperRecord {
      id,
      title: format::collapse_whitespace(self.title.as_deref().unwrap_or_default()),
      summary: format::collapse_whitespace(self.summary.as_deref().unwrap_or_default()),
      source_url: self.arxiv_url.map(|url| url.trim().to_string()).filter(|url| !url.is_empty()),
    }
  }
}

/// An element we are inside of, remembered with the depth it was opened at.
#[derive(Debug)]
struct Open<T> {
  /// Nesting depth of the element's start tag, the root being 1
  depth: usize,
  /// What is being collected for it
  value: T,
}

fn feed_error(e: impl std::fmt::Display) -> PaperchatError { PaperchatError::Feed(e.to_string()) }

/// Parses feed text into records numbered `1..=N` in document order.
///
/// # Errors
///
/// Returns [`PaperchatError::Feed`] if the text is not a single well-formed XML document.
pub fn try_parse_feed(xml: &str) -> Result<Vec<PaperRecord>, PaperchatError> {
  let mut reader = Reader::from_str(xml);

  let mut depth = 0usize;
  let mut seen_root = false;
  let mut entries: Vec<Entry> = Vec::new();
  let mut entry: Option<Open<Entry>> = None;
  let mut field: Option<Open<(Field, String)>> = None;

  loop {
    match reader.read_event().map_err(feed_error)? {
      Event::Start(start) => {
        if depth == 0 && seen_root {
          return Err(feed_error("more than one root element"));
        }
        depth += 1;
        seen_root = true;

        let name = start.local_name();
        if entry.is_none() {
          if name.as_ref() == b"entry" {
            entry = Some(Open { depth, value: Entry::default() });
          }
        } else if field.is_none() {
          if let Some(kind) = Field::from_local_name(name.as_ref()) {
            field = Some(Open { depth, value: (kind, String::new()) });
          }
        }
      },

      Event::Empty(empty) => {
        if depth == 0 {
          if seen_root {
            return Err(feed_error("more than one root element"));
          }
          seen_root = true;
        }

        let name = empty.local_name();
        match &mut entry {
          None if name.as_ref() == b"entry" => entries.push(Entry::default()),
          Some(open) if field.is_none() =>
            if let Some(kind) = Field::from_local_name(name.as_ref()) {
              open.value.set(kind, String::new());
            },
          _ => {},
        }
      },

      Event::Text(text) => {
        let text = text.unescape().map_err(feed_error)?;
        match &mut field {
          Some(open) => open.value.1.push_str(&text),
          None if depth == 0 && !text.trim().is_empty() =>
            return Err(feed_error("text outside the root element")),
          None => {},
        }
      },

      Event::CData(cdata) => {
        if let Some(open) = &mut field {
          open.value.1.push_str(&String::from_utf8_lossy(&cdata));
        }
      },

      Event::End(_) => {
        if field.as_ref().is_some_and(|open| open.depth == depth) {
          if let (Some(Open { value: (kind, text), .. }), Some(open)) = (field.take(), &mut entry) {
            open.value.set(kind, text);
          }
        }
        if entry.as_ref().is_some_and(|open| open.depth == depth) {
          if let Some(open) = entry.take() {
            entries.push(open.value);
          }
        }
        depth = depth.checked_sub(1).ok_or_else(|| feed_error("unmatched end tag"))?;
      },

      Event::Eof => break,

      _ => {},
    }
  }

  if !seen_root {
    return Err(feed_error("no root element"));
  }
  if depth != 0 {
    return Err(feed_error("feed ends inside an open element"));
  }

  trace!("Read {} entries from feed", entries.len());
  Ok(entries.into_iter().enumerate().map(|(index, entry)| entry.into_record(index + 1)).collect())
}

/// Parses feed text into records, treating anything unreadable as an empty result.
///
/// The parse error is logged at `warn` level and otherwise dropped.
pub fn parse_feed(xml: &str) -> Vec<PaperRecord> {
  match try_parse_feed(xml) {
    Ok(papers) => {
      debug!("Parsed {} entries from feed", papers.len());
      papers
    },
    Err(e) => {
      warn!("Discarding unreadable feed: {e}");
      Vec::new()
    },
  }
}
