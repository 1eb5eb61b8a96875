//! Paper records produced by a search, and arXiv identifier extraction.
//!
//! A [`PaperRecord`] is what the user picks from the result list. Its `id` is only the position in
//! that list; the stable handle is the arXiv identifier inside `source_url`, which
//! [`extract_arxiv_id`] pulls out for the download endpoint.
//!
//! # Examples
//!
//! ```
//! use paperchat::paper::extract_arxiv_id;
//!
//! assert_eq!(extract_arxiv_id(Some("https://arxiv.org/abs/2101.00001")), Some("2101.00001".into()));
//! assert_eq!(extract_arxiv_id(None), None);
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::*;

/// One paper from a search result.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// 1-based position in the result list it was parsed from
  pub id:         usize,
  /// The paper's title, whitespace-collapsed
  pub title:      String,
  /// The paper's abstract, whitespace-collapsed
  pub summary:    String,
  /// The entry's `id` URL (e.g. "http://arxiv.org/abs/2301.07041v1"), if the feed had one
  pub source_url: Option<String>,
}

impl PaperRecord {
  /// The arXiv identifier found in this paper's source URL.
  pub fn arxiv_id(&self) -> Option<String> { extract_arxiv_id(self.source_url.as_deref()) }

  /// Link to the paper's PDF on arxiv.org, when an identifier is available.
  pub fn pdf_url(&self) -> Option<String> {
    self.arxiv_id().map(|id| format!("https://arxiv.org/pdf/{id}"))
  }
}

/// Extracts the arXiv identifier from a URL of the form `.../abs/<id>`.
///
/// The identifier may contain word characters, dots and dashes. New-style identifiers
/// (`2301.07041v2`) come through whole; for old-style ones (`hep-th/9901001`) only the part before
/// the slash matches. Returns `None` when the URL is absent or has no `abs/` segment.
pub fn extract_arxiv_id(url: Option<&str>) -> Option<String> {
  lazy_static! {
      static ref ABS_ID: Regex = Regex::new(r"abs/([\w.-]+)").unwrap();
  }

  let url = url?;
  ABS_ID.captures(url).and_then(|cap| cap.get(1)).map(|m| m.as_str().to_string())
}
