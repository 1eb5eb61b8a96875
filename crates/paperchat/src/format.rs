//! Text helpers for feed fields and terminal previews.
//!
//! arXiv wraps titles and abstracts across several indented lines. [`collapse_whitespace`] folds
//! them back into a single line, and [`preview`] shortens long text for list views without cutting
//! a word in half.
//!
//! # Examples
//!
//! ```
//! use paperchat::format;
//!
//! let title = "Attention Is\n  All You   Need";
//! assert_eq!(format::collapse_whitespace(title), "Attention Is All You Need");
//!
//! assert_eq!(format::preview("Attention Is All You Need", 14), "Attention Is...");
//! ```

/// Replaces every run of whitespace (including newlines) with a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Shortens `text` to at most `max_chars` characters, breaking at a word boundary.
///
/// The text is whitespace-collapsed first. If anything was cut, `...` is appended (the ellipsis is
/// not counted against `max_chars`). A single word longer than the limit is cut mid-word rather
/// than dropped.
///
/// ```
/// use paperchat::format::preview;
///
/// assert_eq!(preview("short", 50), "short");
/// assert_eq!(preview("This Is A Very Long Title Indeed", 20), "This Is A Very Long...");
/// assert_eq!(preview("Supercalifragilistic", 5), "Super...");
/// ```
pub fn preview(text: &str, max_chars: usize) -> String {
  let collapsed = collapse_whitespace(text);

  if collapsed.chars().count() <= max_chars {
    return collapsed;
  }

  let mut result = String::new();
  let mut used = 0;

  for (i, word) in collapsed.split(' ').enumerate() {
    let len = word.chars().count();
    let needed = if i > 0 { len + 1 } else { len };
    if used + needed > max_chars {
      break;
    }
    if i > 0 {
      result.push(' ');
    }
    result.push_str(word);
    used += needed;
  }

  if result.is_empty() {
    result = collapsed.chars().take(max_chars).collect();
  }

  result.push_str("...");
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_collapse_whitespace() {
    assert_eq!(collapse_whitespace("Hello World"), "Hello World");
    assert_eq!(collapse_whitespace("  leading and trailing  "), "leading and trailing");
    assert_eq!(collapse_whitespace("No    Extra    Spaces"), "No Extra Spaces");
    assert_eq!(collapse_whitespace("line\n  wrapped\n\ttitle"), "line wrapped title");
    assert_eq!(collapse_whitespace("   "), "");
  }

  #[test]
  fn test_preview() {
    assert_eq!(preview("short", 50), "short");
    assert_eq!(
      preview("This Is A Very Long Title Indeed", 50),
      "This Is A Very Long Title Indeed"
    );
    assert_eq!(preview("This Is A Very Long Title Indeed", 20), "This Is A Very Long...");
    assert_eq!(preview("This Is A Very Long Title Indeed", 25), "This Is A Very Long Title...");
    assert_eq!(preview("Supercalifragilistic", 5), "Super...");
    assert_eq!(preview("Ünïcödé wörds hérè", 13), "Ünïcödé wörds...");
  }
}
