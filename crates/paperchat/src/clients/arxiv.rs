//! Topic search against the arXiv query API.
//!
//! The client uses arXiv's Atom feed API (http://export.arxiv.org/api/query) and asks for the most
//! recently submitted papers matching `all:<topic>`. It can also be pointed at a same-origin relay
//! (see [`crate::relay`]) that performs that query on its behalf and hands back the same XML.
//!
//! # Examples
//!
//! ```no_run
//! use paperchat::clients::{SearchClient, SearchEndpoint};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Straight to arXiv
//! let direct = SearchClient::default();
//! let papers = direct.try_search_papers("homomorphic encryption").await?;
//!
//! // Through a relay running on localhost
//! let relayed = SearchClient::new(SearchEndpoint::Relay { url: "http://localhost:5000/info".into() });
//! let papers = relayed.search_papers("homomorphic encryption").await;
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::config::{SearchConfig, SearchMode};

/// Default arXiv query endpoint.
pub const ARXIV_QUERY_URL: &str = "http://export.arxiv.org/api/query";

/// Default number of results requested from arXiv.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Where a [`SearchClient`] sends its queries.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SearchEndpoint {
  /// The arXiv query API itself.
  Direct {
    /// Query endpoint URL
    url:         String,
    /// Number of papers to ask for
    max_results: usize,
  },
  /// A relay that takes a `topic` parameter and answers with the arXiv feed.
  Relay {
    /// Relay endpoint URL
    url: String,
  },
}

impl Default for SearchEndpoint {
  fn default() -> Self {
    SearchEndpoint::Direct { url: ARXIV_QUERY_URL.to_string(), max_results: DEFAULT_MAX_RESULTS }
  }
}

/// Client for topic searches.
#[derive(Debug, Clone)]
pub struct SearchClient {
  /// Internal web client used to connect to the API.
  client:   reqwest::Client,
  /// Where queries go.
  endpoint: SearchEndpoint,
}

impl SearchClient {
  /// Creates a search client for the given endpoint.
  pub fn new(endpoint: SearchEndpoint) -> Self { Self { client: reqwest::Client::new(), endpoint } }

  /// Creates a search client from the `[search]` configuration section.
  pub fn from_config(config: &SearchConfig) -> Self {
    let endpoint = match config.mode {
      SearchMode::Direct =>
        SearchEndpoint::Direct { url: config.arxiv_url.clone(), max_results: config.max_results },
      SearchMode::Relay => SearchEndpoint::Relay { url: config.relay_url.clone() },
    };
    Self::new(endpoint)
  }

  /// The endpoint this client queries.
  pub fn endpoint(&self) -> &SearchEndpoint { &self.endpoint }

  /// Fetches the raw feed text for `topic`.
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The network request fails
  /// - The endpoint answers with a non-success status
  pub async fn search(&self, topic: &str) -> Result<String, PaperchatError> {
    let request = match &self.endpoint {
      SearchEndpoint::Direct { url, max_results } => self.client.get(url).query(&[
        ("search_query", format!("all:{topic}")),
        ("start", "0".to_string()),
        ("max_results", max_results.to_string()),
        ("sortBy", "submittedDate".to_string()),
        ("sortOrder", "descending".to_string()),
      ]),
      SearchEndpoint::Relay { url } => self.client.get(url).query(&[("topic", topic)]),
    };

    let response = check_status(request.send().await?)?;
    debug!("Searched via: {}", response.url());

    let body = response.text().await?;
    trace!("Search response: {body}");
    Ok(body)
  }

  /// Searches for `topic` and parses the feed.
  ///
  /// # Errors
  ///
  /// Fails like [`SearchClient::search`], and with [`PaperchatError::Feed`] when the response is
  /// not a readable feed.
  pub async fn try_search_papers(&self, topic: &str) -> Result<Vec<PaperRecord>, PaperchatError> {
    let body = self.search(topic).await?;
    feed::try_parse_feed(&body)
  }

  /// Searches for `topic`, yielding an empty list on any failure.
  ///
  /// Failures are logged at `error` level.
  pub async fn search_papers(&self, topic: &str) -> Vec<PaperRecord> {
    match self.search(topic).await {
      Ok(body) => feed::parse_feed(&body),
      Err(e) => {
        error!("Error fetching arXiv papers: {e}");
        Vec::new()
      },
    }
  }
}

impl Default for SearchClient {
  fn default() -> Self { Self::new(SearchEndpoint::default()) }
}
