//! Asking a remote service to download a paper's PDF.
//!
//! The service is given the arXiv identifier and the title, and fetches and stores the PDF on its
//! side. Its success payload is not specified; it is returned as raw JSON.

use serde_json::Value;

use super::*;

/// Default download endpoint.
pub const DEFAULT_DOWNLOAD_URL: &str = "http://localhost:5000/download-arxiv-pdf";

/// Request body for the download endpoint.
#[derive(Debug, Serialize)]
struct DownloadRequest<'a> {
  /// Identifier extracted from the paper's `abs` URL
  #[serde(rename = "arXiv_id")]
  arxiv_id:    &'a str,
  /// Title of the paper, used by the service to name the file
  paper_title: &'a str,
}

/// Client for the download endpoint.
#[derive(Debug, Clone)]
pub struct DownloadClient {
  /// Internal web client used to connect to the endpoint.
  client: reqwest::Client,
  /// Download endpoint URL.
  url:    String,
}

impl DownloadClient {
  /// Creates a download client posting to `url`.
  pub fn new(url: impl Into<String>) -> Self { Self { client: reqwest::Client::new(), url: url.into() } }

  /// The endpoint this client posts to.
  pub fn url(&self) -> &str { &self.url }

  /// Requests a download of the paper with the given identifier.
  ///
  /// Returns whatever JSON the service answers with; an empty or non-JSON success body comes back
  /// as [`Value::Null`].
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The network request fails
  /// - The endpoint answers with a non-success status
  pub async fn request(&self, arxiv_id: &str, title: &str) -> Result<Value, PaperchatError> {
    debug!("Requesting download of {arxiv_id} from {}", self.url);

    let body = DownloadRequest { arxiv_id, paper_title: title };
    let response = self.client.post(&self.url).json(&body).send().await?;
    let text = check_status(response)?.text().await?;

    Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
  }

  /// Requests a download of `paper`, using the identifier in its source URL.
  ///
  /// # Errors
  ///
  /// Returns [`PaperchatError::MissingIdentifier`] without sending anything when the paper has no
  /// `abs` URL, and otherwise fails like [`DownloadClient::request`].
  pub async fn request_paper(&self, paper: &PaperRecord) -> Result<Value, PaperchatError> {
    let arxiv_id = paper.arxiv_id().ok_or(PaperchatError::MissingIdentifier)?;
    self.request(&arxiv_id, &paper.title).await
  }
}

impl Default for DownloadClient {
  fn default() -> Self { Self::new(DEFAULT_DOWNLOAD_URL) }
}
