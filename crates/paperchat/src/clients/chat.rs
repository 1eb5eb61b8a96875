//! Forwarding the conversation to the chat endpoint.
//!
//! The endpoint receives the whole history on every turn, together with the title and abstract of
//! the paper under discussion, and answers with a single message:
//!
//! ```text
//! POST /chat
//! { "chatHistory": [{ "role": "assistant", "content": "..." }, ...],
//!   "paperInfo":   { "title": "...", "summary": "..." } }
//!
//! 200 OK
//! { "role": "assistant", "content": "..." }
//! ```

use super::*;

/// Default chat endpoint.
pub const DEFAULT_CHAT_URL: &str = "http://localhost:5000/chat";

/// The paper metadata sent along with each chat request.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaperInfo {
  /// Title of the paper under discussion
  pub title:   String,
  /// Its abstract
  pub summary: String,
}

impl From<&PaperRecord> for PaperInfo {
  fn from(paper: &PaperRecord) -> Self {
    Self { title: paper.title.clone(), summary: paper.summary.clone() }
  }
}

/// Request body for the chat endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
  /// Everything said so far, oldest first
  chat_history: &'a [Message],
  /// The selected paper
  paper_info:   &'a PaperInfo,
}

/// Client for the chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
  /// Internal web client used to connect to the endpoint.
  client: reqwest::Client,
  /// Chat endpoint URL.
  url:    String,
}

impl ChatClient {
  /// Creates a chat client posting to `url`.
  pub fn new(url: impl Into<String>) -> Self { Self { client: reqwest::Client::new(), url: url.into() } }

  /// The endpoint this client posts to.
  pub fn url(&self) -> &str { &self.url }

  /// Sends the history and paper metadata, returning the endpoint's reply.
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The network request fails
  /// - The endpoint answers with a non-success status
  /// - The reply is not a JSON message
  pub async fn try_reply(
    &self,
    history: &[Message],
    paper: &PaperInfo,
  ) -> Result<Message, PaperchatError> {
    debug!("Forwarding {} messages to {}", history.len(), self.url);

    let request = ChatRequest { chat_history: history, paper_info: paper };
    let response = self.client.post(&self.url).json(&request).send().await?;
    let reply = check_status(response)?.json::<Message>().await?;

    trace!("Chat reply: {reply:?}");
    Ok(reply)
  }

  /// Sends the history and paper metadata, substituting [`Message::fallback`] on any failure.
  ///
  /// Failures are logged at `error` level.
  pub async fn reply(&self, history: &[Message], paper: impl Into<PaperInfo>) -> Message {
    match self.try_reply(history, &paper.into()).await {
      Ok(reply) => reply,
      Err(e) => {
        error!("Error getting response from chat endpoint: {e}");
        Message::fallback()
      },
    }
  }
}

impl Default for ChatClient {
  fn default() -> Self { Self::new(DEFAULT_CHAT_URL) }
}

#[cfg(test)]
mod tests {
  use axum::{http::StatusCode, routing::post, Json, Router};
  use serde_json::{json, Value};

  use super::*;
  use crate::tests::{serve, unreachable_url};

  fn paper() -> PaperInfo { PaperInfo { title: "A Study of X".into(), summary: "We study X.".into() } }

  #[tokio::test]
  async fn test_request_shape_and_reply() -> anyhow::Result<()> {
    let router = Router::new().route(
      "/chat",
      post(|Json(body): Json<Value>| async move {
        assert_eq!(
          body,
          json!({
            "chatHistory": [
              { "role": "assistant", "content": "Great! Let's discuss the paper titled \"A Study of X\". What would you like to know about it?" },
              { "role": "user", "content": "Why X?" }
            ],
            "paperInfo": { "title": "A Study of X", "summary": "We study X." }
          })
        );
        Json(json!({ "content": "Because X matters.", "role": "assistant" }))
      }),
    );
    let base = serve(router).await;
    let client = ChatClient::new(format!("{base}/chat"));

    let history = [Message::framing("A Study of X"), Message::user("Why X?")];
    let reply = client.try_reply(&history, &paper()).await?;
    assert_eq!(reply, Message::assistant("Because X matters."));
    Ok(())
  }

  #[traced_test]
  #[tokio::test]
  async fn test_server_error_yields_fallback() {
    let router = Router::new().route(
      "/chat",
      post(|| async {
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "content": "upstream exploded", "role": "assistant" })),
        )
      }),
    );
    let base = serve(router).await;
    let client = ChatClient::new(format!("{base}/chat"));

    let reply = client.reply(&[Message::user("hello")], paper()).await;
    assert_eq!(reply, Message::fallback());
    assert!(logs_contain("Error getting response from chat endpoint"));
  }

  #[tokio::test]
  async fn test_undecodable_reply_yields_fallback() {
    let router = Router::new().route("/chat", post(|| async { "not json" }));
    let base = serve(router).await;
    let client = ChatClient::new(format!("{base}/chat"));

    assert!(client.try_reply(&[], &paper()).await.is_err());
    assert_eq!(client.reply(&[], paper()).await, Message::fallback());
  }

  #[tokio::test]
  async fn test_unreachable_endpoint_yields_fallback() {
    let client = ChatClient::new(unreachable_url().await);
    assert_eq!(client.reply(&[Message::user("hello")], paper()).await, Message::fallback());
  }
}
