use axum::Router;
use tokio::net::TcpListener;

use super::*;

/// A two-entry arXiv feed, trimmed to what a real response carries around the entries.
pub(crate) const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query?search_query%3Dall%3Ax" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=all:x&amp;id_list=&amp;start=0&amp;max_results=10</title>
  <id>http://arxiv.org/api/9RrHNXgcOL7CUS9AbOBzVpxHLXQ</id>
  <updated>2024-05-01T00:00:00-04:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">2</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/2101.00001v1</id>
    <updated>2021-01-01T18:00:00Z</updated>
    <published>2021-01-01T18:00:00Z</published>
    <title>A Study of X</title>
    <summary>  We study X and find
that it is &lt;interesting&gt;.
</summary>
    <author>
      <name>Ada Lovelace</name>
    </author>
    <link href="http://arxiv.org/abs/2101.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2101.00001v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.CR" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.CR" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2101.00002v2</id>
    <updated>2021-01-02T18:00:00Z</updated>
    <published>2021-01-02T18:00:00Z</published>
    <title>Notes on Y</title>
    <summary>Y, briefly.</summary>
    <author>
      <name>Charles Babbage</name>
    </author>
  </entry>
</feed>
"#;

/// Serves `router` on a free local port and returns its base URL.
pub(crate) async fn serve(router: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
  format!("http://{addr}")
}

/// A URL on a local port nothing is listening on.
pub(crate) async fn unreachable_url() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);
  format!("http://{addr}/unreachable")
}

#[test]
fn test_two_entry_example() {
  let papers = feed::parse_feed(FEED);
  assert_eq!(papers.len(), 2);
  assert_eq!((papers[0].id, papers[0].title.as_str()), (1, "A Study of X"));
  assert_eq!((papers[1].id, papers[1].title.as_str()), (2, "Notes on Y"));
  assert_eq!(papers[0].summary, "We study X and find that it is <interesting>.");
}

#[traced_test]
#[tokio::test]
async fn test_search_select_chat_back() -> anyhow::Result<()> {
  use axum::routing::get;

  let base = serve(Router::new().route("/info", get(|| async { FEED }))).await;
  let mut config = Config::default();
  config.search.mode = config::SearchMode::Relay;
  config.search.relay_url = format!("{base}/info");
  config.chat.url = unreachable_url().await;

  let mut controller = controller::Controller::new(&config);
  controller.search("x").await;
  let first = controller.session().results()[0].clone();

  assert!(controller.select_paper(first.clone()));
  assert_eq!(controller.session().history().len(), 1);
  assert_eq!(controller.session().selected(), Some(&first));

  controller.send_message("Tell me more").await;
  assert_eq!(
    controller.session().history()[1..],
    [Message::user("Tell me more"), Message::fallback()]
  );

  assert!(controller.back());
  assert_eq!(controller.session().screen(), session::Screen::PaperList);
  assert_eq!(controller.session().results().len(), 2);

  assert!(controller.back());
  assert_eq!(controller.session().screen(), session::Screen::TopicEntry);
  assert_eq!(controller.session().topic(), "");
  assert!(controller.session().results().is_empty());
  Ok(())
}
