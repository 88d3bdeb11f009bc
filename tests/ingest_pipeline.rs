//! End-to-end ingestion runs against mocked collaborators: feed, article
//! pages, embedding service, and vector index.

use newsvec::models::Config;
use newsvec::services::IngestPipeline;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers `POST /embed` with one distinct vector per input text, so tests
/// can check that vector `i` ends up on chunk `i`.
struct EmbedResponder;

impl Respond for EmbedResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let count = body["texts"].as_array().map_or(0, |texts| texts.len());
        let embeddings: Vec<Vec<f32>> = (0..count).map(|i| vec![i as f32, 1.0, 0.0]).collect();
        ResponseTemplate::new(200).set_body_json(json!({ "embeddings": embeddings }))
    }
}

fn feed_xml(base: &str, items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, slug)| {
            format!("<item><title>{title}</title><link>{base}/articles/{slug}</link></item>")
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
<title>Test Feed</title>
<link>{base}</link>
<description>Feed for pipeline tests.</description>
{items}
</channel>
</rss>"#
    )
}

fn article_html(words: usize) -> String {
    let body = (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<html><body><p>{body}</p></body></html>")
}

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.embedding.url = server.uri();
    config.vector_store.url = server.uri();
    config.ingest.feeds = vec![format!("{}/feed.xml", server.uri())];
    config.ingest.flush_pause_ms = 0;
    config
}

async fn mount_index(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path("/collections/news_passages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/collections/news_passages/points"))
        .and(query_param("wait", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(server)
        .await;
}

async fn upsert_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/collections/news_passages/points")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_run_ingests_and_isolates_bad_articles() {
    let server = MockServer::start().await;
    mount_index(&server).await;

    let feed = feed_xml(
        &server.uri(),
        &[
            ("Long Article", "long"),
            ("Short Article", "short"),
            ("Broken Article", "broken"),
        ],
    );
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/long"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(120)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/short"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(10)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/broken"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(EmbedResponder)
        .mount(&server)
        .await;

    let pipeline = IngestPipeline::new(&test_config(&server)).unwrap();
    let stats = pipeline.run().await;

    assert_eq!(stats.feeds_polled, 1);
    assert_eq!(stats.articles_seen, 3);
    assert_eq!(stats.articles_ingested, 1);
    assert_eq!(stats.articles_rejected, 2);
    assert_eq!(stats.chunks_embedded, 1);
    assert_eq!(stats.points_upserted, 1);
    assert_eq!(stats.batches_flushed, 1);
    assert_eq!(stats.batches_failed, 0);

    // Collection is ensured with the configured dimension, cosine distance.
    let collection_bodies: Vec<Value> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/collections/news_passages")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(collection_bodies.len(), 1);
    assert_eq!(
        collection_bodies[0],
        json!({"vectors": {"size": 384, "distance": "Cosine"}})
    );

    // One upsert carrying exactly the payload shape the index expects.
    let bodies = upsert_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let points = bodies[0]["points"].as_array().unwrap();
    assert_eq!(points.len(), 1);
    let point = &points[0];
    assert!(!point["id"].as_str().unwrap().is_empty());
    assert_eq!(point["vector"].as_array().unwrap().len(), 3);
    assert_eq!(point["payload"]["title"], "Long Article");
    assert_eq!(
        point["payload"]["url"],
        format!("{}/articles/long", server.uri())
    );
    assert_eq!(point["payload"]["chunk_idx"], 0);
    assert!(
        point["payload"]["text"]
            .as_str()
            .unwrap()
            .starts_with("word0 ")
    );
}

#[tokio::test]
async fn test_multi_chunk_article_keeps_order() {
    let server = MockServer::start().await;
    mount_index(&server).await;

    let feed = feed_xml(&server.uri(), &[("Big Article", "big")]);
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/big"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(500)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(EmbedResponder)
        .mount(&server)
        .await;

    let pipeline = IngestPipeline::new(&test_config(&server)).unwrap();
    let stats = pipeline.run().await;

    assert_eq!(stats.chunks_embedded, 3);
    assert_eq!(stats.points_upserted, 3);

    let bodies = upsert_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let points = bodies[0]["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);

    // 500 words at 200/40 -> windows starting at words 0, 160, 320, and
    // each point carries the vector the embedder returned at its index.
    for (i, start_word) in ["word0", "word160", "word320"].iter().enumerate() {
        assert_eq!(points[i]["payload"]["chunk_idx"], i);
        assert!(
            points[i]["payload"]["text"]
                .as_str()
                .unwrap()
                .starts_with(&format!("{start_word} "))
        );
        assert_eq!(points[i]["vector"][0], json!(i as f32));
    }
}

#[tokio::test]
async fn test_feed_failure_does_not_abort_run() {
    let server = MockServer::start().await;
    mount_index(&server).await;

    let feed = feed_xml(&server.uri(), &[("Only Article", "only")]);
    Mock::given(method("GET"))
        .and(path("/good.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bad.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/only"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(80)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(EmbedResponder)
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.ingest.feeds = vec![
        format!("{}/bad.xml", server.uri()),
        format!("{}/good.xml", server.uri()),
    ];

    let stats = IngestPipeline::new(&config).unwrap().run().await;

    assert_eq!(stats.feeds_failed, 1);
    assert_eq!(stats.feeds_polled, 1);
    assert_eq!(stats.points_upserted, 1);
}

#[tokio::test]
async fn test_collection_init_failure_is_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/collections/news_passages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("index down"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/collections/news_passages/points"))
        .and(query_param("wait", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let feed = feed_xml(&server.uri(), &[("Only Article", "only")]);
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/only"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(80)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(EmbedResponder)
        .mount(&server)
        .await;

    let stats = IngestPipeline::new(&test_config(&server)).unwrap().run().await;

    assert_eq!(stats.points_upserted, 1);
    assert_eq!(stats.batches_flushed, 1);
}

#[tokio::test]
async fn test_embedding_failure_rejects_article_only() {
    let server = MockServer::start().await;
    mount_index(&server).await;

    let feed = feed_xml(
        &server.uri(),
        &[("First", "first"), ("Second", "second")],
    );
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/first"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(80)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/second"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(80)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model exploded"))
        .mount(&server)
        .await;

    let stats = IngestPipeline::new(&test_config(&server)).unwrap().run().await;

    assert_eq!(stats.articles_seen, 2);
    assert_eq!(stats.articles_ingested, 0);
    assert_eq!(stats.articles_rejected, 2);
    assert_eq!(stats.points_upserted, 0);
    assert!(upsert_bodies(&server).await.is_empty());
}
