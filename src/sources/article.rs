//! Article text extraction: URL → full text, or a reject reason.

use reqwest::Client;
use scraper::{Html, Selector};

use crate::models::{Article, ArticleRef, Extraction, RejectReason};
use crate::utils::{normalize_whitespace, word_count};

pub struct ArticleExtractor {
    client: Client,
    paragraph: Selector,
    min_words: usize,
}

impl ArticleExtractor {
    pub fn new(client: Client, min_words: usize) -> Self {
        Self {
            client,
            paragraph: Selector::parse("p").unwrap(),
            min_words,
        }
    }

    /// Download one article and pull the readable text out of its
    /// paragraph elements. Every failure is a per-article rejection
    /// inspected by the caller, never an error that could end the run.
    pub async fn extract(&self, article: &ArticleRef) -> Extraction {
        let html = match self.download(&article.link).await {
            Ok(html) => html,
            Err(e) => return Extraction::Rejected(RejectReason::Fetch(e.to_string())),
        };
        self.assess(paragraph_text(&html, &self.paragraph), article)
    }

    async fn download(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    fn assess(&self, text: String, article: &ArticleRef) -> Extraction {
        if text.is_empty() {
            return Extraction::Rejected(RejectReason::Empty);
        }
        let words = word_count(&text);
        if words < self.min_words {
            return Extraction::Rejected(RejectReason::TooShort {
                words,
                min: self.min_words,
            });
        }
        Extraction::Extracted(Article {
            text,
            title: article.title.clone(),
            link: article.link.clone(),
        })
    }
}

/// Join the text of all `<p>` elements and collapse whitespace.
fn paragraph_text(html: &str, paragraph: &Selector) -> String {
    let document = Html::parse_document(html);
    let joined = document
        .select(paragraph)
        .flat_map(|p| p.text())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_whitespace(&joined)
}
