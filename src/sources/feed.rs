//! Feed polling: one feed URL → a bounded list of article references.

use reqwest::Client;
use rss::Channel;

use crate::error::FeedError;
use crate::models::ArticleRef;

pub struct FeedReader {
    client: Client,
}

impl FeedReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and parse a feed, returning at most `limit` entries in feed
    /// order. Entries without a link are dropped; a missing title becomes
    /// an empty string.
    pub async fn fetch(&self, feed_url: &str, limit: usize) -> Result<Vec<ArticleRef>, FeedError> {
        let content = self
            .client
            .get(feed_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let channel = Channel::read_from(&content[..])?;
        Ok(entries_from(&channel, limit))
    }
}

fn entries_from(channel: &Channel, limit: usize) -> Vec<ArticleRef> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            item.link().map(|link| ArticleRef {
                link: link.to_string(),
                title: item.title().unwrap_or_default().to_string(),
            })
        })
        .take(limit)
        .collect()
}
