//! Page scanner: sequential scrape-and-classify over candidate pages.

use tracing::debug;

use crate::error::Result;
use crate::pipeline::classifier::classify;
use crate::pipeline::tracker::RunTracker;
use crate::traits::llm::LanguageModel;
use crate::traits::site::PageScraper;
use crate::types::config::ModelConfig;
use crate::types::run::ExtractionResult;

/// Page content beyond this many characters is not sent to the classifier.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// First `max_chars` characters of `content`, never splitting a code point.
pub fn truncate_content(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// Collaborators and settings shared by every page of a scan.
pub struct PageScanner<'a, S: ?Sized, L: ?Sized> {
    pub scraper: &'a S,
    pub model: &'a L,
    pub config: &'a ModelConfig,
}

impl<'a, S, L> PageScanner<'a, S, L>
where
    S: PageScraper + ?Sized,
    L: LanguageModel + ?Sized,
{
    pub fn new(scraper: &'a S, model: &'a L, config: &'a ModelConfig) -> Self {
        Self {
            scraper,
            model,
            config,
        }
    }

    /// Scan up to `max_pages` candidates in order, stopping at the first
    /// page that satisfies the objective.
    ///
    /// Per-page failures are logged and skipped.
    pub async fn scan(
        &self,
        candidates: &[String],
        objective: &str,
        max_pages: usize,
        tracker: &mut RunTracker<'_>,
    ) -> ExtractionResult {
        let scan_count = candidates.len().min(max_pages);
        if scan_count == 0 {
            debug!(candidates = candidates.len(), max_pages, "Nothing to scan");
            return ExtractionResult::NotFound;
        }

        tracker.log(format!("Beginning search across {} pages", scan_count));

        for (index, url) in candidates.iter().take(scan_count).enumerate() {
            tracker.begin_page(index, url, scan_count);

            match self.scan_page(url, objective).await {
                Ok(ExtractionResult::Found(data)) => {
                    tracker.log("Objective found!");
                    return ExtractionResult::Found(data);
                }
                Ok(ExtractionResult::NotFound) => {
                    tracker.log("Objective not found on this page");
                }
                Err(e) => {
                    tracker.warn(format!("Error processing page: {}", e));
                }
            }
        }

        ExtractionResult::NotFound
    }

    async fn scan_page(&self, url: &str, objective: &str) -> Result<ExtractionResult> {
        let markdown = self.scraper.scrape_markdown(url).await?;
        let content = truncate_content(&markdown, MAX_CONTENT_CHARS);

        debug!(
            url,
            chars = content.chars().count(),
            truncated = content.len() < markdown.len(),
            "Classifying page"
        );

        classify(self.model, self.config, content, objective).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestors::MockSite;
    use crate::testing::MockLanguageModel;
    use serde_json::json;

    fn candidates(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://a.com/{}", i)).collect()
    }

    fn site_with_pages(n: usize) -> MockSite {
        let site = MockSite::new();
        for url in candidates(n) {
            site.add_page(&url, format!("content of {}", url));
        }
        site
    }

    #[test]
    fn test_truncate_content_counts_chars() {
        assert_eq!(truncate_content("héllo", 2), "hé");
        assert_eq!(truncate_content("abc", 10), "abc");
        assert_eq!(truncate_content("", 0), "");

        let long = "é".repeat(MAX_CONTENT_CHARS + 5);
        assert_eq!(
            truncate_content(&long, MAX_CONTENT_CHARS).chars().count(),
            MAX_CONTENT_CHARS
        );
    }

    #[tokio::test]
    async fn test_no_candidates_makes_no_calls() {
        let site = MockSite::new();
        let model = MockLanguageModel::new();
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        let result = PageScanner::new(&site, &model, &config)
            .scan(&[], "Find email", 3, &mut tracker)
            .await;

        assert_eq!(result, ExtractionResult::NotFound);
        assert!(model.calls().is_empty());
        assert!(site.scrape_calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_max_pages_makes_no_calls() {
        let site = site_with_pages(2);
        let model = MockLanguageModel::new();
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        let result = PageScanner::new(&site, &model, &config)
            .scan(&candidates(2), "Find email", 0, &mut tracker)
            .await;

        assert_eq!(result, ExtractionResult::NotFound);
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stops_at_first_found_within_cap() {
        let site = site_with_pages(5);
        let model = MockLanguageModel::new()
            .with_reply("Objective not met")
            .with_reply(r#"{"found": true, "data": {"email": "a@b.com"}}"#)
            .with_reply(r#"{"found": true, "data": {"email": "wrong@b.com"}}"#);
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        let result = PageScanner::new(&site, &model, &config)
            .scan(&candidates(5), "Find email", 2, &mut tracker)
            .await;

        assert_eq!(result, ExtractionResult::Found(json!({"email": "a@b.com"})));
        assert_eq!(model.classification_count(), 2);
        assert_eq!(site.scrape_calls(), candidates(2));
    }

    #[tokio::test]
    async fn test_found_with_null_data_moves_on() {
        let site = site_with_pages(2);
        let model = MockLanguageModel::new()
            .with_reply(r#"{"found": true, "data": null}"#)
            .with_reply(r#"{"found": true, "data": {"email": "a@b.com"}}"#);
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        let result = PageScanner::new(&site, &model, &config)
            .scan(&candidates(2), "Find email", 3, &mut tracker)
            .await;

        assert_eq!(result, ExtractionResult::Found(json!({"email": "a@b.com"})));
        assert_eq!(model.classification_count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_reply_does_not_stop_scan() {
        let site = site_with_pages(2);
        let model = MockLanguageModel::new()
            .with_reply(r#"{"found": true, "data": {"#)
            .with_reply(r#"{"found": true, "data": {"ok": true}}"#);
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        let result = PageScanner::new(&site, &model, &config)
            .scan(&candidates(2), "Find", 3, &mut tracker)
            .await;

        assert_eq!(result, ExtractionResult::Found(json!({"ok": true})));
        assert!(tracker
            .state()
            .log
            .iter()
            .any(|entry| entry.starts_with("Error processing page")));
    }

    #[tokio::test]
    async fn test_scrape_failure_skips_page_without_model_call() {
        let site = site_with_pages(2).with_page_failure("https://a.com/1", "403 Forbidden");
        let model = MockLanguageModel::new().with_reply("Objective not met");
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        let result = PageScanner::new(&site, &model, &config)
            .scan(&candidates(2), "Find", 3, &mut tracker)
            .await;

        assert_eq!(result, ExtractionResult::NotFound);
        assert_eq!(model.classification_count(), 1);
        assert_eq!(tracker.state().pages_scanned, 2);
    }

    #[tokio::test]
    async fn test_content_is_truncated_before_classification() {
        let site = MockSite::new().with_page("https://a.com/long", "x".repeat(MAX_CONTENT_CHARS * 2));
        let model = MockLanguageModel::new();
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        PageScanner::new(&site, &model, &config)
            .scan(&["https://a.com/long".to_string()], "Find", 1, &mut tracker)
            .await;

        let user = &model.calls()[0].user;
        assert!(user.contains(&"x".repeat(MAX_CONTENT_CHARS)));
        assert!(!user.contains(&"x".repeat(MAX_CONTENT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_during_scan() {
        let site = site_with_pages(4);
        let model = MockLanguageModel::new();
        let config = ModelConfig::default();
        let mut tracker = RunTracker::detached();

        PageScanner::new(&site, &model, &config)
            .scan(&candidates(4), "Find", 4, &mut tracker)
            .await;

        assert_eq!(tracker.state().progress, 75.0);
        assert_eq!(tracker.state().current_index, 3);
    }
}
