//! Site mapping: base URL and search term to ordered candidate pages.

use crate::pipeline::tracker::RunTracker;
use crate::traits::site::{SiteMap, SiteMapper};

/// Collapse a mapping response into one ordered candidate list.
///
/// Precedence: `urls` when present and non-empty, then `links`, then empty.
/// Order is preserved and duplicates are kept.
pub fn normalize_candidates(map: SiteMap) -> Vec<String> {
    match map.urls {
        Some(urls) if !urls.is_empty() => urls,
        _ => map.links.unwrap_or_default(),
    }
}

/// Map a site. Transport and shape errors yield an empty list.
pub async fn map_site<M: SiteMapper + ?Sized>(
    mapper: &M,
    base_url: &str,
    search_term: &str,
    tracker: &mut RunTracker<'_>,
) -> Vec<String> {
    tracker.log(format!("Mapping website structure: {}", base_url));

    match mapper.map_site(base_url, search_term).await {
        Ok(map) => {
            let candidates = normalize_candidates(map);
            if candidates.is_empty() {
                tracker.log("No relevant pages found");
            } else {
                tracker.log(format!("Found {} potential pages", candidates.len()));
            }
            candidates
        }
        Err(e) => {
            tracker.warn(format!("Error during site mapping: {}", e));
            Vec::new()
        }
    }
}
