//! Helpers for consumer views built on an [`Accumulator`].

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::accumulator::{Accumulator, LoadOutcome};
use crate::content::{ContentFilter, ContentItem, Tag};
use crate::traits::ContentSource;

/// What a [`fill_visible`] run achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillReport {
    /// Items passing the filter after the run.
    pub visible: usize,
    /// `load_more` calls made.
    pub rounds: usize,
    /// Outcome of the last call, if any call was made.
    pub last: Option<LoadOutcome>,
}

/// Load pages until at least `target` items pass `filter`.
///
/// Client-side filtering can leave a page with fewer matches than were
/// requested, so one "load more" may not visibly grow a filtered list. This
/// keeps asking until the target is met, the listing ends, a call makes no
/// progress, or `max_rounds` calls have been made.
pub async fn fill_visible<S: ContentSource>(
    accumulator: &Accumulator<S>,
    filter: Option<&ContentFilter>,
    target: usize,
    max_rounds: usize,
) -> FillReport {
    let mut report = FillReport {
        visible: accumulator.count_visible(filter),
        rounds: 0,
        last: None,
    };

    while report.visible < target && report.rounds < max_rounds {
        let outcome = accumulator
            .load_more(target - report.visible, filter)
            .await;
        report.rounds += 1;
        report.last = Some(outcome);
        report.visible = accumulator.count_visible(filter);

        if !matches!(outcome, LoadOutcome::Appended { .. }) {
            break;
        }
    }

    debug!(
        visible = report.visible,
        rounds = report.rounds,
        "fill finished"
    );
    report
}

/// How many items carry a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: Tag,
    pub count: usize,
}

/// Count items per tag, most used first, ties broken by slug.
pub fn tag_tally(items: &[ContentItem]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, TagCount> = BTreeMap::new();
    for item in items {
        for tag in &item.tags {
            counts
                .entry(tag.slug.as_str())
                .or_insert_with(|| TagCount {
                    tag: tag.clone(),
                    count: 0,
                })
                .count += 1;
        }
    }

    let mut tally: Vec<TagCount> = counts.into_values().collect();
    // BTreeMap order is by slug; a stable sort keeps it for ties.
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::Result;
    use crate::content::{Page, PageRequest};
    use crate::types::Slug;

    fn item(id: &str, tags: &[&str]) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: id.to_string(),
            slug: Slug::new(id).unwrap(),
            brief: None,
            cover_image: None,
            published_at: Utc::now(),
            tags: tags
                .iter()
                .map(|t| Tag::new(*t, Slug::new(t).unwrap()))
                .collect(),
        }
    }

    /// Serves `per_page` items per call from a fixed list; every third item
    /// is tagged `rust`.
    struct Numbered {
        total: usize,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl ContentSource for Numbered {
        async fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
            *self.calls.lock().unwrap() += 1;
            let start: usize = request.after.as_deref().map_or(0, |c| c.parse().unwrap());
            let end = (start + request.count).min(self.total);
            let items = (start..end)
                .map(|n| {
                    let tags: &[&str] = if n % 3 == 0 { &["rust"] } else { &["misc"] };
                    item(&format!("n{}", n), tags)
                })
                .collect();
            Ok(Page {
                items,
                has_more: end < self.total,
                next_cursor: Some(end.to_string()),
            })
        }
    }

    #[tokio::test]
    async fn fill_reaches_target_over_several_rounds() {
        let acc = Accumulator::new(Numbered {
            total: 100,
            calls: Mutex::new(0),
        });
        let filter = ContentFilter::tag(Slug::new("rust").unwrap());

        let report = fill_visible(&acc, Some(&filter), 5, 10).await;

        assert!(report.visible >= 5);
        assert!(report.rounds > 1);
        assert!(acc.len() > report.visible);
    }

    #[tokio::test]
    async fn fill_stops_when_exhausted() {
        let acc = Accumulator::new(Numbered {
            total: 4,
            calls: Mutex::new(0),
        });
        let filter = ContentFilter::tag(Slug::new("rust").unwrap());

        let report = fill_visible(&acc, Some(&filter), 50, 10).await;

        assert_eq!(report.visible, 2);
        assert_eq!(report.last, Some(LoadOutcome::Exhausted));
    }

    #[tokio::test]
    async fn fill_respects_round_limit() {
        let acc = Accumulator::new(Numbered {
            total: 1000,
            calls: Mutex::new(0),
        });
        let filter = ContentFilter::search("no such thing");

        let report = fill_visible(&acc, Some(&filter), 1, 3).await;

        assert_eq!(report.rounds, 3);
        assert_eq!(report.visible, 0);
        assert_eq!(*acc.source().calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn fill_without_filter_uses_plain_count() {
        let acc = Accumulator::new(Numbered {
            total: 100,
            calls: Mutex::new(0),
        });

        let report = fill_visible(&acc, None, 10, 5).await;

        assert_eq!(report.rounds, 1);
        assert_eq!(report.visible, 12);
    }

    #[test]
    fn tally_orders_by_count_then_slug() {
        let items = vec![
            item("a", &["web", "rust"]),
            item("b", &["rust"]),
            item("c", &["go", "web"]),
        ];

        let tally: Vec<(String, usize)> = tag_tally(&items)
            .into_iter()
            .map(|t| (t.tag.slug.to_string(), t.count))
            .collect();
        assert_eq!(
            tally,
            vec![
                ("rust".to_string(), 2),
                ("web".to_string(), 2),
                ("go".to_string(), 1)
            ]
        );
    }
}
