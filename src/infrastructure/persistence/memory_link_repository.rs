//! In-process implementation of the link store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::domain::repositories::{
    Counter, LinkField, LinkRepository, OrderBy, SortDirection, StoreError,
};

#[derive(Default)]
struct Inner {
    links: HashMap<String, Link>,
    /// Insertion sequence per code, tie-breaker for equal timestamps.
    sequence: HashMap<String, u64>,
    next_sequence: u64,
}

/// Link store kept in memory.
///
/// Honours the same contract as the PostgreSQL store: `put` is a unique
/// insert and `increment` happens under the write lock. Used by tests and
/// when no database is configured; contents are lost on restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn get(&self, code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.inner.read().await.links.get(code).cloned())
    }

    async fn put(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.links.contains_key(&new_link.code) {
            return Err(StoreError::AlreadyExists(new_link.code));
        }

        let link = Link::from_new(new_link, Utc::now());
        let seq = inner.next_sequence;
        inner.next_sequence += 1;
        inner.sequence.insert(link.code.clone(), seq);
        inner.links.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn find_one(&self, field: LinkField, value: &str) -> Result<Option<Link>, StoreError> {
        let inner = self.inner.read().await;

        let found = inner
            .links
            .values()
            .filter(|link| match field {
                LinkField::DestinationUrl => link.destination_url == value,
            })
            .min_by_key(|link| inner.sequence.get(&link.code).copied().unwrap_or(u64::MAX))
            .cloned();

        Ok(found)
    }

    async fn increment(&self, code: &str, counter: Counter, delta: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;

        if let Some(link) = inner.links.get_mut(code) {
            match counter {
                Counter::Clicks => {
                    link.click_count = link.click_count.saturating_add(delta).max(0);
                    link.last_accessed_at = Some(Utc::now());
                }
            }
        }

        Ok(())
    }

    async fn list_recent(
        &self,
        order_by: OrderBy,
        direction: SortDirection,
        limit: usize,
    ) -> Result<Vec<Link>, StoreError> {
        let inner = self.inner.read().await;

        let mut links: Vec<(u64, &Link)> = inner
            .links
            .values()
            .map(|link| (inner.sequence.get(&link.code).copied().unwrap_or(0), link))
            .collect();

        links.sort_by(|(seq_a, a), (seq_b, b)| {
            let ordering = match order_by {
                OrderBy::CreatedAt => a.created_at.cmp(&b.created_at),
                OrderBy::LastAccessedAt => a.last_accessed_at.cmp(&b.last_accessed_at),
                OrderBy::ClickCount => a.click_count.cmp(&b.click_count),
            }
            .then(seq_a.cmp(seq_b));

            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(links
            .into_iter()
            .take(limit)
            .map(|(_, link)| link.clone())
            .collect())
    }

    async fn count_all(&self) -> Result<LinkTotals, StoreError> {
        let inner = self.inner.read().await;

        Ok(LinkTotals {
            total_links: inner.links.len() as i64,
            total_clicks: inner.links.values().map(|link| link.click_count).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink::generated(code.to_string(), url.to_string(), None)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let repo = MemoryLinkRepository::new();

        let link = repo.put(new_link("abc123", "https://example.com")).await.unwrap();
        assert_eq!(link.click_count, 0);

        let fetched = repo.get("abc123").await.unwrap().unwrap();
        assert_eq!(fetched, link);
        assert!(repo.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_rejects_duplicate_code() {
        let repo = MemoryLinkRepository::new();
        repo.put(new_link("abc123", "https://a.com")).await.unwrap();

        let err = repo.put(new_link("abc123", "https://b.com")).await.unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists("abc123".to_string()));

        let kept = repo.get("abc123").await.unwrap().unwrap();
        assert_eq!(kept.destination_url, "https://a.com");
    }

    #[tokio::test]
    async fn test_find_one_returns_oldest_match() {
        let repo = MemoryLinkRepository::new();
        repo.put(new_link("first", "https://same.com")).await.unwrap();
        repo.put(new_link("second", "https://same.com")).await.unwrap();

        let found = repo
            .find_one(LinkField::DestinationUrl, "https://same.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.code, "first");

        assert!(repo
            .find_one(LinkField::DestinationUrl, "https://SAME.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_increment_stamps_access_time() {
        let repo = MemoryLinkRepository::new();
        repo.put(new_link("abc123", "https://example.com")).await.unwrap();

        repo.increment("abc123", Counter::Clicks, 1).await.unwrap();
        repo.increment("abc123", Counter::Clicks, 2).await.unwrap();

        let link = repo.get("abc123").await.unwrap().unwrap();
        assert_eq!(link.click_count, 3);
        assert!(link.last_accessed_at.is_some());
    }

    #[tokio::test]
    async fn test_increment_unknown_code_is_noop() {
        let repo = MemoryLinkRepository::new();
        assert!(repo.increment("ghost", Counter::Clicks, 1).await.is_ok());
        assert_eq!(repo.count_all().await.unwrap(), LinkTotals::default());
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let repo = MemoryLinkRepository::new();
        for code in ["one", "two", "three"] {
            repo.put(new_link(code, &format!("https://example.com/{code}")))
                .await
                .unwrap();
        }

        let recent = repo
            .list_recent(OrderBy::CreatedAt, SortDirection::Desc, 2)
            .await
            .unwrap();

        let codes: Vec<_> = recent.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["three", "two"]);
    }

    #[tokio::test]
    async fn test_list_by_click_count() {
        let repo = MemoryLinkRepository::new();
        repo.put(new_link("cold", "https://a.com")).await.unwrap();
        repo.put(new_link("hot", "https://b.com")).await.unwrap();
        repo.increment("hot", Counter::Clicks, 5).await.unwrap();

        let top = repo
            .list_recent(OrderBy::ClickCount, SortDirection::Desc, 1)
            .await
            .unwrap();
        assert_eq!(top[0].code, "hot");
    }

    #[tokio::test]
    async fn test_count_all() {
        let repo = MemoryLinkRepository::new();
        repo.put(new_link("a1", "https://a.com")).await.unwrap();
        repo.put(new_link("b2", "https://b.com")).await.unwrap();
        repo.increment("a1", Counter::Clicks, 4).await.unwrap();
        repo.increment("b2", Counter::Clicks, 1).await.unwrap();

        let totals = repo.count_all().await.unwrap();
        assert_eq!(totals.total_links, 2);
        assert_eq!(totals.total_clicks, 5);
    }
}
