//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::domain::repositories::{
    Counter, LinkField, LinkRepository, OrderBy, SortDirection, StoreError,
};
use crate::utils::db_error::map_sqlx_error;

const LINK_COLUMNS: &str =
    "code, destination_url, domain, click_count, created_at, last_accessed_at, is_custom_alias";

#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    destination_url: String,
    domain: Option<String>,
    click_count: i64,
    created_at: DateTime<Utc>,
    last_accessed_at: Option<DateTime<Utc>>,
    is_custom_alias: bool,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            code: row.code,
            destination_url: row.destination_url,
            domain: row.domain,
            click_count: row.click_count,
            created_at: row.created_at,
            last_accessed_at: row.last_accessed_at,
            is_custom_alias: row.is_custom_alias,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Code uniqueness comes from the primary key on `links.code`; click
/// increments are a single `UPDATE ... SET click_count = click_count + $n`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn column_for(field: LinkField) -> &'static str {
    match field {
        LinkField::DestinationUrl => "destination_url",
    }
}

fn order_clause(order_by: OrderBy, direction: SortDirection) -> &'static str {
    match (order_by, direction) {
        (OrderBy::CreatedAt, SortDirection::Asc) => "created_at ASC, code ASC",
        (OrderBy::CreatedAt, SortDirection::Desc) => "created_at DESC, code DESC",
        (OrderBy::LastAccessedAt, SortDirection::Asc) => "last_accessed_at ASC NULLS FIRST, code ASC",
        (OrderBy::LastAccessedAt, SortDirection::Desc) => {
            "last_accessed_at DESC NULLS LAST, code DESC"
        }
        (OrderBy::ClickCount, SortDirection::Asc) => "click_count ASC, code ASC",
        (OrderBy::ClickCount, SortDirection::Desc) => "click_count DESC, code DESC",
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn get(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let query = format!("SELECT {LINK_COLUMNS} FROM links WHERE code = $1");

        let row = sqlx::query_as::<_, LinkRow>(&query)
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, code))?;

        Ok(row.map(Link::from))
    }

    async fn put(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let query = format!(
            "INSERT INTO links (code, destination_url, domain, is_custom_alias) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {LINK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, LinkRow>(&query)
            .bind(&new_link.code)
            .bind(&new_link.destination_url)
            .bind(&new_link.domain)
            .bind(new_link.is_custom_alias)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, &new_link.code))?;

        Ok(row.into())
    }

    async fn find_one(&self, field: LinkField, value: &str) -> Result<Option<Link>, StoreError> {
        let query = format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE {} = $1 ORDER BY created_at ASC LIMIT 1",
            column_for(field)
        );

        let row = sqlx::query_as::<_, LinkRow>(&query)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, value))?;

        Ok(row.map(Link::from))
    }

    async fn increment(&self, code: &str, counter: Counter, delta: i64) -> Result<(), StoreError> {
        let query = match counter {
            Counter::Clicks => {
                "UPDATE links SET click_count = click_count + $2, last_accessed_at = NOW() \
                 WHERE code = $1"
            }
        };

        sqlx::query(query)
            .bind(code)
            .bind(delta)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, code))?;

        Ok(())
    }

    async fn list_recent(
        &self,
        order_by: OrderBy,
        direction: SortDirection,
        limit: usize,
    ) -> Result<Vec<Link>, StoreError> {
        let query = format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY {} LIMIT $1",
            order_clause(order_by, direction)
        );

        let rows = sqlx::query_as::<_, LinkRow>(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, "links"))?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count_all(&self) -> Result<LinkTotals, StoreError> {
        let (total_links, total_clicks): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*)::BIGINT, COALESCE(SUM(click_count), 0)::BIGINT FROM links",
        )
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error(e, "links"))?;

        Ok(LinkTotals {
            total_links,
            total_clicks,
        })
    }
}
