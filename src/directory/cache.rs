//! Tag-based query cache and the dispatch service views talk to.
//!
//! Query results are stored per operator with the tags their endpoint
//! provides. A mutation that invalidates a tag evicts every entry carrying it,
//! for every operator, so the next read goes back to the directory. Entries
//! also expire on their own and the cache holds a bounded number of them.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::directory::endpoints::{CacheTag, Endpoint};
use crate::directory::errors::DirectoryResult;
use crate::directory::{UserListQuery, UserReader, UserWriter};
use crate::domain::auth::ReactivateResponse;
use crate::domain::customer::{Customer, Page};
use crate::domain::types::UserId;

/// Maximum number of cached query results across all operators.
pub const CACHE_CAPACITY: u64 = 1_000;
/// Lifetime of a cached query result.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Identifies one cached query of one operator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: String,
    endpoint: &'static str,
    args: String,
}

impl QueryKey {
    pub fn new(scope: &str, endpoint: &Endpoint, args: impl Into<String>) -> Self {
        Self {
            scope: scope.to_string(),
            endpoint: endpoint.name(),
            args: args.into(),
        }
    }

    pub fn users(scope: &str, query: &UserListQuery) -> Self {
        Self::new(
            scope,
            &Endpoint::GetUsers,
            format!("{}:{}", query.page_number, query.page_size),
        )
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: serde_json::Value,
    tags: Vec<CacheTag>,
}

#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<QueryKey, CacheEntry>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_limits(CACHE_CAPACITY, CACHE_TTL)
    }
}

impl Debug for QueryCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }

    /// Returns the cached value unless it is missing, expired or invalidated.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;

        match serde_json::from_value(entry.value) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Dropping unreadable cache entry {key:?}: {err}");
                self.entries.invalidate(key);
                None
            }
        }
    }

    pub fn store<T: Serialize>(&self, key: QueryKey, value: &T, tags: &[CacheTag]) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Skipping cache write for {key:?}: {err}");
                return;
            }
        };

        self.entries.insert(
            key,
            CacheEntry {
                value,
                tags: tags.to_vec(),
            },
        );
    }

    /// Evicts every entry carrying one of `tags`, returning how many were
    /// removed. Calling it again is harmless.
    pub fn invalidate_tags(&self, tags: &[CacheTag]) -> usize {
        let keys: Vec<Arc<QueryKey>> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.tags.iter().any(|tag| tags.contains(tag)))
            .map(|(key, _)| key)
            .collect();

        for key in &keys {
            self.entries.invalidate(key.as_ref());
        }
        keys.len()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }
}

/// Cache-and-dispatch capability injected into views.
#[async_trait]
pub trait DirectoryDispatch: Send + Sync {
    /// Serves the page from cache when fresh, otherwise fetches it.
    async fn get_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>>;
    /// Always goes to the directory and refreshes the cache entry.
    async fn refetch_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>>;
    async fn reactivate_user(&self, user_id: &UserId) -> DirectoryResult<ReactivateResponse>;
    fn invalidate_tags(&self, tags: &[CacheTag]);
}

/// Wraps one operator's directory client with the shared [`QueryCache`].
///
/// Cached reads are only served back to the operator identified by `scope`.
#[derive(Clone, Debug)]
pub struct DirectoryService<D> {
    directory: D,
    cache: Arc<QueryCache>,
    scope: String,
}

impl<D> DirectoryService<D> {
    pub fn new(directory: D, cache: Arc<QueryCache>, scope: impl Into<String>) -> Self {
        Self {
            directory,
            cache,
            scope: scope.into(),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }
}

#[async_trait]
impl<D> DirectoryDispatch for DirectoryService<D>
where
    D: UserReader + UserWriter + Send + Sync,
{
    async fn get_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>> {
        if let Some(page) = self.cache.get(&QueryKey::users(&self.scope, &query)) {
            return Ok(page);
        }
        self.refetch_users(query).await
    }

    async fn refetch_users(&self, query: UserListQuery) -> DirectoryResult<Page<Customer>> {
        let page = self.directory.get_users(&query).await?;
        self.cache.store(
            QueryKey::users(&self.scope, &query),
            &page,
            Endpoint::GetUsers.provides(),
        );
        Ok(page)
    }

    async fn reactivate_user(&self, user_id: &UserId) -> DirectoryResult<ReactivateResponse> {
        let endpoint = Endpoint::ReactivateUser(user_id.clone());
        let response = self.directory.reactivate_user(user_id).await?;
        self.invalidate_tags(endpoint.invalidates());
        Ok(response)
    }

    fn invalidate_tags(&self, tags: &[CacheTag]) {
        let invalidated = self.cache.invalidate_tags(tags);
        log::debug!("Invalidated {invalidated} cached queries for {tags:?}");
    }
}
