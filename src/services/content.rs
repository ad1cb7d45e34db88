// src/services/content.rs

//! Typed client for the club's remote content API.
//!
//! Reads go through the resource cache with per-resource staleness
//! windows; mutations invalidate the related keys on success and never
//! retry on failure. The caller decides how to surface errors.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::ResourceCache;
use crate::config::ContentConfig;
use crate::error::{AppError, Result};
use crate::models::{
    ApiResponse, Category, Comment, ContactSubmission, Course, CreateCommentRequest,
    CreateContactRequest, CreateRegistrationRequest, PaginatedResponse, Post, Registration,
};

// Staleness windows per resource, matching how volatile each one is.
const POSTS_LIST_TTL: Duration = Duration::from_secs(2 * 60);
const POST_DETAIL_TTL: Duration = Duration::from_secs(5 * 60);
const COURSES_TTL: Duration = Duration::from_secs(10 * 60);
const CATEGORIES_TTL: Duration = Duration::from_secs(10 * 60);
const COMMENTS_TTL: Duration = Duration::from_secs(60);
const SUBMISSIONS_TTL: Duration = Duration::from_secs(60);

/// Client for the content API.
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
    page_limit: usize,
    cache: ResourceCache,
}

impl ContentClient {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_limit: config.page_limit,
            cache: ResourceCache::new(),
        })
    }

    // --- Posts ---

    pub async fn list_posts(&self, page: u32, page_size: u32) -> Result<PaginatedResponse<Post>> {
        let key = format!("posts:list:{page}:{page_size}");
        self.cached_get(
            &key,
            POSTS_LIST_TTL,
            "/posts",
            &[
                ("pageNumber", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )
        .await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let key = format!("posts:detail:{id}");
        self.cached_get(&key, POST_DETAIL_TTL, &format!("/posts/{id}"), &[])
            .await
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Post> {
        let key = format!("posts:slug:{slug}");
        self.cached_get(&key, POST_DETAIL_TTL, &format!("/posts/slug/{slug}"), &[])
            .await
    }

    pub async fn related_posts(&self, slug: &str) -> Result<Vec<Post>> {
        let key = format!("posts:related:{slug}");
        self.cached_get(
            &key,
            POST_DETAIL_TTL,
            &format!("/posts/slug/{slug}/related"),
            &[],
        )
        .await
    }

    // --- Courses and categories ---

    pub async fn list_courses(&self) -> Result<Vec<Course>> {
        self.cached_get("courses:list", COURSES_TTL, "/courses", &[])
            .await
    }

    pub async fn list_categories(&self, include_children: bool) -> Result<Vec<Category>> {
        let key = format!("categories:list:{include_children}");
        self.cached_get(
            &key,
            CATEGORIES_TTL,
            "/categories",
            &[("includeChildren", include_children.to_string())],
        )
        .await
    }

    // --- Comments ---

    pub async fn comments_for(&self, post_id: &str) -> Result<Vec<Comment>> {
        let key = format!("comments:{post_id}");
        self.cached_get(
            &key,
            COMMENTS_TTL,
            &format!("/posts/{post_id}/comments"),
            &[],
        )
        .await
    }

    /// Add a comment; on success the post's comment list and detail
    /// caches go stale immediately.
    pub async fn add_comment(
        &self,
        post_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<String> {
        let data = self
            .post_json(&format!("/posts/{post_id}/comments"), request)
            .await?;
        self.cache
            .invalidate_prefix(&format!("comments:{post_id}"))
            .await;
        self.cache.invalidate_prefix("posts:detail").await;
        self.cache.invalidate_prefix("posts:slug").await;
        data.pointer("/commentId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::api("comments", "response missing commentId"))
    }

    // --- Contact ---

    pub async fn submit_contact(&self, request: &CreateContactRequest) -> Result<()> {
        self.post_json("/contact", request).await?;
        self.cache.invalidate_prefix("contact:").await;
        Ok(())
    }

    pub async fn contact_submissions(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedResponse<ContactSubmission>> {
        let key = format!("contact:submissions:{page}:{page_size}");
        self.cached_get(
            &key,
            SUBMISSIONS_TTL,
            "/contact",
            &[
                ("pageNumber", page.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )
        .await
    }

    // --- Registration ---

    pub async fn submit_registration(&self, request: &CreateRegistrationRequest) -> Result<()> {
        self.post_json("/registration", request).await?;
        self.cache.invalidate_prefix("registration:").await;
        Ok(())
    }

    // --- Bulk export reads (uncached, full page) ---

    /// Fetch every contact submission for export. Bypasses the cache so
    /// the spreadsheet always reflects the backend.
    pub async fn fetch_all_contacts(&self) -> Result<Vec<ContactSubmission>> {
        let page: PaginatedResponse<ContactSubmission> = self
            .fetch("/contact", &[("limit", self.page_limit.to_string())])
            .await?;
        Ok(page.data)
    }

    /// Fetch every registration for export. Bypasses the cache.
    pub async fn fetch_all_registrations(&self) -> Result<Vec<Registration>> {
        let page: PaginatedResponse<Registration> = self
            .fetch("/registration", &[("limit", self.page_limit.to_string())])
            .await?;
        Ok(page.data)
    }

    // --- Internals ---

    async fn cached_get<T: DeserializeOwned>(
        &self,
        key: &str,
        ttl: Duration,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        if let Some(hit) = self.cache.get(key).await {
            return Ok(serde_json::from_value(hit)?);
        }
        let data = self.get_json(path, query).await?;
        self.cache.put(key, data.clone(), ttl).await;
        Ok(serde_json::from_value(data)?)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let data = self.get_json(path, query).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        Self::unwrap_envelope(path, response).await
    }

    async fn post_json<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Self::unwrap_envelope(path, response).await
    }

    async fn unwrap_envelope(path: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let envelope: ApiResponse<Value> = response.json().await.unwrap_or_default();
        if !status.is_success() {
            let message = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| "request failed".to_string());
            return Err(AppError::api(path, format!("{message} ({status})")));
        }
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}
