//! HTTP client for end-to-end tests
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    pub async fn search(&self, query: &str, limit: Option<usize>) -> Response {
        let mut params = vec![("q", query.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.client
            .get(format!("{}/v1/search", self.base_url))
            .query(&params)
            .send()
            .await
            .expect("Search request failed")
    }

    pub async fn recommend(&self, liked_ids: &[&str], top_n: Option<usize>) -> Response {
        self.post_recommend("/v1/recommend", liked_ids, top_n).await
    }

    pub async fn recommend_csv(&self, liked_ids: &[&str], top_n: Option<usize>) -> Response {
        self.post_recommend("/v1/recommend/csv", liked_ids, top_n)
            .await
    }

    /// Posts an arbitrary body, for malformed request tests.
    pub async fn post_raw(&self, path: &str, body: Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }

    async fn post_recommend(&self, path: &str, liked_ids: &[&str], top_n: Option<usize>) -> Response {
        let mut body = json!({ "liked_ids": liked_ids });
        if let Some(top_n) = top_n {
            body["top_n"] = json!(top_n);
        }
        self.post_raw(path, body).await
    }
}
