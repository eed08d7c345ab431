//! GroundX 检索客户端
//!
//! POST {base}/search/content，Bearer 鉴权，剥掉外层 body.search 包装返回命中列表。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::PipelineError;
use crate::retrieval::types::{SearchHits, SearchResponse};
use crate::retrieval::RetrievalClient;

pub struct GroundXClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl GroundXClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl RetrievalClient for GroundXClient {
    async fn search(&self, bucket_id: &str, query: &str) -> Result<SearchHits, PipelineError> {
        let response = self
            .client
            .post(format!("{}/search/content", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&serde_json::json!({
                "id": bucket_id,
                "query": query,
            }))
            .send()
            .await
            .map_err(|e| PipelineError::Retrieval(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::Retrieval(format!(
                "search returned {}",
                response.status()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Retrieval(e.to_string()))?;

        Ok(parsed.body.search)
    }
}
