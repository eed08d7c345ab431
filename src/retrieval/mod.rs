//! 检索层：外部内容检索服务的窄契约（GroundX / Mock）
//!
//! 核心只消费首个命中与聚合文本，不做重排也不设相关度阈值。

pub mod groundx;
pub mod mock;
pub mod types;

pub use groundx::GroundXClient;
pub use mock::MockRetrievalClient;
pub use types::{BoundingBox, SearchHit, SearchHits};

use async_trait::async_trait;

use crate::error::PipelineError;

/// 检索客户端：按 bucket + query 搜索，返回排序命中与聚合文本
#[async_trait]
pub trait RetrievalClient: Send + Sync {
    async fn search(&self, bucket_id: &str, query: &str) -> Result<SearchHits, PipelineError>;
}
