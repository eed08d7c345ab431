//! Mock 检索客户端（测试用）
//!
//! 返回预设命中并统计调用次数，可切换为失败模式。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::retrieval::types::SearchHits;
use crate::retrieval::RetrievalClient;

#[derive(Debug, Default)]
pub struct MockRetrievalClient {
    hits: Mutex<SearchHits>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockRetrievalClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(hits: SearchHits) -> Self {
        Self {
            hits: Mutex::new(hits),
            ..Default::default()
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RetrievalClient for MockRetrievalClient {
    async fn search(&self, _bucket_id: &str, _query: &str) -> Result<SearchHits, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(PipelineError::Retrieval(
                "mock retrieval failure".to_string(),
            ));
        }
        Ok(self.hits.lock().unwrap().clone())
    }
}
