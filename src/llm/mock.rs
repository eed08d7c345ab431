//! Mock 聊天客户端（测试用，无需 API）
//!
//! 预先入队若干应答（或错误），complete 按顺序弹出并记录收到的消息。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::llm::ChatClient;

/// Mock 客户端：返回脚本化应答，记录每次调用的 (system, user)
#[derive(Debug, Default)]
pub struct MockChatClient {
    replies: Mutex<VecDeque<Result<String, PipelineError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, err: PipelineError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// 第 n 次调用收到的 (system, user)
    pub fn call(&self, n: usize) -> Option<(String, String)> {
        self.calls.lock().unwrap().get(n).cloned()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, PipelineError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("{}".to_string()))
    }
}
