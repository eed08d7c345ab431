//! LLM 客户端抽象
//!
//! 分类、作曲与 grounded 追问走同一接口：一条 system 指令 + 一条 user 消息，返回单个补全。

use async_trait::async_trait;

use crate::error::PipelineError;

/// 聊天补全客户端；动作选择要求尽量确定，temperature 0 由实现方保证
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, PipelineError>;
}
