//! docvoice - 语音驱动的文档导航服务
//!
//! 把一句口头查询变成一个确定的检索 / 导航动作并执行：
//! - **action**: 意图与动作记录（单一 tagged enum 表达互斥）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **error**: 流水线错误分类
//! - **llm**: 聊天补全客户端（OpenAI 兼容 / Mock）
//! - **pipeline**: 动作分类器、应答作曲器、计划执行器
//! - **retrieval**: 文档检索后端客户端（GroundX / Mock）
//! - **server**: axum HTTP 边界
//! - **speech**: 转写与合成适配器（OpenAI / ElevenLabs / Mock）

pub mod action;
pub mod config;
pub mod error;
pub mod llm;
pub mod observability;
pub mod pipeline;
pub mod retrieval;
pub mod server;
pub mod speech;
