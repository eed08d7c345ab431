//! 流水线错误分类
//!
//! 每个阶段失败即上抛，核心内部不重试；唯一例外是追问语音合成失败，
//! 执行器降级为纯文本返回（信息性结果不能因音频增强失败而丢失）。

use thiserror::Error;

/// 动作分发流水线的错误（分类 / 上游提供方 / 检索 / 语音合成）
#[derive(Error, Debug)]
pub enum PipelineError {
    /// 模型输出无法解析为合法动作记录
    #[error("classification failed: {0}")]
    Classification(String),

    /// 上游模型或语音提供方调用失败（超时、限流、鉴权）
    #[error("provider error: {0}")]
    Provider(String),

    /// 检索后端失败或结果为空
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    /// 语音合成失败；对信息性结果非致命
    #[error("speech synthesis failed: {0}")]
    Speech(String),
}
