//! 语音层：转写与合成的边界契约（OpenAI / ElevenLabs / Mock）
//!
//! 核心把两者当纯函数看待：不重试、不缓存、不流式，一次调用一整段话语。

pub mod elevenlabs;
pub mod mock;
pub mod openai;

pub use elevenlabs::ElevenLabsSpeechClient;
pub use mock::MockSpeechClient;
pub use openai::OpenAiSpeechClient;

use async_trait::async_trait;

use crate::error::PipelineError;

/// 语音客户端：整段音频进文本出（转写），整段文本进音频出（合成）
#[async_trait]
pub trait SpeechClient: Send + Sync {
    /// 转写一整段话语（如 opus-in-ogg 编码）
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, PipelineError>;

    /// 一次性合成，返回 MPEG 音频字节
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, PipelineError>;
}
