//! Mock 语音客户端（测试用）
//!
//! 转写回显预设文本；合成返回可辨认的字节并统计次数，可切换为失败模式。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::speech::SpeechClient;

#[derive(Debug, Default)]
pub struct MockSpeechClient {
    transcript: Mutex<String>,
    fail_synthesis: AtomicBool,
    synth_calls: AtomicUsize,
}

impl MockSpeechClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(text: &str) -> Self {
        Self {
            transcript: Mutex::new(text.to_string()),
            ..Default::default()
        }
    }

    pub fn set_fail_synthesis(&self, fail: bool) {
        self.fail_synthesis.store(fail, Ordering::SeqCst);
    }

    pub fn synth_call_count(&self) -> usize {
        self.synth_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechClient for MockSpeechClient {
    async fn transcribe(&self, _audio: Vec<u8>) -> Result<String, PipelineError> {
        Ok(self.transcript.lock().unwrap().clone())
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        self.synth_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_synthesis.load(Ordering::SeqCst) {
            return Err(PipelineError::Provider(
                "mock synthesis failure".to_string(),
            ));
        }
        Ok(format!("mpeg:{}", text).into_bytes())
    }
}
