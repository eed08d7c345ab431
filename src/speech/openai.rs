//! OpenAI 语音客户端：whisper-1 转写 + tts-1 合成
//!
//! 直接走 HTTP 端点（转写为 multipart 上传，合成返回 MPEG 字节），Bearer 鉴权。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;

use crate::config::SpeechSection;
use crate::error::PipelineError;
use crate::speech::SpeechClient;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiSpeechClient {
    client: Client,
    base_url: String,
    api_key: String,
    transcribe_model: String,
    tts_model: String,
    voice: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl OpenAiSpeechClient {
    pub fn new(cfg: &SpeechSection, api_key: Option<&str>) -> Self {
        let api_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .unwrap_or_else(|| "sk-placeholder".to_string());

        let base_url = cfg
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            transcribe_model: cfg.transcribe_model.clone(),
            tts_model: cfg.tts_model.clone(),
            voice: cfg.voice.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

#[async_trait]
impl SpeechClient for OpenAiSpeechClient {
    async fn transcribe(&self, audio: Vec<u8>) -> Result<String, PipelineError> {
        let part = multipart::Part::bytes(audio)
            .file_name("audio.ogg")
            .mime_str("audio/ogg")
            .map_err(|e| PipelineError::Provider(e.to_string()))?;
        let form = multipart::Form::new()
            .text("model", self.transcribe_model.clone())
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PipelineError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::Provider(format!(
                "transcription returned {}",
                response.status()
            )));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Provider(e.to_string()))?;

        Ok(body.text)
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&serde_json::json!({
                "model": self.tts_model,
                "voice": self.voice,
                "input": text,
            }))
            .send()
            .await
            .map_err(|e| PipelineError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::Provider(format!(
                "speech synthesis returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Provider(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
