//! ElevenLabs 合成客户端
//!
//! POST /v1/text-to-speech/{voice_id}，xi-api-key 鉴权；只做合成，不支持转写。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ElevenLabsSection;
use crate::error::PipelineError;
use crate::speech::SpeechClient;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

pub struct ElevenLabsSpeechClient {
    client: Client,
    base_url: String,
    api_key: String,
    voice_id: String,
    stability: f32,
    similarity_boost: f32,
    timeout: Duration,
}

impl ElevenLabsSpeechClient {
    pub fn new(api_key: &str, voice_id: &str, cfg: &ElevenLabsSection, timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            voice_id: voice_id.to_string(),
            stability: cfg.stability,
            similarity_boost: cfg.similarity_boost,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl SpeechClient for ElevenLabsSpeechClient {
    async fn transcribe(&self, _audio: Vec<u8>) -> Result<String, PipelineError> {
        Err(PipelineError::Provider(
            "ElevenLabs adapter does not support transcription".to_string(),
        ))
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.base_url, self.voice_id
            ))
            .header("xi-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&serde_json::json!({
                "text": text,
                "voice_settings": {
                    "stability": self.stability,
                    "similarity_boost": self.similarity_boost,
                },
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
