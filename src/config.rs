//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 先读 TOML 文件，再用 `DOCVOICE__*` 环境变量覆盖（双下划线表示嵌套，
//! 如 `DOCVOICE__LLM__MODEL=gpt-4o`）。API Key 一律走独立环境变量
//! （OPENAI_API_KEY / GROUNDX_API_KEY / ELEVENLABS_API_KEY），不入 TOML。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub llm: LlmSection,
    pub speech: SpeechSection,
    pub retrieval: RetrievalSection,
}

/// [server] 段：监听地址
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// [llm] 段：分类 / 作曲 / grounded 追问共用的聊天模型
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub model: String,
    /// OpenAI 兼容端点，未设置时走官方 API
    pub base_url: Option<String>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            base_url: None,
        }
    }
}

/// [speech] 段：转写与合成的提供方与音色
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechSection {
    /// 合成提供方：openai / elevenlabs（转写始终走 openai）
    pub provider: String,
    pub base_url: Option<String>,
    pub voice: String,
    pub tts_model: String,
    pub transcribe_model: String,
    /// 单次语音调用超时（秒）
    pub timeout_secs: u64,
    pub elevenlabs: ElevenLabsSection,
}

impl Default for SpeechSection {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: None,
            voice: "alloy".to_string(),
            tts_model: "tts-1".to_string(),
            transcribe_model: "whisper-1".to_string(),
            timeout_secs: 60,
            elevenlabs: ElevenLabsSection::default(),
        }
    }
}

/// [speech.elevenlabs] 段：音色与合成参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElevenLabsSection {
    pub voice_id: Option<String>,
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for ElevenLabsSection {
    fn default() -> Self {
        Self {
            voice_id: None,
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

/// [retrieval] 段：检索后端端点与 bucket
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSection {
    pub base_url: String,
    /// 检索范围（调用方配置的 bucket 标识）
    pub bucket_id: String,
    pub timeout_secs: u64,
}

impl Default for RetrievalSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.groundx.ai".to_string(),
            bucket_id: String::new(),
            timeout_secs: 30,
        }
    }
}

/// 从 config 目录加载配置，环境变量 DOCVOICE__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 DOCVOICE__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("DOCVOICE")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.llm.model, "gpt-4");
        assert_eq!(cfg.speech.voice, "alloy");
        assert_eq!(cfg.retrieval.base_url, "https://api.groundx.ai");
    }
}
