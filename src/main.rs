//! docvoice 服务入口
//!
//! 启动: cargo run
//! 环境变量: OPENAI_API_KEY（必填）、GROUNDX_API_KEY（必填）、
//! ELEVENLABS_API_KEY（speech.provider 为 elevenlabs 时）

use std::sync::Arc;

use anyhow::Context;

use docvoice::config::load_config;
use docvoice::llm::{ChatClient, OpenAiChatClient};
use docvoice::observability;
use docvoice::pipeline::{ActionClassifier, PlanExecutor, ResponseComposer};
use docvoice::retrieval::{GroundXClient, RetrievalClient};
use docvoice::server::{router, AppState};
use docvoice::speech::{ElevenLabsSpeechClient, OpenAiSpeechClient, SpeechClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config(None).unwrap_or_default();

    let llm: Arc<dyn ChatClient> = Arc::new(OpenAiChatClient::new(
        cfg.llm.base_url.as_deref(),
        &cfg.llm.model,
        None,
    ));

    let groundx_key = std::env::var("GROUNDX_API_KEY").context("GROUNDX_API_KEY is not set")?;
    let retrieval: Arc<dyn RetrievalClient> = Arc::new(GroundXClient::new(
        &cfg.retrieval.base_url,
        &groundx_key,
        cfg.retrieval.timeout_secs,
    ));

    // 转写始终走 OpenAI；provider 只切换合成端
    let transcriber: Arc<dyn SpeechClient> =
        Arc::new(OpenAiSpeechClient::new(&cfg.speech, None));

    let speech: Arc<dyn SpeechClient> = match cfg.speech.provider.as_str() {
        "elevenlabs" => {
            let key = std::env::var("ELEVENLABS_API_KEY")
                .context("ELEVENLABS_API_KEY is not set")?;
            let voice_id = cfg
                .speech
                .elevenlabs
                .voice_id
                .clone()
                .context("speech.elevenlabs.voice_id is not set")?;
            Arc::new(ElevenLabsSpeechClient::new(
                &key,
                &voice_id,
                &cfg.speech.elevenlabs,
                cfg.speech.timeout_secs,
            ))
        }
        _ => Arc::clone(&transcriber),
    };

    let state = Arc::new(AppState {
        classifier: ActionClassifier::new(Arc::clone(&llm)),
        composer: ResponseComposer::new(Arc::clone(&llm)),
        executor: PlanExecutor::new(
            llm,
            retrieval,
            Arc::clone(&speech),
            &cfg.retrieval.bucket_id,
        ),
        speech,
        transcriber,
    });

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    tracing::info!(%addr, "docvoice listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
