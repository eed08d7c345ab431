//! HTTP 边界：三个请求/应答端点 + 语音直通代理
//!
//! 处理器无共享可变状态，仅持有无状态组件的 Arc；请求之间完全独立。
//! JSON 应答里的音频用 base64 编码；非 2xx 应答带 {"error": string}。

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Action;
use crate::error::PipelineError;
use crate::pipeline::{ActionClassifier, PlanExecutor, ResponseComposer};
use crate::speech::SpeechClient;

/// 处理器共享状态：流水线组件与语音客户端
///
/// speech 只管合成（provider 可切 ElevenLabs），transcriber 只管转写（始终 OpenAI）。
pub struct AppState {
    pub classifier: ActionClassifier,
    pub composer: ResponseComposer,
    pub executor: PlanExecutor,
    pub speech: Arc<dyn SpeechClient>,
    pub transcriber: Arc<dyn SpeechClient>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(err: PipelineError) -> ApiError {
    let status = match &err {
        PipelineError::Provider(_) | PipelineError::Retrieval(_) | PipelineError::Speech(_) => {
            StatusCode::BAD_GATEWAY
        }
        PipelineError::Classification(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

fn bad_request(msg: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: msg.to_string(),
        }),
    )
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/decide-and-respond", post(api_decide_and_respond))
        .route("/api/execute-plan", post(api_execute_plan))
        .route("/api/transcribe", post(api_transcribe))
        .route("/api/speech", post(api_speech))
        .route("/api/health", get(|| async { "OK" }))
        .with_state(state)
}

#[derive(Deserialize)]
struct DecideRequest {
    text: String,
    #[serde(default)]
    context: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct DecideResponse {
    plan: Action,
    /// 立即播报音频（base64 MPEG）
    audio: String,
}

/// 文本 + 上下文 → 计划 + 立即播报音频（分类 → 作曲 → 合成）
async fn api_decide_and_respond(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DecideRequest>,
) -> Result<Json<DecideResponse>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(bad_request("Text input is required"));
    }

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, text = %req.text, "decide-and-respond");

    let mut plan = state
        .classifier
        .classify(&req.text, req.context)
        .await
        .map_err(error_response)?;
    let verbal = state.composer.compose(&plan).await.map_err(error_response)?;
    let audio = state
        .speech
        .synthesize(&verbal.immediate_response)
        .await
        .map_err(error_response)?;
    plan.does_follow_up = verbal.followup_response;

    tracing::info!(%request_id, intent = ?plan.intent, does_follow_up = plan.does_follow_up, "plan ready");

    Ok(Json(DecideResponse {
        plan,
        audio: BASE64.encode(audio),
    }))
}

#[derive(Serialize)]
struct ExecuteResponse {
    plan: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    followup_text: Option<String>,
    /// 追问播报音频（base64 MPEG），合成失败时缺席
    #[serde(skip_serializing_if = "Option::is_none")]
    followup_audio: Option<String>,
}

/// 计划 → 补全后的计划 + 可选追问播报
async fn api_execute_plan(
    State(state): State<Arc<AppState>>,
    Json(plan): Json<Action>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, intent = ?plan.intent, "execute-plan");

    let outcome = state.executor.execute(plan).await.map_err(error_response)?;

    Ok(Json(ExecuteResponse {
        plan: outcome.action,
        followup_text: outcome.followup_text,
        followup_audio: outcome.followup_audio.map(|a| BASE64.encode(a)),
    }))
}

#[derive(Serialize)]
struct TranscribeResponse {
    text: String,
}

/// 原始音频字节 → 转写文本
async fn api_transcribe(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranscribeResponse>, ApiError> {
    if body.is_empty() {
        return Err(bad_request("No audio provided"));
    }

    let text = state
        .transcriber
        .transcribe(body.to_vec())
        .await
        .map_err(error_response)?;

    Ok(Json(TranscribeResponse { text }))
}

#[derive(Deserialize)]
struct SpeechRequest {
    text: String,
}

/// 文本 → MPEG 音频字节（直通合成代理）
async fn api_speech(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeechRequest>,
) -> Result<Response, ApiError> {
    let audio = state
        .speech
        .synthesize(&req.text)
        .await
        .map_err(error_response)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .body(axum::body::Body::from(audio))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatClient, MockChatClient};
    use crate::retrieval::{MockRetrievalClient, RetrievalClient};
    use crate::speech::MockSpeechClient;

    fn state_with(
        llm: Arc<MockChatClient>,
        speech: Arc<MockSpeechClient>,
        transcriber: Arc<MockSpeechClient>,
    ) -> Arc<AppState> {
        let retrieval = Arc::new(MockRetrievalClient::new());
        Arc::new(AppState {
            classifier: ActionClassifier::new(Arc::clone(&llm) as Arc<dyn ChatClient>),
            composer: ResponseComposer::new(Arc::clone(&llm) as Arc<dyn ChatClient>),
            executor: PlanExecutor::new(
                llm as Arc<dyn ChatClient>,
                retrieval as Arc<dyn RetrievalClient>,
                Arc::clone(&speech) as Arc<dyn SpeechClient>,
                "bucket-1",
            ),
            speech: speech as Arc<dyn SpeechClient>,
            transcriber: transcriber as Arc<dyn SpeechClient>,
        })
    }

    fn default_state() -> Arc<AppState> {
        state_with(
            Arc::new(MockChatClient::new()),
            Arc::new(MockSpeechClient::new()),
            Arc::new(MockSpeechClient::new()),
        )
    }

    #[tokio::test]
    async fn test_decide_rejects_empty_text() {
        let result = api_decide_and_respond(
            State(default_state()),
            Json(DecideRequest {
                text: "   ".to_string(),
                context: None,
            }),
        )
        .await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.0.error.is_empty());
    }

    #[tokio::test]
    async fn test_decide_happy_path_returns_plan_and_audio() {
        let llm = Arc::new(MockChatClient::new());
        llm.push_reply(r#"{"find_fig": true}"#);
        llm.push_reply(
            r#"{"immediate_response": "Looking that up.", "followup_response": true}"#,
        );
        let state = state_with(
            llm,
            Arc::new(MockSpeechClient::new()),
            Arc::new(MockSpeechClient::new()),
        );

        let response = api_decide_and_respond(
            State(state),
            Json(DecideRequest {
                text: "show me the revenue chart".to_string(),
                context: None,
            }),
        )
        .await
        .unwrap();

        assert!(response.0.plan.does_follow_up);
        assert!(BASE64.decode(&response.0.audio).is_ok());
        assert!(!response.0.audio.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_bad_gateway() {
        let llm = Arc::new(MockChatClient::new());
        llm.push_error(PipelineError::Provider("rate limited".to_string()));
        let state = state_with(
            llm,
            Arc::new(MockSpeechClient::new()),
            Arc::new(MockSpeechClient::new()),
        );

        let result = api_decide_and_respond(
            State(state),
            Json(DecideRequest {
                text: "scroll down".to_string(),
                context: None,
            }),
        )
        .await;

        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_malformed_classification_maps_to_internal_error() {
        let llm = Arc::new(MockChatClient::new());
        llm.push_reply("sure thing, scrolling down!");
        let state = state_with(
            llm,
            Arc::new(MockSpeechClient::new()),
            Arc::new(MockSpeechClient::new()),
        );

        let result = api_decide_and_respond(
            State(state),
            Json(DecideRequest {
                text: "scroll down".to_string(),
                context: None,
            }),
        )
        .await;

        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_transcribe_rejects_empty_body() {
        let result = api_transcribe(State(default_state()), Bytes::new()).await;

        let (status, body) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.0.error.is_empty());
    }

    #[tokio::test]
    async fn test_transcribe_uses_transcriber_not_synthesis_client() {
        // 合成端换成别的 provider 时转写不得受影响
        let state = state_with(
            Arc::new(MockChatClient::new()),
            Arc::new(MockSpeechClient::with_transcript("wrong client")),
            Arc::new(MockSpeechClient::with_transcript("go to page 5")),
        );

        let response = api_transcribe(State(state), Bytes::from_static(b"oggdata"))
            .await
            .unwrap();

        assert_eq!(response.0.text, "go to page 5");
    }

    #[test]
    fn test_error_status_mapping() {
        let (status, _) = error_response(PipelineError::Provider("x".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = error_response(PipelineError::Retrieval("x".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = error_response(PipelineError::Speech("x".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = error_response(PipelineError::Classification("x".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
