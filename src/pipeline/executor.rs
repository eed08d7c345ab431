//! 计划执行器
//!
//! find_fig / find_pdf 调检索后端并用首个命中补全 Action；其余意图原样返回，
//! 页内导航交给查看器协作方。追问仅在 does_follow_up 且捕获到检索文本时产出；
//! 追问合成失败降级为纯文本，不丢弃已算出的动作结果。

use std::sync::Arc;

use crate::action::{Action, Intent};
use crate::error::PipelineError;
use crate::llm::ChatClient;
use crate::retrieval::RetrievalClient;
use crate::speech::SpeechClient;

/// 执行结果：补全后的 Action + 可选追问文本与音频
///
/// followup_text 在合成失败时仍保留（优雅降级）。
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub action: Action,
    pub followup_text: Option<String>,
    pub followup_audio: Option<Vec<u8>>,
}

pub struct PlanExecutor {
    llm: Arc<dyn ChatClient>,
    retrieval: Arc<dyn RetrievalClient>,
    speech: Arc<dyn SpeechClient>,
    bucket_id: String,
}

impl PlanExecutor {
    pub fn new(
        llm: Arc<dyn ChatClient>,
        retrieval: Arc<dyn RetrievalClient>,
        speech: Arc<dyn SpeechClient>,
        bucket_id: &str,
    ) -> Self {
        Self {
            llm,
            retrieval,
            speech,
            bucket_id: bucket_id.to_string(),
        }
    }

    pub async fn execute(&self, plan: Action) -> Result<ExecutionOutcome, PipelineError> {
        let mut action = plan;
        let mut rag_context = String::new();

        match action.intent {
            Intent::FindFig => {
                let hits = self.retrieval.search(&self.bucket_id, &action.query).await?;
                let first = hits.results.first().ok_or_else(|| {
                    PipelineError::Retrieval("no results for query".to_string())
                })?;
                let page = first
                    .bounding_boxes
                    .first()
                    .map(|b| b.page_number)
                    .ok_or_else(|| {
                        PipelineError::Retrieval("top result has no bounding boxes".to_string())
                    })?;
                action.pdf = Some(first.source_url.clone());
                action.page = Some(page);
                rag_context = hits.text;
            }
            Intent::FindPdf => {
                let hits = self.retrieval.search(&self.bucket_id, &action.query).await?;
                let first = hits.results.first().ok_or_else(|| {
                    PipelineError::Retrieval("no results for query".to_string())
                })?;
                // 文档级意图没有具体页码，page 保持未设
                action.pdf = Some(first.source_url.clone());
                rag_context = hits.text;
            }
            // 其余意图纯属查看器侧导航，不碰检索
            _ => {}
        }

        let mut followup_text = None;
        let mut followup_audio = None;

        if action.does_follow_up {
            if rag_context.is_empty() {
                tracing::debug!("follow-up requested but no retrieval context captured, skipping");
            } else {
                let system = grounded_prompt(&rag_context);
                let reply = self.llm.complete(&system, &action.query).await?;

                match self.speech.synthesize(&reply).await {
                    Ok(audio) => followup_audio = Some(audio),
                    Err(e) => {
                        let e = speech_error(e);
                        tracing::warn!(error = %e, "follow-up synthesis failed, returning text only");
                    }
                }
                followup_text = Some(reply);
            }
        }

        Ok(ExecutionOutcome {
            action,
            followup_text,
            followup_audio,
        })
    }
}

/// 合成失败归入 Speech 类别；提供方错误只取内层消息，避免嵌套展示
fn speech_error(e: PipelineError) -> PipelineError {
    match e {
        PipelineError::Provider(msg) => PipelineError::Speech(msg),
        other => other,
    }
}

/// grounded 追问的 system 指令：检索文本为事实依据，引用文档与页码措辞，答不了就坦白
fn grounded_prompt(rag_context: &str) -> String {
    format!(
        r#"A user has a query which has triggered a process to look up data which should be relevant to that query.
The relevant data is included below. Use this data to answer the user's question. Say things like "from this document"
and "on page __".

If the data does not answer the question, tell the user you're not sure but they might find their answer in the document below.

=== lookup data relevant to query ===
{}"#,
        rag_context
    )
}
