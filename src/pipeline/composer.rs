//! 应答作曲器
//!
//! 一次补全调用产出口头应答：立即播报文本 + 是否需要 grounded 追问。
//! 提示词里的语气与 GroundX 介绍是内容配置，不影响流水线契约。

use std::sync::Arc;

use crate::action::{Action, VerbalResponse};
use crate::error::PipelineError;
use crate::llm::ChatClient;

const VERBAL_RESPONSE_PROMPT: &str = r#"You will be given a user's query, and the actions a system decided to take based on that query.
Respond to the user verbally with an "immediate_response", informing them what action will be taken. Be brief and conversational.
Also set "followup_response": true when the action will pull up document text that should be narrated back to answer the query (finding figures or documents), false for pure navigation.
This is powered by GroundX, which is a retrieval engine designed to work with complex real-world documents.
If the user asks about GroundX, tell them they use a computer vision-based parsing system, trained on a large amount of corporate documents to understand documents. GroundX can run in the cloud, on-prem, or anywhere.
Respond with a single JSON object {"immediate_response": string, "followup_response": boolean} and nothing else."#;

/// 作曲器：只读 Action，产出 VerbalResponse
pub struct ResponseComposer {
    llm: Arc<dyn ChatClient>,
}

impl ResponseComposer {
    pub fn new(llm: Arc<dyn ChatClient>) -> Self {
        Self { llm }
    }

    pub async fn compose(&self, action: &Action) -> Result<VerbalResponse, PipelineError> {
        let action_json = serde_json::to_string(action)
            .map_err(|e| PipelineError::Classification(e.to_string()))?;
        let user = format!(
            "User Query: {}\nSystem Action: {}",
            action.query, action_json
        );

        let raw = self.llm.complete(VERBAL_RESPONSE_PROMPT, &user).await?;

        serde_json::from_str(raw.trim()).map_err(|e| {
            PipelineError::Classification(format!("malformed verbal response: {}", e))
        })
    }
}
