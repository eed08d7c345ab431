//! 动作分类器
//!
//! 一次补全调用把自由话语映射为一个 Action：提示词枚举互斥意图与判定规则，
//! 模型输出原始布尔记录，解析失败即 Classification 错误（绝不静默兜底）。

use std::sync::Arc;

use crate::action::{Action, RawActionRecord};
use crate::error::PipelineError;
use crate::llm::ChatClient;

const ACTION_PARSE_PROMPT: &str = r#"Decide if the user wants one of the following actions performed:
- 'scroll_up': scroll up a small amount within one page of the pdf
- 'scroll_down': scroll down a small amount within one page of the pdf
- 'snap_page': snap to a specific page of a pdf
- 'find_fig': find a specific figure, table, image, or specific item.
- 'find_pdf': find a specific doc
- 'non_determ': no valid action is discernable
The values above are mutually exclusive. One should be true, the rest should be false.
note: you can use snap_page to go to a page relative to the current page. Set "page" to the absolute page number.
note: blanket questions should default to find figure, unless they're obviously about a document.
note: if a user asks a general question, assume it's from a figure and try to find a relevant figure.
Respond with a single JSON object of boolean fields (plus "page" for snap_page) and nothing else."#;

/// 分类器：每句话语产出一个全新 Action，跨调用无共享状态
pub struct ActionClassifier {
    llm: Arc<dyn ChatClient>,
}

impl ActionClassifier {
    pub fn new(llm: Arc<dyn ChatClient>) -> Self {
        Self { llm }
    }

    /// 分类一句话语；context 为调用方透传的观察状态（如当前页码），
    /// 会拼进 user 消息供相对页码换算，也原样挂回 Action
    pub async fn classify(
        &self,
        text: &str,
        context: Option<serde_json::Value>,
    ) -> Result<Action, PipelineError> {
        let mut user = format!(
            "my name is doc tech, what action would you like me to perform?\n\nUser: {}",
            text
        );
        if let Some(ctx) = &context {
            user.push_str(&format!("\n\nCurrent viewer state: {}", ctx));
        }

        let raw_output = self.llm.complete(ACTION_PARSE_PROMPT, &user).await?;

        let record: RawActionRecord = serde_json::from_str(raw_output.trim()).map_err(|e| {
            PipelineError::Classification(format!("malformed action record: {}", e))
        })?;
        let (intent, page) = record.into_intent()?;

        Ok(Action {
            intent,
            query: text.to_string(),
            context,
            page,
            pdf: None,
            does_follow_up: false,
        })
    }
}
