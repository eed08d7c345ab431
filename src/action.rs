//! 动作模型：意图、动作记录与口头应答
//!
//! 意图用单一 tagged enum 表达互斥（同时多个为真在类型层面不可表示）；
//! 分类器模型按提示词约定输出八个布尔位的原始记录，转换时校验互斥。

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// 八种互斥意图之一；snap_page 的目标页码放在 Action.page 上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "intent")]
pub enum Intent {
    ScrollUp,
    ScrollDown,
    NextPage,
    PreviousPage,
    SnapPage,
    FindFig,
    FindPdf,
    /// 无法判定有效动作
    NonDeterm,
}

impl Intent {
    /// 是否需要调用检索后端
    pub fn needs_retrieval(&self) -> bool {
        matches!(self, Intent::FindFig | Intent::FindPdf)
    }
}

/// 一次用户话语对应的动作记录
///
/// 分类器创建并填 intent/query/context（snap_page 时还有 page），
/// 作曲器标注 does_follow_up，执行器补全 pdf/page；返回调用方后不再变更。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub intent: Intent,
    pub query: String,
    /// 调用方透传的状态（如当前页码），核心不解释
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    /// 解析出的页码：snap_page 的目标页，或 find_fig 首个 bounding box 所在页
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// 执行器解析出的文档 URL（find_fig / find_pdf 的首个命中）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default)]
    pub does_follow_up: bool,
}

/// 作曲器产出的口头应答：立即播报文本 + 是否需要 grounded 追问
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbalResponse {
    pub immediate_response: String,
    pub followup_response: bool,
}

/// 分类器模型按提示词输出的原始记录：八个布尔位 + snap_page 的页码
#[derive(Debug, Default, Deserialize)]
pub struct RawActionRecord {
    #[serde(default)]
    pub scroll_up: bool,
    #[serde(default)]
    pub scroll_down: bool,
    #[serde(default)]
    pub next_page: bool,
    #[serde(default)]
    pub previous_page: bool,
    #[serde(default)]
    pub snap_page: bool,
    #[serde(default)]
    pub find_fig: bool,
    #[serde(default)]
    pub find_pdf: bool,
    #[serde(default)]
    pub non_determ: bool,
    #[serde(default)]
    pub page: Option<u32>,
}

impl RawActionRecord {
    /// 转成 (Intent, 页码)：多于一个布尔位为真即拒绝，全假视为 non_determ；
    /// snap_page 必须带页码且从 1 起
    pub fn into_intent(self) -> Result<(Intent, Option<u32>), PipelineError> {
        let flags = [
            (self.scroll_up, Intent::ScrollUp),
            (self.scroll_down, Intent::ScrollDown),
            (self.next_page, Intent::NextPage),
            (self.previous_page, Intent::PreviousPage),
            (self.snap_page, Intent::SnapPage),
            (self.find_fig, Intent::FindFig),
            (self.find_pdf, Intent::FindPdf),
            (self.non_determ, Intent::NonDeterm),
        ];

        let mut set = flags.iter().filter(|(on, _)| *on).map(|(_, i)| *i);
        let intent = match (set.next(), set.next()) {
            (Some(intent), None) => intent,
            (None, _) => Intent::NonDeterm,
            (Some(a), Some(b)) => {
                return Err(PipelineError::Classification(format!(
                    "intents are mutually exclusive, got both {:?} and {:?}",
                    a, b
                )))
            }
        };

        let page = match intent {
            Intent::SnapPage => match self.page {
                Some(p) if p >= 1 => Some(p),
                Some(p) => {
                    return Err(PipelineError::Classification(format!(
                        "invalid page number: {}",
                        p
                    )))
                }
                None => {
                    return Err(PipelineError::Classification(
                        "snap_page without a page number".to_string(),
                    ))
                }
            },
            _ => None,
        };

        Ok((intent, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flag_converts() {
        let record = RawActionRecord {
            find_fig: true,
            ..Default::default()
        };
        let (intent, page) = record.into_intent().unwrap();
        assert_eq!(intent, Intent::FindFig);
        assert_eq!(page, None);
    }

    #[test]
    fn test_multiple_flags_rejected() {
        let record = RawActionRecord {
            scroll_up: true,
            find_pdf: true,
            ..Default::default()
        };
        let err = record.into_intent().unwrap_err();
        assert!(matches!(err, PipelineError::Classification(_)));
    }

    #[test]
    fn test_no_flags_is_non_determ() {
        let record = RawActionRecord::default();
        let (intent, _) = record.into_intent().unwrap();
        assert_eq!(intent, Intent::NonDeterm);
    }

    #[test]
    fn test_snap_page_requires_page() {
        let record = RawActionRecord {
            snap_page: true,
            ..Default::default()
        };
        assert!(record.into_intent().is_err());

        let record = RawActionRecord {
            snap_page: true,
            page: Some(0),
            ..Default::default()
        };
        assert!(record.into_intent().is_err());

        let record = RawActionRecord {
            snap_page: true,
            page: Some(5),
            ..Default::default()
        };
        let (intent, page) = record.into_intent().unwrap();
        assert_eq!(intent, Intent::SnapPage);
        assert_eq!(page, Some(5));
    }

    #[test]
    fn test_action_serde_round_trip() {
        let action = Action {
            intent: Intent::SnapPage,
            query: "go to page 5".to_string(),
            context: Some(serde_json::json!({ "page": 1 })),
            page: Some(5),
            pdf: None,
            does_follow_up: false,
        };

        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains(r#""intent":"snap_page""#));

        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_raw_record_parses_model_output() {
        let raw = r#"{"find_fig": true, "scroll_up": false, "non_determ": false}"#;
        let record: RawActionRecord = serde_json::from_str(raw).unwrap();
        let (intent, _) = record.into_intent().unwrap();
        assert_eq!(intent, Intent::FindFig);
    }
}
