//! 检索后端响应类型
//!
//! 线上格式为 camelCase，外层有 body.search 包装；核心只消费剥壳后的 SearchHits。

use serde::{Deserialize, Serialize};

/// 检索响应顶层包装
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub body: SearchBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchBody {
    pub search: SearchHits,
}

/// 排序后的命中列表 + 聚合出的检索上下文文本
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHits {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    /// 聚合检索文本，grounded 追问的事实依据
    #[serde(default)]
    pub text: String,
}

/// 单个命中：来源文档 URL + 页级 bounding box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub source_url: String,
    #[serde(default)]
    pub bounding_boxes: Vec<BoundingBox>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub page_number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_response() {
        let raw = r#"{
            "body": {
                "search": {
                    "results": [
                        {
                            "sourceUrl": "https://example.com/report.pdf",
                            "boundingBoxes": [
                                { "pageNumber": 12 },
                                { "pageNumber": 13 }
                            ]
                        }
                    ],
                    "text": "Revenue grew 14% year over year."
                }
            }
        }"#;

        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let hits = parsed.body.search;
        assert_eq!(hits.results.len(), 1);
        assert_eq!(hits.results[0].source_url, "https://example.com/report.pdf");
        assert_eq!(hits.results[0].bounding_boxes[0].page_number, 12);
        assert!(hits.text.contains("Revenue"));
    }

    #[test]
    fn test_parse_empty_hits() {
        let raw = r#"{ "body": { "search": { "results": [] } } }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.body.search.results.is_empty());
        assert!(parsed.body.search.text.is_empty());
    }
}
