//! 此模块定义了用于反序列化 referents 接口响应的 `struct` 数据结构。
//!
//! 一个 referent 对应歌词中的一个片段，可以挂载多条注释。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::annotator::types::Annotation;

// =================================================================
// 响应外壳
// =================================================================

/// 接口响应的顶层结构。
#[derive(Debug, Deserialize)]
pub struct ReferentsEnvelope {
    /// 状态信息。
    pub meta: Meta,
    /// 响应数据，出错时可能缺失。
    pub response: Option<ReferentsResponse>,
}

/// 响应的状态信息。
#[derive(Debug, Deserialize)]
pub struct Meta {
    /// HTTP 风格的状态码，`200` 表示成功。
    pub status: u16,
    /// 出错时的说明。
    pub message: Option<String>,
}

// =================================================================
// referents 接口 (`/referents?song_id=...&page=...`) 的模型
// =================================================================

/// 一页 referent。空页表示分页结束。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferentsResponse {
    /// 本页的 referent 列表。
    #[serde(default)]
    pub referents: Vec<Referent>,
}

/// 歌词中被注释的一个片段。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Referent {
    /// referent ID。
    #[serde(default)]
    pub id: u64,
    /// 被注释的歌词原文。
    pub fragment: Option<String>,
    /// 挂载在该片段上的注释。
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
}

/// 一条原始注释。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAnnotation {
    /// 注释 ID。
    #[serde(default)]
    pub id: u64,
    /// 注释正文，键是文本格式（`html`、`plain`、`dom` 等），值是对应格式的内容。
    #[serde(default)]
    pub body: BTreeMap<String, Value>,
}

/// 注释正文的文本格式。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TextFormat {
    /// 已渲染的 HTML，可直接嵌入脚注。
    #[default]
    Html,
    /// 纯文本。
    Plain,
    /// Markdown。
    Markdown,
    /// 结构化的 DOM 树，不是字符串，只能作为回退。
    Dom,
}

impl RawAnnotation {
    /// 取出指定格式的注释正文。
    ///
    /// 如果该格式不存在或不是字符串，按键名顺序回退到第一个字符串形式的正文。
    #[must_use]
    pub fn note(&self, format: TextFormat) -> Option<&str> {
        self.body
            .get(format.as_ref())
            .and_then(Value::as_str)
            .or_else(|| self.body.values().find_map(Value::as_str))
            .filter(|note| !note.trim().is_empty())
    }
}

impl Referent {
    /// 转换为拼接用的 `Annotation`。
    ///
    /// 每条原始注释取一条正文，位置不变。没有可用正文的注释保留为空字符串，
    /// 第一条为空时拼接器会跳过整条注释，而不是改用后面的正文。
    #[must_use]
    pub fn into_annotation(self, format: TextFormat) -> Annotation {
        let notes = self
            .annotations
            .iter()
            .map(|raw| raw.note(format).unwrap_or_default().to_string())
            .collect();

        Annotation {
            fragment: self.fragment,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(body: Value) -> RawAnnotation {
        serde_json::from_value(json!({ "id": 1, "body": body })).unwrap()
    }

    #[test]
    fn test_note_prefers_requested_format() {
        let annotation = raw(json!({"html": "<p>a</p>", "plain": "a"}));
        assert_eq!(annotation.note(TextFormat::Plain), Some("a"));
        assert_eq!(annotation.note(TextFormat::Html), Some("<p>a</p>"));
    }

    #[test]
    fn test_note_falls_back_to_first_string_body() {
        let annotation = raw(json!({"dom": {"tag": "root"}, "plain": "fallback"}));
        assert_eq!(annotation.note(TextFormat::Dom), Some("fallback"));
        assert_eq!(annotation.note(TextFormat::Html), Some("fallback"));
    }

    #[test]
    fn test_note_without_string_body() {
        let annotation = raw(json!({"dom": {"tag": "root"}}));
        assert_eq!(annotation.note(TextFormat::Html), None);
    }

    #[test]
    fn test_into_annotation_keeps_note_positions() {
        let referent = Referent {
            id: 5,
            fragment: Some("line".to_string()),
            annotations: vec![
                raw(json!({"html": "first"})),
                raw(json!({"dom": {}})),
                raw(json!({"html": "third"})),
            ],
        };
        let annotation = referent.into_annotation(TextFormat::Html);
        assert_eq!(annotation.fragment.as_deref(), Some("line"));
        assert_eq!(annotation.notes, vec!["first", "", "third"]);
    }

    #[test]
    fn test_blank_first_note_is_not_replaced_by_second() {
        let referent = Referent {
            id: 6,
            fragment: Some("road".to_string()),
            annotations: vec![
                raw(json!({"html": ""})),
                raw(json!({"html": "<p>second</p>"})),
            ],
        };
        let annotation = referent.into_annotation(TextFormat::Html);
        assert_eq!(annotation.first_note(), None);

        let result = crate::annotator::annotate(
            "open road",
            &[annotation],
            &crate::annotator::types::SpliceOptions::default(),
        );
        assert_eq!(result.applied_count(), 0);
        assert_eq!(
            result.skipped[0].reason,
            crate::annotator::types::SkipReason::EmptyNote
        );
        assert_eq!(result.text, "open road");
    }

    #[test]
    fn test_text_format_names() {
        assert_eq!(TextFormat::Html.as_ref(), "html");
        assert_eq!("PLAIN".parse::<TextFormat>().unwrap(), TextFormat::Plain);
    }
}
