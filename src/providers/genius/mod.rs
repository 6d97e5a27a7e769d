//! 歌词服务 referents 接口的数据模型与响应解析。
//!
//! 只负责把已经获取到的 JSON 转换成 [`Annotation`](crate::annotator::types::Annotation)，
//! 不包含任何网络请求。

pub mod models;

use tracing::trace;

use crate::{
    error::{AnnotatorError, Result},
    providers::genius::models::{ReferentsEnvelope, ReferentsResponse},
};

/// 解析 referents 接口的完整响应（包含 `meta` 和 `response`）。
///
/// # 返回
/// `meta.status` 不是 200 时返回 `AnnotatorError::ApiError`。
pub fn parse_referents_page(json: &str) -> Result<ReferentsResponse> {
    let envelope: ReferentsEnvelope = serde_json::from_str(json)?;

    if envelope.meta.status != 200 {
        let message = envelope
            .meta
            .message
            .unwrap_or_else(|| format!("status {}", envelope.meta.status));
        return Err(AnnotatorError::ApiError(format!("genius: {message}")));
    }

    let response = envelope.response.unwrap_or_default();
    trace!(
        "[Genius] 解析到 {} 个 referent。",
        response.referents.len()
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_page() {
        let json = r#"{
            "meta": {"status": 200},
            "response": {"referents": [
                {"id": 1, "fragment": "la la", "annotations": [{"id": 10, "body": {"html": "<p>hum</p>"}}]}
            ]}
        }"#;
        let page = parse_referents_page(json).unwrap();
        assert_eq!(page.referents.len(), 1);
        assert_eq!(page.referents[0].fragment.as_deref(), Some("la la"));
    }

    #[test]
    fn test_parse_error_status() {
        let json = r#"{"meta": {"status": 401, "message": "invalid token"}}"#;
        let err = parse_referents_page(json).unwrap_err();
        assert!(matches!(err, AnnotatorError::ApiError(ref m) if m.contains("invalid token")));
    }

    #[test]
    fn test_parse_missing_response_is_empty_page() {
        let page = parse_referents_page(r#"{"meta": {"status": 200}}"#).unwrap();
        assert!(page.referents.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_json_error() {
        assert!(matches!(
            parse_referents_page("not json"),
            Err(AnnotatorError::JsonParse(_))
        ));
    }
}
