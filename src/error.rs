//! 定义了整个 `lyrics-annotator` 库的错误类型 `AnnotatorError`。
//!
//! 单条注释的问题不是错误，见 [`SkipReason`](crate::annotator::types::SkipReason)。

use std::io;
use thiserror::Error;

/// `lyrics-annotator` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum AnnotatorError {
    /// 通用的 anyhow 错误，主要来自外部实现的 `ReferentSource`
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 输入不是预期的结构，例如歌词不是字符串
    #[error("输入格式错误: {0}")]
    MalformedInput(String),

    /// 配置缺失或无效
    #[error("配置错误: {0}")]
    Config(String),

    /// 注释数据源返回错误或无效数据
    #[error("数据源返回了错误或无效数据: {0}")]
    ApiError(String),
}

/// `AnnotatorError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, AnnotatorError>;
