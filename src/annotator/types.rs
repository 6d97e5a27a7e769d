//! 定义了注释拼接中使用的核心数据类型。

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

//=============================================================================
// 1. 输入
//=============================================================================

/// 一条锚定在歌词片段上的注释。
///
/// `fragment` 是该注释所对应的歌词原文片段，`notes` 是一条或多条已渲染的注释正文。
/// 生成脚注时只使用第一条注释正文。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// 注释锚定的歌词片段。为 `None` 或空字符串时该注释会被跳过。
    #[serde(default)]
    pub fragment: Option<String>,
    /// 注释正文列表，按 API 返回的顺序排列。
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Annotation {
    /// 创建一条只有一个注释正文的注释。
    pub fn new(fragment: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            notes: vec![note.into()],
        }
    }

    /// 返回第一条非空的注释正文。
    ///
    /// 只检查第一条，后面的正文即使非空也不会被使用。
    #[must_use]
    pub fn first_note(&self) -> Option<&str> {
        self.notes
            .first()
            .map(String::as_str)
            .filter(|note| !note.trim().is_empty())
    }
}

//=============================================================================
// 2. 选项
//=============================================================================

/// 片段在歌词中出现多次时的标记策略。
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
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MarkingStrategy {
    /// 标记片段的每一次出现，所有出现共用同一个编号。
    ///
    /// 重复的副歌会因此全部带上同一个标记。
    #[default]
    MarkAllOccurrences,
    /// 只标记片段在文档中的第一次出现。
    MarkFirstOccurrence,
}

/// 文本规范化模式。歌词和片段总是使用同一种模式。
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
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum NormalizationMode {
    /// 不做任何处理。
    None,
    /// Unicode NFC 规范化。
    Nfc,
    /// NFC 之后再音译为 ASCII，例如 `café` -> `cafe`。
    #[default]
    Ascii,
}

/// 注释拼接选项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpliceOptions {
    /// 重复片段的标记策略。
    pub marking_strategy: MarkingStrategy,
    /// 歌词与片段的规范化模式。
    pub normalization: NormalizationMode,
    /// 输出时是否对歌词纯文本部分进行 HTML 转义。
    ///
    /// 匹配始终在未转义的文本上进行，注释正文永远不会被转义。
    pub escape_text: bool,
}

impl Default for SpliceOptions {
    fn default() -> Self {
        Self {
            marking_strategy: MarkingStrategy::MarkAllOccurrences,
            normalization: NormalizationMode::Ascii,
            escape_text: false,
        }
    }
}

/// 歌词清理选项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerOptions {
    /// 移除歌词开头的 "Lyrics" 标题。
    pub strip_lyrics_header: bool,
    /// 移除 `[Verse 1]` 之类的段落标题。
    pub remove_section_headers: bool,
    /// 将直撇号 `'` 替换为 `’`。
    pub curly_apostrophes: bool,
    /// 在每个换行符后插入一个空格。
    pub indent_continuation_lines: bool,
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            strip_lyrics_header: true,
            remove_section_headers: false,
            curly_apostrophes: true,
            indent_continuation_lines: true,
        }
    }
}

//=============================================================================
// 3. 输出
//=============================================================================

/// 一条已生成的脚注。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// 脚注编号，与行内标记的编号相同。
    pub id: u32,
    /// 脚注正文。
    pub note: String,
}

/// 注释被跳过的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// 片段为空或缺失。
    EmptyFragment,
    /// 注释正文为空或缺失。
    EmptyNote,
    /// 片段不在当前歌词文本中。
    FragmentNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyFragment => write!(f, "片段为空"),
            SkipReason::EmptyNote => write!(f, "注释正文为空"),
            SkipReason::FragmentNotFound => write!(f, "歌词中未找到片段"),
        }
    }
}

/// 一条被跳过的注释的记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAnnotation {
    /// 该注释在输入列表中的下标。
    pub index: usize,
    /// 规范化后的片段（如果有）。
    pub fragment: Option<String>,
    /// 跳过原因。
    pub reason: SkipReason,
}

/// 一次注释拼接的完整结果。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotatedLyrics {
    /// 插入了行内标记的歌词。
    pub text: String,
    /// 已应用的脚注，按编号排列。
    pub footnotes: Vec<Footnote>,
    /// 渲染好的脚注列表，没有脚注时也包含空的 `<ol>` 外壳。
    pub footnote_block: String,
    /// 被跳过的注释。
    pub skipped: Vec<SkippedAnnotation>,
}

impl AnnotatedLyrics {
    /// 成功应用的注释数量。
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.footnotes.len()
    }

    /// 被跳过的注释数量。
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// 拼接歌词与脚注列表，得到可直接嵌入文档正文的内容。
    #[must_use]
    pub fn into_document(self) -> String {
        let mut document = self.text;
        document.push_str(&self.footnote_block);
        document
    }
}
