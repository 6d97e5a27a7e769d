//! 歌词清理器。
//!
//! 把歌词服务返回的原始歌词整理成适合拼接注释、嵌入电子书的纯文本。

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::annotator::{
    processors::normalizer::normalize,
    types::{CleanerOptions, NormalizationMode},
};

/// 歌词服务在歌词前面加的标题后缀，例如 "Song Title Lyrics"。
const LYRICS_HEADER: &str = "Lyrics";

static SECTION_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\[[^\]\n]*\][ \t]*$").expect("编译 SECTION_HEADER_REGEX 失败")
});

static EXTRA_BLANK_LINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("编译 EXTRA_BLANK_LINES_REGEX 失败"));

/// 清理原始歌词。
///
/// 按顺序执行：移除标题、移除段落标题、替换撇号、缩进续行，最后规范化。
/// 规范化模式必须与之后拼接注释时使用的模式一致。
///
/// # 参数
/// * `raw` - 歌词服务返回的原始歌词。
/// * `options` - 清理选项。
/// * `normalization` - 规范化模式。
pub fn clean_lyrics(
    raw: &str,
    options: &CleanerOptions,
    normalization: NormalizationMode,
) -> String {
    let mut lyrics = raw.to_string();

    if options.strip_lyrics_header {
        lyrics = lyrics.replacen(LYRICS_HEADER, "", 1).trim().to_string();
    }

    if options.remove_section_headers {
        lyrics = remove_section_headers(&lyrics);
    }

    if options.curly_apostrophes {
        lyrics = lyrics.replace('\'', "’");
    }

    if options.indent_continuation_lines {
        lyrics = lyrics.replace('\n', "\n ");
    }

    let cleaned = normalize(&lyrics, normalization).into_owned();
    debug!(
        "[Cleaner] 歌词清理完成，{} 字符 -> {} 字符。",
        raw.chars().count(),
        cleaned.chars().count()
    );
    cleaned
}

/// 移除独占一行的 `[Verse 1]`、`[Chorus: Artist]` 之类的段落标题，并合并多余的空行。
pub fn remove_section_headers(lyrics: &str) -> String {
    let without_headers = SECTION_HEADER_REGEX.replace_all(lyrics, "");
    EXTRA_BLANK_LINES_REGEX
        .replace_all(&without_headers, "\n\n")
        .trim()
        .to_string()
}
