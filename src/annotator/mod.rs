//! 注释拼接核心模块
//!
//! 给定一段歌词纯文本和一组 (片段, 注释) 对，在歌词中找到每个片段，
//! 在其后插入带编号的行内标记，并生成编号一一对应的脚注列表。

pub mod markup;
pub mod processors;
pub mod types;

pub use types::{
    AnnotatedLyrics, Annotation, CleanerOptions, Footnote, MarkingStrategy, NormalizationMode,
    SkipReason, SkippedAnnotation, SpliceOptions,
};

use quick_xml::escape::escape;
use tracing::{debug, info, trace};

use crate::annotator::processors::normalizer::normalize;

// ==========================================================
//  顶级拼接入口
// ==========================================================

/// 将注释拼接进歌词，返回带行内标记的歌词和脚注列表。
///
/// 注释严格按输入顺序逐条处理，后一条注释匹配的是前面的注释修改后的文本。
/// 单条注释的问题（片段为空、正文为空、找不到片段）只会导致该注释被跳过，
/// 不会影响整个调用。
///
/// # 参数
/// * `lyrics` - 歌词纯文本。会先按 `options.normalization` 规范化。
/// * `annotations` - 按 API 顺序排列的注释列表，该顺序即脚注编号顺序。
/// * `options` - 拼接选项。
///
/// # 返回
/// `AnnotatedLyrics`，其中 `text` 是带标记的歌词，`footnote_block` 是渲染好的脚注列表。
pub fn annotate(
    lyrics: &str,
    annotations: &[Annotation],
    options: &SpliceOptions,
) -> AnnotatedLyrics {
    let result = annotations
        .iter()
        .enumerate()
        .fold(SpliceState::new(lyrics, options), |state, (index, annotation)| {
            state.apply(index, annotation)
        })
        .finish();

    debug!(
        "[Annotator] 拼接完成：应用 {} 条，跳过 {} 条。",
        result.applied_count(),
        result.skipped_count()
    );
    result
}

// ==========================================================
//  拼接状态
// ==========================================================

/// 文档中的一个片段。
///
/// 只有 `Text` 参与片段匹配，已插入的标记对后续注释不可见，
/// 因此后续注释永远不会匹配到标记的 HTML 内部。
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    FragmentOpen,
    FragmentClose,
    Marker(u32),
}

/// 一次拼接过程的中间状态。
///
/// 每一步都消耗旧状态并返回新状态，可以逐步检查拼接过程。
#[derive(Debug, Clone)]
pub struct SpliceState {
    segments: Vec<Segment>,
    footnotes: Vec<Footnote>,
    skipped: Vec<SkippedAnnotation>,
    next_id: u32,
    options: SpliceOptions,
}

impl SpliceState {
    /// 以一段歌词创建初始状态。歌词会先被规范化。
    #[must_use]
    pub fn new(lyrics: &str, options: &SpliceOptions) -> Self {
        let text = normalize(lyrics, options.normalization).into_owned();
        Self {
            segments: vec![Segment::Text(text)],
            footnotes: Vec::new(),
            skipped: Vec::new(),
            next_id: 1,
            options: options.clone(),
        }
    }

    /// 下一条成功应用的注释将获得的编号。
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// 已应用的脚注。
    #[must_use]
    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    /// 已跳过的注释。
    #[must_use]
    pub fn skipped(&self) -> &[SkippedAnnotation] {
        &self.skipped
    }

    /// 应用一条注释。
    ///
    /// # 参数
    /// * `index` - 该注释在输入列表中的下标，只用于日志和跳过记录。
    /// * `annotation` - 要应用的注释。
    #[must_use]
    pub fn apply(mut self, index: usize, annotation: &Annotation) -> Self {
        let fragment = annotation
            .fragment
            .as_deref()
            .map(|f| normalize(f, self.options.normalization).into_owned())
            .filter(|f| !f.trim().is_empty());

        let Some(fragment) = fragment else {
            return self.skip(index, None, SkipReason::EmptyFragment);
        };

        let Some(note) = annotation.first_note() else {
            return self.skip(index, Some(fragment), SkipReason::EmptyNote);
        };

        if !self.contains(&fragment) {
            return self.skip(index, Some(fragment), SkipReason::FragmentNotFound);
        }

        let id = self.next_id;
        let marked = match self.options.marking_strategy {
            MarkingStrategy::MarkAllOccurrences => self.mark(&fragment, id, usize::MAX),
            MarkingStrategy::MarkFirstOccurrence => self.mark(&fragment, id, 1),
        };
        trace!(
            "[Annotator] 注释 #{} 的片段 '{}' 标记了 {} 处。",
            id, fragment, marked
        );

        self.footnotes.push(Footnote {
            id,
            note: note.to_string(),
        });
        self.next_id += 1;
        self
    }

    /// 渲染最终结果。
    #[must_use]
    pub fn finish(self) -> AnnotatedLyrics {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) if self.options.escape_text => text.push_str(&escape(t.as_str())),
                Segment::Text(t) => text.push_str(t),
                Segment::FragmentOpen => text.push_str(markup::FRAGMENT_OPEN_TAG),
                Segment::FragmentClose => text.push_str(markup::FRAGMENT_CLOSE_TAG),
                Segment::Marker(id) => markup::write_marker(&mut text, *id),
            }
        }

        let footnote_block = markup::render_footnote_block(&self.footnotes);

        AnnotatedLyrics {
            text,
            footnotes: self.footnotes,
            footnote_block,
            skipped: self.skipped,
        }
    }

    fn skip(mut self, index: usize, fragment: Option<String>, reason: SkipReason) -> Self {
        info!(
            "[Annotator] 跳过第 {} 条注释 ({}): {:?}",
            index + 1,
            reason,
            fragment.as_deref().unwrap_or("")
        );
        self.skipped.push(SkippedAnnotation {
            index,
            fragment,
            reason,
        });
        self
    }

    fn contains(&self, fragment: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Text(t) if t.contains(fragment)))
    }

    /// 在纯文本片段中最多标记 `limit` 处出现，返回实际标记的数量。
    fn mark(&mut self, fragment: &str, id: u32, limit: usize) -> usize {
        let mut remaining = limit;
        let mut segments = Vec::with_capacity(self.segments.len() + 8);

        for segment in self.segments.drain(..) {
            let text = match segment {
                Segment::Text(text) if remaining > 0 && text.contains(fragment) => text,
                other => {
                    segments.push(other);
                    continue;
                }
            };

            let mut last_end = 0;
            for (start, matched) in text.match_indices(fragment) {
                if remaining == 0 {
                    break;
                }
                if start > last_end {
                    segments.push(Segment::Text(text[last_end..start].to_string()));
                }
                segments.push(Segment::FragmentOpen);
                segments.push(Segment::Text(matched.to_string()));
                segments.push(Segment::FragmentClose);
                segments.push(Segment::Marker(id));
                last_end = start + matched.len();
                remaining -= 1;
            }
            if last_end < text.len() {
                segments.push(Segment::Text(text[last_end..].to_string()));
            }
        }

        self.segments = segments;
        limit - remaining
    }
}
