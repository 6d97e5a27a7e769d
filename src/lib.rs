#![warn(missing_docs)]

//! # Lyrics Annotator RS
//!
//! 一个 Rust 库，把歌词注释以脚注的形式拼接进歌词文本，生成可直接嵌入电子书的 HTML 片段。
//!
//! ## 主要功能
//!
//! - **注释拼接**: 在歌词中找到每条注释对应的片段，加粗并插入带编号的行内标记，
//!   同时生成编号一一对应的脚注列表。
//! - **歌词清理**: 移除歌词服务附加的标题、段落标题，替换撇号，规范化 Unicode。
//! - **专辑批处理**: 并行处理整张专辑，每首歌独立编号。
//! - **分页收集**: 通过可替换的数据源逐页收集一首歌的全部注释。
//!
//! ## 拼接注释
//!
//! ```rust
//! use lyrics_annotator_rs::{Annotation, LyricsAnnotator};
//!
//! let annotator = LyricsAnnotator::new();
//! let annotations = vec![Annotation::new("hello", "<p>问候语。</p>")];
//!
//! let result = annotator.annotate("say hello", &annotations);
//!
//! assert_eq!(result.applied_count(), 1);
//! assert!(result.text.starts_with("say <strong>hello</strong>"));
//! assert!(result.footnote_block.starts_with("<ol id=\"InsertNote_NoteList\">"));
//! ```
//!
//! ## 收集注释
//!
//! ```rust,no_run
//! use lyrics_annotator_rs::{LyricsAnnotator, providers::ReferentSource};
//!
//! async fn run(source: &dyn ReferentSource, lyrics: &str) {
//!     let annotator = LyricsAnnotator::new();
//!     match annotator.collect_annotations(source, "378195").await {
//!         Ok(annotations) => {
//!             let result = annotator.annotate(lyrics, &annotations);
//!             println!("{}", result.into_document());
//!         }
//!         Err(e) => eprintln!("获取注释失败: {}", e),
//!     }
//! }
//! ```
pub mod annotator;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

use serde_json::Value;
use tracing::info;

pub use crate::{
    annotator::types::{
        AnnotatedLyrics, Annotation, CleanerOptions, Footnote, MarkingStrategy, NormalizationMode,
        SkipReason, SkippedAnnotation, SpliceOptions,
    },
    config::{AnnotatorConfig, GeniusCredentials},
    error::{AnnotatorError, Result},
    model::song::{AlbumInput, AnnotatedSong, SongInput},
    providers::genius::models::TextFormat,
};

use crate::{
    annotator::processors::{batch_processor, lyrics_cleaner},
    providers::ReferentSource,
};

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层注释器，封装了配置，为用户提供统一、简单的接口。
///
/// 这是与本库交互的主要入口点。
#[derive(Debug, Clone, Default)]
pub struct LyricsAnnotator {
    config: AnnotatorConfig,
}

impl LyricsAnnotator {
    /// 使用默认配置创建注释器。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定配置创建注释器。
    #[must_use]
    pub fn with_config(config: AnnotatorConfig) -> Self {
        Self { config }
    }

    /// 当前配置。
    #[must_use]
    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// 将注释拼接进一段歌词。
    ///
    /// 如果配置中开启了 `clean_lyrics`，歌词会先经过清理。
    pub fn annotate(&self, lyrics: &str, annotations: &[Annotation]) -> AnnotatedLyrics {
        if self.config.clean_lyrics {
            let cleaned = lyrics_cleaner::clean_lyrics(
                lyrics,
                &self.config.cleaner,
                self.splice().normalization,
            );
            annotator::annotate(&cleaned, annotations, self.splice())
        } else {
            annotator::annotate(lyrics, annotations, self.splice())
        }
    }

    /// 处理单首歌曲。歌曲没有歌词时返回 `None`。
    pub fn annotate_song(&self, song: &SongInput) -> Option<AnnotatedSong> {
        batch_processor::annotate_song(song, self.splice(), self.cleaner())
    }

    /// 并行处理整张专辑，输出顺序与输入一致。
    pub fn annotate_album(&self, songs: &[SongInput]) -> Vec<AnnotatedSong> {
        batch_processor::annotate_album(songs, self.splice(), self.cleaner())
    }

    /// 处理 JSON 形式的输入。
    ///
    /// 输入可以是一首歌（`SongInput`），也可以是一张专辑（带 `songs` 字段的 `AlbumInput`）。
    ///
    /// # 返回
    /// * `Err(AnnotatorError::JsonParse)` - 输入不是合法的 JSON。
    /// * `Err(AnnotatorError::MalformedInput)` - JSON 合法但结构不符合预期，例如歌词不是字符串。
    pub fn annotate_json(&self, json: &str) -> Result<Vec<AnnotatedSong>> {
        let value: Value = serde_json::from_str(json)?;

        if value.get("songs").is_some() {
            let album: AlbumInput = serde_json::from_value(value)
                .map_err(|e| AnnotatorError::MalformedInput(format!("专辑输入无效: {e}")))?;
            info!(
                "[Annotator] 处理专辑 '{}' - {}，共 {} 首。",
                album.name,
                album.artist,
                album.songs.len()
            );
            Ok(self.annotate_album(&album.songs))
        } else {
            let song: SongInput = serde_json::from_value(value)
                .map_err(|e| AnnotatorError::MalformedInput(format!("歌曲输入无效: {e}")))?;
            Ok(self.annotate_song(&song).into_iter().collect())
        }
    }

    /// 从数据源收集一首歌的全部注释，使用配置中的文本格式。
    pub async fn collect_annotations(
        &self,
        source: &dyn ReferentSource,
        song_id: &str,
    ) -> Result<Vec<Annotation>> {
        providers::collect_song_annotations(source, song_id, self.config.text_format).await
    }

    fn splice(&self) -> &SpliceOptions {
        &self.config.splice
    }

    fn cleaner(&self) -> Option<&CleanerOptions> {
        self.config.clean_lyrics.then_some(&self.config.cleaner)
    }
}
