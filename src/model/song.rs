//! 定义了专辑批量注释所用的歌曲模型。

use serde::{Deserialize, Serialize};

use crate::annotator::types::{AnnotatedLyrics, Annotation};

/// 一首待注释的歌曲。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongInput {
    /// 曲目序号，从 1 开始。
    pub track_number: u32,
    /// 歌曲名。
    pub title: String,
    /// 原始歌词。歌词服务可能没有该曲目的歌词。
    #[serde(default)]
    pub lyrics: Option<String>,
    /// 该歌曲的注释，按 API 分页顺序排列。
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl SongInput {
    /// 返回非空白的歌词。
    #[must_use]
    pub fn lyrics(&self) -> Option<&str> {
        self.lyrics.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// 一首已注释的歌曲。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSong {
    /// 曲目序号。
    pub track_number: u32,
    /// 歌曲名。
    pub title: String,
    /// 拼接结果。
    pub annotated: AnnotatedLyrics,
}

/// 一张待注释的专辑。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumInput {
    /// 专辑名。
    pub name: String,
    /// 艺术家名。
    pub artist: String,
    /// 专辑曲目。
    pub songs: Vec<SongInput>,
}
