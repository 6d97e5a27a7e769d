//! 专辑批量注释处理器。
//!
//! 每首歌的拼接互不共享状态，因此整张专辑可以并行处理。

use rayon::prelude::*;
use tracing::{info, warn};

use crate::{
    annotator::{
        annotate,
        processors::lyrics_cleaner::clean_lyrics,
        types::{CleanerOptions, SpliceOptions},
    },
    model::song::{AnnotatedSong, SongInput},
};

/// 为单首歌曲清理歌词并拼接注释。
///
/// # 参数
/// * `song` - 待处理的歌曲。
/// * `splice` - 拼接选项。
/// * `cleaner` - 清理选项。为 `None` 时歌词只做规范化。
///
/// # 返回
/// 歌曲没有歌词时返回 `None`。
pub fn annotate_song(
    song: &SongInput,
    splice: &SpliceOptions,
    cleaner: Option<&CleanerOptions>,
) -> Option<AnnotatedSong> {
    let Some(raw_lyrics) = song.lyrics() else {
        info!(
            "[Batch] 跳过第 {} 首 '{}'：没有可用的歌词。",
            song.track_number, song.title
        );
        return None;
    };

    let lyrics = match cleaner {
        Some(cleaner_options) => clean_lyrics(raw_lyrics, cleaner_options, splice.normalization),
        None => raw_lyrics.to_string(),
    };

    let annotated = annotate(&lyrics, &song.annotations, splice);
    if annotated.applied_count() == 0 && !song.annotations.is_empty() {
        warn!(
            "[Batch] '{}' 的 {} 条注释全部未能应用。",
            song.title,
            song.annotations.len()
        );
    }

    Some(AnnotatedSong {
        track_number: song.track_number,
        title: song.title.clone(),
        annotated,
    })
}

/// 并行处理整张专辑。
///
/// 输出顺序与输入顺序一致，没有歌词的曲目会被略过。
pub fn annotate_album(
    songs: &[SongInput],
    splice: &SpliceOptions,
    cleaner: Option<&CleanerOptions>,
) -> Vec<AnnotatedSong> {
    let annotated: Vec<AnnotatedSong> = songs
        .par_iter()
        .filter_map(|song| annotate_song(song, splice, cleaner))
        .collect();

    info!(
        "[Batch] 专辑处理完成：共 {} 首，{} 首有歌词。",
        songs.len(),
        annotated.len()
    );
    annotated
}
