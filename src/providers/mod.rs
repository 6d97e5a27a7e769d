//! 注释数据源模块
//!
//! 该模块定义了获取注释分页的抽象，以及在其之上的分页收集逻辑。
//! 具体的网络实现由调用方提供。

use async_trait::async_trait;
use futures::future;
use tracing::{debug, info};

use crate::{
    annotator::types::Annotation,
    error::Result,
    providers::genius::models::{ReferentsResponse, TextFormat},
};

pub mod genius;

/// 定义了所有注释数据源需要实现的通用接口。
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ReferentSource: Send + Sync {
    ///
    /// 返回数据源的唯一名称，用于日志。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 获取指定歌曲的一页 referent。
    ///
    /// # 参数
    /// * `song_id` - 特定于该数据源的歌曲 ID。
    /// * `page` - 页码，从 1 开始。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含该页的 referent。没有更多数据时返回空页。
    ///
    async fn referents_page(&self, song_id: &str, page: u32) -> Result<ReferentsResponse>;
}

/// 逐页获取一首歌的全部注释，直到遇到空页。
///
/// 页面按顺序请求，返回的注释保持页面顺序，这个顺序就是脚注的编号顺序。
///
/// # 参数
/// * `source` - 注释数据源。
/// * `song_id` - 歌曲 ID。
/// * `format` - 注释正文使用的文本格式。
pub async fn collect_song_annotations(
    source: &dyn ReferentSource,
    song_id: &str,
    format: TextFormat,
) -> Result<Vec<Annotation>> {
    let mut annotations = Vec::new();
    let mut page = 1;

    loop {
        let response = source.referents_page(song_id, page).await?;
        if response.referents.is_empty() {
            break;
        }

        debug!(
            "[Collector] '{}' 歌曲 {} 第 {} 页: {} 个 referent。",
            source.name(),
            song_id,
            page,
            response.referents.len()
        );

        annotations.extend(
            response
                .referents
                .into_iter()
                .map(|referent| referent.into_annotation(format)),
        );
        page += 1;
    }

    info!(
        "[Collector] 歌曲 {} 共获取 {} 条注释 ({} 页)。",
        song_id,
        annotations.len(),
        page - 1
    );
    Ok(annotations)
}

/// 并发获取多首歌的注释。
///
/// 返回顺序与 `song_ids` 一致。任意一首失败时整体返回该错误。
pub async fn collect_album_annotations(
    source: &dyn ReferentSource,
    song_ids: &[&str],
    format: TextFormat,
) -> Result<Vec<Vec<Annotation>>> {
    let futures = song_ids
        .iter()
        .map(|song_id| collect_song_annotations(source, song_id, format));

    future::try_join_all(futures).await
}
