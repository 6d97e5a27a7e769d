//! 歌词处理器模块

pub mod batch_processor;
pub mod lyrics_cleaner;
pub mod normalizer;
