//! 与具体歌词服务无关的数据模型。

pub mod song;
