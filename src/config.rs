//! 负责处理库的持久化配置与凭据。

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    annotator::types::{CleanerOptions, SpliceOptions},
    error::{AnnotatorError, Result},
    providers::genius::models::TextFormat,
};

/// 配置目录名。
const CONFIG_DIR_NAME: &str = "lyrics-annotator";
/// 注释器配置文件名。
const ANNOTATOR_CONFIG_FILE: &str = "annotator_config.json";
/// 存放 API 凭据的环境变量。
pub const API_KEY_ENV_VAR: &str = "GENIUS_API_KEY";

/// 注释器的全部配置项。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// 拼接选项。
    pub splice: SpliceOptions,
    /// 歌词清理选项。
    pub cleaner: CleanerOptions,
    /// 注释正文使用的文本格式。
    pub text_format: TextFormat,
    /// 拼接前是否先清理歌词。
    pub clean_lyrics: bool,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            splice: SpliceOptions::default(),
            cleaner: CleanerOptions::default(),
            text_format: TextFormat::Html,
            clean_lyrics: true,
        }
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "annotator_config.json"。
pub fn get_config_file_path(filename: &str) -> Result<PathBuf> {
    let Some(mut config_dir) = dirs::config_dir() else {
        return Err(AnnotatorError::Config("无法找到用户配置目录".to_string()));
    };
    config_dir.push(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir)?;
    config_dir.push(filename);
    Ok(config_dir)
}

/// 从用户配置目录加载注释器配置。文件不存在时返回默认配置。
pub fn load_annotator_config() -> Result<AnnotatorConfig> {
    let config_path = get_config_file_path(ANNOTATOR_CONFIG_FILE)?;
    load_annotator_config_from_path(&config_path)
}

/// 将注释器配置保存到用户配置目录。
pub fn save_annotator_config(config: &AnnotatorConfig) -> Result<()> {
    let config_path = get_config_file_path(ANNOTATOR_CONFIG_FILE)?;
    save_annotator_config_to_path(config, &config_path)
}

/// 从指定路径加载注释器配置。文件不存在时返回默认配置。
pub fn load_annotator_config_from_path(path: &Path) -> Result<AnnotatorConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let config: AnnotatorConfig = serde_json::from_str(&content)?;
            info!("[Config] 已从 {:?} 加载注释器配置。", path);
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("[Config] 配置文件 {:?} 不存在，使用默认配置。", path);
            Ok(AnnotatorConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// 将注释器配置序列化为 JSON 并保存到指定路径。
pub fn save_annotator_config_to_path(config: &AnnotatorConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    info!("[Config] 注释器配置已保存到 {:?}。", path);
    Ok(())
}

/// 歌词服务的 API 凭据。
///
/// 凭据只从外部环境读取，不会写入配置文件。
#[derive(Clone, PartialEq, Eq)]
pub struct GeniusCredentials {
    access_token: String,
}

impl GeniusCredentials {
    /// 从 `GENIUS_API_KEY` 环境变量读取凭据。
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过自定义的查找函数读取凭据。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(API_KEY_ENV_VAR) {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                access_token: token.trim().to_string(),
            }),
            Some(_) => {
                warn!("[Config] 环境变量 {} 为空。", API_KEY_ENV_VAR);
                Err(AnnotatorError::Config(format!(
                    "环境变量 {API_KEY_ENV_VAR} 为空"
                )))
            }
            None => Err(AnnotatorError::Config(format!(
                "需要 API 凭据，请设置环境变量 {API_KEY_ENV_VAR}"
            ))),
        }
    }

    /// 访问令牌。
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for GeniusCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeniusCredentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::types::{MarkingStrategy, NormalizationMode};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_annotator_config_from_path(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, AnnotatorConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ANNOTATOR_CONFIG_FILE);
        let mut config = AnnotatorConfig::default();
        config.splice.marking_strategy = MarkingStrategy::MarkFirstOccurrence;
        config.splice.normalization = NormalizationMode::Nfc;
        config.text_format = TextFormat::Plain;

        save_annotator_config_to_path(&config, &path).unwrap();
        let loaded = load_annotator_config_from_path(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(
            &path,
            r#"{"splice": {"marking_strategy": "mark-first-occurrence"}, "clean_lyrics": false}"#,
        )
        .unwrap();

        let loaded = load_annotator_config_from_path(&path).unwrap();

        assert_eq!(
            loaded.splice.marking_strategy,
            MarkingStrategy::MarkFirstOccurrence
        );
        assert_eq!(loaded.splice.normalization, NormalizationMode::Ascii);
        assert!(!loaded.clean_lyrics);
        assert!(loaded.cleaner.strip_lyrics_header);
    }

    #[test]
    fn test_invalid_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_annotator_config_from_path(&path),
            Err(AnnotatorError::JsonParse(_))
        ));
    }

    #[test]
    fn test_credentials_lookup() {
        let credentials =
            GeniusCredentials::from_lookup(|_| Some(" token-123 ".to_string())).unwrap();
        assert_eq!(credentials.access_token(), "token-123");
        assert!(!format!("{credentials:?}").contains("token-123"));

        assert!(matches!(
            GeniusCredentials::from_lookup(|_| None),
            Err(AnnotatorError::Config(_))
        ));
        assert!(matches!(
            GeniusCredentials::from_lookup(|_| Some("   ".to_string())),
            Err(AnnotatorError::Config(_))
        ));
    }
}
