use crate::cli::ReportFormat;
use crate::error::{DeskCompareError, Result};
use desk_compare_common::EngineOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// レポート出力先（未設定時はカレントディレクトリ）
    pub output_dir: Option<PathBuf>,
    /// 出力形式 (excel/json/both)
    pub format: String,
    /// 照合エンジン設定
    pub engine: EngineOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            format: ReportFormat::default().to_string(),
            engine: EngineOptions::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（存在しなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DeskCompareError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("desk-compare").join("config.json"))
    }

    pub fn report_format(&self) -> Result<ReportFormat> {
        self.format.parse().map_err(DeskCompareError::Config)
    }

    /// 出力先ディレクトリ（CLI指定を優先）
    pub fn output_dir_or(&self, cli_output: Option<PathBuf>) -> PathBuf {
        cli_output
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report_format().unwrap(), ReportFormat::Excel);
        assert_eq!(config.engine.monitor_code, "MNTR");
        assert_eq!(config.engine.batch_size, 50);
    }

    #[test]
    fn test_invalid_format_is_config_error() {
        let config = Config {
            format: "pdf".into(),
            ..Default::default()
        };
        assert!(matches!(config.report_format(), Err(DeskCompareError::Config(_))));
    }

    #[test]
    fn test_cli_output_overrides_config() {
        let config = Config {
            output_dir: Some(PathBuf::from("/reports")),
            ..Default::default()
        };
        assert_eq!(config.output_dir_or(Some(PathBuf::from("out"))), PathBuf::from("out"));
        assert_eq!(config.output_dir_or(None), PathBuf::from("/reports"));
        assert_eq!(Config::default().output_dir_or(None), PathBuf::from("."));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(config.report_format().unwrap(), ReportFormat::Json);
        assert_eq!(config.engine, EngineOptions::default());
    }
}
