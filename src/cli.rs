use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "desk-compare")]
#[command(about = "デスク・モニター棚卸しスナップショット照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 2つの棚卸しファイルを照合して不一致レポートを出力
    Compare {
        /// 1つ目のスプレッドシート
        #[arg(required = true)]
        file1: PathBuf,

        /// 2つ目のスプレッドシート
        #[arg(required = true)]
        file2: PathBuf,

        /// 出力ディレクトリ（デフォルト: 設定値またはカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (excel/json/both)
        #[arg(short, long)]
        format: Option<ReportFormat>,

        /// 不一致行をコンソールに表示
        #[arg(long)]
        preview: bool,
    },

    /// スプレッドシートの列構成を表示
    Inspect {
        /// 対象ファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定を書き出す
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Excel,
    Json,
    Both,
}

impl ReportFormat {
    pub fn writes_excel(&self) -> bool {
        matches!(self, ReportFormat::Excel | ReportFormat::Both)
    }

    pub fn writes_json(&self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::Both)
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "json" => Ok(ReportFormat::Json),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use excel, json, or both", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Excel => write!(f, "excel"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Both => write!(f, "both"),
        }
    }
}
