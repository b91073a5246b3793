use anyhow::{Context, Result};
use clap::Parser;
use desk_compare::{cli, compare, config, export, inspect, reader};
use chrono::Local;
use cli::{Cli, Commands};
use compare::CompareRequest;
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Compare { file1, file2, output, format, preview } => {
            println!("🖥  desk-compare - 照合\n");

            let format = match format {
                Some(format) => format,
                None => config.report_format()?,
            };
            let request = CompareRequest {
                file1,
                file2,
                output_dir: config.output_dir_or(output),
                format,
                options: config.engine.clone(),
                timestamp: Local::now().naive_local(),
            };

            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n[{bar:40.cyan/blue}] {pos}%")
                    .context("進捗バーの書式が不正です")?,
            );
            let verbose = cli.verbose;
            let mut on_progress = |percent: u8, message: &str| {
                pb.set_position(percent as u64);
                pb.set_message(message.to_string());
                if verbose {
                    pb.println(format!("[{:>3}%] {}", percent, message));
                }
            };

            let outcome = compare::run_comparison(&request, &mut on_progress);
            pb.finish_and_clear();
            let outcome = outcome.with_context(|| {
                format!("照合に失敗しました ({} / {})", request.file1.display(), request.file2.display())
            })?;

            for warning in &outcome.report.warnings {
                eprintln!("⚠ {}", warning);
            }

            let stats = &outcome.report.stats;
            println!("✔ MNTR行数: ファイル1 {}行 / ファイル2 {}行", stats.rows[0], stats.rows[1]);
            println!("✔ シリアル修復: ファイル1 {}件 / ファイル2 {}件", stats.replacements[0], stats.replacements[1]);
            if stats.disagreements > 0 {
                println!("- ファイル間でデスクが異なるシリアル: {}件", stats.disagreements);
                for sample in &stats.disagreement_samples {
                    println!("    {}: {} / {}", sample.serial, sample.desk_file1, sample.desk_file2);
                }
            }
            println!("✔ 不一致: {}件\n", outcome.report.rows.len());

            if preview {
                print!("{}", export::preview::render_preview(&outcome.report.rows));
            }

            for path in &outcome.paths {
                println!("✔ 出力: {}", path.display());
            }
            println!("\n✅ 照合完了");
        }

        Commands::Inspect { file } => {
            println!("🔍 desk-compare - 列構成\n");
            compare::validate_input(&file)?;
            let headers = reader::read_headers(&file)?;
            for line in inspect::describe_layout(&headers, &config.engine.columns) {
                println!("  {}", line);
            }
        }

        Commands::Config { show, init } => {
            if init {
                let defaults = Config::default();
                defaults.save()?;
                println!("✔ デフォルト設定を書き出しました: {}", Config::config_path()?.display());
            }

            if show || !init {
                println!("設定: {}", Config::config_path()?.display());
                println!("  出力先: {}", config.output_dir_or(None).display());
                println!("  出力形式: {}", config.format);
                println!("  資産種別: {}", config.engine.monitor_code);
                println!("  バッチサイズ: {}", config.engine.batch_size);
                println!("  シリアル列接頭辞: {}", config.engine.columns.serial_prefix);
                println!("  デスク列: {}", config.engine.columns.desk_column);
            }
        }
    }

    Ok(())
}
