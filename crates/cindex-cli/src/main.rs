//! 암호화폐 지수 비교 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 최근 14일 데이터로 지수 구축 및 NASDAQ 비교
//! cindex run --ids bitcoin ethereum solana --days 14
//!
//! # 전체 기간 데이터 사용
//! cindex run --ids bitcoin --days max
//!
//! # 잘 알려진 자산 식별자 목록 보기
//! cindex list
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

mod commands;

use cindex_core::{init_logging, AppConfig};
use cindex_data::Window;
use commands::run::{print_available_assets, run_pipeline, RunOptions};

#[derive(Parser)]
#[command(name = "cindex")]
#[command(about = "시가총액 가중 암호화폐 지수 vs NASDAQ 비교 파이프라인", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 지수 구축, 벤치마크 병합, 결과 출력 실행
    Run {
        /// 자산 식별자 목록 (예: bitcoin ethereum)
        #[arg(short, long, num_args = 1.., required = true)]
        ids: Vec<String>,

        /// 조회할 과거 일수 또는 'max'
        #[arg(short, long)]
        days: String,

        /// 설정 파일 경로
        #[arg(short, long, default_value = "config/default.toml")]
        config: String,

        /// 병합 CSV 출력 경로 (기본: 설정의 merged_data.csv)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 잘 알려진 자산 식별자 목록 보기
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ids,
            days,
            config,
            output,
        } => {
            let app_config = AppConfig::load(&config)
                .with_context(|| format!("Failed to load config from {}", config))?;

            // 자격증명 누락 시 수집 시작 전에 즉시 실패
            app_config.validate()?;

            init_logging(&app_config.logging)
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

            let window: Window = days
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;

            let options = RunOptions {
                asset_ids: ids,
                window,
                output_path: output,
            };

            if let Err(e) = run_pipeline(options, &app_config).await {
                error!("Pipeline failed: {:#}", e);
                return Err(e);
            }
        }

        Commands::List => {
            print_available_assets();
        }
    }

    Ok(())
}
