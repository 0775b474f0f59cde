//! 파이프라인 실행 명령어.
//!
//! 수집 → 지수 구축 → 벤치마크 병합 → CSV/차트 데이터 출력을
//! 단일 선형 파이프라인으로 실행합니다. 실행마다 테이블을 새로 구성하며
//! 실행 간 공유 상태는 최종 출력 파일뿐입니다.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use cindex_analytics::{
    build_index, merge_with_benchmark, write_merged_csv, ComparisonChart, IndexRequest,
};
use cindex_core::AppConfig;
use cindex_data::{CoinGeckoClient, Window, YahooFinanceClient};

/// 실행 옵션.
pub struct RunOptions {
    /// 자산 식별자 목록
    pub asset_ids: Vec<String>,
    /// 조회 윈도우
    pub window: Window,
    /// CSV 출력 경로 (None이면 설정 기본값)
    pub output_path: Option<String>,
}

/// 전체 파이프라인을 실행합니다.
///
/// 수집/변환 실패는 실행을 중단시키지만, 자산 하나의 표시 데이터 부재는
/// 보고 후 나머지 자산을 계속 처리합니다.
pub async fn run_pipeline(options: RunOptions, config: &AppConfig) -> Result<()> {
    let asset_client = CoinGeckoClient::new(&config.coingecko)
        .context("Failed to create asset series client (fetch stage)")?;
    let benchmark_client = YahooFinanceClient::new(&config.benchmark)
        .context("Failed to create benchmark client (fetch stage)")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    // 1. 지수 구축 (자산별 수집 + 가중치 계산)
    pb.set_message(format!(
        "Building index for {} assets...",
        options.asset_ids.len()
    ));
    let request = IndexRequest {
        asset_ids: options.asset_ids.clone(),
        window: options.window,
        currency: config.coingecko.currency.clone(),
        precision: config.coingecko.precision,
    };
    let index = build_index(&asset_client, &request).await.with_context(|| {
        format!(
            "Index build failed (fetch/transform stage, assets: {})",
            options.asset_ids.join(", ")
        )
    })?;

    // 2. 벤치마크 병합
    pb.set_message(format!("Merging with benchmark {}...", config.benchmark.symbol));
    let merged = merge_with_benchmark(&benchmark_client, index)
        .await
        .context("Benchmark merge failed (merge stage)")?;

    pb.finish_with_message(format!("Merged {} rows", merged.len()));

    // 3. CSV 저장
    let csv_path = options
        .output_path
        .unwrap_or_else(|| config.output.merged_csv.clone());
    let written = write_merged_csv(&merged, &csv_path)
        .with_context(|| format!("Failed to write merged table to {}", csv_path))?;
    println!("\n병합 테이블 저장 완료: {} 행", written);
    println!("저장 위치: {}", csv_path);

    // 4. 자산별 비교 차트 데이터 생성
    for asset_id in &options.asset_ids {
        match ComparisonChart::build(&merged, asset_id) {
            Ok(chart) => {
                let chart_path = chart_file_path(&config.output.chart_dir, asset_id);
                write_chart(&chart, &chart_path).with_context(|| {
                    format!("Failed to write chart data to {}", chart_path.display())
                })?;
                info!(asset_id = %asset_id, path = %chart_path.display(), "Chart data written");
                println!("차트 데이터 저장: {}", chart_path.display());
            }
            Err(e) if e.is_recoverable() => {
                // 한 자산의 표시 데이터 부재는 나머지 자산 처리를 막지 않음
                warn!(asset_id = %asset_id, "No merged data to render: {}", e);
                println!("⚠️  {}: 표시할 병합 데이터가 없습니다", asset_id);
            }
            Err(e) => return Err(e).context("Chart data generation failed (render stage)"),
        }
    }

    Ok(())
}

/// 자산별 차트 데이터 파일 경로.
fn chart_file_path(chart_dir: &str, asset_id: &str) -> std::path::PathBuf {
    Path::new(chart_dir).join(format!("chart_{}.json", asset_id))
}

/// 차트 데이터를 JSON 파일로 저장합니다.
fn write_chart(chart: &ComparisonChart, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), chart)?;
    Ok(())
}

/// 잘 알려진 CoinGecko 자산 식별자 목록.
pub fn well_known_assets() -> Vec<(&'static str, &'static str)> {
    vec![
        ("bitcoin", "Bitcoin"),
        ("ethereum", "Ethereum"),
        ("solana", "Solana"),
        ("chainlink", "Chainlink"),
        ("dogecoin", "Dogecoin"),
        ("polkadot", "Polkadot"),
        ("cardano", "Cardano"),
        ("avalanche-2", "Avalanche"),
        ("binancecoin", "BNB"),
    ]
}

/// 사용 가능한 자산 식별자 목록 출력.
pub fn print_available_assets() {
    println!("\n잘 알려진 자산 식별자:");
    println!("{:-<50}", "");
    for (id, name) in well_known_assets() {
        println!("  {} - {}", id, name);
    }
    println!("\n* 전체 목록은 CoinGecko 문서를 참고하세요.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_file_path() {
        let path = chart_file_path("out", "bitcoin");
        assert_eq!(path, Path::new("out").join("chart_bitcoin.json"));
    }

    #[test]
    fn test_well_known_assets_non_empty() {
        assert!(!well_known_assets().is_empty());
    }
}
