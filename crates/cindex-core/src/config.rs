//! 설정 관리.
//!
//! 이 모듈은 파이프라인 설정을 정의하고 관리합니다.
//!
//! 자격증명을 포함한 모든 설정은 파이프라인 진입점에 명시적으로 전달됩니다.
//! 생성자에서 암묵적으로 환경을 읽는 대신, 로드 시점에 검증하고
//! 누락 시 이름이 지정된 에러로 즉시 실패합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// CoinGecko 데이터 소스 설정
    #[serde(default)]
    pub coingecko: CoinGeckoConfig,
    /// 벤치마크 데이터 소스 설정
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 출력 설정
    #[serde(default)]
    pub output: OutputConfig,
}

/// CoinGecko 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoinGeckoConfig {
    /// API 기본 URL
    #[serde(default = "default_coingecko_url")]
    pub base_url: String,
    /// Pro API 키 (필수)
    #[serde(default)]
    pub api_key: String,
    /// 견적 통화
    #[serde(default = "default_currency")]
    pub currency: String,
    /// 소수점 정밀도
    #[serde(default = "default_precision")]
    pub precision: u8,
}

fn default_coingecko_url() -> String {
    "https://pro-api.coingecko.com".to_string()
}
fn default_currency() -> String {
    "usd".to_string()
}
fn default_precision() -> u8 {
    2
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pro-api.coingecko.com".to_string(),
            api_key: String::new(),
            currency: "usd".to_string(),
            precision: 2,
        }
    }
}

/// 벤치마크 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchmarkConfig {
    /// 차트 API 기본 URL
    #[serde(default = "default_benchmark_url")]
    pub base_url: String,
    /// 벤치마크 심볼 (NASDAQ Composite)
    #[serde(default = "default_benchmark_symbol")]
    pub symbol: String,
}

fn default_benchmark_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}
fn default_benchmark_symbol() -> String {
    "^IXIC".to_string()
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            symbol: "^IXIC".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// 병합 테이블 CSV 파일명 (고정 기본값)
    #[serde(default = "default_merged_csv")]
    pub merged_csv: String,
    /// 차트 데이터 출력 디렉토리
    #[serde(default = "default_chart_dir")]
    pub chart_dir: String,
}

fn default_merged_csv() -> String {
    "merged_data.csv".to_string()
}
fn default_chart_dir() -> String {
    ".".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            merged_csv: "merged_data.csv".to_string(),
            chart_dir: ".".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값에 환경 변수(`CINDEX__` 접두사)만 적용됩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("CINDEX")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        Self::load("config/default.toml")
    }

    /// 필수 자격증명이 존재하는지 검증합니다.
    ///
    /// API 키가 비어 있으면 키 이름이 지정된 에러로 즉시 실패합니다.
    pub fn validate(&self) -> CoreResult<()> {
        if self.coingecko.api_key.trim().is_empty() {
            return Err(CoreError::MissingCredential(
                "coingecko.api_key (env: CINDEX__COINGECKO__API_KEY)".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.coingecko.currency, "usd");
        assert_eq!(config.benchmark.symbol, "^IXIC");
        assert_eq!(config.output.merged_csv, "merged_data.csv");
    }

    #[test]
    fn test_validate_rejects_missing_api_key() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("coingecko.api_key"));
    }

    #[test]
    fn test_validate_accepts_api_key() {
        let mut config = AppConfig::default();
        config.coingecko.api_key = "CG-test-key".to_string();
        assert!(config.validate().is_ok());
    }
}
