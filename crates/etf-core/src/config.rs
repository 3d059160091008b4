//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 우선순위: 내장 기본값 → TOML 파일(선택) → `ETF_DASH__` 접두사 환경 변수.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EtfError;
use crate::types::LookbackPeriod;

/// 기본 설정 파일 경로 (확장자 제외).
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 시세 데이터 제공자 설정
    pub provider: ProviderConfig,
    /// 분석 설정
    pub analysis: AnalysisConfig,
    /// 화면 출력 설정
    pub display: DisplayConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// span 진입/종료 이벤트 출력 여부
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            span_events: false,
        }
    }
}

/// Yahoo Finance 제공자 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API 기본 URL (chart, quoteSummary, getcrumb)
    pub base_url: String,
    /// 세션 쿠키 발급 URL
    pub cookie_url: String,
    /// HTTP User-Agent
    pub user_agent: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 30,
        }
    }
}

/// 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 마지막 월봉의 수익률을 버릴지 여부.
    ///
    /// 제공자의 마지막 월봉은 진행 중인 달이므로 기존 출력과 같은 값을 내려면 `true`.
    pub drop_trailing_bar: bool,
    /// 조회 기간을 지정하지 않았을 때 사용할 기간
    pub default_lookback: LookbackPeriod,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            drop_trailing_bar: true,
            default_lookback: LookbackPeriod::OneYear,
        }
    }
}

/// 화면 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 차트 너비 (문자 수)
    pub chart_width: usize,
    /// 차트 높이 (줄 수)
    pub chart_height: usize,
    /// 원본 월봉 표 출력 여부
    pub show_bars: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            chart_width: 60,
            chart_height: 12,
            show_bars: true,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `path`가 `None`이면 [`DEFAULT_CONFIG_PATH`]를 찾아보고, 없으면 기본값을 사용합니다.
    /// 명시한 파일은 반드시 존재해야 합니다.
    pub fn load(path: Option<&Path>) -> Result<Self, EtfError> {
        let file_source = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("provider.base_url", ProviderConfig::default().base_url)?
            .set_default("provider.cookie_url", ProviderConfig::default().cookie_url)?
            // 파일에서 로드
            .add_source(file_source)
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("ETF_DASH")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.analysis.drop_trailing_bar);
        assert_eq!(config.analysis.default_lookback, LookbackPeriod::OneYear);
        assert_eq!(config.provider.timeout_secs, 30);
        assert!(config.display.show_bars);
        assert!(!config.logging.span_events);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some(Path::new("does/not/exist.toml")));
        assert!(matches!(result, Err(EtfError::Config(_))));
    }
}
