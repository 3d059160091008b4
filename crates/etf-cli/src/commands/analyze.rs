//! 단일 조회 명령.

use anyhow::{Context, Result};
use etf_analytics::{EtfDashboard, EtfReport};
use etf_core::{AppConfig, EtfError, EtfQuery, EtfResult, LookbackPeriod, RateInputs, Ticker};
use etf_data::MarketDataProvider;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

use crate::render::{render_json, render_text};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: text, json", s)),
        }
    }
}

/// `analyze` 명령 입력.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// 티커
    pub ticker: String,
    /// 조회 기간 (없으면 설정의 기본값)
    pub period: Option<String>,
    /// 연간 무위험 이자율 (%)
    pub risk_free: f64,
    /// 연간 시장 수익률 (%)
    pub market_return: f64,
    /// 출력 형식
    pub format: OutputFormat,
}

/// 사용자 입력으로 조회 요청을 만듭니다.
pub fn build_query(
    ticker: &str,
    period: Option<&str>,
    risk_free: f64,
    market_return: f64,
    default_lookback: LookbackPeriod,
) -> EtfResult<EtfQuery> {
    let ticker = Ticker::parse(ticker)?;
    let lookback = match period.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.parse::<LookbackPeriod>().map_err(EtfError::InvalidInput)?,
        None => default_lookback,
    };
    if !risk_free.is_finite() || !market_return.is_finite() {
        return Err(EtfError::InvalidInput(
            "금리 가정은 유한한 숫자여야 합니다".to_string(),
        ));
    }
    Ok(EtfQuery::new(
        ticker,
        lookback,
        RateInputs::new(risk_free, market_return),
    ))
}

/// 조회 중 스피너를 표시하며 대시보드를 실행합니다.
pub async fn run_with_spinner<P: MarketDataProvider>(
    dashboard: &EtfDashboard<P>,
    query: &EtfQuery,
    show_spinner: bool,
) -> EtfResult<EtfReport> {
    if !show_spinner {
        return dashboard.run(query).await;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching {} ({}) from Yahoo Finance...", query.ticker, query.lookback));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = dashboard.run(query).await;
    pb.finish_and_clear();
    result
}

/// `analyze` 명령 실행.
pub async fn run_analyze<P: MarketDataProvider>(
    dashboard: &EtfDashboard<P>,
    config: AnalyzeConfig,
    app: &AppConfig,
) -> Result<()> {
    let query = build_query(
        &config.ticker,
        config.period.as_deref(),
        config.risk_free,
        config.market_return,
        app.analysis.default_lookback,
    )?;

    info!(ticker = %query.ticker, lookback = %query.lookback, "Analyze 시작");

    // JSON 출력은 파이프 대상이므로 스피너를 띄우지 않음
    let report = run_with_spinner(dashboard, &query, config.format == OutputFormat::Text)
        .await
        .with_context(|| format!("{} 조회 실패", query.ticker))?;

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&report, &app.display)),
        OutputFormat::Json => println!(
            "{}",
            render_json(&report).context("Failed to serialize report")?
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::parse("csv").is_err());
    }

    #[test]
    fn test_build_query_defaults_period() {
        let query = build_query(" qqq ", None, 4.0, 8.0, LookbackPeriod::TwoYears).unwrap();
        assert_eq!(query.ticker.as_str(), "QQQ");
        assert_eq!(query.lookback, LookbackPeriod::TwoYears);

        let query = build_query("QQQ", Some(""), 4.0, 8.0, LookbackPeriod::OneYear).unwrap();
        assert_eq!(query.lookback, LookbackPeriod::OneYear);
    }

    #[test]
    fn test_build_query_rejects_bad_input() {
        let err = build_query("QQQ", Some("7y"), 4.0, 8.0, LookbackPeriod::OneYear).unwrap_err();
        assert_eq!(err.category(), "invalid-input");

        let err = build_query("", None, 4.0, 8.0, LookbackPeriod::OneYear).unwrap_err();
        assert_eq!(err.category(), "invalid-input");

        let err = build_query("QQQ", None, f64::NAN, 8.0, LookbackPeriod::OneYear).unwrap_err();
        assert_eq!(err.category(), "invalid-input");
    }
}
