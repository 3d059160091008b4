//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod explain;
pub mod interactive;

use anyhow::{Context, Result};
use etf_analytics::{AnalysisOptions, EtfDashboard};
use etf_core::AppConfig;
use etf_data::YahooFinanceProvider;

/// 설정으로 Yahoo Finance 대시보드를 만듭니다.
pub fn yahoo_dashboard(app: &AppConfig) -> Result<EtfDashboard<YahooFinanceProvider>> {
    let provider = YahooFinanceProvider::new(app.provider.clone())
        .context("Failed to create Yahoo Finance client")?;
    Ok(EtfDashboard::new(
        provider,
        AnalysisOptions::from(&app.analysis),
    ))
}
