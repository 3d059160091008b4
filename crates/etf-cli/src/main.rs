//! ETF 성과 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # SPY 5년 월봉으로 성과 지표 계산
//! etf-dash analyze -t SPY -p 5y --risk-free 4.5 --market-return 9
//!
//! # JSON 출력
//! etf-dash analyze -t QQQ --risk-free 4 --market-return 8 --format json
//!
//! # 대화형 조회
//! etf-dash interactive
//!
//! # 지표 공식 설명
//! etf-dash explain sharpe
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use etf_core::{init_logging, AppConfig, LogConfig};
use tracing::error;

use etf_cli::commands::analyze::{run_analyze, AnalyzeConfig, OutputFormat};
use etf_cli::commands::explain::run_explain;
use etf_cli::commands::interactive::run_interactive;
use etf_cli::commands::yahoo_dashboard;

#[derive(Parser)]
#[command(name = "etf-dash")]
#[command(about = "ETF 포트폴리오 성과 대시보드 - Sharpe / Treynor / Jensen", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/default.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// ETF 한 종목 조회 및 성과 지표 계산
    Analyze {
        /// ETF 티커 (예: SPY, QQQ)
        #[arg(short, long)]
        ticker: String,

        /// 조회 기간 (1y, 2y, 3y, 5y, 10y)
        #[arg(short, long)]
        period: Option<String>,

        /// 연간 무위험 이자율 (%)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        risk_free: f64,

        /// 연간 시장 수익률 (%). 0 이하이면 성과 지표를 생략
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        market_return: f64,

        /// 출력 형식 (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// 대화형 조회 (q 입력 시 종료)
    Interactive,

    /// 성과 지표 공식과 설명 (sharpe, treynor, jensen, all)
    Explain {
        /// 지표 이름 (기본: all)
        measure: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(LogConfig::from(&app.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Analyze {
            ticker,
            period,
            risk_free,
            market_return,
            format,
        } => {
            let config = AnalyzeConfig {
                ticker,
                period,
                risk_free,
                market_return,
                format: OutputFormat::parse(&format)?,
            };
            let dashboard = yahoo_dashboard(&app)?;
            if let Err(e) = run_analyze(&dashboard, config, &app).await {
                error!("Analyze failed: {:#}", e);
                return Err(e);
            }
        }

        Commands::Interactive => {
            let dashboard = yahoo_dashboard(&app)?;
            run_interactive(&dashboard, &app).await?;
        }

        Commands::Explain { measure } => {
            run_explain(measure.as_deref())?;
        }
    }

    Ok(())
}
