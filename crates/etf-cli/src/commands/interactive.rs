//! 대화형 조회 루프.
//!
//! 조회 한 건마다 티커, 기간, 무위험 이자율, 시장 수익률을 차례로 입력받습니다.
//! 조회가 실패하면 메시지만 출력하고 다음 조회로 넘어갑니다.
//! `q` 입력 또는 입력 종료(EOF) 시 끝납니다.

use std::io::{BufRead, Write};

use anyhow::Result;
use etf_analytics::EtfDashboard;
use etf_core::{AppConfig, EtfError, EtfQuery, LookbackPeriod};
use etf_data::MarketDataProvider;
use tracing::warn;

use super::analyze::{build_query, run_with_spinner};
use crate::render::render_text;

/// 루프 한 회의 결과.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// 성공한 조회 수
    pub succeeded: usize,
    /// 실패한 조회 수
    pub failed: usize,
}

enum Prompt<T> {
    Value(T),
    Quit,
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Prompt<String>> {
    write!(output, "{}: ", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Prompt::Quit);
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Ok(Prompt::Quit);
    }
    Ok(Prompt::Value(line.to_string()))
}

fn parse_rate(raw: &str, label: &str) -> Result<f64, EtfError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| EtfError::InvalidInput(format!("{}: 숫자가 아닙니다 ({})", label, raw)))
}

/// 입력 네 개를 읽어 조회 요청 하나를 만듭니다.
fn read_query<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_lookback: LookbackPeriod,
) -> Result<Prompt<Result<EtfQuery, EtfError>>> {
    let Prompt::Value(ticker) = prompt(input, output, "티커 (q: 종료)")? else {
        return Ok(Prompt::Quit);
    };
    let period_label = format!("기간 [1y/2y/3y/5y/10y] (기본 {})", default_lookback);
    let Prompt::Value(period) = prompt(input, output, &period_label)? else {
        return Ok(Prompt::Quit);
    };
    let Prompt::Value(risk_free) = prompt(input, output, "무위험 이자율 (%)")? else {
        return Ok(Prompt::Quit);
    };
    let Prompt::Value(market) = prompt(input, output, "시장 수익률 (%)")? else {
        return Ok(Prompt::Quit);
    };

    let query = parse_rate(&risk_free, "무위험 이자율").and_then(|rf| {
        let mr = parse_rate(&market, "시장 수익률")?;
        build_query(&ticker, Some(&period), rf, mr, default_lookback)
    });
    Ok(Prompt::Value(query))
}

/// 대화형 세션을 실행합니다.
pub async fn run_session<P, R, W>(
    dashboard: &EtfDashboard<P>,
    app: &AppConfig,
    mut input: R,
    mut output: W,
    show_spinner: bool,
) -> Result<SessionSummary>
where
    P: MarketDataProvider,
    R: BufRead,
    W: Write,
{
    let mut summary = SessionSummary::default();
    writeln!(output, "ETF 포트폴리오 성과 대시보드. 시장 수익률이 0보다 커야 성과 지표가 계산됩니다.")?;

    loop {
        writeln!(output)?;
        let query = match read_query(&mut input, &mut output, app.analysis.default_lookback)? {
            Prompt::Quit => break,
            Prompt::Value(Ok(query)) => query,
            Prompt::Value(Err(e)) => {
                summary.failed += 1;
                writeln!(output, "오류: {}", e)?;
                continue;
            }
        };

        match run_with_spinner(dashboard, &query, show_spinner).await {
            Ok(report) => {
                summary.succeeded += 1;
                write!(output, "{}", render_text(&report, &app.display))?;
            }
            Err(e) => {
                summary.failed += 1;
                warn!(ticker = %query.ticker, category = e.category(), "조회 실패: {}", e);
                writeln!(output, "오류: {}", e)?;
            }
        }
    }

    writeln!(output, "종료합니다.")?;
    Ok(summary)
}

/// `interactive` 명령 실행 (표준 입출력).
pub async fn run_interactive<P: MarketDataProvider>(
    dashboard: &EtfDashboard<P>,
    app: &AppConfig,
) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let summary = run_session(dashboard, app, stdin.lock(), stdout.lock(), true).await?;
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "대화형 세션 종료"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("", "rf").unwrap(), 0.0);
        assert_eq!(parse_rate("4.5", "rf").unwrap(), 4.5);
        assert_eq!(parse_rate("abc", "rf").unwrap_err().category(), "invalid-input");
    }

    #[test]
    fn test_read_query_stops_on_quit_or_eof() {
        let mut out = Vec::new();
        let quit = read_query(&mut Cursor::new("q\n"), &mut out, LookbackPeriod::OneYear).unwrap();
        assert!(matches!(quit, Prompt::Quit));

        let eof = read_query(&mut Cursor::new("SPY\n5y\n"), &mut out, LookbackPeriod::OneYear)
            .unwrap();
        assert!(matches!(eof, Prompt::Quit));
    }

    #[test]
    fn test_read_query_builds_query() {
        let mut out = Vec::new();
        let parsed = read_query(
            &mut Cursor::new("vti\n\n4\n9\n"),
            &mut out,
            LookbackPeriod::ThreeYears,
        )
        .unwrap();

        let Prompt::Value(Ok(query)) = parsed else {
            panic!("조회 요청이 만들어져야 함");
        };
        assert_eq!(query.ticker.as_str(), "VTI");
        assert_eq!(query.lookback, LookbackPeriod::ThreeYears);
        assert_eq!(query.rates.market_return_annual_pct, 9.0);
    }
}
