//! 대시보드 출력.
//!
//! [`EtfReport`]를 터미널용 텍스트 또는 JSON 문자열로 변환합니다.
//! 모든 함수는 문자열을 반환하고 직접 출력하지 않습니다.

use std::fmt::Write as _;

use etf_analytics::EtfReport;
use etf_core::{closes, DisplayConfig, PriceBar};
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};

use crate::commands::explain::{render_explanation, Measure};

const RULE: &str = "────────────────────────────────────────────────────────────";

/// 원본 월봉 표의 한 행.
#[derive(Tabled)]
struct BarRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

impl From<&PriceBar> for BarRow {
    fn from(bar: &PriceBar) -> Self {
        Self {
            month: bar.timestamp.format("%Y-%m").to_string(),
            open: optional_price(bar.open),
            high: optional_price(bar.high),
            low: optional_price(bar.low),
            close: format!("{:.2}", bar.close),
            volume: bar
                .volume
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn optional_price(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn signed(value: Decimal) -> String {
    if value.is_sign_negative() {
        format!("{:.2}", value)
    } else {
        format!("+{:.2}", value)
    }
}

/// 텍스트 대시보드 전체.
///
/// 시장 수익률이 0 이하여도 요약, 차트, 기본 지표는 출력하고
/// 성과 지표 섹션만 생략합니다.
pub fn render_text(report: &EtfReport, display: &DisplayConfig) -> String {
    let mut out = String::new();

    render_header(&mut out, report);
    render_summary(&mut out, report);

    section(&mut out, "월간 종가 (Monthly Close)");
    out.push_str(&render_chart(
        &closes(&report.bars),
        display.chart_width,
        display.chart_height,
    ));

    if display.show_bars {
        section(&mut out, "월봉 데이터");
        out.push_str(&render_bar_table(&report.bars));
        out.push('\n');
    }

    render_basic_metrics(&mut out, report);
    render_performance(&mut out, report);

    section(&mut out, "지표 설명 (Explanations)");
    for measure in Measure::ALL {
        out.push_str(&render_explanation(measure));
        out.push('\n');
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "데이터: Yahoo Finance | 월봉 {}개 | 기간 {}",
        report.bars.len(),
        report.query.lookback
    );
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out);
}

fn render_header(out: &mut String, report: &EtfReport) {
    let _ = writeln!(out, "ETF 포트폴리오 성과 (Portfolio Performance for ETFs)");
    let _ = writeln!(
        out,
        "{} | 기간 {} | 무위험 이자율 {}% | 시장 수익률 {}%",
        report.query.ticker,
        report.query.lookback,
        report.query.rates.risk_free_annual_pct,
        report.query.rates.market_return_annual_pct
    );
}

fn render_summary(out: &mut String, report: &EtfReport) {
    let instrument = &report.instrument;
    let quote = &report.quote;

    section(out, &instrument.name);
    let currency = instrument.currency.as_deref().unwrap_or("");
    let _ = writeln!(
        out,
        "  시가 (Open)            {:.2} {} ({})",
        quote.open,
        currency,
        signed(quote.change)
    );
    let _ = writeln!(
        out,
        "  전일 종가 (Prev Close) {:.2} {}",
        quote.previous_close, currency
    );
    let _ = writeln!(
        out,
        "  변동 (Change)          {} ({}%)",
        signed(quote.change),
        signed(quote.change_pct)
    );
    let _ = writeln!(out, "  베타 (Beta 3Y)         {}", instrument.beta_3y);
    let _ = writeln!(out, "  카테고리 (Category)    {}", instrument.category);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", instrument.summary);
}

fn render_basic_metrics(out: &mut String, report: &EtfReport) {
    let stats = &report.statistics;
    section(out, "기본 지표 (Basic Metrics)");
    let _ = writeln!(out, "  (Er) %                    {:.2}", stats.expected_return_pct);
    let _ = writeln!(out, "  Variance (σ²)             {:.6}", stats.variance);
    let _ = writeln!(out, "  Standard deviation (σ) %  {:.2}", stats.std_dev_pct);
    let _ = writeln!(out, "  관측치 수                 {}", stats.observations);
}

fn render_performance(out: &mut String, report: &EtfReport) {
    let Some(measures) = &report.performance else {
        return;
    };
    section(out, "포트폴리오 성과 지표 (Portfolio Performance Metrics)");
    let _ = writeln!(
        out,
        "  월간 무위험 이자율 {:.4}% | 월간 시장 수익률 {:.4}%",
        report.rates.risk_free_pct, report.rates.market_return_pct
    );
    let _ = writeln!(out, "  Sharpe measure    {:.5}", measures.sharpe);
    let _ = writeln!(out, "  Treynor measure   {:.5}", measures.treynor);
    let _ = writeln!(out, "  Jensen's alpha    {:.5}", measures.jensen_alpha);
}

/// 월봉 표.
pub fn render_bar_table(bars: &[PriceBar]) -> String {
    let rows: Vec<BarRow> = bars.iter().map(BarRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// 종가 시계열의 ASCII 선 차트.
///
/// 종가 수가 `width`보다 많으면 균등 간격으로 표본을 뽑습니다.
pub fn render_chart(closes: &[f64], width: usize, height: usize) -> String {
    if closes.is_empty() || width == 0 || height == 0 {
        return "  (데이터 없음)\n".to_string();
    }

    let columns = closes.len().min(width);
    let points: Vec<f64> = (0..columns)
        .map(|col| closes[col * closes.len() / columns])
        .collect();

    let max = points.iter().copied().fold(f64::MIN, f64::max);
    let min = points.iter().copied().fold(f64::MAX, f64::min);
    let span = max - min;

    let row_of = |value: f64| -> usize {
        if span <= 0.0 {
            return height / 2;
        }
        let level = ((value - min) / span * (height - 1) as f64).round() as usize;
        (height - 1) - level.min(height - 1)
    };

    let mut grid = vec![vec![' '; columns]; height];
    for (col, value) in points.iter().enumerate() {
        grid[row_of(*value)][col] = '*';
    }

    let mut out = String::new();
    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            format!("{:>10.2}", max)
        } else if row == height - 1 {
            format!("{:>10.2}", min)
        } else {
            " ".repeat(10)
        };
        let line: String = cells.iter().collect();
        let _ = writeln!(out, "{} │{}", label, line.trim_end());
    }
    let _ = writeln!(out, "{} └{}", " ".repeat(10), "─".repeat(columns));
    out
}

/// JSON 출력.
pub fn render_json(report: &EtfReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_marks_extremes() {
        let chart = render_chart(&[100.0, 110.0, 121.0, 108.9], 60, 5);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("121.00"));
        assert!(lines[4].contains("100.00"));
        // 최댓값은 셋째 열, 최솟값은 첫째 열
        assert!(lines[0].ends_with("│  *"));
        assert!(lines[4].ends_with("│*"));
    }

    #[test]
    fn test_chart_flat_and_empty() {
        let flat = render_chart(&[50.0, 50.0, 50.0], 10, 4);
        assert_eq!(flat.matches('*').count(), 3);
        assert!(render_chart(&[], 10, 4).contains("데이터 없음"));
    }

    #[test]
    fn test_chart_downsamples_to_width() {
        let closes: Vec<f64> = (0..120).map(|i| i as f64).collect();
        let chart = render_chart(&closes, 30, 8);
        assert_eq!(chart.matches('*').count(), 30);
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(Decimal::new(123, 2)), "+1.23");
        assert_eq!(signed(Decimal::new(-50, 2)), "-0.50");
        assert_eq!(signed(Decimal::ZERO), "+0.00");
    }
}
