//! 조회 한 건의 실행.
//!
//! 제공자에서 종목 정보와 월봉을 가져와 [`EtfReport`]를 만듭니다.
//! 조회마다 새로 계산하며 이전 조회의 결과는 보관하지 않습니다.

use etf_core::{
    query_span, AnalysisConfig, EtfError, EtfQuery, EtfResult, Instrument, PriceBar,
    QuoteSnapshot,
};
use etf_data::MarketDataProvider;
use serde::Serialize;
use tracing::{debug, info, Instrument as _};

use crate::performance::{
    DescriptiveStatistics, MonthlyRates, PerformanceMeasures, RatioInputs, ReturnSeries,
    TrailingBar,
};

/// 분석 옵션.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// 마지막 수익률 처리 방식
    pub trailing_bar: TrailingBar,
}

impl From<&AnalysisConfig> for AnalysisOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            trailing_bar: TrailingBar::from_drop_flag(config.drop_trailing_bar),
        }
    }
}

/// 조회 한 건의 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtfReport {
    /// 조회 요청
    pub query: EtfQuery,
    /// 종목 정보
    pub instrument: Instrument,
    /// 시가/전일 종가 요약
    pub quote: QuoteSnapshot,
    /// 월봉 (시간순)
    pub bars: Vec<PriceBar>,
    /// 월간 수익률
    pub returns: ReturnSeries,
    /// 기술 통계
    pub statistics: DescriptiveStatistics,
    /// 월간 금리
    pub rates: MonthlyRates,
    /// 성과 지표. 시장 수익률이 양수가 아니면 `None`
    pub performance: Option<PerformanceMeasures>,
}

impl EtfReport {
    /// 이미 가져온 데이터로 결과를 계산합니다.
    ///
    /// I/O 없는 유일한 진입점이며 ETF 여부 검사도 여기서만 합니다.
    /// ETF가 아닌 종목은 [`EtfError::InvalidInstrument`]로 거부합니다.
    pub fn build(
        query: EtfQuery,
        instrument: Instrument,
        bars: Vec<PriceBar>,
        options: &AnalysisOptions,
    ) -> EtfResult<Self> {
        ensure_etf(&instrument)?;

        let quote = instrument.quote_snapshot()?;
        let returns = ReturnSeries::from_bars(&bars, options.trailing_bar)?;
        let statistics = DescriptiveStatistics::from_returns(&returns)?;
        let rates = MonthlyRates::from_annual(&query.rates);

        let performance = if query.rates.enables_performance() {
            let inputs = RatioInputs::new(&statistics, rates, instrument.beta_3y);
            Some(PerformanceMeasures::calculate(&inputs)?)
        } else {
            debug!(
                market_return = query.rates.market_return_annual_pct,
                "시장 수익률이 양수가 아니므로 성과 지표를 생략합니다"
            );
            None
        };

        Ok(Self {
            query,
            instrument,
            quote,
            bars,
            returns,
            statistics,
            rates,
            performance,
        })
    }
}

fn ensure_etf(instrument: &Instrument) -> EtfResult<()> {
    if instrument.is_etf() {
        return Ok(());
    }
    Err(EtfError::InvalidInstrument(format!(
        "{}은(는) ETF가 아닙니다 ({})",
        instrument.ticker, instrument.quote_type
    )))
}

/// 제공자와 분석 옵션을 묶은 대시보드 실행기.
pub struct EtfDashboard<P: MarketDataProvider> {
    provider: P,
    options: AnalysisOptions,
}

impl<P: MarketDataProvider> EtfDashboard<P> {
    pub fn new(provider: P, options: AnalysisOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// 조회 한 건을 실행합니다.
    ///
    /// 제공자는 ETF가 아닌 종목을 종목 조회 단계에서 거부하므로 월봉을 요청하지 않습니다.
    /// 제공자가 걸러내지 못한 종목은 [`EtfReport::build`]에서 거부됩니다.
    pub async fn run(&self, query: &EtfQuery) -> EtfResult<EtfReport> {
        let span = query_span!("etf_query", query.ticker, query.lookback);
        self.execute(query).instrument(span).await
    }

    async fn execute(&self, query: &EtfQuery) -> EtfResult<EtfReport> {
        info!(provider = self.provider.name(), "종목 조회 시작");

        let instrument = self.provider.fetch_instrument(&query.ticker).await?;

        let bars = self
            .provider
            .fetch_monthly_bars(&query.ticker, query.lookback)
            .await?;
        debug!(count = bars.len(), "월봉 조회 완료");

        let report = EtfReport::build(query.clone(), instrument, bars, &self.options)?;
        info!(
            expected_return = report.statistics.expected_return_pct,
            std_dev = report.statistics.std_dev_pct,
            has_performance = report.performance.is_some(),
            "분석 완료"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use etf_core::{LookbackPeriod, RateInputs, Ticker};
    use rust_decimal::Decimal;

    fn instrument(quote_type: &str, beta: f64) -> Instrument {
        Instrument {
            ticker: Ticker::parse("VTI").unwrap(),
            quote_type: quote_type.to_string(),
            name: "Vanguard Total Stock Market ETF".to_string(),
            category: "Large Blend".to_string(),
            summary: "Broad US equity exposure.".to_string(),
            beta_3y: beta,
            previous_close: 200.0,
            open: 202.0,
            currency: None,
        }
    }

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| PriceBar::new(start + Duration::days(31 * i as i64), *c))
            .collect()
    }

    fn query(market: f64) -> EtfQuery {
        EtfQuery::new(
            Ticker::parse("VTI").unwrap(),
            LookbackPeriod::OneYear,
            RateInputs::new(5.0, market),
        )
    }

    #[test]
    fn test_build_with_performance() {
        let report = EtfReport::build(
            query(10.0),
            instrument("ETF", 1.1),
            bars(&[100.0, 102.0, 106.08, 105.0192, 108.169776, 1.0]),
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert_eq!(report.returns.len(), 4);
        assert_eq!(report.statistics.expected_return_pct, 2.0);
        assert!(report.performance.is_some());
        assert_eq!(report.quote.change_pct, Decimal::ONE);
    }

    #[test]
    fn test_non_positive_market_return_skips_performance() {
        let report = EtfReport::build(
            query(0.0),
            instrument("ETF", 1.1),
            bars(&[100.0, 102.0, 106.08, 105.0192, 108.169776, 1.0]),
            &AnalysisOptions::default(),
        )
        .unwrap();

        assert!(report.performance.is_none());
        assert_eq!(report.statistics.observations, 4);
    }

    #[test]
    fn test_equity_is_rejected() {
        let err = EtfReport::build(
            query(10.0),
            instrument("EQUITY", 1.1),
            bars(&[100.0, 110.0, 121.0, 108.9]),
            &AnalysisOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.category(), "invalid-instrument");
    }

    #[test]
    fn test_options_from_config() {
        let mut config = AnalysisConfig::default();
        assert_eq!(AnalysisOptions::from(&config).trailing_bar, TrailingBar::Drop);
        config.drop_trailing_bar = false;
        assert_eq!(AnalysisOptions::from(&config).trailing_bar, TrailingBar::Keep);
    }
}
