//! 시세 데이터 제공자.
//!
//! 대시보드는 [`MarketDataProvider`] trait에만 의존합니다.
//! 실제 구현은 Yahoo Finance ([`YahooFinanceProvider`]) 하나입니다.

pub mod yahoo;

pub use yahoo::YahooFinanceProvider;

use async_trait::async_trait;
use etf_core::{Instrument, LookbackPeriod, PriceBar, Ticker};

use crate::error::Result;

/// 종목 메타데이터와 월봉을 제공하는 외부 데이터 소스.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 제공자 이름 (로그 표시용).
    fn name(&self) -> &str;

    /// 종목 메타데이터를 조회합니다.
    ///
    /// ETF가 아니면 [`DataError::NotAnEtf`](crate::DataError::NotAnEtf),
    /// 필수 필드가 없으면 [`DataError::MissingField`](crate::DataError::MissingField)를 반환합니다.
    async fn fetch_instrument(&self, ticker: &Ticker) -> Result<Instrument>;

    /// 조회 기간의 월봉을 시간순으로 조회합니다.
    async fn fetch_monthly_bars(
        &self,
        ticker: &Ticker,
        lookback: LookbackPeriod,
    ) -> Result<Vec<PriceBar>>;
}
