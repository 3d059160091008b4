//! 시세 데이터 조회.
//!
//! 이 crate는 다음을 제공합니다:
//! - 시세 데이터 제공자 추상화 ([`MarketDataProvider`])
//! - Yahoo Finance HTTP 제공자 (종목 메타데이터, 월봉)
//!
//! 조회 결과는 캐시하지 않습니다. 조회마다 새로 가져옵니다.

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{MarketDataProvider, YahooFinanceProvider};
