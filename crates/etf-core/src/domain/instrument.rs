//! ETF 종목 메타데이터.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EtfError;
use crate::types::Ticker;

/// 제공자가 ETF로 분류할 때 사용하는 종목 유형 문자열.
pub const ETF_QUOTE_TYPE: &str = "ETF";

/// 조회 한 건 동안 사용되는 종목 정보.
///
/// 조회 시 한 번 가져오며, 조회가 바뀌면 버려집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// 티커
    pub ticker: Ticker,
    /// 종목 유형 (ETF, EQUITY, ...)
    pub quote_type: String,
    /// 표시 이름
    pub name: String,
    /// 펀드 카테고리 (예: "Large Blend")
    pub category: String,
    /// 사업/운용 개요
    pub summary: String,
    /// 3년 베타
    pub beta_3y: f64,
    /// 전일 종가
    pub previous_close: f64,
    /// 시가
    pub open: f64,
    /// 통화 코드
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Instrument {
    /// ETF 여부.
    pub fn is_etf(&self) -> bool {
        self.quote_type.eq_ignore_ascii_case(ETF_QUOTE_TYPE)
    }

    /// 요약 헤더에 표시할 시세 스냅샷을 계산합니다.
    pub fn quote_snapshot(&self) -> Result<QuoteSnapshot, EtfError> {
        QuoteSnapshot::new(self.open, self.previous_close)
    }
}

/// 시가/전일 종가 기반 시세 요약 (소수점 2자리).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// 시가
    pub open: Decimal,
    /// 전일 종가
    pub previous_close: Decimal,
    /// 변동폭 (시가 - 전일 종가)
    pub change: Decimal,
    /// 변동률 (%)
    pub change_pct: Decimal,
}

impl QuoteSnapshot {
    /// 원시 시가와 전일 종가로 스냅샷을 만듭니다.
    ///
    /// 모든 값은 부동소수점 이진값 그대로 소수점 2자리 half-even 반올림합니다
    /// (2.675는 이진값이 2.67499...이므로 2.67).
    /// 변동폭은 원시 값의 차를 반올림하고,
    /// 변동률은 반올림된 변동폭을 원시 전일 종가로 나눠 계산합니다.
    pub fn new(open: f64, previous_close: f64) -> Result<Self, EtfError> {
        if previous_close == 0.0 {
            return Err(EtfError::DivisionByZero(
                "전일 종가가 0이라 변동률을 계산할 수 없습니다".to_string(),
            ));
        }

        let change = round_binary(open - previous_close, "change")?;
        let change_f64 = change.to_f64().unwrap_or_default();
        let change_pct = round_binary(change_f64 / previous_close * 100.0, "change_pct")?;

        Ok(Self {
            open: round_binary(open, "open")?,
            previous_close: round_binary(previous_close, "previous_close")?,
            change,
            change_pct,
        })
    }
}

/// 이진 부동소수점 값을 보존한 채 소수점 2자리로 반올림합니다.
fn round_binary(value: f64, field: &str) -> Result<Decimal, EtfError> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| {
            EtfError::DataRetrieval(format!("{} 값이 유효하지 않습니다: {}", field, value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn spy() -> Instrument {
        Instrument {
            ticker: Ticker::parse("SPY").unwrap(),
            quote_type: "etf".to_string(),
            name: "SPDR S&P 500 ETF Trust".to_string(),
            category: "Large Blend".to_string(),
            summary: "Tracks the S&P 500.".to_string(),
            beta_3y: 1.0,
            previous_close: 100.0,
            open: 101.234,
            currency: Some("USD".to_string()),
        }
    }

    #[test]
    fn test_is_etf_case_insensitive() {
        assert!(spy().is_etf());
        let mut equity = spy();
        equity.quote_type = "EQUITY".to_string();
        assert!(!equity.is_etf());
    }

    #[test]
    fn test_quote_snapshot() {
        let snapshot = spy().quote_snapshot().unwrap();
        assert_eq!(snapshot.open, dec!(101.23));
        assert_eq!(snapshot.previous_close, dec!(100.00));
        assert_eq!(snapshot.change, dec!(1.23));
        assert_eq!(snapshot.change_pct, dec!(1.23));
    }

    #[test]
    fn test_quote_snapshot_negative_change() {
        let snapshot = QuoteSnapshot::new(48.0, 50.0).unwrap();
        assert_eq!(snapshot.change, dec!(-2));
        assert_eq!(snapshot.change_pct, dec!(-4));
    }

    #[test]
    fn test_quote_snapshot_zero_previous_close() {
        assert!(matches!(
            QuoteSnapshot::new(10.0, 0.0),
            Err(EtfError::DivisionByZero(_))
        ));
        assert!(matches!(
            QuoteSnapshot::new(f64::NAN, 10.0),
            Err(EtfError::DataRetrieval(_))
        ));
    }

    #[test]
    fn test_quote_snapshot_rounds_binary_value() {
        // 2.675의 이진값은 2.67499...
        let snapshot = QuoteSnapshot::new(2.675, 2.0).unwrap();
        assert_eq!(snapshot.open, dec!(2.67));
        assert_eq!(snapshot.previous_close, dec!(2.00));
        assert_eq!(snapshot.change, dec!(0.67));
        assert_eq!(snapshot.change_pct, dec!(33.5));
    }
}
