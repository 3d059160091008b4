//! 월간 단순 수익률 시계열.

use etf_core::{closes, EtfError, EtfResult, PriceBar};
use serde::{Deserialize, Serialize};

/// 마지막 수익률 처리 방식.
///
/// 제공자의 마지막 월봉은 아직 끝나지 않은 달이라, 기존 출력은 마지막 수익률을 버립니다.
/// 이 동작을 바꾸면 모든 지표 값이 달라집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingBar {
    /// 마지막 수익률을 버림 (기존 출력과 동일)
    #[default]
    Drop,
    /// 모든 수익률 유지
    Keep,
}

impl TrailingBar {
    pub fn from_drop_flag(drop_trailing_bar: bool) -> Self {
        if drop_trailing_bar {
            TrailingBar::Drop
        } else {
            TrailingBar::Keep
        }
    }
}

/// 월간 단순 수익률 (소수 단위, 시간순).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnSeries {
    values: Vec<f64>,
}

impl ReturnSeries {
    /// 종가 N개에서 수익률을 계산합니다.
    ///
    /// `return[i] = (price[i] - price[i-1]) / price[i-1]` (1 ≤ i < N).
    /// [`TrailingBar::Drop`]이면 마지막 수익률을 계산하지 않으므로 N-2개,
    /// [`TrailingBar::Keep`]이면 N-1개가 됩니다. N < 2이면 빈 시계열입니다.
    ///
    /// 사용되는 종가가 유한하지 않거나 직전 종가가 0이면 [`EtfError::Division`]을 반환합니다.
    pub fn from_closes(closes: &[f64], trailing: TrailingBar) -> EtfResult<Self> {
        let computed = closes.len().saturating_sub(1);
        let retained = match trailing {
            TrailingBar::Drop => computed.saturating_sub(1),
            TrailingBar::Keep => computed,
        };

        let mut values = Vec::with_capacity(retained);
        for i in 1..=retained {
            let prev = closes[i - 1];
            let price = closes[i];

            if !prev.is_finite() || prev == 0.0 {
                return Err(EtfError::Division {
                    index: i - 1,
                    price: prev,
                });
            }
            if !price.is_finite() {
                return Err(EtfError::Division { index: i, price });
            }

            values.push((price - prev) / prev);
        }

        Ok(Self { values })
    }

    /// 월봉 종가에서 수익률을 계산합니다.
    pub fn from_bars(bars: &[PriceBar], trailing: TrailingBar) -> EtfResult<Self> {
        Self::from_closes(&closes(bars), trailing)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_trailing_return() {
        let series = ReturnSeries::from_closes(&[100.0, 110.0, 121.0, 108.9], TrailingBar::Drop)
            .unwrap();
        assert_eq!(series.values(), &[0.1, 0.1]);
    }

    #[test]
    fn test_keep_trailing_return() {
        let series = ReturnSeries::from_closes(&[100.0, 110.0, 121.0, 108.9], TrailingBar::Keep)
            .unwrap();
        assert_eq!(series.len(), 3);
        assert!((series.values()[2] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_short_inputs_are_empty() {
        assert!(ReturnSeries::from_closes(&[], TrailingBar::Drop).unwrap().is_empty());
        assert!(ReturnSeries::from_closes(&[100.0], TrailingBar::Keep).unwrap().is_empty());
        assert!(ReturnSeries::from_closes(&[100.0, 110.0], TrailingBar::Drop)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_from_bars_uses_closes_in_order() {
        use chrono::{TimeZone, Utc};

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars: Vec<PriceBar> = [100.0, 110.0, 121.0, 108.9]
            .iter()
            .enumerate()
            .map(|(i, close)| PriceBar::new(start + chrono::Duration::days(31 * i as i64), *close))
            .collect();

        let series = ReturnSeries::from_bars(&bars, TrailingBar::Drop).unwrap();
        assert_eq!(series.values(), &[0.1, 0.1]);
    }

    #[test]
    fn test_zero_previous_close() {
        let err = ReturnSeries::from_closes(&[100.0, 0.0, 10.0, 12.0], TrailingBar::Drop)
            .unwrap_err();
        assert_eq!(err, EtfError::Division { index: 1, price: 0.0 });
    }

    #[test]
    fn test_dropped_bar_is_not_inspected() {
        // 마지막 봉은 버려지는 수익률에만 쓰이므로 검사하지 않는다
        let series =
            ReturnSeries::from_closes(&[100.0, 110.0, 121.0, f64::NAN], TrailingBar::Drop)
                .unwrap();
        assert_eq!(series.len(), 2);

        let err = ReturnSeries::from_closes(&[100.0, 110.0, 121.0, f64::NAN], TrailingBar::Keep)
            .unwrap_err();
        assert_eq!(err.category(), "division");
    }

    #[test]
    fn test_from_drop_flag() {
        assert_eq!(TrailingBar::from_drop_flag(true), TrailingBar::Drop);
        assert_eq!(TrailingBar::from_drop_flag(false), TrailingBar::Keep);
    }
}
