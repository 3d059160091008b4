//! 수익률 시계열의 기술 통계.
//!
//! 표본분산은 n-1을 분모로 사용합니다. 표준편차는 반올림 전 분산의 제곱근입니다.

use etf_core::{EtfError, EtfResult};
use serde::{Deserialize, Serialize};

use super::returns::ReturnSeries;
use super::rounding::{round_to, EXPECTED_RETURN_DP, STD_DEV_DP, VARIANCE_DP};

/// 분산/표준편차 계산에 필요한 최소 관측치 수.
pub const MIN_OBSERVATIONS: usize = 2;

/// 기대수익률, 표본분산, 표본표준편차.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    /// 관측치 수
    pub observations: usize,
    /// 기대수익률 Er (%, 소수점 2자리)
    pub expected_return_pct: f64,
    /// 표본분산 σ² (소수 단위, 소수점 6자리)
    pub variance: f64,
    /// 표본표준편차 σ (%). 소수 단위에서 4자리로 반올림한 뒤 100을 곱한 값
    pub std_dev_pct: f64,
}

impl DescriptiveStatistics {
    /// 수익률 시계열에서 통계를 계산합니다.
    ///
    /// 관측치가 2개 미만이면 [`EtfError::InsufficientData`]를 반환합니다.
    pub fn from_returns(series: &ReturnSeries) -> EtfResult<Self> {
        let values = series.values();
        let variance = sample_variance(values).ok_or(EtfError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: values.len(),
        })?;
        let avg = mean(values).unwrap_or_default();

        Ok(Self {
            observations: values.len(),
            expected_return_pct: round_to(avg * 100.0, EXPECTED_RETURN_DP),
            variance: round_to(variance, VARIANCE_DP),
            std_dev_pct: round_to(variance.sqrt(), STD_DEV_DP) * 100.0,
        })
    }
}

/// 산술 평균. 빈 입력이면 `None`.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 표본분산 (n-1 분모). 관측치가 2개 미만이면 `None`.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < MIN_OBSERVATIONS {
        return None;
    }
    let avg = mean(values)?;
    let sum_sq: f64 = values.iter().map(|r| (r - avg).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// 표본표준편차. 관측치가 2개 미만이면 `None`.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::returns::TrailingBar;

    fn series(closes: &[f64]) -> ReturnSeries {
        ReturnSeries::from_closes(closes, TrailingBar::Drop).unwrap()
    }

    #[test]
    fn test_single_return_is_insufficient() {
        let err = DescriptiveStatistics::from_returns(&series(&[100.0, 110.0, 121.0])).unwrap_err();
        assert_eq!(
            err,
            EtfError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let err = DescriptiveStatistics::from_returns(&ReturnSeries::default()).unwrap_err();
        assert_eq!(err.category(), "insufficient-data");
    }

    #[test]
    fn test_equal_returns_have_zero_dispersion() {
        let stats =
            DescriptiveStatistics::from_returns(&series(&[100.0, 110.0, 121.0, 108.9])).unwrap();
        assert_eq!(stats.observations, 2);
        assert_eq!(stats.expected_return_pct, 10.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev_pct, 0.0);
    }

    #[test]
    fn test_known_statistics() {
        // 수익률 [0.02, 0.04, -0.01, 0.03] (마지막 종가는 버려지는 수익률용)
        let stats = DescriptiveStatistics::from_returns(&series(&[
            100.0, 102.0, 106.08, 105.0192, 108.169776, 1.0,
        ]))
        .unwrap();

        // 평균 0.02 → 2.00%
        assert_eq!(stats.expected_return_pct, 2.0);
        // Σ(r-μ)² = 0.0 + 0.0004 + 0.0009 + 0.0001 = 0.0014, /3
        assert_eq!(stats.variance, 0.000467);
        // sqrt(0.000466666...) = 0.0216024... → 0.0216 → 2.16%
        assert!((stats.std_dev_pct - 2.16).abs() < 1e-9);
    }

    #[test]
    fn test_std_dev_is_sqrt_of_variance() {
        let values = [0.013, -0.021, 0.034, 0.002, -0.007];
        let variance = sample_variance(&values).unwrap();
        assert_eq!(sample_std_dev(&values).unwrap(), variance.sqrt());
    }

    #[test]
    fn test_helpers_on_short_input() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_variance(&[0.1]), None);
        assert_eq!(mean(&[0.1, 0.3]), Some(0.2));
    }
}
