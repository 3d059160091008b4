//! 위험 조정 성과 지표.
//!
//! - **샤프 지수**: (Er - Rf) / σ
//! - **트레이너 지수**: (Er - Rf) / β
//! - **젠센 알파**: Er - (Rf + β(Rm - Rf))
//!
//! # 단위 주의
//!
//! 입력(Er, σ, Rf, Rm)은 모두 퍼센트 단위입니다. 샤프 지수는 분자/분모가 모두 퍼센트라
//! 단위가 상쇄되지만, 트레이너와 젠센은 퍼센트 분자를 100으로 나눠 소수 단위로 바꾼 뒤
//! 계산합니다. 화면의 교과서 공식과 단위가 일치하지 않지만 기존 출력과 같은 값을
//! 내기 위한 것이므로 "고치면" 모든 결과가 바뀝니다.

use etf_core::{EtfError, EtfResult};
use serde::{Deserialize, Serialize};

use super::rates::MonthlyRates;
use super::rounding::{round_to, RATIO_DP};
use super::statistics::DescriptiveStatistics;

/// 성과 지표 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioInputs {
    /// 기대수익률 Er (%)
    pub expected_return_pct: f64,
    /// 표준편차 σ (%)
    pub std_dev_pct: f64,
    /// 월간 금리 (%)
    pub rates: MonthlyRates,
    /// 3년 베타
    pub beta: f64,
}

impl RatioInputs {
    pub fn new(stats: &DescriptiveStatistics, rates: MonthlyRates, beta: f64) -> Self {
        Self {
            expected_return_pct: stats.expected_return_pct,
            std_dev_pct: stats.std_dev_pct,
            rates,
            beta,
        }
    }
}

/// 샤프, 트레이너, 젠센 알파 (소수점 5자리).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMeasures {
    pub sharpe: f64,
    pub treynor: f64,
    pub jensen_alpha: f64,
}

impl PerformanceMeasures {
    /// 세 지표를 모두 계산합니다. 하나라도 실패하면 에러를 반환합니다.
    pub fn calculate(inputs: &RatioInputs) -> EtfResult<Self> {
        let er = inputs.expected_return_pct;
        let rf = inputs.rates.risk_free_pct;
        let rm = inputs.rates.market_return_pct;

        Ok(Self {
            sharpe: sharpe_measure(er, rf, inputs.std_dev_pct)?,
            treynor: treynor_measure(er, rf, inputs.beta)?,
            jensen_alpha: jensen_alpha(er, rf, rm, inputs.beta)?,
        })
    }
}

/// 샤프 지수: `(Er - Rf) / σ`, 모두 퍼센트 단위.
pub fn sharpe_measure(expected_return_pct: f64, risk_free_pct: f64, std_dev_pct: f64) -> EtfResult<f64> {
    if std_dev_pct == 0.0 {
        return Err(EtfError::DivisionByZero(
            "표준편차가 0이라 샤프 지수를 계산할 수 없습니다".to_string(),
        ));
    }
    Ok(round_to(
        (expected_return_pct - risk_free_pct) / std_dev_pct,
        RATIO_DP,
    ))
}

/// 트레이너 지수: `((Er - Rf) / 100) / β`.
pub fn treynor_measure(expected_return_pct: f64, risk_free_pct: f64, beta: f64) -> EtfResult<f64> {
    ensure_beta(beta, "트레이너 지수")?;
    // 퍼센트 → 소수 변환 후 베타로 나눔
    Ok(round_to(
        ((expected_return_pct - risk_free_pct) / 100.0) / beta,
        RATIO_DP,
    ))
}

/// 젠센 알파: `(Er - (Rf + β(Rm - Rf))) / 100`.
///
/// 공식 자체에는 베타 나눗셈이 없지만, 베타가 0인 종목은 트레이너와 함께 거부합니다.
pub fn jensen_alpha(
    expected_return_pct: f64,
    risk_free_pct: f64,
    market_return_pct: f64,
    beta: f64,
) -> EtfResult<f64> {
    ensure_beta(beta, "젠센 알파")?;
    let capm_expected = risk_free_pct + beta * (market_return_pct - risk_free_pct);
    // 퍼센트 → 소수 변환
    Ok(round_to((expected_return_pct - capm_expected) / 100.0, RATIO_DP))
}

fn ensure_beta(beta: f64, measure: &str) -> EtfResult<()> {
    if beta == 0.0 {
        return Err(EtfError::DivisionByZero(format!(
            "베타가 0이라 {}를 계산할 수 없습니다",
            measure
        )));
    }
    Ok(())
}
