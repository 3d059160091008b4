//! 연간 금리 가정을 월간 값으로 변환합니다.

use etf_core::RateInputs;
use serde::{Deserialize, Serialize};

/// 연간 → 월간 변환 계수.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// 월간 금리 (퍼센트 단위, 100으로 나누지 않은 값).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRates {
    /// 월간 무위험 이자율 (%)
    pub risk_free_pct: f64,
    /// 월간 시장 수익률 (%)
    pub market_return_pct: f64,
}

impl MonthlyRates {
    /// 연간 값을 12로 나눕니다. 반올림이나 범위 검사는 하지 않습니다.
    pub fn from_annual(inputs: &RateInputs) -> Self {
        Self {
            risk_free_pct: inputs.risk_free_annual_pct / MONTHS_PER_YEAR,
            market_return_pct: inputs.market_return_annual_pct / MONTHS_PER_YEAR,
        }
    }
}
