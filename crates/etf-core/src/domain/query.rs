//! 사용자 조회 요청.

use serde::{Deserialize, Serialize};

use crate::types::{LookbackPeriod, Ticker};

/// 사용자가 입력한 연간 금리 가정 (퍼센트 단위).
///
/// 0이나 음수도 그대로 허용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateInputs {
    /// 연간 무위험 이자율 (%)
    pub risk_free_annual_pct: f64,
    /// 연간 시장 수익률 (%)
    pub market_return_annual_pct: f64,
}

impl RateInputs {
    pub fn new(risk_free_annual_pct: f64, market_return_annual_pct: f64) -> Self {
        Self {
            risk_free_annual_pct,
            market_return_annual_pct,
        }
    }

    /// 성과 지표 계산 여부.
    ///
    /// 시장 수익률이 양수일 때만 성과 지표를 계산하고 표시합니다.
    pub fn enables_performance(&self) -> bool {
        self.market_return_annual_pct > 0.0
    }
}

/// 조회 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfQuery {
    /// 티커
    pub ticker: Ticker,
    /// 조회 기간
    pub lookback: LookbackPeriod,
    /// 금리 가정
    pub rates: RateInputs,
}

impl EtfQuery {
    pub fn new(ticker: Ticker, lookback: LookbackPeriod, rates: RateInputs) -> Self {
        Self {
            ticker,
            lookback,
            rates,
        }
    }
}
