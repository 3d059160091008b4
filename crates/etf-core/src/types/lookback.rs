//! 과거 데이터 조회 기간 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 월봉 조회 기간 (lookback window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookbackPeriod {
    /// 1년
    #[serde(rename = "1y")]
    OneYear,
    /// 2년
    #[serde(rename = "2y")]
    TwoYears,
    /// 3년
    #[serde(rename = "3y")]
    ThreeYears,
    /// 5년
    #[serde(rename = "5y")]
    FiveYears,
    /// 10년
    #[serde(rename = "10y")]
    TenYears,
}

impl LookbackPeriod {
    /// 선택 가능한 모든 기간 (화면 표시 순서).
    pub const ALL: [LookbackPeriod; 5] = [
        LookbackPeriod::OneYear,
        LookbackPeriod::TwoYears,
        LookbackPeriod::ThreeYears,
        LookbackPeriod::FiveYears,
        LookbackPeriod::TenYears,
    ];

    /// Yahoo Finance `range` 파라미터 문자열.
    pub fn as_range(&self) -> &'static str {
        match self {
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::TwoYears => "2y",
            LookbackPeriod::ThreeYears => "3y",
            LookbackPeriod::FiveYears => "5y",
            LookbackPeriod::TenYears => "10y",
        }
    }
}

impl Default for LookbackPeriod {
    fn default() -> Self {
        LookbackPeriod::OneYear
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_range())
    }
}

impl FromStr for LookbackPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_range() == normalized)
            .ok_or_else(|| format!("Invalid lookback period: {} (use 1y, 2y, 3y, 5y, 10y)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookback() {
        assert_eq!("1y".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::OneYear);
        assert_eq!(" 10Y ".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::TenYears);
        assert!("4y".parse::<LookbackPeriod>().is_err());
        assert!("".parse::<LookbackPeriod>().is_err());
    }

    #[test]
    fn test_lookback_serde() {
        let json = serde_json::to_string(&LookbackPeriod::FiveYears).unwrap();
        assert_eq!(json, "\"5y\"");
        let parsed: LookbackPeriod = serde_json::from_str("\"3y\"").unwrap();
        assert_eq!(parsed, LookbackPeriod::ThreeYears);
    }
}
