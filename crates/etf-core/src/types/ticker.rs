//! 티커 심볼 타입.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EtfError;

/// 정규화된 티커 심볼.
///
/// 앞뒤 공백을 제거하고 대문자로 변환합니다. 검증은 최소한으로만 수행합니다
/// (빈 문자열과 허용되지 않는 문자만 거부). 종목 유형 확인은 제공자가 담당합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// 사용자 입력에서 티커를 생성합니다.
    pub fn parse(input: &str) -> Result<Self, EtfError> {
        let symbol = input.trim().to_uppercase();

        if symbol.is_empty() {
            return Err(EtfError::InvalidInput("티커를 입력하세요".to_string()));
        }

        if let Some(bad) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(EtfError::InvalidInput(format!(
                "티커에 사용할 수 없는 문자 '{}': {}",
                bad, input
            )));
        }

        Ok(Self(symbol))
    }

    /// 심볼 문자열.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = EtfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = EtfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_normalization() {
        assert_eq!(Ticker::parse(" spy ").unwrap().as_str(), "SPY");
        assert_eq!(Ticker::parse("vwrl.l").unwrap().as_str(), "VWRL.L");
        assert_eq!(Ticker::parse("brk-b").unwrap().as_str(), "BRK-B");
    }

    #[test]
    fn test_ticker_rejects_bad_input() {
        assert!(matches!(Ticker::parse("   "), Err(EtfError::InvalidInput(_))));
        assert!(matches!(Ticker::parse("SP Y"), Err(EtfError::InvalidInput(_))));
        assert!(matches!(Ticker::parse("SPY;"), Err(EtfError::InvalidInput(_))));
    }
}
