//! 데이터 모듈 오류 타입.

use etf_core::EtfError;
use thiserror::Error;

/// 데이터 조회 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 연결/세션 수립 오류
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 종목을 찾을 수 없음
    #[error("Symbol not found: {0}")]
    NotFound(String),

    /// ETF가 아닌 종목
    #[error("{ticker} is not an ETF (quote type: {quote_type})")]
    NotAnEtf { ticker: String, quote_type: String },

    /// 종목 유형을 판별할 수 없음
    #[error("Cannot classify {0}: quote type missing")]
    Unclassified(String),

    /// 필수 메타데이터 누락
    #[error("Missing field for {ticker}: {field}")]
    MissingField { ticker: String, field: &'static str },

    /// 타임아웃 오류
    #[error("Operation timeout: {0}")]
    Timeout(String),
}

impl DataError {
    /// 종목 분류 문제인지 (없는 심볼/ETF 아님/판별 불가) 확인합니다.
    pub fn is_classification(&self) -> bool {
        matches!(
            self,
            DataError::NotFound(_) | DataError::NotAnEtf { .. } | DataError::Unclassified(_)
        )
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if err.is_connect() {
            DataError::ConnectionError(err.to_string())
        } else if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

impl From<DataError> for EtfError {
    fn from(err: DataError) -> Self {
        if err.is_classification() {
            EtfError::InvalidInstrument(err.to_string())
        } else {
            EtfError::DataRetrieval(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_maps_to_invalid_instrument() {
        let err: EtfError = DataError::NotAnEtf {
            ticker: "AAPL".to_string(),
            quote_type: "EQUITY".to_string(),
        }
        .into();
        assert_eq!(err.category(), "invalid-instrument");

        let err: EtfError = DataError::Unclassified("XYZ".to_string()).into();
        assert_eq!(err.category(), "invalid-instrument");

        let err: EtfError = DataError::NotFound("ZZZZ".to_string()).into();
        assert_eq!(err.category(), "invalid-instrument");
    }

    #[test]
    fn test_other_errors_map_to_data_retrieval() {
        let err: EtfError = DataError::MissingField {
            ticker: "SPY".to_string(),
            field: "beta3Year",
        }
        .into();
        assert_eq!(err.category(), "data-retrieval");
        assert!(err.to_string().contains("beta3Year"));

        let err: EtfError = DataError::Timeout("30s".to_string()).into();
        assert_eq!(err.category(), "data-retrieval");
    }
}
