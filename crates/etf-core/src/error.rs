//! ETF 대시보드의 에러 타입.
//!
//! 조회 한 건이 실패하는 원인을 구분할 수 있도록 에러를 분류합니다.
//! 모든 에러는 조회 단위로 잡혀 메시지로 표시되며, 프로세스를 종료시키지 않습니다.

use thiserror::Error;

/// 조회 실패 원인.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EtfError {
    /// ETF가 아니거나 제공자가 종목 유형을 판별하지 못함
    #[error("ETF 종목이 아닙니다: {0}")]
    InvalidInstrument(String),

    /// 데이터 조회 실패 또는 필수 메타데이터 누락
    #[error("데이터 조회 실패: {0}")]
    DataRetrieval(String),

    /// 수익률 관측치 부족 (분산/표준편차는 2개 이상 필요)
    #[error("데이터 부족: 수익률 {required}개 이상 필요, {actual}개 존재")]
    InsufficientData { required: usize, actual: usize },

    /// 표준편차 또는 베타가 0
    #[error("0으로 나눌 수 없음: {0}")]
    DivisionByZero(String),

    /// 종가가 0(직전 종가로 쓰일 때)이거나 유한하지 않아 수익률을 계산할 수 없음
    #[error("수익률 계산 불가: {index}번째 봉의 종가가 유효하지 않습니다 ({price})")]
    Division { index: usize, price: f64 },

    /// 잘못된 사용자 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 대시보드 작업을 위한 Result 타입.
pub type EtfResult<T> = Result<T, EtfError>;

impl EtfError {
    /// 에러 분류 레이블을 반환합니다.
    pub fn category(&self) -> &'static str {
        match self {
            EtfError::InvalidInstrument(_) => "invalid-instrument",
            EtfError::DataRetrieval(_) => "data-retrieval",
            EtfError::InsufficientData { .. } => "insufficient-data",
            EtfError::DivisionByZero(_) => "division-by-zero",
            EtfError::Division { .. } => "division",
            EtfError::InvalidInput(_) => "invalid-input",
            EtfError::Config(_) => "config",
        }
    }

    /// 사용자 입력을 고쳐 다시 조회하면 해결될 수 있는 에러인지 확인합니다.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            EtfError::InvalidInstrument(_) | EtfError::InvalidInput(_)
        )
    }
}

impl From<config::ConfigError> for EtfError {
    fn from(err: config::ConfigError) -> Self {
        EtfError::Config(err.to_string())
    }
}
