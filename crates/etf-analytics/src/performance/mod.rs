//! 성과 분석 모듈
//!
//! 조회 한 건마다 새로 계산되는 순수 함수들입니다. 상태를 보관하지 않습니다.
//!
//! # 모듈 구성
//!
//! - [`rates`]: 연간 → 월간 금리 변환
//! - [`returns`]: 월간 수익률 시계열
//! - [`statistics`]: 기술 통계 (평균, 분산, 표준편차)
//! - [`ratios`]: 샤프/트레이너/젠센 지표
//! - [`rounding`]: 단계별 반올림 규칙

pub mod rates;
pub mod ratios;
pub mod returns;
pub mod rounding;
pub mod statistics;

pub use rates::*;
pub use ratios::*;
pub use returns::*;
pub use rounding::*;
pub use statistics::*;
