//! # ETF Analytics
//!
//! 월봉 종가에서 위험 조정 성과 지표를 계산합니다.
//!
//! 계산 순서:
//! 1. [`performance::rates`]: 연간 금리 가정을 월간 값으로 변환
//! 2. [`performance::returns`]: 종가에서 월간 단순 수익률 계산
//! 3. [`performance::statistics`]: 기대수익률, 표본분산, 표본표준편차
//! 4. [`performance::ratios`]: 샤프, 트레이너, 젠센 알파
//!
//! [`dashboard`]는 제공자 조회부터 지표 계산까지 조회 한 건을 실행합니다.

pub mod dashboard;
pub mod performance;

pub use dashboard::*;
pub use performance::*;
