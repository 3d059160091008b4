//! # ETF Core
//!
//! ETF 대시보드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 대시보드 전반에서 사용되는 기본 타입을 제공합니다:
//! - 종목(ETF) 메타데이터와 시세 요약
//! - 월봉 가격 데이터 구조체
//! - 티커 및 조회 기간 타입
//! - 조회 요청(티커, 기간, 금리 가정)
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
