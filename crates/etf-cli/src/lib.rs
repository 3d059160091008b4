//! ETF 성과 대시보드 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 단일 조회 (`analyze`), 대화형 조회 (`interactive`)
//! - 지표 공식 설명 (`explain`)
//! - 텍스트/JSON 대시보드 출력

pub mod commands;
pub mod render;
