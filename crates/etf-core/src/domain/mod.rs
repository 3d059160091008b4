//! 조회 한 건을 구성하는 도메인 모델.

mod instrument;
mod market_data;
mod query;

pub use instrument::*;
pub use market_data::*;
pub use query::*;
