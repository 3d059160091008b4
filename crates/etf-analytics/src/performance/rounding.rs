//! 소수점 반올림.
//!
//! 각 지표는 계산 단계마다 정해진 자릿수로 반올림됩니다. 최종 값만 반올림하면
//! 기존 출력과 다른 값이 나옵니다.

/// 기대수익률(%) 자릿수
pub const EXPECTED_RETURN_DP: u32 = 2;
/// 표본분산 자릿수
pub const VARIANCE_DP: u32 = 6;
/// 표준편차(소수) 자릿수. 퍼센트 변환 전에 반올림합니다.
pub const STD_DEV_DP: u32 = 4;
/// 성과 지표 자릿수
pub const RATIO_DP: u32 = 5;

/// `value`를 소수점 `places`자리로 반올림합니다.
///
/// `value × 10^places`를 가장 가까운 정수로 (동률이면 짝수 쪽으로) 반올림한 뒤
/// 다시 `10^places`로 나눕니다.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round_ties_even() / factor
}
