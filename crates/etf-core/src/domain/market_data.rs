//! 월봉 가격 데이터.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 월봉 한 개.
///
/// 수익률 계산에는 종가만 사용합니다. 시가/고가/저가/거래량은 원본 표 출력용입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 봉 시작 시각
    pub timestamp: DateTime<Utc>,
    /// 종가
    pub close: f64,
    /// 시가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    /// 고가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    /// 저가
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    /// 거래량
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PriceBar {
    /// 시각과 종가만으로 봉을 생성합니다.
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }

    /// 시가/고가/저가를 설정합니다.
    pub fn with_ohlc(mut self, open: f64, high: f64, low: f64) -> Self {
        self.open = Some(open);
        self.high = Some(high);
        self.low = Some(low);
        self
    }

    /// 거래량을 설정합니다.
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// 봉 목록에서 종가만 순서대로 추출합니다.
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// 봉을 시간순으로 정렬합니다 (오래된 것부터).
pub fn sort_chronologically(bars: &mut [PriceBar]) {
    bars.sort_by_key(|b| b.timestamp);
}
