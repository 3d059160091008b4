//! Yahoo Finance 시세 데이터 제공자.
//!
//! 두 개의 HTTP API를 사용합니다:
//! - **quoteSummary** (v10): 종목 유형, 이름, 카테고리, 3년 베타, 시가/전일 종가
//! - **chart** (v8): 월봉(`interval=1mo`) 가격 이력
//!
//! quoteSummary는 crumb 토큰이 필요합니다. 조회마다 쿠키 발급 URL을 먼저 호출해
//! 세션 쿠키를 받고 `/v1/test/getcrumb`에서 crumb을 받아 사용합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use etf_core::{LookbackPeriod, ProviderConfig, Ticker};
//! use etf_data::{MarketDataProvider, YahooFinanceProvider};
//!
//! let provider = YahooFinanceProvider::new(ProviderConfig::default())?;
//! let spy = Ticker::parse("spy")?;
//! let instrument = provider.fetch_instrument(&spy).await?;
//! let bars = provider.fetch_monthly_bars(&spy, LookbackPeriod::FiveYears).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use etf_core::{
    sort_chronologically, Instrument, LookbackPeriod, PriceBar, ProviderConfig, Ticker,
    ETF_QUOTE_TYPE,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::MarketDataProvider;
use crate::error::{DataError, Result};

/// quoteSummary에서 요청할 모듈 목록.
const SUMMARY_MODULES: &str =
    "price,quoteType,summaryProfile,assetProfile,summaryDetail,defaultKeyStatistics,fundProfile";

/// 월봉 간격.
const MONTHLY_INTERVAL: &str = "1mo";

/// Yahoo Finance 제공자.
pub struct YahooFinanceProvider {
    client: Client,
    config: ProviderConfig,
}

impl YahooFinanceProvider {
    /// 새로운 Yahoo Finance 제공자 생성.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::ConnectionError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// 세션 쿠키를 받고 crumb 토큰을 발급받습니다.
    async fn fetch_crumb(&self) -> Result<String> {
        // 쿠키 발급 URL은 404와 함께 Set-Cookie를 돌려주므로 상태 코드는 보지 않는다
        if let Err(e) = self.client.get(&self.config.cookie_url).send().await {
            warn!(error = %e, "Yahoo Finance 세션 쿠키 요청 실패, crumb 발급을 계속 시도합니다");
        }

        let response = self
            .client
            .get(self.api_url("/v1/test/getcrumb"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::ConnectionError(format!(
                "crumb 발급 실패: HTTP {}",
                status
            )));
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') || crumb.contains('{') {
            return Err(DataError::ConnectionError(
                "crumb 응답이 유효하지 않습니다".to_string(),
            ));
        }

        debug!("Yahoo Finance crumb 발급 완료");
        Ok(crumb)
    }

    /// 요청을 보내고 JSON 본문을 파싱합니다.
    ///
    /// Yahoo는 404에도 에러 본문(JSON)을 돌려주므로 상태 코드보다 본문 파싱을 먼저 시도합니다.
    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => Err(DataError::ParseError(format!(
                "{} 응답 파싱 실패: {}",
                what, e
            ))),
            Err(_) => Err(DataError::FetchError(format!(
                "{} 요청 실패: HTTP {}",
                what, status
            ))),
        }
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_instrument(&self, ticker: &Ticker) -> Result<Instrument> {
        let crumb = self.fetch_crumb().await?;

        let request = self
            .client
            .get(self.api_url(&format!("/v10/finance/quoteSummary/{}", ticker)))
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb.as_str())]);

        let response: QuoteSummaryResponse = self.get_json(request, "quoteSummary").await?;
        let summary = response.quote_summary;

        if let Some(error) = summary.error {
            return Err(map_yahoo_error(ticker, error));
        }

        let result = summary
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| DataError::NotFound(ticker.to_string()))?;

        let instrument = instrument_from_summary(ticker, result)?;

        info!(
            ticker = %ticker,
            name = %instrument.name,
            category = %instrument.category,
            beta_3y = instrument.beta_3y,
            "Yahoo Finance 종목 정보 조회 완료"
        );

        Ok(instrument)
    }

    async fn fetch_monthly_bars(
        &self,
        ticker: &Ticker,
        lookback: LookbackPeriod,
    ) -> Result<Vec<PriceBar>> {
        info!(
            "Yahoo Finance: monthly bars for {} (range: {})",
            ticker,
            lookback.as_range()
        );

        let request = self
            .client
            .get(self.api_url(&format!("/v8/finance/chart/{}", ticker)))
            .query(&[
                ("range", lookback.as_range()),
                ("interval", MONTHLY_INTERVAL),
                ("events", "history"),
            ]);

        let response: ChartResponse = self.get_json(request, "chart").await?;
        let chart = response.chart;

        if let Some(error) = chart.error {
            return Err(map_yahoo_error(ticker, error));
        }

        let result = chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| DataError::NotFound(ticker.to_string()))?;

        let bars = bars_from_chart(ticker, result);

        if bars.is_empty() {
            warn!("Yahoo Finance: {} 월봉 데이터 없음", ticker);
        } else {
            debug!("Yahoo Finance: {} 월봉 {} 개 수신", ticker, bars.len());
        }

        Ok(bars)
    }
}

fn map_yahoo_error(ticker: &Ticker, error: YahooError) -> DataError {
    if error.code.eq_ignore_ascii_case("Not Found") {
        DataError::NotFound(format!("{} ({})", ticker, error.description))
    } else {
        DataError::FetchError(format!(
            "{}: {} - {}",
            ticker, error.code, error.description
        ))
    }
}

fn missing(ticker: &Ticker, field: &'static str) -> DataError {
    DataError::MissingField {
        ticker: ticker.to_string(),
        field,
    }
}

/// 빈 문자열이 아닌 첫 번째 값.
fn first_text<const N: usize>(candidates: [Option<&String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// 값이 있는 첫 번째 숫자.
fn first_number<const N: usize>(candidates: [Option<&RawValue>; N]) -> Option<f64> {
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.raw)
        .filter(|v| v.is_finite())
}

/// quoteSummary 결과를 종목 정보로 변환합니다.
///
/// 종목 유형을 먼저 확인하고 (ETF가 아니면 거부), 그 다음 필수 필드를 확인합니다.
fn instrument_from_summary(ticker: &Ticker, result: SummaryResult) -> Result<Instrument> {
    let price = result.price.unwrap_or_default();
    let quote_type = result.quote_type.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let key_stats = result.default_key_statistics.unwrap_or_default();
    let summary_profile = result.summary_profile.unwrap_or_default();
    let asset_profile = result.asset_profile.unwrap_or_default();
    let fund_profile = result.fund_profile.unwrap_or_default();

    let kind = first_text([quote_type.quote_type.as_ref(), price.quote_type.as_ref()])
        .ok_or_else(|| DataError::Unclassified(ticker.to_string()))?;

    if !kind.eq_ignore_ascii_case(ETF_QUOTE_TYPE) {
        return Err(DataError::NotAnEtf {
            ticker: ticker.to_string(),
            quote_type: kind,
        });
    }

    let name = first_text([
        price.long_name.as_ref(),
        quote_type.long_name.as_ref(),
        price.short_name.as_ref(),
        quote_type.short_name.as_ref(),
    ])
    .ok_or_else(|| missing(ticker, "longName"))?;

    let summary = first_text([
        summary_profile.long_business_summary.as_ref(),
        asset_profile.long_business_summary.as_ref(),
    ])
    .ok_or_else(|| missing(ticker, "longBusinessSummary"))?;

    let category = first_text([
        key_stats.category.as_ref(),
        fund_profile.category_name.as_ref(),
    ])
    .ok_or_else(|| missing(ticker, "category"))?;

    let beta_3y =
        first_number([key_stats.beta_3_year.as_ref()]).ok_or_else(|| missing(ticker, "beta3Year"))?;

    let previous_close = first_number([
        price.regular_market_previous_close.as_ref(),
        detail.regular_market_previous_close.as_ref(),
        detail.previous_close.as_ref(),
    ])
    .ok_or_else(|| missing(ticker, "regularMarketPreviousClose"))?;

    let open = first_number([
        price.regular_market_open.as_ref(),
        detail.regular_market_open.as_ref(),
        detail.open.as_ref(),
    ])
    .ok_or_else(|| missing(ticker, "regularMarketOpen"))?;

    let currency = first_text([price.currency.as_ref(), detail.currency.as_ref()]);

    Ok(Instrument {
        ticker: ticker.clone(),
        quote_type: kind,
        name,
        category,
        summary,
        beta_3y,
        previous_close,
        open,
        currency,
    })
}

/// chart 결과를 월봉 목록으로 변환합니다.
///
/// 종가는 수정 종가(adjclose)를 우선 사용하고, 시가/고가/저가도 같은 비율로 보정합니다.
/// 종가가 비어 있는 행은 건너뜁니다.
fn bars_from_chart(ticker: &Ticker, result: ChartResult) -> Vec<PriceBar> {
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(raw_close) = quote.close.get(i).copied().flatten() else {
            skipped += 1;
            continue;
        };
        let Some(timestamp) = Utc.timestamp_opt(ts, 0).single() else {
            skipped += 1;
            continue;
        };

        let close = adjclose.get(i).copied().flatten().unwrap_or(raw_close);
        let factor = if raw_close != 0.0 { close / raw_close } else { 1.0 };

        let mut bar = PriceBar::new(timestamp, close);

        let ohlc = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
        );
        if let (Some(open), Some(high), Some(low)) = ohlc {
            bar = bar.with_ohlc(open * factor, high * factor, low * factor);
        }
        if let Some(volume) = quote.volume.get(i).copied().flatten() {
            bar = bar.with_volume(volume);
        }

        bars.push(bar);
    }

    if skipped > 0 {
        warn!(ticker = %ticker, skipped, "종가가 없는 월봉을 건너뛰었습니다");
    }

    sort_chronologically(&mut bars);
    bars
}

// ==================== Yahoo Finance API 응답 구조 ====================

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    #[serde(default)]
    description: String,
}

/// `{"raw": 1.23, "fmt": "1.23"}` 형태의 숫자 값. 값이 없으면 `{}`로 옵니다.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<SummaryResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SummaryResult {
    price: Option<PriceModule>,
    quote_type: Option<QuoteTypeModule>,
    summary_profile: Option<ProfileModule>,
    asset_profile: Option<ProfileModule>,
    summary_detail: Option<SummaryDetailModule>,
    default_key_statistics: Option<KeyStatisticsModule>,
    fund_profile: Option<FundProfileModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PriceModule {
    quote_type: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    currency: Option<String>,
    regular_market_previous_close: Option<RawValue>,
    regular_market_open: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct QuoteTypeModule {
    quote_type: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProfileModule {
    long_business_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SummaryDetailModule {
    previous_close: Option<RawValue>,
    regular_market_previous_close: Option<RawValue>,
    open: Option<RawValue>,
    regular_market_open: Option<RawValue>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeyStatisticsModule {
    category: Option<String>,
    #[serde(rename = "beta3Year")]
    beta_3_year: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FundProfileModule {
    category_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
    adjclose: Vec<ChartAdjClose>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartAdjClose {
    adjclose: Vec<Option<f64>>,
}
