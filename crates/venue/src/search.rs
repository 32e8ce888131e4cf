//! Advertisement search against the P2P quote venue.

use crate::error::VenueError;
use async_trait::async_trait;
use compact_str::CompactString;
use peerscout_core::{Advertisement, CryptoAsset, Fiat, FixedPoint, TradeDirection};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Quote venue lookup seam. One call returns the current advertisement set
/// for a single currency; failures are per-call and never fatal.
#[async_trait]
pub trait QuoteVenue: Send + Sync {
    async fn search(
        &self,
        fiat: Fiat,
        direction: TradeDirection,
        asset: CryptoAsset,
        amount: FixedPoint,
    ) -> Result<Vec<Advertisement>, VenueError>;
}

/// Binance P2P advertisement search client.
pub struct BinanceP2p {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceP2p {
    const DEFAULT_BASE_URL: &'static str = "https://p2p.binance.com";
    const SEARCH_PATH: &'static str = "/bapi/c2c/v2/friendly/c2c/adv/search";
    const TIMEOUT: Duration = Duration::from_secs(15);
    const ROWS_PER_PAGE: u32 = 20;

    pub fn new() -> Result<Self, VenueError> {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Point the client at a different host (tests, mirrors).
    pub fn with_base_url(base_url: &str) -> Result<Self, VenueError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl QuoteVenue for BinanceP2p {
    async fn search(
        &self,
        fiat: Fiat,
        direction: TradeDirection,
        asset: CryptoAsset,
        amount: FixedPoint,
    ) -> Result<Vec<Advertisement>, VenueError> {
        let url = format!("{}{}", self.base_url, Self::SEARCH_PATH);
        let referer = format!(
            "{}/en/trade/{}/{}",
            self.base_url,
            direction.as_str().to_lowercase(),
            asset.as_str()
        );
        let request = SearchRequest {
            fiat: fiat.as_str(),
            page: 1,
            rows: Self::ROWS_PER_PAGE,
            trade_type: direction.as_str(),
            asset: asset.as_str(),
            countries: &[],
            pro_merchant_ads: false,
            shield_merchant_ads: false,
            filter_type: "all",
            periods: &[],
            additional_kyc_verify_filter: 0,
            publisher_type: None,
            pay_types: &[],
            classifies: &["mass", "profession", "fiat_trade"],
            trans_amount: amount.to_f64(),
        };

        let response = self
            .client
            .post(&url)
            .header("Accept", "*/*")
            .header("Origin", self.base_url.as_str())
            .header("Referer", referer.as_str())
            .header("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64)")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VenueError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| VenueError::Parse(e.to_string()))?;

        let rows = body.data.unwrap_or_default();
        let mut ads = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_advertisement(fiat) {
                Some(ad) => ads.push(ad),
                None => debug!(
                    fiat = fiat.as_str(),
                    "skipping advertisement with unparseable numeric fields"
                ),
            }
        }
        debug!(
            fiat = fiat.as_str(),
            count = ads.len(),
            "fetched advertisements"
        );
        Ok(ads)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    fiat: &'a str,
    page: u32,
    rows: u32,
    trade_type: &'a str,
    asset: &'a str,
    countries: &'a [&'a str],
    pro_merchant_ads: bool,
    shield_merchant_ads: bool,
    filter_type: &'a str,
    periods: &'a [u32],
    additional_kyc_verify_filter: u8,
    publisher_type: Option<&'a str>,
    pay_types: &'a [&'a str],
    classifies: &'a [&'a str],
    trans_amount: f64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<AdvRow>>,
}

#[derive(Debug, Deserialize)]
struct AdvRow {
    adv: AdvBody,
    advertiser: AdvertiserBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvBody {
    price: String,
    min_single_trans_amount: String,
    dynamic_max_single_trans_amount: String,
    surplus_amount: String,
    #[serde(default)]
    trade_methods: Vec<TradeMethod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TradeMethod {
    #[serde(default)]
    trade_method_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdvertiserBody {
    nick_name: String,
    #[serde(default)]
    month_finish_rate: Option<f64>,
    #[serde(default)]
    month_order_count: Option<u32>,
}

impl AdvRow {
    /// Convert a wire row into the domain type. The venue serializes numbers
    /// as strings; a row whose fields do not parse is dropped, not fatal.
    fn into_advertisement(self, fiat: Fiat) -> Option<Advertisement> {
        let price = FixedPoint::parse(&self.adv.price)?;
        let min_single_amount = FixedPoint::parse(&self.adv.min_single_trans_amount)?;
        let max_single_amount = FixedPoint::parse(&self.adv.dynamic_max_single_trans_amount)?;
        let available = FixedPoint::parse(&self.adv.surplus_amount)?;

        let payment_methods: Vec<CompactString> = self
            .adv
            .trade_methods
            .into_iter()
            .filter_map(|m| m.trade_method_name)
            .map(CompactString::from)
            .collect();

        Some(Advertisement {
            fiat,
            price,
            min_single_amount,
            max_single_amount,
            available,
            merchant: CompactString::from(self.advertiser.nick_name),
            completion_rate: self.advertiser.month_finish_rate.unwrap_or(0.0),
            monthly_orders: self.advertiser.month_order_count.unwrap_or(0),
            payment_methods,
        })
    }
}
