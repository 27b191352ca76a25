//! Registry of the macro assets the dashboard knows how to fetch.

use serde::{Deserialize, Serialize};

/// How an asset's values are rescaled for charting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    /// Prices in arbitrary units. Min-max normalized over the visible window.
    Generic,
    /// Already a percentage (short-term interest rates). Fixed linear remap.
    RateLike,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AssetSpec {
    /// Display name, also the key used for caching and aligned rows.
    pub name: &'static str,
    /// Symbol understood by the quote provider.
    pub symbol: &'static str,
    pub class: AssetClass,
}

impl AssetSpec {
    pub const fn is_rate_like(&self) -> bool {
        matches!(self.class, AssetClass::RateLike)
    }
}

pub const ASSETS: &[AssetSpec] = &[
    AssetSpec { name: "S&P 500", symbol: "^GSPC", class: AssetClass::Generic },
    AssetSpec { name: "Kospi", symbol: "^KS11", class: AssetClass::Generic },
    AssetSpec { name: "Bitcoin", symbol: "BTC-USD", class: AssetClass::Generic },
    AssetSpec { name: "Gold", symbol: "GC=F", class: AssetClass::Generic },
    AssetSpec { name: "Treasury 10Y", symbol: "^TNX", class: AssetClass::Generic },
    AssetSpec { name: "USD/KRW", symbol: "KRW=X", class: AssetClass::Generic },
    AssetSpec { name: "Real Estate", symbol: "VNQ", class: AssetClass::Generic },
    AssetSpec { name: "US Rate", symbol: "^IRX", class: AssetClass::RateLike },
    AssetSpec { name: "KR Rate", symbol: "KRWCBDKY=SB", class: AssetClass::RateLike },
];

/// Case-insensitive lookup by display name.
pub fn find_asset(name: &str) -> Option<&'static AssetSpec> {
    ASSETS.iter().find(|a| a.name.eq_ignore_ascii_case(name.trim()))
}

pub fn rate_like_names() -> impl Iterator<Item = &'static str> {
    ASSETS.iter().filter(|a| a.is_rate_like()).map(|a| a.name)
}
