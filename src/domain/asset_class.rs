//! Static asset-class partition of the instrument universe.

use std::collections::HashSet;

pub const DEFAULT_TICKERS: &[&str] = &[
    "AAPL", "TSLA", "JNJ", "NVDA", "AIR.PA", "SIE.DE", "OR.PA", "NESN.SW", "TCS.NS", "VALE",
    "BABA", "NIO", "VOO", "VEA", "VWO", "ARKK", "FBALX", "VBIAX", "TLT", "BND", "IEI", "SHV",
    "GLD", "BTC-USD", "AMZN", "GOOGL", "META", "PYPL", "DIS", "PEP", "V", "NFLX", "INTC", "WMT",
    "VOW3.DE", "BAYN.DE", "ASML.AS", "LHA.DE", "BMW.DE", "QQQ", "SPY", "EFA", "IEMG", "XLF",
    "XLE",
];

pub const DEFAULT_SAFE: &[&str] = &[
    "VOO", "VEA", "VWO", "ARKK", "FBALX", "VBIAX", "TLT", "BND", "IEI", "SHV", "QQQ", "SPY", "EFA",
    "IEMG", "XLF", "XLE",
];

pub const DEFAULT_HIGH_GROWTH: &[&str] = &[
    "AAPL", "TSLA", "JNJ", "NVDA", "AMZN", "GOOGL", "META", "PYPL", "DIS", "PEP", "V", "NFLX",
    "INTC", "WMT", "TCS.NS", "VALE", "BABA", "NIO", "VOW3.DE", "BAYN.DE", "ASML.AS", "LHA.DE",
    "BMW.DE", "AIR.PA", "SIE.DE", "OR.PA", "NESN.SW", "GLD", "BTC-USD",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Safe,
    HighGrowth,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetClasses {
    safe: HashSet<String>,
    high_growth: HashSet<String>,
}

impl AssetClasses {
    pub fn new<S, H>(safe: S, high_growth: H) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        Self {
            safe: safe.into_iter().map(Into::into).collect(),
            high_growth: high_growth.into_iter().map(Into::into).collect(),
        }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_SAFE.iter().copied(), DEFAULT_HIGH_GROWTH.iter().copied())
    }

    pub fn is_member(&self, symbol: &str, class: AssetClass) -> bool {
        match class {
            AssetClass::Safe => self.safe.contains(symbol),
            AssetClass::HighGrowth => self.high_growth.contains(symbol),
        }
    }

    pub fn is_safe(&self, symbol: &str) -> bool {
        self.is_member(symbol, AssetClass::Safe)
    }

    pub fn is_high_growth(&self, symbol: &str) -> bool {
        self.is_member(symbol, AssetClass::HighGrowth)
    }
}

pub fn default_tickers() -> Vec<String> {
    DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect()
}
