//! # Market Data
//!
//! Static quotes for listed rooms and the simulated ticker tape.
//! Neither touches posts or votes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::StockData;

/// Per-tick price movement is uniform in `[-VOLATILITY / 2, VOLATILITY / 2)`.
pub const VOLATILITY: f64 = 0.002;

struct Listing {
    ticker: &'static str,
    name: &'static str,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: u64,
    market_cap: f64,
    high_52w: f64,
    low_52w: f64,
    pe_ratio: f64,
}

const LISTINGS: [Listing; 8] = [
    Listing {
        ticker: "005930.KS",
        name: "Samsung Electronics",
        price: 72500.0,
        change: 1200.0,
        change_percent: 1.68,
        volume: 15_234_567,
        market_cap: 432_500_000_000_000.0,
        high_52w: 86500.0,
        low_52w: 63500.0,
        pe_ratio: 12.4,
    },
    Listing {
        ticker: "005380.KS",
        name: "Hyundai Motor",
        price: 198500.0,
        change: 3500.0,
        change_percent: 1.79,
        volume: 2_345_678,
        market_cap: 165_200_000_000_000.0,
        high_52w: 215000.0,
        low_52w: 165000.0,
        pe_ratio: 8.2,
    },
    Listing {
        ticker: "000660.KS",
        name: "SK Hynix",
        price: 158500.0,
        change: 4200.0,
        change_percent: 2.72,
        volume: 3_456_789,
        market_cap: 115_400_000_000_000.0,
        high_52w: 175000.0,
        low_52w: 98500.0,
        pe_ratio: -15.2,
    },
    Listing {
        ticker: "035420.KS",
        name: "Naver",
        price: 198000.0,
        change: -1500.0,
        change_percent: -0.75,
        volume: 1_234_567,
        market_cap: 32_500_000_000_000.0,
        high_52w: 245000.0,
        low_52w: 185000.0,
        pe_ratio: 28.5,
    },
    Listing {
        ticker: "035720.KS",
        name: "Kakao",
        price: 42500.0,
        change: -800.0,
        change_percent: -1.85,
        volume: 2_345_678,
        market_cap: 18_900_000_000_000.0,
        high_52w: 68500.0,
        low_52w: 39500.0,
        pe_ratio: 45.2,
    },
    Listing {
        ticker: "373220.KS",
        name: "LG Energy Solution",
        price: 385000.0,
        change: 5500.0,
        change_percent: 1.45,
        volume: 987_654,
        market_cap: 89_800_000_000_000.0,
        high_52w: 465000.0,
        low_52w: 325000.0,
        pe_ratio: 32.1,
    },
    Listing {
        ticker: "068270.KS",
        name: "Celltrion",
        price: 68500.0,
        change: 1200.0,
        change_percent: 1.78,
        volume: 1_234_567,
        market_cap: 18_900_000_000_000.0,
        high_52w: 78500.0,
        low_52w: 58500.0,
        pe_ratio: 22.3,
    },
    Listing {
        ticker: "207940.KS",
        name: "Samsung Biologics",
        price: 785000.0,
        change: 8500.0,
        change_percent: 1.09,
        volume: 234_567,
        market_cap: 52_500_000_000_000.0,
        high_52w: 895000.0,
        low_52w: 685000.0,
        pe_ratio: 85.4,
    },
];

impl Listing {
    fn to_stock_data(&self) -> StockData {
        StockData {
            ticker: self.ticker.to_string(),
            name: self.name.to_string(),
            price: self.price,
            change: self.change,
            change_percent: self.change_percent,
            volume: self.volume,
            market_cap: Some(self.market_cap),
            high_52w: Some(self.high_52w),
            low_52w: Some(self.low_52w),
            pe_ratio: Some(self.pe_ratio),
        }
    }
}

/// Quote for an exchange ticker such as `"005930.KS"`.
pub fn stock_quote(ticker: &str) -> Option<StockData> {
    LISTINGS
        .iter()
        .find(|l| l.ticker == ticker)
        .map(Listing::to_stock_data)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl TickerQuote {
    fn new(symbol: &str, name: &str, price: f64, change: f64, change_percent: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change,
            change_percent,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// The scrolling index/quote strip. Display-only state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerTape {
    pub quotes: Vec<TickerQuote>,
}

impl TickerTape {
    pub fn default_board() -> Self {
        Self {
            quotes: vec![
                TickerQuote::new("KOSPI", "KOSPI", 2512.47, 18.32, 0.73),
                TickerQuote::new("KOSDAQ", "KOSDAQ", 728.15, -4.21, -0.58),
                TickerQuote::new("KRW/USD", "KRW/USD", 1328.50, -2.30, -0.17),
                TickerQuote::new("005930.KS", "Samsung", 72500.0, 1200.0, 1.68),
                TickerQuote::new("000660.KS", "SK Hynix", 158500.0, 4200.0, 2.72),
                TickerQuote::new("005380.KS", "Hyundai", 198500.0, 3500.0, 1.79),
                TickerQuote::new("373220.KS", "LG Energy", 385000.0, 5500.0, 1.45),
                TickerQuote::new("035420.KS", "Naver", 198000.0, -1500.0, -0.75),
                TickerQuote::new("035720.KS", "Kakao", 42500.0, -800.0, -1.85),
            ],
        }
    }

    /// Moves every quote by a small random step.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        for q in &mut self.quotes {
            let step = (rng.random::<f64>() - 0.5) * VOLATILITY;
            let new_price = q.price * (1.0 + step);
            let delta = new_price - q.price;
            q.change_percent += delta / q.price * 100.0;
            q.change += delta;
            q.price = new_price;
        }
    }
}
