pub mod coingecko;

pub use coingecko::CoinGeckoProvider;
