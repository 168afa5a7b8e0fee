//! Display records for the card grid

use crate::core::format::{format_change, format_magnitude, format_price};
use crate::core::market::{DisplayState, MarketSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    pub fn of(change: f64) -> Self {
        if change >= 0.0 {
            Trend::Positive
        } else {
            Trend::Negative
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub label: &'static str,
    pub text: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub rank: usize,
    pub icon: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub changes: [Change; 3],
    pub stats: [Stat; 4],
}

/// Builds one card per snapshot, ranked by position.
pub fn build_cards(state: &DisplayState) -> Vec<Card> {
    state
        .snapshots
        .iter()
        .enumerate()
        .map(|(i, snapshot)| build_card(snapshot, i + 1, state))
        .collect()
}

fn build_card(snapshot: &MarketSnapshot, rank: usize, state: &DisplayState) -> Card {
    let currency = state.currency;
    let symbol = currency.symbol();
    let change = |label: &'static str, value: f64| Change {
        label,
        text: format_change(value),
        trend: Trend::of(value),
    };

    Card {
        rank,
        icon: snapshot.image.clone(),
        name: snapshot.name.clone(),
        symbol: snapshot.symbol.clone(),
        price: format!("{symbol}{}", format_price(snapshot.current_price, currency)),
        changes: [
            change("1h", snapshot.change_1h),
            change("24h", snapshot.change_24h),
            change("7d", snapshot.change_7d),
        ],
        stats: [
            Stat {
                label: "Market Cap",
                value: format!("{symbol}{}", format_magnitude(snapshot.market_cap, currency)),
            },
            Stat {
                label: "Volume 24h",
                value: format!("{symbol}{}", format_magnitude(snapshot.total_volume, currency)),
            },
            Stat {
                label: "High 24h",
                value: format!("{symbol}{}", format_price(snapshot.high_24h, currency)),
            },
            Stat {
                label: "Low 24h",
                value: format!("{symbol}{}", format_price(snapshot.low_24h, currency)),
            },
        ],
    }
}
