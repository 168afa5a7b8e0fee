//! Quote currencies supported by the dashboard

use crate::core::format::Locale;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Brl,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Brl,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
    ];

    /// Lowercase code as understood by the market data API.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Brl => "brl",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
            Currency::Jpy => "jpy",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Brl => "R$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    /// Locale whose number conventions are used when formatting amounts.
    /// Euro amounts use German conventions.
    pub fn locale(&self) -> Locale {
        match self {
            Currency::Usd => Locale::EnUs,
            Currency::Brl => Locale::PtBr,
            Currency::Eur => Locale::DeDe,
            Currency::Gbp => Locale::EnGb,
            Currency::Jpy => Locale::JaJp,
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "brl" => Ok(Currency::Brl),
            "eur" => Ok(Currency::Eur),
            "gbp" => Ok(Currency::Gbp),
            "jpy" => Ok(Currency::Jpy),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

/// Symbol for an arbitrary currency code, empty when the code is unknown.
pub fn currency_symbol(code: &str) -> &'static str {
    code.parse::<Currency>().map_or("", |c| c.symbol())
}

/// Locale for an arbitrary currency code, `en-US` when the code is unknown.
pub fn locale_for(code: &str) -> Locale {
    code.parse::<Currency>().map_or(Locale::EnUs, |c| c.locale())
}
