use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Numeric market facts shared by listing rows and detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketFigures {
    pub price: f64,
    pub market_cap: f64,
    pub volume: f64,
    pub circulating_supply: f64,
}

impl MarketFigures {
    pub fn new(
        price: f64,
        market_cap: f64,
        volume: f64,
        circulating_supply: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_non_negative("market_cap", market_cap)?;
        validate_non_negative("volume", volume)?;
        validate_non_negative("circulating_supply", circulating_supply)?;

        Ok(Self {
            price,
            market_cap,
            volume,
            circulating_supply,
        })
    }
}

/// One favorited row of the listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub icon: String,
    pub name: String,
    pub symbol: String,
    #[serde(flatten)]
    pub figures: MarketFigures,
}

impl ListingRecord {
    pub fn new(
        icon: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        figures: MarketFigures,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            icon: validate_non_empty("icon", icon.into())?,
            name: validate_non_empty("name", name.into())?,
            symbol: validate_non_empty("symbol", symbol.into())?,
            figures,
        })
    }
}

/// Detail page snapshot for a single currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// Name as requested by the caller, not as printed on the page.
    pub name: String,
    pub symbol: String,
    pub icon: String,
    pub rank: u32,
    #[serde(flatten)]
    pub figures: MarketFigures,
}

impl DetailRecord {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        icon: impl Into<String>,
        rank: u32,
        figures: MarketFigures,
    ) -> Result<Self, ValidationError> {
        if rank == 0 {
            return Err(ValidationError::InvalidRank);
        }

        Ok(Self {
            name: validate_non_empty("name", name.into())?,
            symbol: validate_non_empty("symbol", symbol.into())?,
            icon: validate_non_empty("icon", icon.into())?,
            rank,
            figures,
        })
    }
}

fn validate_non_empty(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_owned())
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
