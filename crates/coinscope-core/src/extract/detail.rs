use scraper::ElementRef;

use super::{read_number, text_of};
use crate::error::{ExtractionError, LocatorError};
use crate::extract::numeric::{parse_currency, parse_quantity, parse_rank};
use crate::fetcher::Document;
use crate::locator::{Compiled, CompiledAttr, DetailLocators};
use crate::{CurrencyName, DetailRecord, MarketFigures};

/// Extracts a [`DetailRecord`] from a currency page.
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    section: Compiled,
    rank: Compiled,
    rank_prefix: String,
    symbol: Compiled,
    icon: CompiledAttr,
    price: Compiled,
    stats: Compiled,
    market_cap_index: usize,
    volume_index: usize,
    circulating_supply_index: usize,
}

impl DetailExtractor {
    pub fn new(locators: &DetailLocators) -> Result<Self, LocatorError> {
        Ok(Self {
            section: Compiled::new("section", &locators.section)?,
            rank: Compiled::new("rank", &locators.rank)?,
            rank_prefix: locators.rank_prefix.clone(),
            symbol: Compiled::new("symbol", &locators.symbol)?,
            icon: CompiledAttr::new("icon", &locators.icon)?,
            price: Compiled::new("price", &locators.price)?,
            stats: Compiled::new("stats", &locators.stats)?,
            market_cap_index: locators.market_cap_index,
            volume_index: locators.volume_index,
            circulating_supply_index: locators.circulating_supply_index,
        })
    }

    /// `name` is attached to the record as given; the page's own title is
    /// not read.
    pub fn extract(
        &self,
        document: &Document,
        name: &CurrencyName,
    ) -> Result<DetailRecord, ExtractionError> {
        let root = document.html().root_element();

        let section = self.section.first("section", root)?;
        let rank_text = text_of(self.rank.first("rank", section)?);
        let rank = parse_rank(&rank_text, &self.rank_prefix).ok_or_else(|| {
            ExtractionError::InvalidRank {
                raw: rank_text.clone(),
                prefix: self.rank_prefix.clone(),
            }
        })?;
        let symbol = text_of(self.symbol.first("symbol", section)?);
        let icon = self.icon.read("icon", section)?;

        let price = read_number("price", self.price.first("price", root)?, parse_currency)?;

        let stats: Vec<ElementRef<'_>> = root.select(&self.stats.selector).collect();
        let figures = MarketFigures::new(
            price,
            self.stat(&stats, "market_cap", self.market_cap_index, parse_currency)?,
            self.stat(&stats, "volume", self.volume_index, parse_currency)?,
            self.stat(
                &stats,
                "circulating_supply",
                self.circulating_supply_index,
                parse_quantity,
            )?,
        )?;

        Ok(DetailRecord::new(name.as_str(), symbol, icon, rank, figures)?)
    }

    fn stat(
        &self,
        stats: &[ElementRef<'_>],
        field: &'static str,
        index: usize,
        parse: fn(&str) -> Option<f64>,
    ) -> Result<f64, ExtractionError> {
        let element = stats
            .get(index)
            .copied()
            .ok_or_else(|| ExtractionError::MissingElement {
                field,
                selector: format!("{} (index {index})", self.stats.source),
                row: None,
            })?;
        read_number(field, element, parse)
    }
}
