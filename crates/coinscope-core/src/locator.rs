//! Field locators.
//!
//! Everything that ties extraction to the current CoinMarketCap markup lives
//! here as plain data: selectors, column positions, element indices and
//! attribute names. When the site changes shape, these definitions change
//! and the extractors stay as they are. Locators deserialize from the
//! `listing` and `detail` sections of the config file; every field is
//! optional there and falls back to the defaults below.

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, LocatorError};

/// A text field inside a listing row: cell `column`, then the `nth` match
/// of `selector` inside that cell, or the whole cell when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLocator {
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default)]
    pub nth: usize,
}

impl CellLocator {
    pub fn column(column: usize) -> Self {
        Self {
            column,
            selector: None,
            nth: 0,
        }
    }

    pub fn within(column: usize, selector: impl Into<String>, nth: usize) -> Self {
        Self {
            column,
            selector: Some(selector.into()),
            nth,
        }
    }
}

/// An attribute of the first element matching `selector`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrLocator {
    pub selector: String,
    pub attribute: String,
}

impl AttrLocator {
    pub fn new(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: attribute.into(),
        }
    }
}

/// Where listing fields live on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingLocators {
    pub row: String,
    /// A row is selected only when it contains this element.
    pub favorite_marker: String,
    pub cell: String,
    pub icon: AttrLocator,
    pub name: CellLocator,
    pub symbol: CellLocator,
    pub price: CellLocator,
    pub market_cap: CellLocator,
    pub volume: CellLocator,
    pub circulating_supply: CellLocator,
}

impl Default for ListingLocators {
    fn default() -> Self {
        Self {
            row: String::from("tr"),
            favorite_marker: String::from("span.icon-Star"),
            cell: String::from("td"),
            icon: AttrLocator::new(".coin-logo", "src"),
            name: CellLocator::within(2, r#"[color="text"]"#, 0),
            symbol: CellLocator::within(2, r#"[color="text3"]"#, 0),
            price: CellLocator::column(3),
            market_cap: CellLocator::within(7, "span", 1),
            volume: CellLocator::within(8, r#"[color="text"]"#, 0),
            circulating_supply: CellLocator::within(9, r#"[color="text"]"#, 0),
        }
    }
}

/// Where detail fields live on a currency page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailLocators {
    /// Container holding rank, symbol and icon.
    pub section: String,
    pub rank: String,
    pub rank_prefix: String,
    pub symbol: String,
    pub icon: AttrLocator,
    pub price: String,
    /// Repeated stats elements, addressed by position.
    pub stats: String,
    pub market_cap_index: usize,
    pub volume_index: usize,
    pub circulating_supply_index: usize,
}

impl Default for DetailLocators {
    fn default() -> Self {
        Self {
            section: String::from(".nameSection"),
            rank: String::from(".namePillPrimary"),
            rank_prefix: String::from("Rank #"),
            symbol: String::from(".nameSymbol"),
            icon: AttrLocator::new(".nameHeader img", "src"),
            price: String::from(".priceValue"),
            stats: String::from(".statsValue"),
            market_cap_index: 0,
            volume_index: 2,
            circulating_supply_index: 3,
        }
    }
}

/// A selector together with the text it was compiled from.
#[derive(Debug, Clone)]
pub(crate) struct Compiled {
    pub selector: Selector,
    pub source: String,
}

impl Compiled {
    pub fn new(field: &'static str, source: &str) -> Result<Self, LocatorError> {
        let selector =
            Selector::parse(source).map_err(|error| LocatorError::InvalidSelector {
                field,
                selector: source.to_owned(),
                reason: error.to_string(),
            })?;

        Ok(Self {
            selector,
            source: source.to_owned(),
        })
    }

    pub fn first<'a>(
        &self,
        field: &'static str,
        scope: ElementRef<'a>,
    ) -> Result<ElementRef<'a>, ExtractionError> {
        scope
            .select(&self.selector)
            .next()
            .ok_or_else(|| self.missing(field))
    }

    pub fn missing(&self, field: &'static str) -> ExtractionError {
        ExtractionError::MissingElement {
            field,
            selector: self.source.clone(),
            row: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledCell {
    field: &'static str,
    column: usize,
    inner: Option<Compiled>,
    nth: usize,
}

impl CompiledCell {
    pub fn new(field: &'static str, locator: &CellLocator) -> Result<Self, LocatorError> {
        Ok(Self {
            field,
            column: locator.column,
            inner: locator
                .selector
                .as_deref()
                .map(|source| Compiled::new(field, source))
                .transpose()?,
            nth: locator.nth,
        })
    }

    pub fn locate<'a>(&self, cells: &[ElementRef<'a>]) -> Result<ElementRef<'a>, ExtractionError> {
        let cell = cells
            .get(self.column)
            .copied()
            .ok_or(ExtractionError::MissingColumn {
                field: self.field,
                column: self.column,
                row: None,
            })?;

        match &self.inner {
            None => Ok(cell),
            Some(inner) => cell
                .select(&inner.selector)
                .nth(self.nth)
                .ok_or_else(|| inner.missing(self.field)),
        }
    }

    pub const fn field(&self) -> &'static str {
        self.field
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledAttr {
    element: Compiled,
    attribute: String,
}

impl CompiledAttr {
    pub fn new(field: &'static str, locator: &AttrLocator) -> Result<Self, LocatorError> {
        Ok(Self {
            element: Compiled::new(field, &locator.selector)?,
            attribute: locator.attribute.clone(),
        })
    }

    pub fn read(&self, field: &'static str, scope: ElementRef<'_>) -> Result<String, ExtractionError> {
        let element = self.element.first(field, scope)?;
        element
            .value()
            .attr(&self.attribute)
            .map(str::to_owned)
            .ok_or_else(|| ExtractionError::MissingAttribute {
                field,
                attribute: self.attribute.clone(),
                row: None,
            })
    }
}
