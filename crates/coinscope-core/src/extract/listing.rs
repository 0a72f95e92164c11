use scraper::ElementRef;

use super::{read_number, text_of};
use crate::error::{ExtractionError, LocatorError};
use crate::extract::numeric::{parse_currency, parse_quantity};
use crate::fetcher::Document;
use crate::locator::{Compiled, CompiledAttr, CompiledCell, ListingLocators};
use crate::{ListingRecord, MarketFigures};

/// Extracts favorited rows from the listing page.
///
/// A single bad row fails the whole call; a partial list is never returned.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    row: Compiled,
    favorite_marker: Compiled,
    cell: Compiled,
    icon: CompiledAttr,
    name: CompiledCell,
    symbol: CompiledCell,
    price: CompiledCell,
    market_cap: CompiledCell,
    volume: CompiledCell,
    circulating_supply: CompiledCell,
}

impl ListingExtractor {
    pub fn new(locators: &ListingLocators) -> Result<Self, LocatorError> {
        Ok(Self {
            row: Compiled::new("row", &locators.row)?,
            favorite_marker: Compiled::new("favorite_marker", &locators.favorite_marker)?,
            cell: Compiled::new("cell", &locators.cell)?,
            icon: CompiledAttr::new("icon", &locators.icon)?,
            name: CompiledCell::new("name", &locators.name)?,
            symbol: CompiledCell::new("symbol", &locators.symbol)?,
            price: CompiledCell::new("price", &locators.price)?,
            market_cap: CompiledCell::new("market_cap", &locators.market_cap)?,
            volume: CompiledCell::new("volume", &locators.volume)?,
            circulating_supply: CompiledCell::new(
                "circulating_supply",
                &locators.circulating_supply,
            )?,
        })
    }

    pub fn extract(&self, document: &Document) -> Result<Vec<ListingRecord>, ExtractionError> {
        document
            .html()
            .select(&self.row.selector)
            .filter(|row| self.is_favorited(*row))
            .enumerate()
            .map(|(index, row)| self.extract_row(row).map_err(|error| error.in_row(index)))
            .collect()
    }

    fn is_favorited(&self, row: ElementRef<'_>) -> bool {
        row.select(&self.favorite_marker.selector).next().is_some()
    }

    fn extract_row(&self, row: ElementRef<'_>) -> Result<ListingRecord, ExtractionError> {
        let cells: Vec<ElementRef<'_>> = row.select(&self.cell.selector).collect();

        let name = text_of(self.name.locate(&cells)?);
        let symbol = text_of(self.symbol.locate(&cells)?);
        let icon = self.icon.read("icon", row)?;

        let figures = MarketFigures::new(
            self.number(&cells, &self.price, parse_currency)?,
            self.number(&cells, &self.market_cap, parse_currency)?,
            self.number(&cells, &self.volume, parse_currency)?,
            self.number(&cells, &self.circulating_supply, parse_quantity)?,
        )?;

        Ok(ListingRecord::new(icon, name, symbol, figures)?)
    }

    fn number(
        &self,
        cells: &[ElementRef<'_>],
        locator: &CompiledCell,
        parse: fn(&str) -> Option<f64>,
    ) -> Result<f64, ExtractionError> {
        read_number(locator.field(), locator.locate(cells)?, parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(star: bool, name: &str, symbol: &str, price: &str) -> String {
        let marker = if star { r#"<span class="icon-Star"></span>"# } else { "" };
        format!(
            r#"<tr>
                <td>{marker}</td>
                <td>1</td>
                <td><img class="coin-logo" src="https://s2.example/{symbol}.png"/>
                    <p color="text">{name}</p><p color="text3">{symbol}</p></td>
                <td>{price}</td>
                <td>0.1%</td><td>1.2%</td><td>4.0%</td>
                <td><p><span>$1.2B</span><span>$1,234,567,890</span></p></td>
                <td><p color="text">$98,765,432.10</p><p>1,000 {symbol}</p></td>
                <td><p color="text">21,000,000 {symbol}</p></td>
            </tr>"#
        )
    }

    fn document(rows: &[String]) -> Document {
        Document::parse(
            "https://coinmarketcap.com/",
            &format!("<html><body><table><tbody>{}</tbody></table></body></html>", rows.join("")),
        )
    }

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(&ListingLocators::default()).expect("default locators compile")
    }

    #[test]
    fn extracts_only_favorited_rows_in_order() {
        let doc = document(&[
            row(true, "Bitcoin", "BTC", "$43,250.12"),
            row(false, "Dogecoin", "DOGE", "$0.08"),
            row(true, "Ethereum", "ETH", "$2,280.50"),
        ]);

        let records = extractor().extract(&doc).expect("rows should parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Bitcoin");
        assert_eq!(records[0].symbol, "BTC");
        assert_eq!(records[0].icon, "https://s2.example/BTC.png");
        assert_eq!(records[0].figures.price, 43_250.12);
        assert_eq!(records[0].figures.market_cap, 1_234_567_890.0);
        assert_eq!(records[0].figures.volume, 98_765_432.10);
        assert_eq!(records[0].figures.circulating_supply, 21_000_000.0);
        assert_eq!(records[1].symbol, "ETH");
    }

    #[test]
    fn no_favorited_rows_yields_empty_list() {
        let doc = document(&[row(false, "Dogecoin", "DOGE", "$0.08")]);
        assert!(extractor().extract(&doc).expect("nothing to parse").is_empty());
    }

    #[test]
    fn one_bad_row_fails_the_batch() {
        let doc = document(&[
            row(true, "Bitcoin", "BTC", "$43,250.12"),
            row(true, "Ethereum", "ETH", "price unavailable"),
        ]);

        let err = extractor().extract(&doc).expect_err("bad price must fail");
        assert_eq!(
            err,
            ExtractionError::InvalidNumber {
                field: "price",
                raw: String::from("price unavailable"),
                row: Some(1),
            }
        );
    }

    #[test]
    fn missing_icon_attribute_fails() {
        let broken = row(true, "Bitcoin", "BTC", "$1.00").replace(r#" src="https://s2.example/BTC.png""#, "");
        let err = extractor()
            .extract(&document(&[broken]))
            .expect_err("missing src must fail");

        assert!(matches!(
            err,
            ExtractionError::MissingAttribute { field: "icon", row: Some(0), .. }
        ));
    }

    #[test]
    fn short_row_reports_missing_column() {
        let doc = document(&[String::from(
            r#"<tr><td><span class="icon-Star"></span></td><td>1</td></tr>"#,
        )]);

        let err = extractor().extract(&doc).expect_err("short row must fail");
        assert!(matches!(
            err,
            ExtractionError::MissingColumn { field: "name", column: 2, row: Some(0) }
        ));
    }
}
