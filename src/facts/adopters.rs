//! Adopter list scraping
//!
//! The adopters document is a markdown file holding a table whose first column is the
//! organization name. Every body row contributes its first cell; header rows are ignored,
//! rows with an empty first cell are skipped, and duplicates collapse to the first occurrence.

use super::hosting::Client;
use crate::Result;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;

const LOG_TARGET: &str = "  adopters";

/// Position of the scanner relative to the tables of the document
#[derive(Debug)]
enum ScanState {
    /// Not inside a table body
    Outside,

    /// Inside a table body, between rows
    InTableBody,

    /// A row has started and its first cell has not been seen yet
    ExpectingCell,

    /// Collecting the text of the first cell of a row
    InCell(String),

    /// First cell done, skipping to the end of the row
    RestOfRow,
}

/// Download the adopters document and extract the organization names
pub async fn fetch_adopters(client: &Client, url: &str) -> Result<Vec<String>> {
    log::info!(target: LOG_TARGET, "Fetching adopter list from '{url}'");

    let content = client.fetch_text(url).await?;
    let adopters = parse_adopters(&content);

    log::info!(target: LOG_TARGET, "Found {} adopter(s)", adopters.len());
    Ok(adopters)
}

/// Extract the first cell of every table body row, in document order, without duplicates
#[must_use]
pub fn parse_adopters(markdown: &str) -> Vec<String> {
    let mut adopters = Vec::new();
    let mut seen = HashSet::new();
    let mut state = ScanState::Outside;

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        state = match (state, event) {
            (_, Event::End(TagEnd::TableHead)) => ScanState::InTableBody,
            (_, Event::End(TagEnd::Table)) => ScanState::Outside,
            (ScanState::InTableBody, Event::Start(Tag::TableRow)) => ScanState::ExpectingCell,
            (ScanState::ExpectingCell, Event::Start(Tag::TableCell)) => ScanState::InCell(String::new()),
            (ScanState::InCell(mut text), Event::Text(fragment) | Event::Code(fragment)) => {
                text.push_str(&fragment);
                ScanState::InCell(text)
            }
            (ScanState::InCell(text), Event::End(TagEnd::TableCell)) => {
                let name = text.trim();
                if !name.is_empty() && seen.insert(name.to_string()) {
                    adopters.push(name.to_string());
                }

                ScanState::RestOfRow
            }
            (ScanState::ExpectingCell | ScanState::InCell(_) | ScanState::RestOfRow, Event::End(TagEnd::TableRow)) => {
                ScanState::InTableBody
            }
            (state, _) => state,
        };
    }

    adopters
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADOPTERS_MD: &str = "\
# Adopters

Organizations using the project in production.

| Organization | Contact | Description of Use |
| ------------ | ------- | ------------------ |
| Acme Corp | @wile | Internal developer portal |
| Globex | @hank | Service catalog |
| Acme Corp | @road | Second team at Acme |
";

    #[test]
    fn test_duplicate_rows_collapse() {
        let md = "\
| Organization | Contact |
| --- | --- |
| Acme Corp | ... |
| Acme Corp | ... |
";
        assert_eq!(parse_adopters(md), vec!["Acme Corp".to_string()]);
    }

    #[test]
    fn test_document_order_preserved() {
        assert_eq!(parse_adopters(ADOPTERS_MD), vec!["Acme Corp".to_string(), "Globex".to_string()]);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        assert_eq!(parse_adopters(ADOPTERS_MD), parse_adopters(ADOPTERS_MD));
    }

    #[test]
    fn test_header_row_is_not_an_adopter() {
        let adopters = parse_adopters(ADOPTERS_MD);
        assert!(!adopters.iter().any(|a| a == "Organization"));
    }

    #[test]
    fn test_empty_first_cell_skipped() {
        let md = "\
| Organization | Contact |
| --- | --- |
|  | @nobody |
| Initech | @bill |
";
        assert_eq!(parse_adopters(md), vec!["Initech".to_string()]);
    }

    #[test]
    fn test_inline_markup_in_first_cell() {
        let md = "\
| Organization | Contact |
| --- | --- |
| [Umbrella](https://umbrella.test) | @alice |
| **Stark** `Industries` | @tony |
";
        assert_eq!(
            parse_adopters(md),
            vec!["Umbrella".to_string(), "Stark Industries".to_string()]
        );
    }

    #[test]
    fn test_multiple_tables() {
        let md = "\
| Organization | Contact |
| --- | --- |
| First | a |

Some text in between.

| Company | Notes |
| --- | --- |
| Second | b |
";
        assert_eq!(parse_adopters(md), vec!["First".to_string(), "Second".to_string()]);
    }

    #[test]
    fn test_no_table() {
        assert!(parse_adopters("# Adopters\n\nNobody yet.\n| not | a table |\n").is_empty());
        assert!(parse_adopters("").is_empty());
    }
}
