//! Search command implementation.

use crate::display::{series_header, series_row};
use anyhow::Result;
use fredtools_lib::prelude::*;
use std::io::Write;

/// Search series by text and list the matches.
pub(crate) fn search(
    client: &FredClient,
    text: &str,
    limit: u32,
    out: &mut impl Write,
) -> Result<()> {
    let options = SearchOptions {
        list: ListOptions::new()
            .with_limit(limit)
            .with_order_by("popularity")
            .with_sort_order(fredtools_lib::SortOrder::Desc),
        ..SearchOptions::default()
    };
    let found = Series::search(client, text, &options)?;

    if found.is_empty() {
        writeln!(out, "No series found.")?;
        return Ok(());
    }

    series_header(out)?;
    for series in &found {
        series_row(out, series)?;
    }
    writeln!(out, "\nTotal: {} series", found.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fredtools_lib::mock::{StubResponse, StubTransport};
    use serde_json::json;

    #[test]
    fn test_search_lists_matches() {
        let stub = StubTransport::new([StubResponse::new(
            "series/search",
            json!({ "seriess": [
                { "id": "UNRATE", "title": "Unemployment Rate", "frequency_short": "M", "seasonal_adjustment_short": "SA" },
                { "id": "UNRATENSA", "title": "Unemployment Rate", "frequency_short": "M", "seasonal_adjustment_short": "NSA" }
            ] }),
        )
        .expect_param("search_text", "unemployment")
        .expect_param("limit", 5)
        .expect_param("order_by", "popularity")
        .expect_param("sort_order", "desc")]);
        let mut out = Vec::new();
        search(&stub.client(), "unemployment", 5, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("UNRATENSA"));
        assert!(text.ends_with("Total: 2 series\n"));
    }

    #[test]
    fn test_search_without_matches() {
        let stub = StubTransport::new([StubResponse::new("series/search", json!({ "seriess": [] }))]);
        let mut out = Vec::new();
        search(&stub.client(), "zzz", 5, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No series found.\n");
    }
}
