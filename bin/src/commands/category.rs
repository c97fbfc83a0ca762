//! Category command implementation.
//!
//! This module prints a category with its children and, on request, the
//! series filed under it.

use crate::display::{series_header, series_row};
use anyhow::Result;
use fredtools_lib::prelude::*;
use std::io::Write;

/// Show a category and its children.
pub(crate) fn show(
    client: &FredClient,
    id: i64,
    series: bool,
    limit: u32,
    out: &mut impl Write,
) -> Result<()> {
    let category = Category::new(client, CategoryId::new(id))?;
    writeln!(out, "{category}")?;
    if let Some(parent) = category.parent(client)? {
        writeln!(out, "Parent: {parent}")?;
    }

    let children = category.children(client, &RealtimeWindow::default())?;
    if !children.is_empty() {
        writeln!(out, "\n{:<10} NAME", "ID")?;
        writeln!(out, "{}", "-".repeat(40))?;
        for child in &children {
            writeln!(out, "{:<10} {}", child.id().get(), child.name().unwrap_or(""))?;
        }
    }

    if series {
        let found = category.series(client, &ListOptions::new().with_limit(limit))?;
        writeln!(out)?;
        series_header(out)?;
        for s in &found {
            series_row(out, s)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fredtools_lib::mock::{StubResponse, StubTransport};
    use serde_json::json;

    #[test]
    fn test_show_root() {
        let stub = StubTransport::new([
            StubResponse::new("category", json!({ "categories": [{ "id": 0, "name": "Categories", "parent_id": 0 }] })),
            StubResponse::new(
                "category/children",
                json!({ "categories": [
                    { "id": 32991, "name": "Money, Banking, & Finance", "parent_id": 0 },
                    { "id": 10, "name": "Population, Employment, & Labor Markets", "parent_id": 0 }
                ] }),
            )
            .expect_param("category_id", 0),
        ]);
        let mut out = Vec::new();
        show(&stub.client(), 0, false, 10, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Categories (0)\n"));
        assert!(!text.contains("Parent:"));
        assert!(text.contains(&format!("{:<10} Money, Banking, & Finance", 32991)));
        stub.assert_complete();
    }

    #[test]
    fn test_show_with_parent_and_series() {
        let stub = StubTransport::new([
            StubResponse::new("category", json!({ "categories": [{ "id": 106, "name": "GDP", "parent_id": 18 }] })),
            StubResponse::new("category", json!({ "categories": [{ "id": 18, "name": "National Accounts", "parent_id": 32992 }] }))
                .expect_param("category_id", 18),
            StubResponse::new("category/children", json!({ "categories": [] })),
            StubResponse::new("category/series", json!({ "seriess": [{ "id": "GDP", "title": "Gross Domestic Product" }] }))
                .expect_param("limit", 3),
        ]);
        let mut out = Vec::new();
        show(&stub.client(), 106, true, 3, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Parent: National Accounts (18)"));
        assert!(text.contains("Gross Domestic Product"));
        stub.assert_complete();
    }
}
