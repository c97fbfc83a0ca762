//! Tag command implementation.

use crate::display::{field, series_header, series_row};
use anyhow::Result;
use fredtools_lib::prelude::*;
use std::io::Write;

/// Show a tag with its series or related tags.
pub(crate) fn show(
    client: &FredClient,
    name: &str,
    related: bool,
    limit: u32,
    out: &mut impl Write,
) -> Result<()> {
    let tag = Tag::new(client, name)?;
    let fields = tag.fields();

    writeln!(out, "{tag}")?;
    field(out, "Group", tag.group().map(|g| g.label()))?;
    field(out, "Series", fields.series_count)?;
    field(out, "Popularity", fields.popularity)?;
    field(out, "Created", fields.created.as_deref())?;
    writeln!(out)?;

    let options = ListOptions::new().with_limit(limit);
    if related {
        let tags = tag.related_tags(client, &options)?;
        writeln!(out, "{:<30} {:<6} {:>8}", "TAG", "GROUP", "SERIES")?;
        writeln!(out, "{}", "-".repeat(46))?;
        for related in &tags {
            let fields = related.fields();
            writeln!(
                out,
                "{:<30} {:<6} {:>8}",
                related.name(),
                fields.group_id.as_deref().unwrap_or("-"),
                fields.series_count.map_or_else(|| "-".to_string(), |c| c.to_string()),
            )?;
        }
    } else {
        let series = tag.series(client, &options)?;
        series_header(out)?;
        for s in &series {
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

    fn usa() -> StubResponse {
        StubResponse::new(
            "tags",
            json!({ "tags": [{ "name": "usa", "group_id": "geo", "notes": "", "popularity": 100, "series_count": 600000 }] }),
        )
        .expect_param("tag_names", "usa")
    }

    #[test]
    fn test_show_series() {
        let stub = StubTransport::new([
            usa(),
            StubResponse::new("tags/series", json!({ "seriess": [{ "id": "GDP", "title": "Gross Domestic Product" }] }))
                .expect_param("tag_names", "usa")
                .expect_param("limit", 2),
        ]);
        let mut out = Vec::new();
        show(&stub.client(), "usa", false, 2, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("usa [geo]\n"));
        assert!(text.contains("Geography"));
        assert!(text.contains("Gross Domestic Product"));
        stub.assert_complete();
    }

    #[test]
    fn test_show_related() {
        let stub = StubTransport::new([
            usa(),
            StubResponse::new("related_tags", json!({ "tags": [{ "name": "nation", "group_id": "geot", "series_count": 12 }] }))
                .expect_param("tag_names", "usa"),
        ]);
        let mut out = Vec::new();
        show(&stub.client(), "usa", true, 5, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("{:<30} {:<6} {:>8}", "nation", "geot", 12)));
        stub.assert_complete();
    }
}
