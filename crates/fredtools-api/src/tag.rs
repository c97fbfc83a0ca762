//! Tag handle.

use fredtools_client::{FredClient, Params, current_client};
use fredtools_types::{FredError, Result, TagGroup};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response::{self, lenient_int};
use crate::{ListOptions, Series, TagSelector};

/// Descriptive fields of a tag. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFields {
    /// Tag group code, e.g. `"geo"`.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation timestamp as sent by FRED.
    #[serde(default)]
    pub created: Option<String>,
    /// Popularity rank.
    #[serde(default, deserialize_with = "lenient_int")]
    pub popularity: Option<i64>,
    /// Number of series carrying the tag.
    #[serde(default, deserialize_with = "lenient_int")]
    pub series_count: Option<i64>,
}

impl TagFields {
    /// True when any field is known.
    #[must_use]
    pub const fn is_sufficient(&self) -> bool {
        self.group_id.is_some()
            || self.notes.is_some()
            || self.created.is_some()
            || self.popularity.is_some()
            || self.series_count.is_some()
    }
}

/// A tag attached to series, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    name: String,
    #[serde(flatten)]
    fields: TagFields,
}

impl Tag {
    /// Creates a handle from known fields without contacting FRED.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::MissingIdentifier`] if `name` is empty.
    pub fn from_fields(name: impl Into<String>, fields: TagFields) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(FredError::MissingIdentifier { kind: "tag" });
        }
        Ok(Self { name, fields })
    }

    /// Creates a handle, fetching the fields once if none is known.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or the lookup fails.
    pub fn hydrate(
        client: &FredClient,
        name: impl Into<String>,
        fields: TagFields,
    ) -> Result<Self> {
        let tag = Self::from_fields(name, fields)?;
        if tag.fields.is_sufficient() {
            return Ok(tag);
        }
        tracing::debug!(tag = %tag.name, "Hydrating tag");
        Self::fetch(client, tag.name)
    }

    /// Creates a handle from a name, fetching its fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or no such tag exists.
    pub fn new(client: &FredClient, name: impl Into<String>) -> Result<Self> {
        Self::hydrate(client, name, TagFields::default())
    }

    /// Same as [`Tag::new`] with the current client of this thread.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NoCurrentClient`] if no client is registered,
    /// otherwise the errors of [`Tag::new`].
    pub fn get(name: impl Into<String>) -> Result<Self> {
        Self::new(&current_client()?, name)
    }

    /// Looks up a tag by name. When FRED answers with several tags, the one
    /// with a matching name wins.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`] if FRED returns no record.
    pub fn fetch(client: &FredClient, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(FredError::MissingIdentifier { kind: "tag" });
        }
        let body = client.request("tags", Params::new().with("tag_names", &name))?;
        let records = response::records(&body, "tags")?;
        let record = records
            .iter()
            .find(|record| record.get("name").and_then(Value::as_str) == Some(name.as_str()))
            .or_else(|| records.first())
            .ok_or_else(|| FredError::NotFound {
                kind: "tag",
                id: name.clone(),
            })?;
        Self::from_fields(name, response::decode(record)?)
    }

    pub(crate) fn from_record(client: &FredClient, record: &Value) -> Result<Self> {
        let name = response::text_id(record, &["name", "tag_name"], "tag")?;
        Self::hydrate(client, name, response::decode(record)?)
    }

    pub(crate) fn from_records(client: &FredClient, body: &Value, key: &str) -> Result<Vec<Self>> {
        response::records(body, key)?
            .iter()
            .map(|record| Self::from_record(client, record))
            .collect()
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn fields(&self) -> &TagFields {
        &self.fields
    }

    /// Returns the tag group, if known and recognised.
    #[must_use]
    pub fn group(&self) -> Option<TagGroup> {
        self.fields.group_id.as_deref()?.parse().ok()
    }

    /// Fetches a fresh copy of this tag.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`] if the tag no longer exists.
    pub fn info(&self, client: &FredClient) -> Result<Self> {
        Self::fetch(client, self.name.clone())
    }

    /// Replaces the fields with a fresh copy. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Same as [`Tag::info`].
    pub fn refresh(&mut self, client: &FredClient) -> Result<()> {
        self.fields = self.info(client)?.fields;
        Ok(())
    }

    /// All tags, optionally narrowed by `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn all(client: &FredClient, options: &ListOptions) -> Result<Vec<Self>> {
        let body = client.request("tags", options.apply(Params::new()))?;
        Self::from_records(client, &body, "tags")
    }

    /// Tags matching a search text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn search(client: &FredClient, text: &str, options: &ListOptions) -> Result<Vec<Self>> {
        let body = client.request(
            "tags",
            options.apply(Params::new().with("search_text", text)),
        )?;
        Self::from_records(client, &body, "tags")
    }

    /// Options with this tag as the include list unless a tag filter is set.
    fn scoped(&self, options: &ListOptions) -> ListOptions {
        if options.has_tag_filter() {
            return options.clone();
        }
        ListOptions {
            tag_names: vec![TagSelector::from(self)],
            ..options.clone()
        }
    }

    /// Series carrying this tag, or the tags in `options` if any are given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn series(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Series>> {
        let body = client.request("tags/series", self.scoped(options).apply(Params::new()))?;
        Series::from_records(client, &body, "seriess")
    }

    /// Tags related to this tag, or to the tags in `options` if any are given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn related_tags(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Self>> {
        let body = client.request("related_tags", self.scoped(options).apply(Params::new()))?;
        Self::from_records(client, &body, "tags")
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fields.group_id {
            Some(group) => write!(f, "{} [{}]", self.name, group),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fredtools_client::mock::{StubResponse, StubTransport};
    use serde_json::json;

    fn usa() -> Tag {
        Tag::from_fields(
            "usa",
            TagFields {
                group_id: Some("geo".to_string()),
                popularity: Some(100),
                ..TagFields::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Tag::from_fields("", TagFields::default()).unwrap_err();
        assert!(err.is_config());
        let stub = StubTransport::empty();
        assert!(Tag::new(&stub.client(), "").unwrap_err().is_config());
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_new_fetches_matching_record() {
        let stub = StubTransport::new([StubResponse::new(
            "tags",
            json!({ "tags": [
                { "name": "usa-state", "group_id": "geot" },
                { "name": "usa", "group_id": "geo", "notes": "United States of America", "created": "2012-02-27 10:18:19-06", "popularity": 100, "series_count": 500 }
            ] }),
        )
        .expect_param("tag_names", "usa")]);
        let tag = Tag::new(&stub.client(), "usa").unwrap();
        assert_eq!(tag.group(), Some(TagGroup::Geo));
        assert_eq!(tag.fields().series_count, Some(500));
        stub.assert_complete();
    }

    #[test]
    fn test_fetch_not_found() {
        let stub = StubTransport::new([StubResponse::new("tags", json!({ "tags": [] }))]);
        let err = Tag::fetch(&stub.client(), "nothing").unwrap_err();
        assert_eq!(err.to_string(), "No tag found with id nothing");
    }

    #[test]
    fn test_hydrate_skips_request_when_any_field_known() {
        let stub = StubTransport::empty();
        let tag = Tag::hydrate(
            &stub.client(),
            "gdp",
            TagFields {
                notes: Some(String::new()),
                ..TagFields::default()
            },
        )
        .unwrap();
        assert_eq!(tag.name(), "gdp");
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_refresh() {
        let stub = StubTransport::new([StubResponse::new(
            "tags",
            json!({ "tags": [{ "name": "usa", "group_id": "geo", "popularity": 99 }] }),
        )]);
        let mut tag = usa();
        tag.refresh(&stub.client()).unwrap();
        assert_eq!(tag.fields().popularity, Some(99));
    }

    #[test]
    fn test_all_and_search() {
        let body = json!({ "tags": [{ "name": "gdp", "group_id": "gen" }] });
        let stub = StubTransport::new([
            StubResponse::new("tags", body.clone())
                .expect_param("tag_group_id", "gen")
                .expect_absent("search_text"),
            StubResponse::new("tags", body).expect_param("search_text", "product"),
        ]);
        let client = stub.client();
        let all = Tag::all(&client, &ListOptions::new().with_tag_group(TagGroup::Gen)).unwrap();
        let found = Tag::search(&client, "product", &ListOptions::default()).unwrap();
        assert_eq!(all, found);
        stub.assert_complete();
    }

    #[test]
    fn test_series_defaults_to_own_name() {
        let stub = StubTransport::new([StubResponse::new(
            "tags/series",
            json!({ "seriess": [{ "id": "GDP", "title": "Gross Domestic Product" }] }),
        )
        .expect_param("tag_names", "usa")
        .expect_absent("exclude_tag_names")]);
        let series = usa().series(&stub.client(), &ListOptions::default()).unwrap();
        assert_eq!(series[0].id().as_str(), "GDP");
    }

    #[test]
    fn test_series_keeps_explicit_exclusions() {
        let stub = StubTransport::new([StubResponse::new("tags/series", json!({ "seriess": [] }))
            .expect_absent("tag_names")
            .expect_param("exclude_tag_names", "discontinued")]);
        let options = ListOptions::new().with_exclude_tag_names(["discontinued"]);
        assert!(usa().series(&stub.client(), &options).unwrap().is_empty());
    }

    #[test]
    fn test_related_tags() {
        let stub = StubTransport::new([StubResponse::new(
            "related_tags",
            json!({ "tags": [{ "name": "nation", "group_id": "geot", "series_count": 10 }] }),
        )
        .expect_param("tag_names", "usa")
        .expect_param("limit", 5)]);
        let related = usa()
            .related_tags(&stub.client(), &ListOptions::new().with_limit(5))
            .unwrap();
        assert_eq!(related[0].to_string(), "nation [geot]");
    }

    #[test]
    fn test_display() {
        assert_eq!(usa().to_string(), "usa [geo]");
    }
}
