//! Release handle.

use chrono::NaiveDate;
use fredtools_client::{FredClient, Params, current_client};
use fredtools_table::ReleaseTable;
use fredtools_types::{ReleaseId, Result, Source};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response;
use crate::{DatesOptions, ListOptions, RealtimeWindow, Series, TableOptions, Tag};

/// Descriptive fields of a release. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFields {
    /// Start of the realtime window the record is valid for.
    #[serde(default)]
    pub realtime_start: Option<NaiveDate>,
    /// End of the realtime window the record is valid for.
    #[serde(default)]
    pub realtime_end: Option<NaiveDate>,
    /// Release name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the release is a press release.
    #[serde(default)]
    pub press_release: Option<bool>,
    /// Release homepage.
    #[serde(default)]
    pub link: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReleaseFields {
    /// True when the name is known.
    #[must_use]
    pub const fn is_sufficient(&self) -> bool {
        self.name.is_some()
    }
}

/// A statistical release grouping series published together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    id: ReleaseId,
    #[serde(flatten)]
    fields: ReleaseFields,
}

impl Release {
    /// Creates a handle from known fields without contacting FRED.
    #[must_use]
    pub const fn from_fields(id: ReleaseId, fields: ReleaseFields) -> Self {
        Self { id, fields }
    }

    /// Creates a handle, fetching the fields once if the name is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn hydrate(client: &FredClient, id: ReleaseId, fields: ReleaseFields) -> Result<Self> {
        if fields.is_sufficient() {
            return Ok(Self::from_fields(id, fields));
        }
        tracing::debug!(release_id = %id, "Hydrating release");
        Self::fetch(client, id)
    }

    /// Creates a handle from an identifier, fetching its fields.
    ///
    /// # Errors
    ///
    /// Returns an error if no such release exists.
    pub fn new(client: &FredClient, id: impl Into<ReleaseId>) -> Result<Self> {
        Self::hydrate(client, id.into(), ReleaseFields::default())
    }

    /// Same as [`Release::new`] with the current client of this thread.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NoCurrentClient`](fredtools_types::FredError::NoCurrentClient)
    /// if no client is registered, otherwise the errors of [`Release::new`].
    pub fn get(id: impl Into<ReleaseId>) -> Result<Self> {
        Self::new(&current_client()?, id)
    }

    /// Looks up a release by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`](fredtools_types::FredError::NotFound)
    /// if FRED returns no record.
    pub fn fetch(client: &FredClient, id: impl Into<ReleaseId>) -> Result<Self> {
        let id = id.into();
        let body = client.request("release", Params::new().with("release_id", id))?;
        let record = response::first_record(&body, "releases", "release", &id)?;
        Ok(Self::from_fields(id, response::decode(record)?))
    }

    pub(crate) fn from_record(client: &FredClient, record: &Value) -> Result<Self> {
        let id = response::int_id(record, &["id", "release_id"], "release")?;
        Self::hydrate(client, ReleaseId::new(id), response::decode(record)?)
    }

    pub(crate) fn from_records(client: &FredClient, body: &Value, key: &str) -> Result<Vec<Self>> {
        response::records(body, key)?
            .iter()
            .map(|record| Self::from_record(client, record))
            .collect()
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> ReleaseId {
        self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn fields(&self) -> &ReleaseFields {
        &self.fields
    }

    /// Returns the name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    /// Fetches a fresh copy of this release.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`](fredtools_types::FredError::NotFound)
    /// if the release no longer exists.
    pub fn info(&self, client: &FredClient) -> Result<Self> {
        Self::fetch(client, self.id)
    }

    /// Replaces the fields with a fresh copy. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Same as [`Release::info`].
    pub fn refresh(&mut self, client: &FredClient) -> Result<()> {
        self.fields = self.info(client)?.fields;
        Ok(())
    }

    fn params(&self) -> Params {
        Params::new().with("release_id", self.id)
    }

    /// All releases.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn all(client: &FredClient, options: &ListOptions) -> Result<Vec<Self>> {
        let body = client.request("releases", options.apply(Params::new()))?;
        Self::from_records(client, &body, "releases")
    }

    /// Publication dates of this release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a date is malformed.
    pub fn dates(&self, client: &FredClient, options: &DatesOptions) -> Result<Vec<NaiveDate>> {
        let body = client.request("release/dates", options.apply(self.params()))?;
        response::dates(&body, "release_dates")
    }

    /// Publication dates of every release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a date is malformed.
    pub fn all_dates(client: &FredClient, options: &DatesOptions) -> Result<Vec<NaiveDate>> {
        let body = client.request("releases/dates", options.apply(Params::new()))?;
        response::dates(&body, "release_dates")
    }

    /// Series published in this release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn series(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Series>> {
        let body = client.request("release/series", options.apply(self.params()))?;
        Series::from_records(client, &body, "seriess")
    }

    /// Sources of this release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record is malformed.
    pub fn sources(&self, client: &FredClient, realtime: &RealtimeWindow) -> Result<Vec<Source>> {
        let body = client.request("release/sources", realtime.apply(self.params()))?;
        response::records(&body, "sources")?
            .iter()
            .map(response::decode)
            .collect()
    }

    /// Tags of series in this release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn tags(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Tag>> {
        let body = client.request("release/tags", options.apply(self.params()))?;
        Tag::from_records(client, &body, "tags")
    }

    /// Tags related to the given tags within this release.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn related_tags(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Tag>> {
        let body = client.request("release/related_tags", options.apply(self.params()))?;
        Tag::from_records(client, &body, "tags")
    }

    /// The release table rooted at `options.element_id`, rebuilt into a tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be
    /// rebuilt, see [`ReleaseTable::parse`].
    pub fn table(&self, client: &FredClient, options: &TableOptions) -> Result<ReleaseTable> {
        let body = client.request("release/tables", options.apply(self.params()))?;
        ReleaseTable::parse(&body, Some(self.id))
    }
}

impl std::fmt::Display for Release {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fields.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "release {}", self.id),
        }
    }
}
