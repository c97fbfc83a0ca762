//! Series handle.

use chrono::NaiveDate;
use fredtools_client::{FredClient, Params, current_client};
use fredtools_types::{
    FredError, Observation, Observations, Result, SeriesId, parse_date, parse_value,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response::{self, lenient_int};
use crate::{
    Category, ListOptions, ObservationOptions, RealtimeWindow, Release, SearchOptions, Tag,
    UpdatesOptions,
};

/// Descriptive fields of a series. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesFields {
    /// Start of the realtime window the record is valid for.
    #[serde(default)]
    pub realtime_start: Option<NaiveDate>,
    /// End of the realtime window the record is valid for.
    #[serde(default)]
    pub realtime_end: Option<NaiveDate>,
    /// Series title.
    #[serde(default)]
    pub title: Option<String>,
    /// First observation date.
    #[serde(default)]
    pub observation_start: Option<NaiveDate>,
    /// Last observation date.
    #[serde(default)]
    pub observation_end: Option<NaiveDate>,
    /// Frequency, e.g. `"Quarterly"`.
    #[serde(default)]
    pub frequency: Option<String>,
    /// Short frequency, e.g. `"Q"`.
    #[serde(default)]
    pub frequency_short: Option<String>,
    /// Units.
    #[serde(default)]
    pub units: Option<String>,
    /// Short units.
    #[serde(default)]
    pub units_short: Option<String>,
    /// Seasonal adjustment.
    #[serde(default)]
    pub seasonal_adjustment: Option<String>,
    /// Short seasonal adjustment, e.g. `"SAAR"`.
    #[serde(default)]
    pub seasonal_adjustment_short: Option<String>,
    /// Last update timestamp as sent by FRED.
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Popularity rank.
    #[serde(default, deserialize_with = "lenient_int")]
    pub popularity: Option<i64>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl SeriesFields {
    /// True when any of the realtime window, title or observation start is
    /// known.
    #[must_use]
    pub const fn is_sufficient(&self) -> bool {
        self.realtime_start.is_some()
            || self.realtime_end.is_some()
            || self.title.is_some()
            || self.observation_start.is_some()
    }
}

/// An economic data series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    id: SeriesId,
    #[serde(flatten)]
    fields: SeriesFields,
}

impl Series {
    /// Creates a handle from known fields without contacting FRED.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::MissingIdentifier`] if `id` is empty.
    pub fn from_fields(id: impl Into<SeriesId>, fields: SeriesFields) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(FredError::MissingIdentifier { kind: "series" });
        }
        Ok(Self { id, fields })
    }

    /// Creates a handle, fetching the fields once if they are insufficient.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is empty or the lookup fails.
    pub fn hydrate(
        client: &FredClient,
        id: impl Into<SeriesId>,
        fields: SeriesFields,
    ) -> Result<Self> {
        let series = Self::from_fields(id, fields)?;
        if series.fields.is_sufficient() {
            return Ok(series);
        }
        tracing::debug!(series_id = %series.id, "Hydrating series");
        Self::fetch(client, series.id)
    }

    /// Creates a handle from an identifier, fetching its fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is empty or no such series exists.
    pub fn new(client: &FredClient, id: impl Into<SeriesId>) -> Result<Self> {
        Self::hydrate(client, id, SeriesFields::default())
    }

    /// Same as [`Series::new`] with the current client of this thread.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NoCurrentClient`] if no client is registered,
    /// otherwise the errors of [`Series::new`].
    pub fn get(id: impl Into<SeriesId>) -> Result<Self> {
        Self::new(&current_client()?, id)
    }

    /// Looks up a series by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`] if FRED returns no record.
    pub fn fetch(client: &FredClient, id: impl Into<SeriesId>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(FredError::MissingIdentifier { kind: "series" });
        }
        let body = client.request("series", Params::new().with("series_id", &id))?;
        let record = response::first_record(&body, "seriess", "series", &id)?;
        Self::from_fields(id, response::decode(record)?)
    }

    /// Builds a handle from a response record, hydrating it if needed.
    pub(crate) fn from_record(client: &FredClient, record: &Value) -> Result<Self> {
        let id = response::text_id(record, &["id", "series_id"], "series")?;
        Self::hydrate(client, id, response::decode(record)?)
    }

    pub(crate) fn from_records(client: &FredClient, body: &Value, key: &str) -> Result<Vec<Self>> {
        response::records(body, key)?
            .iter()
            .map(|record| Self::from_record(client, record))
            .collect()
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &SeriesId {
        &self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn fields(&self) -> &SeriesFields {
        &self.fields
    }

    /// Returns the title, if known.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.fields.title.as_deref()
    }

    /// Fetches a fresh copy of this series.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`] if the series no longer exists.
    pub fn info(&self, client: &FredClient) -> Result<Self> {
        Self::fetch(client, self.id.clone())
    }

    /// Replaces the fields with a fresh copy. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Same as [`Series::info`].
    pub fn refresh(&mut self, client: &FredClient) -> Result<()> {
        self.fields = self.info(client)?.fields;
        Ok(())
    }

    fn params(&self) -> Params {
        Params::new().with("series_id", &self.id)
    }

    /// Categories the series belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn categories(
        &self,
        client: &FredClient,
        realtime: &RealtimeWindow,
    ) -> Result<Vec<Category>> {
        let body = client.request("series/categories", realtime.apply(self.params()))?;
        Category::from_records(client, &body, "categories")
    }

    /// Observations of the series.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, or
    /// [`FredError::Conversion`] for a malformed date or value.
    pub fn observations(
        &self,
        client: &FredClient,
        options: &ObservationOptions,
    ) -> Result<Observations> {
        let body = client.request("series/observations", options.apply(self.params()))?;
        response::records(&body, "observations")?
            .iter()
            .map(parse_observation)
            .collect()
    }

    /// The release the series belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`] if FRED returns no release.
    pub fn release(&self, client: &FredClient, realtime: &RealtimeWindow) -> Result<Release> {
        let body = client.request("series/release", realtime.apply(self.params()))?;
        let record = response::first_record(&body, "releases", "release for series", &self.id)?;
        Release::from_record(client, record)
    }

    /// Tags attached to the series.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn tags(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Tag>> {
        let body = client.request("series/tags", options.apply(self.params()))?;
        Tag::from_records(client, &body, "tags")
    }

    /// Dates on which the series was revised or released.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a date is malformed.
    pub fn vintage_dates(
        &self,
        client: &FredClient,
        options: &ListOptions,
    ) -> Result<Vec<NaiveDate>> {
        let body = client.request("series/vintagedates", options.apply(self.params()))?;
        response::dates(&body, "vintage_dates")
    }

    /// Series matching a search text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn search(client: &FredClient, text: &str, options: &SearchOptions) -> Result<Vec<Self>> {
        let body = client.request(
            "series/search",
            options.apply(Params::new().with("search_text", text)),
        )?;
        Self::from_records(client, &body, "seriess")
    }

    /// Tags of the series matching a search text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn search_tags(
        client: &FredClient,
        series_search_text: &str,
        options: &ListOptions,
    ) -> Result<Vec<Tag>> {
        let body = client.request(
            "series/search/tags",
            options.apply(Params::new().with("series_search_text", series_search_text)),
        )?;
        Tag::from_records(client, &body, "tags")
    }

    /// Tags related to the given tags among series matching a search text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn search_related_tags(
        client: &FredClient,
        series_search_text: &str,
        options: &ListOptions,
    ) -> Result<Vec<Tag>> {
        let body = client.request(
            "series/search/related_tags",
            options.apply(Params::new().with("series_search_text", series_search_text)),
        )?;
        Tag::from_records(client, &body, "tags")
    }

    /// Recently updated series.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn updates(client: &FredClient, options: &UpdatesOptions) -> Result<Vec<Self>> {
        let body = client.request("series/updates", options.apply(Params::new()))?;
        Self::from_records(client, &body, "seriess")
    }
}

fn parse_observation(record: &Value) -> Result<Observation> {
    let date = |key: &str| parse_date(key, response::required_str(record, key)?);
    Ok(Observation::new(
        date("realtime_start")?,
        date("realtime_end")?,
        date("date")?,
        parse_value(response::required_str(record, "value")?)?,
    ))
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fields.title {
            Some(title) => write!(f, "{} ({})", self.id, title),
            None => write!(f, "{}", self.id),
        }
    }
}
