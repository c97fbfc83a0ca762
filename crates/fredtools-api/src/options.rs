//! Query options for entity operations.
//!
//! Every option is `None` (or empty) by default, in which case the
//! parameter is not sent and FRED applies its own default.

use chrono::{NaiveDate, NaiveDateTime};
use fredtools_client::Params;
use fredtools_types::{ElementId, TagGroup};

use crate::tag_names::{TagSelector, join_tag_names};

/// Timestamp format FRED expects for `start_time` and `end_time`.
pub const UPDATE_TIME_FORMAT: &str = "%Y%m%d%H%M";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the FRED parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Realtime (vintage) window of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealtimeWindow {
    /// First day of the window.
    pub start: Option<NaiveDate>,
    /// Last day of the window.
    pub end: Option<NaiveDate>,
}

impl RealtimeWindow {
    /// Creates a window with both ends set.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Creates a window for a single day.
    #[must_use]
    pub const fn on(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Appends `realtime_start` / `realtime_end` when set.
    #[must_use]
    pub fn apply(&self, params: Params) -> Params {
        params
            .with_opt("realtime_start", self.start)
            .with_opt("realtime_end", self.end)
    }
}

/// Filters shared by the list-returning operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Realtime window.
    pub realtime: RealtimeWindow,
    /// Maximum number of records.
    pub limit: Option<u32>,
    /// Number of records to skip.
    pub offset: Option<u32>,
    /// Attribute to order by, e.g. `"popularity"`.
    pub order_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Tags every result must carry.
    pub tag_names: Vec<TagSelector>,
    /// Tags no result may carry.
    pub exclude_tag_names: Vec<TagSelector>,
    /// Restricts tag results to one group.
    pub tag_group_id: Option<TagGroup>,
    /// Restricts tag results to names matching this text.
    pub tag_search_text: Option<String>,
}

impl ListOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the realtime window.
    #[must_use]
    pub const fn with_realtime(mut self, realtime: RealtimeWindow) -> Self {
        self.realtime = realtime;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the ordering attribute.
    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Requires the given tags.
    #[must_use]
    pub fn with_tag_names<T: Into<TagSelector>>(
        mut self,
        tags: impl IntoIterator<Item = T>,
    ) -> Self {
        self.tag_names = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Excludes the given tags.
    #[must_use]
    pub fn with_exclude_tag_names<T: Into<TagSelector>>(
        mut self,
        tags: impl IntoIterator<Item = T>,
    ) -> Self {
        self.exclude_tag_names = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts tag results to a group.
    #[must_use]
    pub const fn with_tag_group(mut self, group: TagGroup) -> Self {
        self.tag_group_id = Some(group);
        self
    }

    /// Restricts tag results by name.
    #[must_use]
    pub fn with_tag_search_text(mut self, text: impl Into<String>) -> Self {
        self.tag_search_text = Some(text.into());
        self
    }

    /// Returns true if included or excluded tags are set.
    #[must_use]
    pub fn has_tag_filter(&self) -> bool {
        join_tag_names(&self.tag_names).is_some()
            || join_tag_names(&self.exclude_tag_names).is_some()
    }

    /// Appends every set option.
    #[must_use]
    pub fn apply(&self, params: Params) -> Params {
        self.realtime
            .apply(params)
            .with_opt("limit", self.limit)
            .with_opt("offset", self.offset)
            .with_opt("order_by", self.order_by.as_deref())
            .with_opt("sort_order", self.sort_order)
            .with_opt("tag_names", join_tag_names(&self.tag_names))
            .with_opt("exclude_tag_names", join_tag_names(&self.exclude_tag_names))
            .with_opt("tag_group_id", self.tag_group_id)
            .with_opt("tag_search_text", self.tag_search_text.as_deref())
    }
}

/// How `series/search` interprets its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchType {
    /// Words in titles, units, frequency and tags.
    FullText,
    /// Series identifiers, `*` allowed as wildcard.
    SeriesId,
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullText => f.write_str("full_text"),
            Self::SeriesId => f.write_str("series_id"),
        }
    }
}

/// Options for `series/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Search mode.
    pub search_type: Option<SearchType>,
    /// Attribute to filter on: `frequency`, `units` or `seasonal_adjustment`.
    pub filter_variable: Option<String>,
    /// Value the filter attribute must have.
    pub filter_value: Option<String>,
    /// Shared list filters.
    pub list: ListOptions,
}

impl SearchOptions {
    /// Appends every set option.
    #[must_use]
    pub fn apply(&self, params: Params) -> Params {
        self.list
            .apply(params)
            .with_opt("search_type", self.search_type)
            .with_opt("filter_variable", self.filter_variable.as_deref())
            .with_opt("filter_value", self.filter_value.as_deref())
    }
}

/// Options for `series/observations`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationOptions {
    /// Realtime window.
    pub realtime: RealtimeWindow,
    /// First observation date.
    pub observation_start: Option<NaiveDate>,
    /// Last observation date.
    pub observation_end: Option<NaiveDate>,
    /// Data transformation, e.g. `"pch"`.
    pub units: Option<String>,
    /// Frequency to aggregate to, e.g. `"q"`.
    pub frequency: Option<String>,
    /// Aggregation used with `frequency`: `avg`, `sum` or `eop`.
    pub aggregation_method: Option<String>,
    /// Output type, 1 to 4.
    pub output_type: Option<u8>,
    /// Maximum number of observations.
    pub limit: Option<u32>,
    /// Number of observations to skip.
    pub offset: Option<u32>,
    /// Sort direction by date.
    pub sort_order: Option<SortOrder>,
}

impl ObservationOptions {
    /// Restricts the observation dates.
    #[must_use]
    pub const fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.observation_start = start;
        self.observation_end = end;
        self
    }

    /// Sets the units transformation.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Sets the target frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    /// Appends every set option.
    #[must_use]
    pub fn apply(&self, params: Params) -> Params {
        self.realtime
            .apply(params)
            .with_opt("observation_start", self.observation_start)
            .with_opt("observation_end", self.observation_end)
            .with_opt("units", self.units.as_deref())
            .with_opt("frequency", self.frequency.as_deref())
            .with_opt("aggregation_method", self.aggregation_method.as_deref())
            .with_opt("output_type", self.output_type)
            .with_opt("limit", self.limit)
            .with_opt("offset", self.offset)
            .with_opt("sort_order", self.sort_order)
    }
}

/// Options for `series/updates`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatesOptions {
    /// Realtime window.
    pub realtime: RealtimeWindow,
    /// `macro`, `regional` or `all`.
    pub filter_value: Option<String>,
    /// Earliest update time.
    pub start_time: Option<NaiveDateTime>,
    /// Latest update time.
    pub end_time: Option<NaiveDateTime>,
    /// Maximum number of records.
    pub limit: Option<u32>,
    /// Number of records to skip.
    pub offset: Option<u32>,
}

impl UpdatesOptions {
    /// Appends every set option.
    #[must_use]
    pub fn apply(&self, params: Params) -> Params {
        let time = |t: Option<NaiveDateTime>| t.map(|t| t.format(UPDATE_TIME_FORMAT).to_string());
        self.realtime
            .apply(params)
            .with_opt("filter_value", self.filter_value.as_deref())
            .with_opt("start_time", time(self.start_time))
            .with_opt("end_time", time(self.end_time))
            .with_opt("limit", self.limit)
            .with_opt("offset", self.offset)
    }
}

/// Options for `release/dates` and `releases/dates`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatesOptions {
    /// Shared list filters.
    pub list: ListOptions,
    /// Also list announced dates that have no data yet.
    pub include_release_dates_with_no_data: bool,
}

impl DatesOptions {
    /// Appends every set option.
    #[must_use]
    pub fn apply(&self, params: Params) -> Params {
        self.list.apply(params).with_opt(
            "include_release_dates_with_no_data",
            self.include_release_dates_with_no_data.then_some("true"),
        )
    }
}

/// Options for `release/tables`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Root element of the requested table; the release root when unset.
    pub element_id: Option<ElementId>,
    /// Include observation values for series lines.
    pub include_observation_values: bool,
    /// Date of the observation values.
    pub observation_date: Option<NaiveDate>,
}

impl TableOptions {
    /// Requests the table rooted at `element_id`.
    #[must_use]
    pub const fn at(element_id: ElementId) -> Self {
        Self {
            element_id: Some(element_id),
            include_observation_values: false,
            observation_date: None,
        }
    }

    /// Requests observation values.
    #[must_use]
    pub const fn with_observation_values(mut self, date: Option<NaiveDate>) -> Self {
        self.include_observation_values = true;
        self.observation_date = date;
        self
    }

    /// Appends every set option. The values flag is sent only when requested.
    #[must_use]
    pub fn apply(&self, params: Params) -> Params {
        params
            .with_opt("element_id", self.element_id)
            .with_opt(
                "include_observation_values",
                self.include_observation_values.then_some("true"),
            )
            .with_opt("observation_date", self.observation_date)
    }
}
