//! Category handle.

use fredtools_client::{FredClient, Params, current_client};
use fredtools_types::{CategoryId, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response::{self, lenient_int};
use crate::{ListOptions, RealtimeWindow, Series, Tag};

/// Descriptive fields of a category. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    /// Category name.
    #[serde(default)]
    pub name: Option<String>,
    /// Parent category. The root category has parent `0`.
    #[serde(default, deserialize_with = "lenient_int")]
    pub parent_id: Option<i64>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl CategoryFields {
    /// True when both name and parent are known.
    #[must_use]
    pub const fn is_sufficient(&self) -> bool {
        self.name.is_some() && self.parent_id.is_some()
    }
}

/// A node of the FRED category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    id: CategoryId,
    #[serde(flatten)]
    fields: CategoryFields,
}

impl Category {
    /// Creates a handle from known fields without contacting FRED.
    #[must_use]
    pub const fn from_fields(id: CategoryId, fields: CategoryFields) -> Self {
        Self { id, fields }
    }

    /// Creates a handle, fetching the fields once if name or parent is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn hydrate(client: &FredClient, id: CategoryId, fields: CategoryFields) -> Result<Self> {
        if fields.is_sufficient() {
            return Ok(Self::from_fields(id, fields));
        }
        tracing::debug!(category_id = %id, "Hydrating category");
        Self::fetch(client, id)
    }

    /// Creates a handle from an identifier, fetching its fields.
    ///
    /// # Errors
    ///
    /// Returns an error if no such category exists.
    pub fn new(client: &FredClient, id: impl Into<CategoryId>) -> Result<Self> {
        Self::hydrate(client, id.into(), CategoryFields::default())
    }

    /// Same as [`Category::new`] with the current client of this thread.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NoCurrentClient`](fredtools_types::FredError::NoCurrentClient)
    /// if no client is registered, otherwise the errors of [`Category::new`].
    pub fn get(id: impl Into<CategoryId>) -> Result<Self> {
        Self::new(&current_client()?, id)
    }

    /// The root of the category tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn root(client: &FredClient) -> Result<Self> {
        Self::new(client, CategoryId::new(0))
    }

    /// Looks up a category by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`](fredtools_types::FredError::NotFound)
    /// if FRED returns no record.
    pub fn fetch(client: &FredClient, id: impl Into<CategoryId>) -> Result<Self> {
        let id = id.into();
        let body = client.request("category", Params::new().with("category_id", id))?;
        let record = response::first_record(&body, "categories", "category", &id)?;
        Ok(Self::from_fields(id, response::decode(record)?))
    }

    pub(crate) fn from_record(client: &FredClient, record: &Value) -> Result<Self> {
        let id = response::int_id(record, &["id", "category_id"], "category")?;
        Self::hydrate(client, CategoryId::new(id), response::decode(record)?)
    }

    pub(crate) fn from_records(client: &FredClient, body: &Value, key: &str) -> Result<Vec<Self>> {
        response::records(body, key)?
            .iter()
            .map(|record| Self::from_record(client, record))
            .collect()
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn fields(&self) -> &CategoryFields {
        &self.fields
    }

    /// Returns the name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    /// Returns the parent identifier, if known.
    #[must_use]
    pub fn parent_id(&self) -> Option<CategoryId> {
        self.fields.parent_id.map(CategoryId::new)
    }

    /// Fetches a fresh copy of this category.
    ///
    /// # Errors
    ///
    /// Returns [`FredError::NotFound`](fredtools_types::FredError::NotFound)
    /// if the category no longer exists.
    pub fn info(&self, client: &FredClient) -> Result<Self> {
        Self::fetch(client, self.id)
    }

    /// Replaces the fields with a fresh copy. On error nothing changes.
    ///
    /// # Errors
    ///
    /// Same as [`Category::info`].
    pub fn refresh(&mut self, client: &FredClient) -> Result<()> {
        self.fields = self.info(client)?.fields;
        Ok(())
    }

    fn params(&self) -> Params {
        Params::new().with("category_id", self.id)
    }

    /// The parent category. The root has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn parent(&self, client: &FredClient) -> Result<Option<Self>> {
        match self.parent_id() {
            Some(parent) if parent != self.id => Self::new(client, parent).map(Some),
            _ => Ok(None),
        }
    }

    /// Direct children of this category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn children(&self, client: &FredClient, realtime: &RealtimeWindow) -> Result<Vec<Self>> {
        let body = client.request("category/children", realtime.apply(self.params()))?;
        Self::from_records(client, &body, "categories")
    }

    /// Categories related to this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn related(&self, client: &FredClient, realtime: &RealtimeWindow) -> Result<Vec<Self>> {
        let body = client.request("category/related", realtime.apply(self.params()))?;
        Self::from_records(client, &body, "categories")
    }

    /// Series in this category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn series(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Series>> {
        let body = client.request("category/series", options.apply(self.params()))?;
        Series::from_records(client, &body, "seriess")
    }

    /// Tags of series in this category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn tags(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Tag>> {
        let body = client.request("category/tags", options.apply(self.params()))?;
        Tag::from_records(client, &body, "tags")
    }

    /// Tags related to the given tags within this category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or a record fails.
    pub fn related_tags(&self, client: &FredClient, options: &ListOptions) -> Result<Vec<Tag>> {
        let body = client.request("category/related_tags", options.apply(self.params()))?;
        Tag::from_records(client, &body, "tags")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fields.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "category {}", self.id),
        }
    }
}
