//! Book records and the payloads that create or change them.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slug::slugify;
use uuid::Uuid;

/// A stored catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a fresh record from a create payload.
    pub fn from_new(new: NewBook) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut slug = match new.slug {
            Some(slug) if !slug.trim().is_empty() => slugify(&slug),
            _ => slugify(&new.title),
        };
        // Titles with nothing transliterable still need a unique slug
        if slug.is_empty() {
            slug = id.simple().to_string();
        }
        Self {
            id,
            title: new.title.trim().to_string(),
            slug,
            author: new.author.trim().to_string(),
            genres: new.genres,
            year: new.year,
            description: new.description,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the fields present in `patch` and bumps `updated_at`.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(slug) = patch.slug {
            self.slug = slugify(&slug);
        }
        if let Some(author) = patch.author {
            self.author = author.trim().to_string();
        }
        if let Some(genres) = patch.genres {
            self.genres = genres;
        }
        if let Some(year) = patch.year {
            self.year = Some(year);
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            author: self.author.clone(),
            views: self.views,
        }
    }
}

/// Create payload. Missing fields deserialize to empty values so validation,
/// not the JSON extractor, decides what is acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub slug: Option<String>,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    pub description: String,
}

impl NewBook {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("title cannot be empty".to_string());
        }
        if self.author.trim().is_empty() {
            return Some("author cannot be empty".to_string());
        }
        if self
            .slug
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty() && slugify(s).is_empty())
        {
            return Some("slug must contain at least one letter or digit".to_string());
        }
        None
    }
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub author: Option<String>,
    pub genres: Option<Vec<String>>,
    pub year: Option<i32>,
    pub description: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.author.is_none()
            && self.genres.is_none()
            && self.year.is_none()
            && self.description.is_none()
    }

    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.is_empty() {
            return Some("update payload is empty".to_string());
        }
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Some("title cannot be empty".to_string());
        }
        if self.author.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Some("author cannot be empty".to_string());
        }
        if self.slug.as_deref().is_some_and(|s| slugify(s).is_empty()) {
            return Some("slug must contain at least one letter or digit".to_string());
        }
        None
    }
}

/// Compact projection used by the most-viewed summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub views: u64,
}

/// Level of detail requested from the most-viewed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewDetail {
    Summary,
    Full,
}

impl FromStr for ViewDetail {
    type Err = String;

    /// Accepts exactly `summary` or `full`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(Self::Summary),
            "full" => Ok(Self::Full),
            other => Err(format!(
                "detail must be 'summary' or 'full', got '{}'",
                other
            )),
        }
    }
}

/// Result of the most-viewed query, shaped by the requested detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MostViewed {
    Summary(Vec<BookSummary>),
    Full(Vec<Book>),
}

impl MostViewed {
    pub fn len(&self) -> usize {
        match self {
            MostViewed::Summary(books) => books.len(),
            MostViewed::Full(books) => books.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distinct values of the groupable fields across the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedFields {
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub years: Vec<i32>,
}
