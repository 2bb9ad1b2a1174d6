//! Wire records returned by the API

use serde::{Deserialize, Serialize};
use std::fmt;

/// A translation service offered by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A locale (language and optional country)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub id: u64,
    pub name: String,
    pub language: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Role of a file within a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileType {
    Source,
    Target,
    #[serde(other)]
    Other,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Source => f.pad("source"),
            FileType::Target => f.pad("target"),
            FileType::Other => f.pad("other"),
        }
    }
}

/// A document stored by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// One page of a paginated collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page number
    pub number: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Paged response envelope as sent on the wire
#[derive(Debug, Deserialize)]
pub(crate) struct RawPage<R> {
    #[serde(default = "Vec::new")]
    pub content: Vec<R>,
    pub page: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

impl<R> RawPage<R> {
    /// Convert the records, keeping the paging metadata
    pub fn map<T>(self, f: impl FnMut(R) -> T) -> Page<T> {
        Page {
            items: self.content.into_iter().map(f).collect(),
            number: self.page.number,
            size: self.page.size,
            total_pages: self.page.total_pages,
            total_elements: self.page.total_elements,
        }
    }
}
