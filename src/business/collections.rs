//! Paginated views over remote resources

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::client::Client;
use crate::core::errors::{Lingo24Error, Result};
use crate::core::models::{Locale, Page, RawPage, Service};

/// A collection of resources living under one URL path.
///
/// Implementors supply the path, page size and how a wire record becomes an
/// item; lookup and paging come for free.
#[async_trait]
pub trait PaginatedCollection: Send + Sync {
    /// Record as decoded from the wire
    type Record: DeserializeOwned + Send;
    /// Item handed to callers
    type Item: Send;

    fn client(&self) -> &Client;

    fn url_path(&self) -> String;

    fn per_page(&self) -> u32;

    /// Same collection and scope with a different page size
    fn with_per_page(&self, per_page: u32) -> Self
    where
        Self: Sized;

    fn from_record(&self, record: Self::Record) -> Self::Item;

    fn item_url_path(&self, id: u64) -> String {
        format!("{}/{}", self.url_path(), id)
    }

    /// Fetch one item by id
    async fn get(&self, id: u64) -> Result<Self::Item> {
        let path = self.item_url_path(id);
        let value = self.client().api_get_json(&path).await?;
        let record: Self::Record = serde_json::from_value(value)
            .map_err(|e| Lingo24Error::invalid_response(format!("{}: {}", path, e)))?;
        Ok(self.from_record(record))
    }

    /// Fetch one page, numbered from zero
    async fn page(&self, number: u32) -> Result<Page<Self::Item>> {
        let path = self.url_path();
        let query = [
            ("page", number.to_string()),
            ("size", self.per_page().to_string()),
        ];
        debug!("Fetching page {} of {}", number, path);

        let value = self.client().api_get_json_with_query(&path, &query).await?;
        let raw: RawPage<Self::Record> = serde_json::from_value(value)
            .map_err(|e| Lingo24Error::invalid_response(format!("{}: {}", path, e)))?;
        Ok(raw.map(|record| self.from_record(record)))
    }

    /// Walk every page and collect all items.
    ///
    /// Stops on an empty page or once the requested page number reaches the
    /// reported page count, whatever page number the server echoes back.
    async fn all(&self) -> Result<Vec<Self::Item>> {
        let mut items = Vec::new();
        let mut number: u32 = 0;

        loop {
            let page = self.page(number).await?;
            if page.is_empty() {
                break;
            }
            let total_pages = page.total_pages;
            items.extend(page.items);

            match number.checked_add(1) {
                Some(next) if next < total_pages => number = next,
                _ => break,
            }
        }

        debug!("Fetched {} items from {}", items.len(), self.url_path());
        Ok(items)
    }
}

/// Translation services
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCollection {
    client: Client,
    per_page: u32,
}

impl ServiceCollection {
    pub fn new(client: Client) -> Self {
        let per_page = client.per_page();
        Self { client, per_page }
    }
}

impl PaginatedCollection for ServiceCollection {
    type Record = Service;
    type Item = Service;

    fn client(&self) -> &Client {
        &self.client
    }

    fn url_path(&self) -> String {
        "services".to_string()
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }

    fn with_per_page(&self, per_page: u32) -> Self {
        Self {
            client: self.client.clone(),
            per_page,
        }
    }

    fn from_record(&self, record: Service) -> Service {
        record
    }
}

/// Supported locales
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCollection {
    client: Client,
    per_page: u32,
}

impl LocaleCollection {
    pub fn new(client: Client) -> Self {
        let per_page = client.per_page();
        Self { client, per_page }
    }
}

impl PaginatedCollection for LocaleCollection {
    type Record = Locale;
    type Item = Locale;

    fn client(&self) -> &Client {
        &self.client
    }

    fn url_path(&self) -> String {
        "locales".to_string()
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }

    fn with_per_page(&self, per_page: u32) -> Self {
        Self {
            client: self.client.clone(),
            per_page,
        }
    }

    fn from_record(&self, record: Locale) -> Locale {
        record
    }
}
