//! File collections, global and scoped to a job

use async_trait::async_trait;

use crate::business::collections::PaginatedCollection;
use crate::core::client::Client;
use crate::core::errors::Result;
use crate::core::models::{File, FileType};

/// Listing helpers shared by every collection of files
#[async_trait]
pub trait BaseFileCollection: PaginatedCollection<Record = File, Item = File> {
    /// All files of the given type, across every page
    async fn of_type(&self, file_type: FileType) -> Result<Vec<File>> {
        let files = self.all().await?;
        Ok(files
            .into_iter()
            .filter(|f| f.file_type == file_type)
            .collect())
    }
}

/// Every file visible to the account
#[derive(Debug, Clone, PartialEq)]
pub struct FileCollection {
    client: Client,
    per_page: u32,
}

impl FileCollection {
    pub fn new(client: Client) -> Self {
        let per_page = client.per_page();
        Self { client, per_page }
    }
}

impl PaginatedCollection for FileCollection {
    type Record = File;
    type Item = File;

    fn client(&self) -> &Client {
        &self.client
    }

    fn url_path(&self) -> String {
        "files".to_string()
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

    fn from_record(&self, record: File) -> File {
        record
    }
}

impl BaseFileCollection for FileCollection {}

/// Files attached to one job.
///
/// Keeps the owning job's resource path rather than the job itself, so a copy
/// made with [`PaginatedCollection::with_per_page`] stays scoped to the same
/// job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFileCollection {
    client: Client,
    job_path: String,
    per_page: u32,
}

impl JobFileCollection {
    pub fn new(client: Client, job_path: impl Into<String>, per_page: u32) -> Self {
        Self {
            client,
            job_path: job_path.into(),
            per_page,
        }
    }

    pub fn job_path(&self) -> &str {
        &self.job_path
    }
}

impl PaginatedCollection for JobFileCollection {
    type Record = File;
    type Item = File;

    fn client(&self) -> &Client {
        &self.client
    }

    fn url_path(&self) -> String {
        format!("{}/files", self.job_path)
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }

    fn with_per_page(&self, per_page: u32) -> Self {
        Self {
            client: self.client.clone(),
            job_path: self.job_path.clone(),
            per_page,
        }
    }

    fn from_record(&self, record: File) -> File {
        record
    }
}

impl BaseFileCollection for JobFileCollection {}
