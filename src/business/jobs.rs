//! Jobs and their lazily resolved relations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use crate::business::collections::PaginatedCollection;
use crate::business::files::JobFileCollection;
use crate::business::metrics::Metric;
use crate::business::prices::{parse_amount, JobPrice, Price};
use crate::core::client::Client;
use crate::core::errors::{Lingo24Error, Result};
use crate::core::models::{File, Locale, Service};

/// Job as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: u64,
    #[serde(rename = "jobStatus")]
    pub status: String,
    pub service_id: u64,
    pub source_locale_id: u64,
    pub target_locale_id: u64,
    pub source_file_id: u64,
    #[serde(default)]
    pub target_file_id: Option<u64>,
}

/// Jobs of one project
#[derive(Debug, Clone, PartialEq)]
pub struct JobCollection {
    client: Client,
    project_id: u64,
    per_page: u32,
}

impl JobCollection {
    pub fn new(client: Client, project_id: u64) -> Self {
        let per_page = client.per_page();
        Self {
            client,
            project_id,
            per_page,
        }
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }
}

impl PaginatedCollection for JobCollection {
    type Record = JobRecord;
    type Item = Job;

    fn client(&self) -> &Client {
        &self.client
    }

    fn url_path(&self) -> String {
        format!("projects/{}/jobs", self.project_id)
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }

    fn with_per_page(&self, per_page: u32) -> Self {
        Self {
            client: self.client.clone(),
            project_id: self.project_id,
            per_page,
        }
    }

    fn from_record(&self, record: JobRecord) -> Job {
        Job::new(self.clone(), record)
    }
}

/// A single translation job.
///
/// Relations (service, locales, files, price, metrics) are fetched on every
/// call; nothing beyond the ids set at construction is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    collection: JobCollection,
    pub id: u64,
    pub status: String,
    pub service_id: u64,
    pub source_locale_id: u64,
    pub target_locale_id: u64,
    pub source_file_id: u64,
    pub target_file_id: Option<u64>,
    files: JobFileCollection,
}

/// Price endpoint body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceResponse {
    currency_code: String,
    total_wo_vat_w_discount: serde_json::Value,
    total_w_vat_w_discount: serde_json::Value,
    total_wo_vat_wo_discount: serde_json::Value,
    total_w_vat_wo_discount: serde_json::Value,
}

/// Metrics endpoint body
#[derive(Debug, Deserialize)]
struct MetricsResponse {
    #[serde(default)]
    values: BTreeMap<String, serde_json::Value>,
}

impl Job {
    pub fn new(collection: JobCollection, record: JobRecord) -> Self {
        let job_path = collection.item_url_path(record.id);
        let files = JobFileCollection::new(
            collection.client().clone(),
            job_path,
            collection.client().per_page(),
        );

        Self {
            collection,
            id: record.id,
            status: record.status,
            service_id: record.service_id,
            source_locale_id: record.source_locale_id,
            target_locale_id: record.target_locale_id,
            source_file_id: record.source_file_id,
            target_file_id: record.target_file_id,
            files,
        }
    }

    pub fn url_path(&self) -> String {
        self.collection.item_url_path(self.id)
    }

    pub fn client(&self) -> &Client {
        self.collection.client()
    }

    pub fn collection(&self) -> &JobCollection {
        &self.collection
    }

    /// Files attached to this job
    pub fn files(&self) -> &JobFileCollection {
        &self.files
    }

    pub async fn service(&self) -> Result<Service> {
        self.client().services().get(self.service_id).await
    }

    pub async fn source_locale(&self) -> Result<Locale> {
        self.client().locales().get(self.source_locale_id).await
    }

    pub async fn target_locale(&self) -> Result<Locale> {
        self.client().locales().get(self.target_locale_id).await
    }

    pub async fn source_file(&self) -> Result<File> {
        self.client().files().get(self.source_file_id).await
    }

    /// `None` when the job has no target file yet; no request is made then
    pub async fn target_file(&self) -> Result<Option<File>> {
        match self.target_file_id {
            Some(id) => self.client().files().get(id).await.map(Some),
            None => Ok(None),
        }
    }

    /// Pricing for this job, or `None` while the API has none available
    pub async fn price(&self) -> Result<Option<JobPrice>> {
        let path = format!("{}/price", self.url_path());
        debug!("Fetching price for job {}", self.id);

        let value = match self.client().api_get_json(&path).await {
            Ok(value) => value,
            Err(e) if e.is_not_found() => {
                debug!("No price available for job {}", self.id);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let response: PriceResponse = serde_json::from_value(value)
            .map_err(|e| Lingo24Error::invalid_response(format!("price: {}", e)))?;

        let with_discount = Price::new(
            response.currency_code.clone(),
            parse_amount(&response.total_wo_vat_w_discount)?,
            parse_amount(&response.total_w_vat_w_discount)?,
        );
        let without_discount = Price::new(
            response.currency_code,
            parse_amount(&response.total_wo_vat_wo_discount)?,
            parse_amount(&response.total_w_vat_wo_discount)?,
        );

        Ok(Some(JobPrice::new(with_discount, without_discount)))
    }

    /// Metrics keyed by the name the API reports them under; empty while
    /// the API has none available
    pub async fn metrics(&self) -> Result<BTreeMap<String, Metric>> {
        let path = format!("{}/metrics", self.url_path());
        debug!("Fetching metrics for job {}", self.id);

        let value = match self.client().api_get_json(&path).await {
            Ok(value) => value,
            Err(e) if e.is_not_found() => {
                debug!("No metrics available for job {}", self.id);
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let response: MetricsResponse = serde_json::from_value(value)
            .map_err(|e| Lingo24Error::invalid_response(format!("metrics: {}", e)))?;

        let mut metrics = BTreeMap::new();
        for (key, data) in response.values {
            let metric: Metric = serde_json::from_value(data).map_err(|e| {
                Lingo24Error::invalid_response(format!("metric {:?}: {}", key, e))
            })?;
            metrics.insert(key, metric);
        }

        Ok(metrics)
    }

    /// Replace every field with a freshly fetched copy of this job
    pub async fn refresh(&mut self) -> Result<()> {
        let fresh = self.collection.get(self.id).await?;
        *self = fresh;
        Ok(())
    }

    /// Delete the job remotely. The local value is stale afterwards.
    pub async fn delete(&self) -> Result<()> {
        self.client().api_delete(&self.url_path()).await?;
        info!("Deleted job {}", self.id);
        Ok(())
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::tests::test_client;
    use assert_json_diff::assert_json_eq;
    use mockito::{Matcher, Server, ServerGuard};
    use rust_decimal::Decimal;
    use serde_json::json;

    const JOB_PATH: &str = "/projects/1/jobs/42";

    fn record(target_file_id: Option<u64>) -> JobRecord {
        JobRecord {
            id: 42,
            status: "QUOTED".to_string(),
            service_id: 3,
            source_locale_id: 10,
            target_locale_id: 20,
            source_file_id: 100,
            target_file_id,
        }
    }

    fn job(server: &ServerGuard, target_file_id: Option<u64>) -> Job {
        Job::new(test_client(server).jobs(1), record(target_file_id))
    }

    #[test]
    fn test_record_wire_shape() {
        let wire = json!({
            "id": 42,
            "projectId": 1,
            "jobStatus": "QUOTED",
            "serviceId": 3,
            "sourceLocaleId": 10,
            "targetLocaleId": 20,
            "sourceFileId": 100,
            "targetFileId": null
        });
        let parsed: JobRecord = serde_json::from_value(wire).unwrap();
        assert_eq!(parsed, record(None));

        assert_json_eq!(
            serde_json::to_value(record(Some(7))).unwrap(),
            json!({
                "id": 42,
                "jobStatus": "QUOTED",
                "serviceId": 3,
                "sourceLocaleId": 10,
                "targetLocaleId": 20,
                "sourceFileId": 100,
                "targetFileId": 7
            })
        );
    }

    #[tokio::test]
    async fn test_paths() {
        let server = Server::new_async().await;
        let job = job(&server, None);
        assert_eq!(job.url_path(), "projects/1/jobs/42");
        assert_eq!(job.files().url_path(), "projects/1/jobs/42/files");
        assert_eq!(job.files().per_page(), job.client().per_page());
        assert_eq!(job.to_string(), "Job 42");
    }

    #[tokio::test]
    async fn test_price() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", format!("{}/price", JOB_PATH).as_str())
            .with_status(200)
            .with_body(
                r#"{
                    "currencyCode": "GBP",
                    "totalWoVatWDiscount": "90.005",
                    "totalWVatWDiscount": 108.0,
                    "totalWoVatWoDiscount": 100,
                    "totalWVatWoDiscount": "120.00"
                }"#,
            )
            .create_async()
            .await;

        let price = job(&server, None).price().await.unwrap().unwrap();
        assert_eq!(
            price.total_with_discount,
            Price::new("GBP", Decimal::new(9001, 2), Decimal::new(10800, 2))
        );
        assert_eq!(price.total_without_discount.formatted_net(), "£100.00");
        assert_eq!(price.total_without_discount.formatted_tax(), "£20.00");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_price_not_available() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", format!("{}/price", JOB_PATH).as_str())
            .with_status(404)
            .create_async()
            .await;

        assert_eq!(job(&server, None).price().await.unwrap(), None);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_price_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", format!("{}/price", JOB_PATH).as_str())
            .with_status(500)
            .with_body("pricing engine down")
            .create_async()
            .await;

        let err = job(&server, None).price().await.unwrap_err();
        match err {
            Lingo24Error::ApiError(cause) => {
                assert_eq!(cause.status(), Some(500));
                assert!(cause.to_string().contains("pricing engine down"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_price_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", format!("{}/price", JOB_PATH).as_str())
            .with_status(200)
            .with_body(r#"{"currencyCode": "GBP"}"#)
            .create_async()
            .await;

        let err = job(&server, None).price().await.unwrap_err();
        assert!(matches!(err, Lingo24Error::InvalidResponseError { .. }));
    }

    #[tokio::test]
    async fn test_price_non_json_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", format!("{}/price", JOB_PATH).as_str())
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = job(&server, None).price().await.unwrap_err();
        assert!(matches!(err, Lingo24Error::InvalidResponseError { .. }));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_metrics_non_json_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", format!("{}/metrics", JOB_PATH).as_str())
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = job(&server, None).metrics().await.unwrap_err();
        assert!(matches!(err, Lingo24Error::InvalidResponseError { .. }));
    }

    #[tokio::test]
    async fn test_metrics() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", format!("{}/metrics", JOB_PATH).as_str())
            .with_status(200)
            .with_body(
                r#"{"values": {
                    "NO_MATCH": {"WHITE_SPACES": 10, "SEGMENTS": 2, "WORDS": 12, "CHARACTERS": 60},
                    "REPETITION": {"WHITE_SPACES": 1, "SEGMENTS": 1, "WORDS": 2, "CHARACTERS": 9}
                }}"#,
            )
            .create_async()
            .await;

        let metrics = job(&server, None).metrics().await.unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics["NO_MATCH"], Metric::new(10, 2, 12, 60));

        let total: Metric = metrics.values().sum();
        assert_eq!(total, Metric::new(11, 3, 14, 69));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_metrics_not_available() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", format!("{}/metrics", JOB_PATH).as_str())
            .with_status(404)
            .create_async()
            .await;

        assert!(job(&server, None).metrics().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", format!("{}/metrics", JOB_PATH).as_str())
            .with_status(502)
            .create_async()
            .await;

        let err = job(&server, None).metrics().await.unwrap_err();
        assert!(matches!(err, Lingo24Error::ApiError(_)));
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn test_relations() {
        let mut server = Server::new_async().await;
        let service = server
            .mock("GET", "/services/3")
            .with_status(200)
            .with_body(r#"{"id": 3, "name": "Business"}"#)
            .create_async()
            .await;
        let source_locale = server
            .mock("GET", "/locales/10")
            .with_status(200)
            .with_body(r#"{"id": 10, "name": "English (UK)", "language": "en", "country": "GB"}"#)
            .create_async()
            .await;
        let target_locale = server
            .mock("GET", "/locales/20")
            .with_status(200)
            .with_body(r#"{"id": 20, "name": "French (France)", "language": "fr", "country": "FR"}"#)
            .create_async()
            .await;
        let source_file = server
            .mock("GET", "/files/100")
            .with_status(200)
            .with_body(r#"{"id": 100, "name": "manual.docx", "type": "SOURCE"}"#)
            .create_async()
            .await;
        let target_file = server
            .mock("GET", "/files/101")
            .expect(2)
            .with_status(200)
            .with_body(r#"{"id": 101, "name": "manual_fr.docx", "type": "TARGET"}"#)
            .create_async()
            .await;

        let job = job(&server, Some(101));
        assert_eq!(job.service().await.unwrap().name, "Business");
        assert_eq!(job.source_locale().await.unwrap().language, "en");
        assert_eq!(job.target_locale().await.unwrap().language, "fr");
        assert_eq!(job.source_file().await.unwrap().id, 100);

        // Not cached: each call goes back to the API
        for _ in 0..2 {
            let file = job.target_file().await.unwrap().unwrap();
            assert_eq!(file.name, "manual_fr.docx");
        }

        service.assert_async().await;
        source_locale.assert_async().await;
        target_locale.assert_async().await;
        source_file.assert_async().await;
        target_file.assert_async().await;
    }

    #[tokio::test]
    async fn test_target_file_absent_makes_no_request() {
        let mut server = Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let job = job(&server, None);
        assert_eq!(job.target_file().await.unwrap(), None);

        any.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", JOB_PATH)
            .expect(2)
            .with_status(200)
            .with_body(
                r#"{"id": 42, "jobStatus": "IN_PROGRESS", "serviceId": 3,
                    "sourceLocaleId": 10, "targetLocaleId": 20,
                    "sourceFileId": 100, "targetFileId": 101}"#,
            )
            .create_async()
            .await;

        let mut job = job(&server, None);
        job.refresh().await.unwrap();
        assert_eq!(job.status, "IN_PROGRESS");
        assert_eq!(job.target_file_id, Some(101));

        let first = job.clone();
        job.refresh().await.unwrap();
        assert_eq!(job, first);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_state() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", JOB_PATH)
            .with_status(503)
            .create_async()
            .await;

        let mut job = job(&server, None);
        let before = job.clone();
        assert!(job.refresh().await.is_err());
        assert_eq!(job, before);
    }

    #[tokio::test]
    async fn test_delete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", JOB_PATH)
            .with_status(204)
            .create_async()
            .await;

        let job = job(&server, None);
        job.delete().await.unwrap();
        assert_eq!(job.status, "QUOTED");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_failure_is_wrapped() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", JOB_PATH)
            .with_status(403)
            .create_async()
            .await;

        let err = job(&server, None).delete().await.unwrap_err();
        assert!(matches!(err, Lingo24Error::ApiError(_)));
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_collection_lists_jobs() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/1/jobs")
            .match_query(Matcher::UrlEncoded("page".into(), "0".into()))
            .with_status(200)
            .with_body(
                r#"{"content": [
                    {"id": 42, "jobStatus": "QUOTED", "serviceId": 3, "sourceLocaleId": 10,
                     "targetLocaleId": 20, "sourceFileId": 100}
                ], "page": {"size": 2, "totalElements": 1, "totalPages": 1, "number": 0}}"#,
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let jobs = client.jobs(1).all().await.unwrap();
        assert_eq!(jobs, vec![job(&server, None)]);
        assert_eq!(jobs[0].collection().project_id(), 1);

        mock.assert_async().await;
    }
}
