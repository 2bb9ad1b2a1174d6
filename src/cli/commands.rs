//! CLI command definitions and handlers

use clap::{Args, Subcommand};
use tracing::info;

use crate::business::collections::PaginatedCollection;
use crate::business::files::BaseFileCollection;
use crate::business::jobs::Job;
use crate::business::metrics::Metric;
use crate::core::client::Client;
use crate::core::models::FileType;

/// Identifies one job
#[derive(Args, Debug, Clone, Copy)]
pub struct JobRef {
    /// Project the job belongs to
    #[arg(short, long)]
    pub project: u64,

    /// Job id
    #[arg(short, long)]
    pub job: u64,
}

/// Commands for the Lingo24 client
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a job with its service, locales and files
    Show {
        #[command(flatten)]
        job: JobRef,
    },

    /// Show job pricing
    Price {
        #[command(flatten)]
        job: JobRef,
    },

    /// Show job metrics
    Metrics {
        #[command(flatten)]
        job: JobRef,
    },

    /// List files attached to a job
    Files {
        #[command(flatten)]
        job: JobRef,

        /// Only list files of this type (source or target)
        #[arg(long)]
        file_type: Option<String>,
    },

    /// Delete a job
    Delete {
        #[command(flatten)]
        job: JobRef,
    },
}

async fn fetch_job(client: &Client, job: JobRef) -> anyhow::Result<Job> {
    let fetched = client.jobs(job.project).get(job.job).await?;
    info!("Fetched job {} of project {}", job.job, job.project);
    Ok(fetched)
}

/// Handle the show command
pub async fn handle_show(client: &Client, job: JobRef) -> anyhow::Result<()> {
    let job = fetch_job(client, job).await?;

    let service = job.service().await?;
    let source_locale = job.source_locale().await?;
    let target_locale = job.target_locale().await?;
    let source_file = job.source_file().await?;

    println!("{} ({})", job, job.status);
    println!("   Service: {}", service.name);
    println!("   Source: {} ({})", source_locale.name, source_file.name);
    match job.target_file().await? {
        Some(file) => println!("   Target: {} ({})", target_locale.name, file.name),
        None => println!("   Target: {} (not available yet)", target_locale.name),
    }

    Ok(())
}

/// Handle the price command
pub async fn handle_price(client: &Client, job: JobRef) -> anyhow::Result<()> {
    let job = fetch_job(client, job).await?;

    let Some(price) = job.price().await? else {
        println!("No pricing available for {}", job);
        return Ok(());
    };

    for (label, total) in [
        ("Without discount", &price.total_without_discount),
        ("With discount", &price.total_with_discount),
    ] {
        println!("{}:", label);
        println!("   Net: {}", total.formatted_net());
        println!("   Tax: {}", total.formatted_tax());
        println!("   Gross: {}", total.formatted_gross());
    }

    Ok(())
}

/// Handle the metrics command
pub async fn handle_metrics(client: &Client, job: JobRef) -> anyhow::Result<()> {
    let job = fetch_job(client, job).await?;
    let metrics = job.metrics().await?;

    if metrics.is_empty() {
        println!("No metrics available for {}", job);
        return Ok(());
    }

    for (key, metric) in &metrics {
        println!("{}: {}", key, metric);
    }

    let total: Metric = metrics.values().sum();
    println!("Total: {}", total);

    Ok(())
}

/// Handle the files command
pub async fn handle_files(
    client: &Client,
    job: JobRef,
    file_type: Option<String>,
) -> anyhow::Result<()> {
    let job = fetch_job(client, job).await?;

    let files = match file_type.as_deref() {
        Some(name) => job.files().of_type(parse_file_type(name)?).await?,
        None => job.files().all().await?,
    };

    if files.is_empty() {
        println!("No files for {}", job);
    }
    for file in files {
        println!("{:>10}  {:<7} {}", file.id, file.file_type, file.name);
    }

    Ok(())
}

/// Handle the delete command
pub async fn handle_delete(client: &Client, job: JobRef) -> anyhow::Result<()> {
    let job = fetch_job(client, job).await?;
    job.delete().await?;
    println!("✅ Deleted {}", job);
    Ok(())
}

fn parse_file_type(name: &str) -> anyhow::Result<FileType> {
    match name.to_ascii_lowercase().as_str() {
        "source" => Ok(FileType::Source),
        "target" => Ok(FileType::Target),
        other => anyhow::bail!("Unknown file type: {} (expected source or target)", other),
    }
}
