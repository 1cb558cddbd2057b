use std::io::Write;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    load_settings, ClientSettings, EmptyPagePolicy, Resolution, ReviewFetchController,
    SessionSnapshot,
};
use serde::Serialize;
use shared::domain::{QueryParams, ReviewType};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "review_cli", about = "Fetch college reviews through the scrape endpoint")]
struct Args {
    #[arg(long)]
    college_id: String,
    #[arg(long, default_value_t = ReviewType::Academics)]
    review_type: ReviewType,
    /// Number of pages to fetch when not running interactively.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
    /// Ask before fetching each further page.
    #[arg(long)]
    interactive: bool,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    review_source: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Treat an empty page after the first one as the end of results.
    #[arg(long)]
    end_of_results: bool,
}

impl Args {
    fn apply(&self, mut settings: ClientSettings) -> ClientSettings {
        if let Some(endpoint) = &self.endpoint {
            settings.scrape_endpoint = endpoint.clone();
        }
        if let Some(source) = &self.review_source {
            settings.review_source_url = source.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            settings.request_timeout_secs = timeout;
        }
        if self.end_of_results {
            settings.empty_page_policy = EmptyPagePolicy::EndOfResults;
        }
        settings
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    college_id: &'a str,
    review_type: ReviewType,
    pages_fetched: u32,
    reviews: &'a [String],
    error: Option<&'a str>,
}

impl<'a> Report<'a> {
    fn new(params: &'a QueryParams, pages_fetched: u32, snapshot: &'a SessionSnapshot) -> Self {
        Self {
            college_id: params.college_id.as_str(),
            review_type: params.review_type,
            pages_fetched,
            reviews: &snapshot.reviews,
            error: snapshot.status.error_message(),
        }
    }
}

/// Everything a finished paging run leaves behind.
#[derive(Debug)]
struct RunOutcome {
    params: QueryParams,
    pages_fetched: u32,
    snapshot: SessionSnapshot,
}

impl RunOutcome {
    fn report(&self) -> Report<'_> {
        Report::new(&self.params, self.pages_fetched, &self.snapshot)
    }

    /// Fails when the search ended in an error without collecting any review.
    fn check(&self) -> Result<()> {
        if let Some(message) = self.snapshot.status.error_message() {
            if self.snapshot.reviews.is_empty() {
                bail!("{message}");
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = args.apply(load_settings());
    tracing::debug!(?settings, "effective client settings");
    let params = QueryParams::parse(&args.college_id, args.review_type)?;
    let controller = ReviewFetchController::from_settings(&settings)?;
    let mut stdin = BufReader::new(tokio::io::stdin());

    let outcome = run(&controller, params, &args, &mut stdin, &mut std::io::stdout()).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report())?);
    } else if outcome.snapshot.exhausted {
        eprintln!("No more reviews.");
    }

    outcome.check()?;
    if let Some(message) = outcome.snapshot.status.error_message() {
        eprintln!(
            "Stopped after {} page(s): {message}",
            outcome.pages_fetched
        );
    }
    Ok(())
}

/// Fetches page 1, then further pages while the session allows it and either
/// `--pages` or the interactive prompt asks for more. Snippets are written to
/// `out` as they arrive unless `--json` is set.
async fn run<R, W>(
    controller: &ReviewFetchController,
    params: QueryParams,
    args: &Args,
    input: &mut R,
    out: &mut W,
) -> Result<RunOutcome>
where
    R: AsyncBufReadExt + Unpin,
    W: Write,
{
    let mut printed = 0;
    let mut pages_fetched = 0u32;
    let mut resolution = controller.submit(params.clone()).await;
    loop {
        if matches!(resolution, Resolution::Appended { .. }) {
            pages_fetched += 1;
        }
        let snapshot = controller.snapshot().await;
        if !args.json {
            printed = print_new_reviews(out, &snapshot.reviews, printed)?;
        }
        if !snapshot.can_load_more() {
            break;
        }

        let wants_more = if args.interactive {
            confirm_load_more(input).await?
        } else {
            pages_fetched < args.pages
        };
        if !wants_more {
            break;
        }
        resolution = controller.load_more().await?;
    }

    Ok(RunOutcome {
        params,
        pages_fetched,
        snapshot: controller.snapshot().await,
    })
}

fn print_new_reviews<W: Write>(
    out: &mut W,
    reviews: &[String],
    already_printed: usize,
) -> std::io::Result<usize> {
    for (index, review) in reviews.iter().enumerate().skip(already_printed) {
        writeln!(out, "{:>3}. {review}", index + 1)?;
    }
    out.flush()?;
    Ok(reviews.len())
}

async fn confirm_load_more<R>(input: &mut R) -> Result<bool>
where
    R: AsyncBufReadExt + Unpin,
{
    // Prompt goes to stderr so stdout carries only results.
    eprint!("Load more? [y/N] ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(false);
    }
    Ok(is_affirmative(&line))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
