use std::fmt::Display;
use std::io::Write;

use anyhow::Context;
use chrono::TimeZone;
use clap::CommandFactory;

use crate::app::{AppContext, FeederError, Result};
use crate::cli::Cli;
use crate::config::{Config, Resolution, RunConfig};
use crate::domain::FeedEntry;
use crate::render::Renderer;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// One whole invocation: resolve flags, fetch, render.
///
/// Records, help and the version go to `out`; error messages and the
/// server's failure body go to `err`. Returns the process exit status.
/// Only unexpected failures (bad settings file, broken pipes) surface as `Err`.
pub async fn run<O, E>(
    cli: &Cli,
    env_auth: Option<&str>,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<u8>
where
    O: Write,
    E: Write,
{
    let run = match RunConfig::resolve(cli, env_auth) {
        Ok(Resolution::ShowVersion) => {
            writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
            return Ok(EXIT_SUCCESS);
        }
        Ok(Resolution::Run(run)) => run,
        Err(FeederError::MissingTarget) => {
            Cli::command().write_help(out)?;
            writeln!(err, "\n{}\n", FeederError::MissingTarget)?;
            return Ok(EXIT_FAILURE);
        }
        Err(e) => {
            writeln!(err, "{}", e)?;
            return Ok(EXIT_FAILURE);
        }
    };

    let settings = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let ctx = AppContext::new(&run, settings).context("Failed to set up HTTP client")?;

    match show_feed(&ctx, &run, out).await {
        Ok(()) => Ok(EXIT_SUCCESS),
        // Whatever Jenkins sent back (often an HTML page) goes out as-is.
        Err(FeederError::FetchFailure { body, .. }) => {
            writeln!(err, "{}", body)?;
            Ok(EXIT_FAILURE)
        }
        Err(e @ FeederError::TimestampParse { .. }) => {
            writeln!(err, "{}", e)?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch the configured feed and print one line per emitted entry.
pub async fn show_feed<W: Write>(ctx: &AppContext, run: &RunConfig, out: &mut W) -> Result<()> {
    let url = run.endpoint();
    tracing::debug!("Fetching {} as {:?}", url, run.credentials);

    let body = ctx.fetcher.fetch(&url, run.credentials.as_ref()).await?;
    let entries = ctx.normalizer.normalize(body.as_bytes());

    if entries.is_empty() {
        writeln!(out, "No records")?;
        return Ok(());
    }

    let renderer = Renderer::new(run, &ctx.settings);
    print_entries(&renderer, &entries, out)
}

/// Render and write entries in order. Stops at the first entry that fails;
/// lines already written stay written.
pub fn print_entries<Tz, W>(
    renderer: &Renderer<Tz>,
    entries: &[FeedEntry],
    out: &mut W,
) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    for entry in entries {
        renderer.render(entry)?.write_to(out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::config::{Credentials, OutputMode};
    use crate::fetcher::Fetcher;

    struct StubFetcher {
        response: std::result::Result<String, (u16, String)>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16, body: &str) -> Self {
            Self {
                response: Err((status, body.to_string())),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str, _credentials: Option<&Credentials>) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err((status, body)) => Err(FeederError::FetchFailure {
                    status: Some(*status),
                    body: body.clone(),
                }),
            }
        }
    }

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>All builds</title>
  <entry>
    <title>app #2 (stable)</title>
    <link href="https://ci.example.com/job/app/2/"/>
    <id>app-2</id>
    <published>2024-01-15T10:30:00Z</published>
    <updated>2024-01-15T10:30:00Z</updated>
  </entry>
  <entry>
    <title>app #1 (broken for a long time)</title>
    <link href="https://ci.example.com/job/app/1/"/>
    <id>app-1</id>
    <published>2024-01-14T09:00:00Z</published>
    <updated>2024-01-14T09:00:00Z</updated>
  </entry>
</feed>"#;

    fn html_run() -> RunConfig {
        RunConfig {
            mode: OutputMode::Html,
            ..RunConfig::new("https://ci.example.com/job/app")
        }
    }

    async fn run_with(fetcher: Arc<StubFetcher>, run: &RunConfig) -> (Result<()>, String) {
        let ctx = AppContext::with_fetcher(fetcher, Config::default());
        let mut out = Vec::new();
        let result = show_feed(&ctx, run, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_show_feed_prints_entries_in_order() {
        let fetcher = Arc::new(StubFetcher::ok(FEED));
        let (result, out) = run_with(fetcher.clone(), &html_run()).await;

        result.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("color:green\">app #2 (stable)"));
        assert!(lines[1].contains("color:red\">app #1 (broken for a long time)"));
        assert_eq!(
            *fetcher.requests.lock().unwrap(),
            vec!["https://ci.example.com/job/app/rssAll"]
        );
    }

    #[tokio::test]
    async fn test_show_feed_empty() {
        let fetcher = Arc::new(StubFetcher::ok("not xml at all"));
        let (result, out) = run_with(fetcher, &html_run()).await;

        result.unwrap();
        assert_eq!(out, "No records\n");
    }

    #[tokio::test]
    async fn test_show_feed_fetch_failure_prints_nothing() {
        let fetcher = Arc::new(StubFetcher::failing(401, "<html>Unauthorized</html>"));
        let (result, out) = run_with(fetcher, &html_run()).await;

        assert!(out.is_empty());
        match result.unwrap_err() {
            FeederError::FetchFailure { status, body } => {
                assert_eq!(status, Some(401));
                assert_eq!(body, "<html>Unauthorized</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_show_feed_duplicates_per_matching_pattern() {
        let run = RunConfig {
            patterns: vec!["app".into(), "stable".into()],
            ..html_run()
        };
        let (result, out) = run_with(Arc::new(StubFetcher::ok(FEED)), &run).await;

        result.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], lines[1]);
        assert!(lines[2].contains("app #1"));
    }

    #[test]
    fn test_print_entries_stops_at_bad_timestamp() {
        let run = RunConfig {
            localtime: true,
            ..html_run()
        };
        let renderer = Renderer::with_zone(&run, &Config::default(), Utc);
        let entries = [
            FeedEntry::new("good", "2024-01-15T10:30:00Z", "l1"),
            FeedEntry::new("bad", "15/01/2024", "l2"),
            FeedEntry::new("never", "2024-01-15T10:30:00Z", "l3"),
        ];

        let mut out = Vec::new();
        let err = print_entries(&renderer, &entries, &mut out).unwrap_err();

        assert!(matches!(err, FeederError::TimestampParse { .. }));
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains(">2024-01-15T10:30:00<"));
    }

    #[test]
    fn test_show_feed_blocking() {
        let run = RunConfig {
            variant: crate::config::FeedVariant::Failed,
            ..html_run()
        };
        let fetcher = Arc::new(StubFetcher::ok(FEED));
        let (result, _) = tokio_test::block_on(run_with(fetcher.clone(), &run));

        result.unwrap();
        assert_eq!(
            *fetcher.requests.lock().unwrap(),
            vec!["https://ci.example.com/job/app/rssFailed"]
        );
    }
}
