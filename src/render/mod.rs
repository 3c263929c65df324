//! Turning feed entries into output lines.

pub mod filter;
pub mod timestamp;

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{Local, TimeZone};
use console::{Color, Style};

use crate::app::Result;
use crate::config::run::DEFAULT_DEPTH_SEPARATOR;
use crate::config::{ColorConfig, Config, HtmlColorConfig, OutputMode, RunConfig};
use crate::domain::{BuildStatus, FeedEntry};

pub use filter::SearchFilter;

/// Colors for one output mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Palette {
    Terminal(ColorConfig),
    Html(HtmlColorConfig),
}

impl Palette {
    pub fn for_mode(mode: OutputMode, settings: &Config) -> Self {
        match mode {
            OutputMode::Plain => Self::Terminal(settings.colors.clone()),
            OutputMode::Html => Self::Html(settings.html.clone()),
        }
    }
}

/// A formatted line and how many times the filter wants it printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub text: String,
    pub emissions: usize,
}

impl RenderedLine {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for _ in 0..self.emissions {
            writeln!(out, "{}", self.text)?;
        }
        Ok(())
    }
}

pub struct Renderer<Tz: TimeZone = Local> {
    palette: Palette,
    separator: Option<String>,
    localtime: bool,
    filter: SearchFilter,
    zone: Tz,
}

impl Renderer<Local> {
    pub fn new(config: &RunConfig, settings: &Config) -> Self {
        Self::with_zone(config, settings, Local)
    }
}

impl<Tz> Renderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Like [`Renderer::new`], converting timestamps into `zone` instead of
    /// the process's local zone.
    pub fn with_zone(config: &RunConfig, settings: &Config, zone: Tz) -> Self {
        Self {
            palette: Palette::for_mode(config.mode, settings),
            separator: config.separator.clone(),
            localtime: config.localtime,
            filter: SearchFilter::new(config.patterns.clone(), config.negate),
            zone,
        }
    }

    pub fn render(&self, entry: &FeedEntry) -> Result<RenderedLine> {
        let status = entry.status();

        let published = if self.localtime {
            timestamp::localize(&entry.published, &self.zone)?
        } else {
            entry.published.clone()
        };

        let mut text = match &self.palette {
            Palette::Terminal(colors) => format_plain(colors, status, &published, entry),
            Palette::Html(colors) => format_html(colors, status, &published, entry),
        };

        if let Some(sep) = &self.separator {
            text = text.replace(DEFAULT_DEPTH_SEPARATOR, sep);
        }

        Ok(RenderedLine {
            text,
            emissions: self.filter.emissions(&entry.title),
        })
    }
}

fn format_plain(
    colors: &ColorConfig,
    status: BuildStatus,
    published: &str,
    entry: &FeedEntry,
) -> String {
    let title_color = match status {
        BuildStatus::Alert => colors.alert,
        BuildStatus::Ok => colors.ok,
    };

    format!(
        "{}: {} ({})",
        paint(colors.date, published),
        paint(title_color, &entry.title),
        entry.link
    )
}

/// `text` wrapped in a foreground SGR code and a full reset (`ESC[0m`).
/// Forced, so piped output carries the same codes as a terminal.
fn paint(color: Color, text: &str) -> String {
    Style::new()
        .fg(color)
        .force_styling(true)
        .apply_to(text)
        .to_string()
}

fn format_html(
    colors: &HtmlColorConfig,
    status: BuildStatus,
    published: &str,
    entry: &FeedEntry,
) -> String {
    let title_color = match status {
        BuildStatus::Alert => &colors.alert,
        BuildStatus::Ok => &colors.ok,
    };

    format!(
        "<span style=\"color:{}\">{}</span>: <span style=\"color:{}\">{}</span> (<a href=\"{}\">link</a>)<br>",
        colors.date, published, title_color, entry.title, entry.link
    )
}
