//! # good_feeder
//!
//! Prints a Jenkins build-status feed as one colored (or HTML) line per build.
//!
//! ## Architecture
//!
//! One fetch, one pass, nothing kept between runs:
//!
//! ```text
//! RunConfig → Fetcher → Normalizer → Renderer → stdout
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Every build under a folder
//! good_feeder https://ci.example.com/job/folder
//!
//! # Failed builds only, authenticated, local timestamps
//! JENKINS_AUTH=bob:api-token good_feeder -f -L https://ci.example.com
//!
//! # HTML for an email body, skipping anything that mentions "nightly"
//! good_feeder --html -n -s nightly https://ci.example.com
//! ```

/// Application context and error types.
pub mod app;

/// Command-line interface using clap, and the `show_feed` command.
pub mod cli;

/// Run configuration resolved from flags, plus the optional settings file
/// (`~/.config/good_feeder/config.toml`) for colors and HTTP defaults.
pub mod config;

/// Feed entries and their build status.
pub mod domain;

/// HTTP fetching with basic auth and an explicit insecure-TLS switch.
pub mod fetcher;

/// RSS/Atom parsing into [`FeedEntry`](domain::FeedEntry) values.
pub mod normalizer;

/// Line formatting, timestamp localization and search filtering.
pub mod render;
