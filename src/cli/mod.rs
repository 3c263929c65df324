pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::run::{AUTH_ENV_VAR, DEFAULT_DEPTH_SEPARATOR, DEPTH_SEPARATOR_MAXLEN};

#[derive(Parser, Debug, Default)]
#[command(name = "good_feeder")]
#[command(about = concat!("good_feeder v", env!("CARGO_PKG_VERSION")), long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Format: "username:token" (or omit "-a" and use JENKINS_AUTH environment variable)
    #[arg(short, long)]
    pub auth: Option<String>,

    /// Convert server UTC timestamp to local time
    #[arg(short = 'L', long)]
    pub localtime: bool,

    /// Disable SSL certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Output as html (i.e. email)
    #[arg(long)]
    pub html: bool,

    #[arg(short = 'S', long, help = sep_help())]
    pub sep: Option<String>,

    /// Show only latest builds
    #[arg(short, long)]
    pub latest: bool,

    /// Show only failed builds
    #[arg(short, long)]
    pub failed: bool,

    /// Filter output on sub-string (case-sensitive, repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    pub search: Vec<String>,

    /// Negate search filter
    #[arg(short, long)]
    pub negate: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show version
    #[arg(short = 'V', long)]
    pub version: bool,

    /// URL to server, folder, or job
    #[arg(value_name = "JENKINS_URL")]
    pub target: Option<String>,
}

fn sep_help() -> String {
    format!(
        "default string: '{}', max length: {}",
        DEFAULT_DEPTH_SEPARATOR, DEPTH_SEPARATOR_MAXLEN
    )
}

impl Cli {
    /// Credential string from the environment, consulted only when `--auth` is absent.
    pub fn env_auth() -> Option<String> {
        std::env::var(AUTH_ENV_VAR).ok()
    }
}
