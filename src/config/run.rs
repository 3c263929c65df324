//! Resolution of command-line flags into an immutable [`RunConfig`].

use std::fmt;

use crate::app::{FeederError, Result};
use crate::cli::Cli;

/// Environment variable consulted for credentials when `--auth` is absent.
pub const AUTH_ENV_VAR: &str = "JENKINS_AUTH";

/// Glyph Jenkins uses between folder and job names in build titles.
pub const DEFAULT_DEPTH_SEPARATOR: char = '\u{bb}';
pub const DEPTH_SEPARATOR_MAXLEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedVariant {
    #[default]
    All,
    Latest,
    Failed,
}

impl FeedVariant {
    /// `failed` wins over `latest`; neither selects every build.
    pub fn from_flags(latest: bool, failed: bool) -> Self {
        if failed {
            Self::Failed
        } else if latest {
            Self::Latest
        } else {
            Self::All
        }
    }

    pub fn path_suffix(self) -> &'static str {
        match self {
            Self::All => "/rssAll",
            Self::Latest => "/rssLatest",
            Self::Failed => "/rssFailed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Plain,
    Html,
}

/// Where a credential string came from, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Flag,
    Env,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("auth"),
            Self::Env => f.write_str(AUTH_ENV_VAR),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

// Keep tokens out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

impl Credentials {
    /// Parse a `username:token` string.
    ///
    /// Returns `Ok(None)` for `":"` (anonymous access) and an error when the
    /// separator is missing or only one half is present.
    pub fn parse(raw: &str, origin: CredentialSource) -> Result<Option<Self>> {
        let (username, token) =
            auth_split(raw).ok_or(FeederError::InvalidCredentialFormat { origin })?;

        match (username.is_empty(), token.is_empty()) {
            (true, true) => Ok(None),
            (false, false) => Ok(Some(Self {
                username: username.to_string(),
                token: token.to_string(),
            })),
            _ => Err(FeederError::InvalidCredentialFormat { origin }),
        }
    }
}

/// Split on the first `:` only; the token itself may contain colons.
pub fn auth_split(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(':')
}

/// Keep at most [`DEPTH_SEPARATOR_MAXLEN`] characters.
pub fn truncate_separator(sep: &str) -> String {
    sep.chars().take(DEPTH_SEPARATOR_MAXLEN).collect()
}

/// Everything one pipeline run needs, fixed before the fetch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub target: String,
    pub variant: FeedVariant,
    pub credentials: Option<Credentials>,
    pub verify_tls: bool,
    pub mode: OutputMode,
    pub separator: Option<String>,
    pub localtime: bool,
    pub patterns: Vec<String>,
    pub negate: bool,
}

/// Outcome of flag resolution.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    ShowVersion,
    Run(RunConfig),
}

impl RunConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            variant: FeedVariant::All,
            credentials: None,
            verify_tls: true,
            mode: OutputMode::Plain,
            separator: None,
            localtime: false,
            patterns: Vec::new(),
            negate: false,
        }
    }

    /// Merge parsed flags with the environment credential string.
    pub fn resolve(cli: &Cli, env_auth: Option<&str>) -> Result<Resolution> {
        if cli.version {
            return Ok(Resolution::ShowVersion);
        }

        let target = cli
            .target
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(FeederError::MissingTarget)?;

        let credentials = match (cli.auth.as_deref(), env_auth) {
            (Some(flag), _) if !flag.is_empty() => {
                Credentials::parse(flag, CredentialSource::Flag)?
            }
            (_, Some(env)) if !env.is_empty() => Credentials::parse(env, CredentialSource::Env)?,
            _ => None,
        };

        Ok(Resolution::Run(Self {
            target: target.to_string(),
            variant: FeedVariant::from_flags(cli.latest, cli.failed),
            credentials,
            verify_tls: !cli.insecure,
            mode: if cli.html {
                OutputMode::Html
            } else {
                OutputMode::Plain
            },
            separator: cli
                .sep
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(truncate_separator),
            localtime: cli.localtime,
            patterns: cli.search.clone(),
            negate: cli.negate,
        }))
    }

    /// Base URL with the variant's path appended verbatim.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.target, self.variant.path_suffix())
    }
}
