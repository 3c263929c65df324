use std::sync::Arc;

use crate::app::error::Result;
use crate::config::{Config, RunConfig};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::tls::TlsMode;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

pub struct AppContext {
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub settings: Config,
}

impl AppContext {
    /// Build the HTTP stack for `run`. Insecure mode is switched on here,
    /// before any request goes out.
    pub fn new(run: &RunConfig, settings: Config) -> Result<Self> {
        let tls = TlsMode::init(run.verify_tls);
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::new(&settings.http, tls)?);

        Ok(Self::with_fetcher(fetcher, settings))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher + Send + Sync>, settings: Config) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            settings,
        }
    }
}
