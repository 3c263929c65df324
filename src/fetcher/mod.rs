pub mod http_fetcher;
pub mod tls;

use async_trait::async_trait;

use crate::app::Result;
use crate::config::Credentials;

/// One GET against a feed endpoint.
///
/// Certificate verification is decided when the implementation is built
/// (see [`tls::TlsMode`]), so a fetch only carries the URL and credentials.
#[async_trait]
pub trait Fetcher {
    /// Returns the response body, or `FeederError::FetchFailure` carrying
    /// the server's error page (or the transport error) verbatim.
    async fn fetch(&self, url: &str, credentials: Option<&Credentials>) -> Result<String>;
}
