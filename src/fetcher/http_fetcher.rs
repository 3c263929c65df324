use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{FeederError, Result};
use crate::config::{Credentials, HttpConfig};
use crate::fetcher::tls::TlsMode;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &HttpConfig, tls: TlsMode) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(settings.user_agent.as_str());

        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let TlsMode::Insecure(token) = tls {
            builder = token.apply(builder);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

fn transport_failure(err: reqwest::Error) -> FeederError {
    FeederError::FetchFailure {
        status: err.status().map(|s| s.as_u16()),
        body: err.to_string(),
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, credentials: Option<&Credentials>) -> Result<String> {
        let mut request = self.client.get(url);

        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(&creds.token));
        }

        let response = request.send().await.map_err(transport_failure)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_failure)?;

        // Only 4xx/5xx count as failures; anything else carries a feed.
        if status.is_client_error() || status.is_server_error() {
            tracing::debug!("GET {} returned {}", url, status);
            return Err(FeederError::FetchFailure {
                status: Some(status.as_u16()),
                body,
            });
        }

        tracing::debug!("GET {} returned {} ({} bytes)", url, status, body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::run::CredentialSource;
    use wiremock::matchers::{basic_auth, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&HttpConfig::default(), TlsMode::init(true)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rssAll"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<feed/>"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/rssAll", server.uri()), None)
            .await
            .unwrap();
        assert_eq!(body, "<feed/>");
    }

    #[tokio::test]
    async fn test_fetch_sends_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rssLatest"))
            .and(basic_auth("bob", "to:ken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let creds = Credentials::parse("bob:to:ken", CredentialSource::Flag)
            .unwrap()
            .unwrap();
        let body = fetcher()
            .fetch(&format!("{}/rssLatest", server.uri()), Some(&creds))
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_error_status_carries_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rssFailed"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string("<html>Access Denied</html>"),
            )
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&format!("{}/rssFailed", server.uri()), None)
            .await
            .unwrap_err();

        match err {
            FeederError::FetchFailure { status, body } => {
                assert_eq!(status, Some(403));
                assert_eq!(body, "<html>Access Denied</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_fetch_failure() {
        // Reserve a port, then free it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = fetcher()
            .fetch(&format!("http://127.0.0.1:{}/rssAll", port), None)
            .await
            .unwrap_err();
        assert!(matches!(err, FeederError::FetchFailure { status: None, .. }));
    }

    #[test]
    fn test_builds_insecure_client() {
        assert!(HttpFetcher::new(&HttpConfig::default(), TlsMode::init(false)).is_ok());
    }
}
