use crate::prelude::{AlertError, AlertResult, CdmSource};
use crate::query::QueryBuilder;
use crate::telemetry::log::LogManager;
use reqwest::blocking::Client;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider account identity and password, both guaranteed non-empty.
#[derive(Clone)]
pub struct Credentials {
    identity: String,
    password: String,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, password: impl Into<String>) -> AlertResult<Self> {
        let identity = identity.into();
        let password = password.into();
        if identity.is_empty() {
            return Err(AlertError::Configuration("identity must not be empty".into()));
        }
        if password.is_empty() {
            return Err(AlertError::Configuration("password must not be empty".into()));
        }
        Ok(Self { identity, password })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Blocking Space-Track client.
///
/// The provider authenticates and runs the query in the same request: one
/// form post to the login endpoint carrying `identity`, `password` and the
/// `query` URL. No session state is kept between calls.
pub struct SpaceTrackClient {
    http: Client,
    login_url: String,
    credentials: Credentials,
    logger: LogManager,
}

impl SpaceTrackClient {
    pub fn new(queries: &QueryBuilder, credentials: Credentials) -> AlertResult<Self> {
        Self::with_timeout(queries, credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        queries: &QueryBuilder,
        credentials: Credentials,
        timeout: Duration,
    ) -> AlertResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cdmcore/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            login_url: queries.login_url(),
            credentials,
            logger: LogManager::new("fetch"),
        })
    }
}

impl CdmSource for SpaceTrackClient {
    fn fetch(&self, query: &str) -> AlertResult<Vec<u8>> {
        self.logger.record(&format!(
            "POST {} as {}",
            self.login_url, self.credentials.identity
        ));
        self.logger.detail(&format!("query target {}", query));

        let form = [
            ("identity", self.credentials.identity.as_str()),
            ("password", self.credentials.password.as_str()),
            ("query", query),
        ];
        let response = self.http.post(&self.login_url).form(&form).send()?;

        let status = response.status();
        if !status.is_success() {
            self.logger
                .warn(&format!("provider answered HTTP {}", status.as_u16()));
            let body = response.text().unwrap_or_else(|err| {
                self.logger
                    .warn(&format!("could not read error body: {}", err));
                String::new()
            });
            return Err(AlertError::AuthenticationOrQuery {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes()?;
        self.logger
            .detail(&format!("received {} bytes", body.len()));
        Ok(body.to_vec())
    }
}
