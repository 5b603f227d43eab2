mod error;
mod request;
mod response;

use std::time::Duration;

use reqwest::{redirect, Method};
use tracing::debug;

pub use error::{ClientError, Result};
pub use request::AuthScope;
pub use tiny_types::{CreateEntry, Entry, UpdateEntry};

use response::Response;

const TINY_RESOURCE: &str = "tiny";
const EXPAND: &str = "expand";

/// Client for the tiny url API.
///
/// Holds no mutable state once built; clones share the underlying
/// connection pool and can be used from many tasks at once.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    read_token: Option<String>,
    write_token: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("read_token", &self.read_token.as_ref().map(|_| "***"))
            .field("write_token", &self.write_token.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ClientBuilder {
    base_url: String,
    read_token: Option<String>,
    write_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            read_token: None,
            write_token: None,
            timeout: None,
            connect_timeout: None,
        }
    }

    pub fn read_token(mut self, token: impl Into<String>) -> Self {
        self.read_token = Some(token.into());
        self
    }

    pub fn write_token(mut self, token: impl Into<String>) -> Self {
        self.write_token = Some(token.into());
        self
    }

    /// Total time allowed for a single request, from connect to body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut http = reqwest::Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            http = http.connect_timeout(timeout);
        }
        let http = http.build().map_err(|source| ClientError::Transport {
            context: "failed to create http client",
            source,
        })?;

        debug!(
            base_url = self.base_url,
            read_token = self.read_token.is_some(),
            write_token = self.write_token.is_some(),
            "create new tiny url client"
        );
        Ok(Client {
            http,
            base_url: self.base_url,
            read_token: self.read_token.filter(|t| !t.is_empty()),
            write_token: self.write_token.filter(|t| !t.is_empty()),
        })
    }
}

impl Client {
    /// Empty tokens are treated as absent and never sent.
    pub fn new(
        base_url: String,
        read_token: Option<String>,
        write_token: Option<String>,
    ) -> Result<Self> {
        let mut builder = ClientBuilder::new(base_url);
        builder.read_token = read_token;
        builder.write_token = write_token;
        builder.build()
    }

    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists all tiny url entries.
    pub async fn list_entries(&self) -> Result<Vec<Entry>> {
        let response = self.dispatch(self.list_entries_request()?).await?;
        response.check(false)?;
        response.decode()
    }

    /// Creates a new entry. With an empty `id` the server assigns one, which
    /// can be read from the returned entry.
    pub async fn create_entry(&self, id: &str, url: &str) -> Result<Entry> {
        let response = self.dispatch(self.create_entry_request(id, url)?).await?;
        response.check(false)?;
        response.decode()
    }

    /// Points an existing entry at a new url. Returns the default entry when
    /// the server answers with an empty body.
    pub async fn update_entry(&self, id: &str, url: &str) -> Result<Entry> {
        let response = self.dispatch(self.update_entry_request(id, url)?).await?;
        response.check(true)?;
        response.decode()
    }

    pub async fn get_entry(&self, id: &str) -> Result<Entry> {
        let response = self.dispatch(self.get_entry_request(id)?).await?;
        response.check(true)?;
        response.decode()
    }

    pub async fn delete_entry(&self, id: &str) -> Result<()> {
        let response = self.dispatch(self.delete_entry_request(id)?).await?;
        response.check(true)
    }

    pub(crate) fn list_entries_request(&self) -> Result<reqwest::Request> {
        self.request(Method::GET, &[TINY_RESOURCE], AuthScope::Read)
            .build()
            .map_err(ClientError::InvalidRequest)
    }

    pub(crate) fn create_entry_request(&self, id: &str, url: &str) -> Result<reqwest::Request> {
        let form = CreateEntry {
            id: id.to_string(),
            url: url.to_string(),
        };
        self.request(Method::POST, &[TINY_RESOURCE], AuthScope::Write)
            .form(&form)
            .build()
            .map_err(ClientError::InvalidRequest)
    }

    pub(crate) fn update_entry_request(&self, id: &str, url: &str) -> Result<reqwest::Request> {
        let form = UpdateEntry {
            url: url.to_string(),
        };
        self.request(Method::POST, &[TINY_RESOURCE, id], AuthScope::Write)
            .form(&form)
            .build()
            .map_err(ClientError::InvalidRequest)
    }

    pub(crate) fn get_entry_request(&self, id: &str) -> Result<reqwest::Request> {
        self.request(Method::GET, &[TINY_RESOURCE, id, EXPAND], AuthScope::Read)
            .build()
            .map_err(ClientError::InvalidRequest)
    }

    pub(crate) fn delete_entry_request(&self, id: &str) -> Result<reqwest::Request> {
        self.request(Method::DELETE, &[TINY_RESOURCE, id], AuthScope::Write)
            .build()
            .map_err(ClientError::InvalidRequest)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        scope: AuthScope,
    ) -> reqwest::RequestBuilder {
        let url = request::api_url(&self.base_url, segments);
        debug!(method = %method, url = url, scope = %scope, "build tiny url request");
        let builder = self.http.request(method, url);
        request::authorize(builder, self.token(scope))
    }

    fn token(&self, scope: AuthScope) -> Option<&str> {
        match scope {
            AuthScope::Read => self.read_token.as_deref(),
            AuthScope::Write => self.write_token.as_deref(),
            AuthScope::None => None,
        }
    }

    /// Sends exactly one request and reads the whole body. Redirects are not
    /// followed, so the first status the server returns is the one checked.
    async fn dispatch(&self, request: reqwest::Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| ClientError::Transport {
                context: "failed to send request to tiny url server",
                source,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                context: "failed to read response body",
                source,
            })?;

        debug!(
            method = %method,
            url = url,
            status = status.as_u16(),
            bytes = body.len(),
            "receive tiny url response"
        );
        Ok(Response { status, url, body })
    }
}
