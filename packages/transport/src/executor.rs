//! HTTP execution abstraction.
//!
//! This module provides a trait for HTTP execution that can be mocked in
//! tests, avoiding the need for actual network calls.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Trait for executing HTTP requests.
///
/// Implementations can use real HTTP clients or scripted responses for
/// testing. A transport failure (connection refused, timeout) is an `Err`;
/// any response the server actually produced is an `Ok`, whatever its
/// status code.
pub trait HttpExecutor {
    /// Execute an HTTP request and return the response.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Production HTTP executor using reqwest's blocking client.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(Duration::from_secs(30))
    }

    /// Create an executor with no request timeout.
    ///
    /// Long-polling waits block until the server responds; an executor with
    /// a timeout would cut them short. The blocking client defaults to a
    /// 30 second timeout, so it is disabled explicitly here.
    pub fn no_timeout() -> Result<Self, Error> {
        let client = Client::builder().timeout(None).build()?;
        Ok(Self { client })
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let method: http::Method = request.method.into();

        debug!(%method, url = %request.url, "dispatching request");

        let mut req_builder = self.client.request(method, &request.url);

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone());
        }

        let response = req_builder.send()?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let body = response.text()?;

        debug!(status, "received response");

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}
