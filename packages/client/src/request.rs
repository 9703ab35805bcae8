//! Request construction: operation parameters to method, URL, and body.

use etcd2_transport::{HttpRequest, Method};
use url::form_urlencoded;
use url::Url;

use crate::error::Error;
use crate::hosts::Host;

/// Path prefix of the keyspace endpoint.
pub(crate) const KEYS_PREFIX: &str = "/v2/keys";

/// Parameters of one keyspace operation, turned into an [`HttpRequest`]
/// by [`RequestSpec::build`].
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestSpec<'a> {
    method: Method,
    key: &'a str,
    recursive: bool,
    wait: bool,
    wait_index: Option<u64>,
    value: Option<&'a str>,
    ttl: Option<i64>,
    directory: bool,
}

impl<'a> RequestSpec<'a> {
    pub fn get(key: &'a str) -> Self {
        Self {
            method: Method::Get,
            key,
            ..Default::default()
        }
    }

    pub fn put(key: &'a str) -> Self {
        Self {
            method: Method::Put,
            key,
            ..Default::default()
        }
    }

    pub fn post(key: &'a str) -> Self {
        Self {
            method: Method::Post,
            key,
            ..Default::default()
        }
    }

    pub fn delete(key: &'a str) -> Self {
        Self {
            method: Method::Delete,
            key,
            ..Default::default()
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn wait(mut self) -> Self {
        self.wait = true;
        self
    }

    pub fn wait_index(mut self, index: Option<u64>) -> Self {
        self.wait_index = index;
        self
    }

    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    pub fn ttl(mut self, ttl: Option<i64>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn directory(mut self) -> Self {
        self.directory = true;
        self
    }

    /// Build the request against one backend host.
    ///
    /// The URL is `http://<host>:<port>/v2/keys<key>` with query parameters
    /// appended in priority order: `recursive`, `dir` (DELETE only, where
    /// the API wants it as a query parameter), `wait`, `waitIndex`. PUT and
    /// POST carry a form-encoded body: `dir=true` for directory creation,
    /// otherwise `value=<V>`, plus `ttl=<N>` only when the TTL is positive.
    pub fn build(&self, host: &Host) -> Result<HttpRequest, Error> {
        let mut url = Url::parse(&format!("http://{}:{}", host.host(), host.port()))?;

        // Keys are absolute paths; tolerate a missing leading slash.
        if self.key.starts_with('/') {
            url.set_path(&format!("{}{}", KEYS_PREFIX, self.key));
        } else {
            url.set_path(&format!("{}/{}", KEYS_PREFIX, self.key));
        }

        let delete_dir = self.directory && self.method == Method::Delete;
        if self.recursive || delete_dir || self.wait || self.wait_index.is_some() {
            let mut pairs = url.query_pairs_mut();
            if self.recursive {
                pairs.append_pair("recursive", "true");
            }
            if delete_dir {
                pairs.append_pair("dir", "true");
            }
            if self.wait {
                pairs.append_pair("wait", "true");
            }
            if let Some(index) = self.wait_index {
                pairs.append_pair("waitIndex", &index.to_string());
            }
        }

        let body = match self.method {
            Method::Put | Method::Post => Some(self.form_body()),
            Method::Get | Method::Delete => None,
        };

        Ok(HttpRequest {
            method: self.method,
            url: url.into(),
            body,
        })
    }

    /// Form-encode the mutation body. Values are percent-encoded so that
    /// `&`, `=`, and `%` survive the round trip.
    fn form_body(&self) -> String {
        let mut form = form_urlencoded::Serializer::new(String::new());

        if self.directory {
            form.append_pair("dir", "true");
        } else if let Some(value) = self.value {
            form.append_pair("value", value);
        }

        if let Some(ttl) = self.ttl {
            if ttl > 0 {
                form.append_pair("ttl", &ttl.to_string());
            }
        }

        form.finish()
    }
}
