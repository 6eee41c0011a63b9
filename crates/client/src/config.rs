// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2023-2025 Meridex Systems Pty Ltd. All rights reserved.
//  https://meridex.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Session configuration: connection pool, timeouts, proxy, TLS, and retry.

use std::time::Duration;

use cryptoapi_core::{consts::CRYPTOAPI_USER_AGENT, secret::SecretString};
use cryptoapi_network::{error::CryptoApiClientError, retry::RetryConfig};

/// HTTP client and request settings for one session.
///
/// The record is frozen at session construction; mutate a clone to derive a
/// new configuration. `max_connections`, `write_timeout`, and `pool_timeout`
/// are advisory: reqwest pools per host and applies write deadlines through
/// the overall request timeout.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Idle connections kept alive per host.
    pub max_keepalive_connections: usize,
    /// Advisory total connection ceiling.
    pub max_connections: usize,
    /// Seconds an idle pooled connection survives.
    pub keepalive_expiry: f64,

    /// TCP connect timeout in seconds.
    pub connect_timeout: f64,
    /// Socket read timeout in seconds.
    pub read_timeout: f64,
    /// Advisory socket write timeout in seconds.
    pub write_timeout: f64,
    /// Advisory pool checkout timeout in seconds.
    pub pool_timeout: f64,

    /// Negotiate HTTP/2 when the server supports it.
    pub http2_enabled: bool,

    /// `User-Agent` sent with every request.
    pub user_agent: String,

    /// Explicit proxy URL; when unset and `trust_env` is false, ambient proxy
    /// variables are ignored.
    pub proxy_url: Option<String>,
    /// Basic-auth credentials for the proxy.
    pub proxy_auth: Option<(SecretString, SecretString)>,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`ALL_PROXY`/`NO_PROXY` when true.
    pub trust_env: bool,

    /// Verify TLS certificates (disable only against test endpoints).
    pub verify_ssl: bool,
    /// Additional root CA bundle in PEM format.
    pub ssl_cert_file: Option<String>,
    /// Fully caller-configured TLS stack; takes precedence over every other
    /// TLS option.
    pub ssl_context: Option<rustls::ClientConfig>,

    /// Overall per-request timeout in seconds.
    pub request_timeout_seconds: u64,
    /// Retry attempt budget (attempts, not sleeps).
    pub request_max_retries: u32,
    /// First backoff delay in seconds.
    pub request_initial_delay_seconds: f64,
    /// Backoff delay ceiling in seconds.
    pub request_max_delay: f64,
    /// Backoff growth factor.
    pub request_backoff_factor: f64,
    /// Draw each delay uniformly from `[0, delay]` when true.
    pub request_jitter: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_keepalive_connections: 30,
            max_connections: 100,
            keepalive_expiry: 30.0,
            connect_timeout: 5.0,
            read_timeout: 10.0,
            write_timeout: 10.0,
            pool_timeout: 10.0,
            http2_enabled: true,
            user_agent: CRYPTOAPI_USER_AGENT.to_string(),
            proxy_url: None,
            proxy_auth: None,
            trust_env: false,
            verify_ssl: true,
            ssl_cert_file: None,
            ssl_context: None,
            request_timeout_seconds: 10,
            request_max_retries: 5,
            request_initial_delay_seconds: 1.0,
            request_max_delay: 60.0,
            request_backoff_factor: 2.0,
            request_jitter: true,
        }
    }
}

impl SessionConfig {
    /// The retry parameters for the request pipeline.
    #[must_use]
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.request_max_retries,
            initial_delay: Duration::from_secs_f64(self.request_initial_delay_seconds),
            max_delay: Duration::from_secs_f64(self.request_max_delay),
            backoff_factor: self.request_backoff_factor,
            jitter: self.request_jitter,
        }
    }

    /// Builds the underlying HTTP client.
    ///
    /// TLS policy is selected by priority: `ssl_context`, then
    /// `verify_ssl = false` (permissive), then `ssl_cert_file`, then default
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoApiClientError::Configuration`] for an invalid proxy
    /// URL, an unreadable certificate file, or a client build failure.
    pub fn build_http_client(&self) -> Result<reqwest::Client, CryptoApiClientError> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(self.max_keepalive_connections)
            .pool_idle_timeout(Duration::from_secs_f64(self.keepalive_expiry))
            .connect_timeout(Duration::from_secs_f64(self.connect_timeout))
            .read_timeout(Duration::from_secs_f64(self.read_timeout))
            .timeout(Duration::from_secs(self.request_timeout_seconds));

        if !self.http2_enabled {
            builder = builder.http1_only();
        }

        if let Some(proxy_url) = &self.proxy_url {
            let mut proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| CryptoApiClientError::Configuration(format!("proxy: {e}")))?;
            if let Some((username, password)) = &self.proxy_auth {
                proxy = proxy.basic_auth(username.expose(), password.expose());
            }
            builder = builder.proxy(proxy);
        } else if !self.trust_env {
            builder = builder.no_proxy();
        }

        if let Some(tls) = &self.ssl_context {
            builder = builder.use_preconfigured_tls(tls.clone());
        } else if !self.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        } else if let Some(cert_file) = &self.ssl_cert_file {
            let pem = std::fs::read(cert_file).map_err(|e| {
                CryptoApiClientError::Configuration(format!("ssl_cert_file '{cert_file}': {e}"))
            })?;
            let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                CryptoApiClientError::Configuration(format!("ssl_cert_file '{cert_file}': {e}"))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        builder
            .build()
            .map_err(|e| CryptoApiClientError::Configuration(e.to_string()))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_values() {
        let config = SessionConfig::default();
        assert_eq!(config.max_keepalive_connections, 30);
        assert_eq!(config.max_connections, 100);
        assert!(config.http2_enabled);
        assert!(!config.trust_env);
        assert!(config.verify_ssl);
        assert_eq!(config.request_max_retries, 5);
        assert!(config.request_jitter);
        assert!(config.user_agent.starts_with("cryptoapi/"));
    }

    #[rstest]
    fn test_retry_config_mapping() {
        let config = SessionConfig {
            request_max_retries: 3,
            request_initial_delay_seconds: 0.5,
            request_max_delay: 20.0,
            request_backoff_factor: 3.0,
            request_jitter: false,
            ..SessionConfig::default()
        };
        let retry = config.retry_config();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.initial_delay, Duration::from_millis(500));
        assert_eq!(retry.max_delay, Duration::from_secs(20));
        assert!(!retry.jitter);
    }

    #[rstest]
    fn test_build_default_client() {
        assert!(SessionConfig::default().build_http_client().is_ok());
    }

    #[rstest]
    fn test_build_with_proxy_and_permissive_tls() {
        let config = SessionConfig {
            proxy_url: Some("http://localhost:8080".to_string()),
            proxy_auth: Some((SecretString::from("user"), SecretString::from("pass"))),
            verify_ssl: false,
            http2_enabled: false,
            ..SessionConfig::default()
        };
        assert!(config.build_http_client().is_ok());
    }

    #[rstest]
    fn test_invalid_proxy_url_is_configuration_error() {
        let config = SessionConfig {
            proxy_url: Some("not a url".to_string()),
            ..SessionConfig::default()
        };
        let error = config.build_http_client().unwrap_err();
        assert!(matches!(error, CryptoApiClientError::Configuration(_)));
    }

    #[rstest]
    fn test_missing_cert_file_is_configuration_error() {
        let config = SessionConfig {
            ssl_cert_file: Some("/nonexistent/ca.pem".to_string()),
            ..SessionConfig::default()
        };
        let error = config.build_http_client().unwrap_err();
        assert!(matches!(error, CryptoApiClientError::Configuration(_)));
    }

    #[rstest]
    fn test_proxy_credentials_are_redacted_in_debug() {
        let config = SessionConfig {
            proxy_auth: Some((
                SecretString::from("proxy-user"),
                SecretString::from("proxy-pass"),
            )),
            ..SessionConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("proxy-pass"));
    }
}
