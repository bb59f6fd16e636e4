//! # heliopath environment state
//!
//! This module defines [`HeliopathEnv`], the **shared environment object** passed to
//! every function that talks to the remote ephemeris service. It provides:
//!
//! - A persistent blocking **HTTP client** with a global request timeout.
//! - The service **endpoint**, overridable for tests and mirrors.
//!
//! The object is cheaply cloneable and safe to share between worker threads;
//! each fetch call is one synchronous round trip with no internal fan-out.
use std::time::Duration;

use ureq::Agent;

use crate::errors::HeliopathError;

/// Default endpoint of the JPL Horizons file API.
pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons_file.api";

/// Default global timeout applied to every request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HeliopathEnv {
    http_client: Agent,
    api_url: String,
    timeout: Duration,
}

impl Default for HeliopathEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl HeliopathEnv {
    /// Create a new environment targeting the default service endpoint.
    ///
    /// Return
    /// ------
    /// * A new `HeliopathEnv` with the HTTP client configured with the
    ///   default global timeout. Construction performs no network I/O.
    pub fn new() -> Self {
        Self::with_endpoint(HORIZONS_API_URL, DEFAULT_TIMEOUT)
    }

    /// Create a new environment targeting a custom endpoint.
    ///
    /// Arguments
    /// ---------
    /// * `api_url`: base URL of the ephemeris file API
    /// * `timeout`: global timeout applied to every request
    pub fn with_endpoint(api_url: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();

        HeliopathEnv {
            http_client: agent,
            api_url: api_url.to_string(),
            timeout,
        }
    }

    /// POST a query body to the service as a form submission and return the raw
    /// text response.
    ///
    /// Arguments
    /// ---------
    /// * `input`: the query in the service's batch-file syntax
    ///
    /// Return
    /// ------
    /// * The raw text response, or a transport error. A timeout surfaces as the
    ///   distinct [`HeliopathError::RequestTimedOut`] kind.
    pub(crate) fn post_query(&self, input: &str) -> Result<String, HeliopathError> {
        let mut response = self
            .http_client
            .post(self.api_url.as_str())
            .send_form([("format", "text"), ("input", input)])
            .map_err(|e| self.classify(e))?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| self.classify(e))
    }

    fn classify(&self, err: ureq::Error) -> HeliopathError {
        match err {
            ureq::Error::Timeout(_) => HeliopathError::RequestTimedOut(self.timeout),
            other => HeliopathError::RequestFailed(other),
        }
    }
}
