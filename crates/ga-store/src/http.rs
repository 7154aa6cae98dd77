//! Response handling shared by the HTTP backends

use crate::error::{LoadError, StoreResult};
use reqwest::Response;
use std::time::Duration;

/// Upper bound for a single readiness check request
pub(crate) const READY_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest response body kept in a `BadStatus` error
const MAX_ERROR_BODY: usize = 512;

pub(crate) fn request_error(url: &str, err: reqwest::Error) -> LoadError {
    LoadError::Request {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Turn a non-2xx response into `LoadError::BadStatus`
pub(crate) async fn check_status(backend: &'static str, response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
        body.push_str("...");
    }

    Err(LoadError::BadStatus {
        backend,
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}
