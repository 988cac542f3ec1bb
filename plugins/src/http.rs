use serde_json::Value;
use std::{error::Error as StdError, fmt, time::Duration};

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Unknown,
}

impl ApiHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ApiHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of an outbound call, tagged with the stage it failed in.
#[derive(Debug)]
pub struct ApiHttpError {
    service: &'static str,
    kind: ApiHttpErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl ApiHttpError {
    pub fn kind(&self) -> ApiHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub(crate) fn from_reqwest(service: &'static str, err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            ApiHttpErrorKind::Timeout
        } else if err.is_connect() {
            ApiHttpErrorKind::Connect
        } else if err.is_request() {
            ApiHttpErrorKind::Request
        } else if err.is_body() {
            ApiHttpErrorKind::Body
        } else if err.is_decode() {
            ApiHttpErrorKind::Decode
        } else {
            ApiHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        // reqwest embeds the full url in its message; webhook urls are secret.
        let err = err.without_url();
        let message = err.to_string();
        ApiHttpError {
            service,
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    pub(crate) fn status_error(
        service: &'static str,
        status: u16,
        url: String,
        preview: String,
    ) -> Self {
        ApiHttpError {
            service,
            kind: ApiHttpErrorKind::Status,
            status: Some(status),
            url: Some(url),
            message: preview,
            source: None,
        }
    }

    pub(crate) fn decode_error(
        service: &'static str,
        status: u16,
        url: String,
        err: Option<serde_json::Error>,
        detail: String,
    ) -> Self {
        let message = match &err {
            Some(e) => format!("failed to decode response body: {} | body={}", e, detail),
            None => format!("unexpected response shape: {}", detail),
        };
        ApiHttpError {
            service,
            kind: ApiHttpErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: err.map(anyhow::Error::new),
        }
    }
}

impl fmt::Display for ApiHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} http error kind={}", self.service, self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for ApiHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

pub(crate) fn build_client(timeout_ms: u64) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?)
}

pub(crate) fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().nth(BODY_PREVIEW_LIMIT).is_some() {
        out.push_str("...");
    }
    out
}

/// Scheme and host only, for logs and error messages.
pub(crate) fn redact_url(url: &reqwest::Url) -> String {
    match url.host_str() {
        Some(host) => format!("{}://{}", url.scheme(), host),
        None => url.scheme().to_string(),
    }
}

pub(crate) async fn parse_json_response(
    service: &'static str,
    resp: reqwest::Response,
    shown_url: String,
) -> anyhow::Result<Value> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|err| ApiHttpError::from_reqwest(service, err, shown_url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(ApiHttpError::status_error(service, status.as_u16(), shown_url, preview).into());
    }

    serde_json::from_str::<Value>(&body).map_err(|err| {
        let preview = preview_body(&body);
        ApiHttpError::decode_error(service, status.as_u16(), shown_url, Some(err), preview).into()
    })
}

pub(crate) async fn ensure_success(
    service: &'static str,
    resp: reqwest::Response,
    shown_url: String,
) -> anyhow::Result<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }

    let body = resp
        .text()
        .await
        .map_err(|err| ApiHttpError::from_reqwest(service, err, shown_url.clone()))?;
    let preview = preview_body(&body);
    Err(ApiHttpError::status_error(service, status.as_u16(), shown_url, preview).into())
}
