use std::sync::Arc;

use async_trait::async_trait;

use cfroutes_core::ApiResult;

/// HTTP verbs the repositories issue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request relative to the configured target.
///
/// `path` includes the already-escaped query string, e.g.
/// `/v2/routes?q=host%3Amy-cool-app`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body.into()),
        }
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Request/response exchange with the remote API.
///
/// Implementations own transport, authentication and status classification:
/// a 2xx answer yields the raw body (possibly empty), anything else an
/// [`ApiError`](cfroutes_core::ApiError) failure. Implementations never
/// produce `ApiError::NotFound`; that class belongs to the repositories.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ApiResult<String>;
}

#[async_trait]
impl<G> Gateway for Arc<G>
where
    G: Gateway + ?Sized,
{
    async fn execute(&self, request: ApiRequest) -> ApiResult<String> {
        (**self).execute(request).await
    }
}
