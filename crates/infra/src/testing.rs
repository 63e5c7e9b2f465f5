//! In-memory collaborators for tests.
//!
//! `FakeGateway` replays queued responses in order and records every request
//! it receives. `FakeDomainRepository` answers every lookup with one fixed
//! outcome and records the names it was asked for.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use cfroutes_core::{ApiError, ApiResult, Domain};

use crate::api::domains::DomainRepository;
use crate::net::{ApiRequest, Gateway};

#[derive(Debug, Default)]
pub struct FakeGateway {
    responses: Mutex<VecDeque<ApiResult<String>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body.
    pub fn respond_ok(&self, body: impl Into<String>) {
        self.push(Ok(body.into()));
    }

    /// Queue a failure.
    pub fn respond_err(&self, err: ApiError) {
        self.push(Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, response: ApiResult<String>) {
        self.responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn execute(&self, request: ApiRequest) -> ApiResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport(format!("unexpected request: {} {}", request.method, request.path))))
    }
}

#[derive(Debug)]
pub struct FakeDomainRepository {
    outcome: ApiResult<Domain>,
    names: Mutex<Vec<String>>,
}

impl FakeDomainRepository {
    pub fn returning(outcome: ApiResult<Domain>) -> Self {
        Self {
            outcome,
            names: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomainRepository for FakeDomainRepository {
    async fn find_by_name(&self, name: &str) -> ApiResult<Domain> {
        self.names.lock().unwrap().push(name.to_string());
        self.outcome.clone()
    }
}
