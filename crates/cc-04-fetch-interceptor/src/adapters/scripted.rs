use crate::domain::errors::NetworkError;
use crate::domain::request::{FetchRequest, FetchResponse};
use crate::ports::outbound::Network;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Network with canned responses per URL and an offline switch.
///
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct ScriptedNetwork {
    responses: Mutex<HashMap<String, FetchResponse>>,
    offline: AtomicBool,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: impl Into<String>, response: FetchResponse) {
        self.responses.lock().insert(url.into(), response);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Every request that reached the network, including failed ones.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Network for ScriptedNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError> {
        self.requests.lock().push(request.clone());
        if self.is_offline() {
            return Err(NetworkError::Offline("scripted offline".to_string()));
        }
        Ok(self
            .responses
            .lock()
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, "not found")))
    }
}
