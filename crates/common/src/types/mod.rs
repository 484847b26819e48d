use serde::{Deserialize, Serialize};

/// Body of the root endpoint: liveness plus the list of exposed routes.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceBanner {
    pub status: String,
    pub message: String,
    pub endpoints: Vec<EndpointInfo>,
}

impl ServiceBanner {
    pub fn ok(message: impl Into<String>, endpoints: Vec<EndpointInfo>) -> Self {
        Self { status: "ok".into(), message: message.into(), endpoints }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
}

impl EndpointInfo {
    pub fn new(path: &str, method: &str) -> Self {
        Self { path: path.to_string(), method: method.to_string() }
    }
}
