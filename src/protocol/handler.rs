use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;
use crate::protocol::command::Command;
use crate::protocol::http::Request;
use crate::protocol::response::Response;
use crate::store::{Entries, Store};

/// Request-handling callback the server invokes once per request
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: Request) -> Response;
}

/// Serves the `/store` resource family from a shared [`Store`]
pub struct StoreHandler {
    store: Arc<Store>,
}

impl StoreHandler {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    fn dispatch(&self, request: &Request) -> Result<Entries> {
        let cmd = Command::from_request(&request.method, &request.path)?;
        cmd.execute(&self.store)
    }
}

#[async_trait]
impl Handler for StoreHandler {
    async fn handle(&self, request: Request) -> Response {
        // The body never carries data; key and value come from the path.
        let response = match self.dispatch(&request) {
            Ok(entries) => Response::ok(&entries),
            Err(e) => {
                warn!("{} {} failed: {}", request.method, request.path, e);
                Response::from(e)
            }
        };

        info!(
            "{} {} -> {}",
            request.method,
            request.path,
            response.status.code()
        );
        response
    }
}
