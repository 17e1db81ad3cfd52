//! Backend commands queued from UI to backend worker.

use shared::protocol::CreateOrderRequest;

#[derive(Debug)]
pub enum BackendCommand {
    SubmitOrder { request: CreateOrderRequest },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitOrder { .. } => "submit_order",
        }
    }
}
