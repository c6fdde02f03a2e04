//! [`Responder`] that keeps responses in memory.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::CustomResourceResponse;
use crate::error::{Error, Result};
use crate::port::Responder;

#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<(String, CustomResourceResponse)>>,
    reject: Mutex<bool>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail.
    pub fn reject_all(&self, reject: bool) {
        *self.reject.lock() = reject;
    }

    pub fn sent(&self) -> Vec<(String, CustomResourceResponse)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn respond(&self, url: &str, response: &CustomResourceResponse) -> Result<()> {
        if *self.reject.lock() {
            return Err(Error::Upstream {
                code: "403".to_string(),
                message: format!("response rejected by {url}"),
            });
        }
        self.sent.lock().push((url.to_string(), response.clone()));
        Ok(())
    }
}
