//! In-memory notifiers for development and tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{NotifyError, OpsNotifier};

/// Records every message instead of sending it. Optionally fails every send.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    failure: Option<NotifyError>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails with `error`. Attempts are still recorded.
    pub fn failing(error: NotifyError) -> Self {
        Self {
            messages: Arc::default(),
            failure: Some(error),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Messages sent so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.guard().clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.guard().last().cloned()
    }
}

#[async_trait]
impl OpsNotifier for RecordingNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.guard().push(message.to_string());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Logs messages instead of delivering them. Used when no webhook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl OpsNotifier for LoggingNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        tracing::info!(message = %message, "Ops notification (no webhook configured)");
        Ok(())
    }
}
