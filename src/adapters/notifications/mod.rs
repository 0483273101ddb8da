//! Operations notification adapters.
//!
//! - `SlackWebhookNotifier` - production, Slack incoming webhook
//! - `LoggingNotifier` - development, writes messages to the log
//! - `RecordingNotifier` - tests, keeps messages in memory

mod recording;
mod slack_webhook;

pub use recording::{LoggingNotifier, RecordingNotifier};
pub use slack_webhook::SlackWebhookNotifier;
