//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application core to external systems:
//! - `stripe` - Payment provider (Stripe REST API, plus an in-memory mock)
//! - `notifications` - Operations channel (Slack webhook, logging, recording)
//! - `speakers` - Speaker directory (YAML file, in-memory)
//! - `referral` - Referral ledger (in-memory, optionally seeded from YAML)
//! - `access_token` - HS256 capability tokens
//! - `http` - Axum REST API

pub mod access_token;
pub mod http;
pub mod notifications;
pub mod referral;
pub mod speakers;
pub mod stripe;

pub use access_token::JwtAccessTokenService;
pub use notifications::{LoggingNotifier, RecordingNotifier, SlackWebhookNotifier};
pub use referral::InMemoryReferralLedger;
pub use speakers::{InMemorySpeakerDirectory, YamlSpeakerDirectory};
pub use stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
