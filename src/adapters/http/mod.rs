//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with `dto`, `handlers` and `routes`. All of
//! them share one [`AppState`] and one error mapping.

pub mod checkout;
pub mod error;
pub mod feedback;
pub mod notify;
pub mod referral;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, build_app};
pub use state::{AppState, SiteSettings};
