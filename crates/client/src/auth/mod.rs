//! Bearer credential lifecycle
//!
//! One wallet per client instance handles the full token lifecycle:
//!
//! ```text
//! ┌──────────┐   token()    ┌─────────────────────────┐
//! │  Client  │ ───────────► │  Wallet                 │
//! └──────────┘              │   cached Bearer (0..1)  │
//!                           │   renew when inside the │
//!                           │   60 s renewal margin   │
//!                           └───────────┬─────────────┘
//!                                       │ POST {clientId, secret}
//!                                       ▼
//!                               {proto}://{host}:{port}/token
//! ```
//!
//! Renewal is lazy and single-flight; failures keep the previous cached
//! value in place.

mod bearer;
mod credentials;
mod wallet;

pub use bearer::{Bearer, TokenResponse, RENEWAL_MARGIN_SECONDS};
pub use credentials::Credentials;
pub use wallet::Wallet;
