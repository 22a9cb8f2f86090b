//! Data models
//!
//! Shared between staff-server and its clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes; timestamps are Unix milliseconds.

pub mod attendance;
pub mod identity;
pub mod notice;
pub mod request;
pub mod work;

// Re-exports
pub use attendance::*;
pub use identity::*;
pub use notice::*;
pub use request::*;
pub use work::*;
