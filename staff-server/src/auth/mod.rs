//! Authentication and access control

pub mod gate;
pub mod middleware;
pub mod session;

pub use gate::{GateDecision, dashboard_path};
pub use middleware::{require_login, require_role, resolve_session};
pub use session::{Claims, CurrentUser, SessionError, SessionService};
