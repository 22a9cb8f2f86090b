//! staff-server - role-based employee management service
//!
//! Administrators manage employees, notices, attendance, work assignments
//! and employee requests; employees see their own work, notices and
//! attendance and submit requests.
//!
//! # Module layout
//!
//! ```text
//! staff-server/src/
//! ├── api/       # routers and controllers (accounts, admin-panel, employee-panel)
//! ├── auth/      # session tokens, access gate, role middleware
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── forms/     # per-record validation rules
//! ├── web/       # views, redirects, flash notices, renderer
//! ├── config.rs  # environment configuration
//! ├── logger.rs  # tracing setup and security_log!
//! └── state.rs   # shared application state
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod forms;
pub mod logger;
pub mod state;
pub mod util;
pub mod web;

pub use api::{build_app, build_router};
pub use auth::{CurrentUser, SessionService};
pub use config::Config;
pub use db::DbService;
pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use state::AppState;
