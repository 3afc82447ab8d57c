//! Laundry POS backend
//!
//! Point-of-sale backend for a laundry business: clients, service categories,
//! weight-tiered prices, and orders, exposed as a REST API.
//!
//! # Module structure
//!
//! ```text
//! pos-server/src/
//! ├── core/          # Configuration, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── pricing/       # Price resolution (weight tiers, custom overrides)
//! ├── orders/        # Client reconciliation + integrated order workflow
//! └── utils/         # Logging, input validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::pricing::{ResolvedPrice, ServiceType};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____           __
  / ___/__  ______/ /____
  \__ \/ / / / __  / ___/
 ___/ / /_/ / /_/ (__  )
/____/\__,_/\__,_/____/
  Laundry POS Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Load .env and initialize logging from the environment.
///
/// Call once at process start, before [`Config::from_env`].
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(Some(&level), log_dir.as_deref());
}
