//! # TaskTally Backend
//!
//! Contains all non-UI logic for the TaskTally expense ledger.
//!
//! This crate brings together:
//! - **Domain**: The ledger, its rules and the read-side services
//! - **Storage**: JSON-file persistence of the whole ledger
//! - **IO**: REST endpoints a presentation layer drives the ledger through
//!
//! ## Architecture
//!
//! ```text
//! Presentation (browser, desktop shell)
//!     ↓
//! IO Layer (axum REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (LedgerEngine and its services)
//!     ↓
//! Storage Layer (expenses.json in the data directory)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::LedgerConfig;
use crate::domain::{
    ExpenseService, ExpenseTableConfig, ExpenseTableService, ExportConfig, ExportService,
    LedgerEngine, SystemClock, TotalService,
};
use crate::storage::{ExpenseRepository, FileConnection};

/// Main application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<LedgerEngine>>,
    pub config: Arc<LedgerConfig>,
}

impl AppState {
    pub fn new(engine: LedgerEngine, config: LedgerConfig) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            config: Arc::new(config),
        }
    }

    /// Lock the engine for one command, recovering from a poisoned lock
    pub fn engine(&self) -> MutexGuard<'_, LedgerEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build the engine described by `config` on top of the file store
pub fn initialize_backend(config: &LedgerConfig) -> Result<AppState> {
    info!("📁 Setting up storage in {}", config.data_directory.display());
    let connection = FileConnection::new(&config.data_directory)?;
    let repository = ExpenseRepository::new(connection);

    info!("Setting up domain model");
    let expense_service = ExpenseService::new(Arc::new(repository), Arc::new(SystemClock));
    let total_service = TotalService::new(config.currency_name.clone());
    let table_service = ExpenseTableService::with_config(ExpenseTableConfig {
        name_display_limit: config.name_display_limit,
    });
    let export_service = ExportService::new(ExportConfig {
        currency_symbol: config.currency_symbol.clone(),
        min_export_records: config.min_export_records,
        ..ExportConfig::default()
    });

    let engine = LedgerEngine::with_services(
        expense_service,
        total_service,
        table_service,
        export_service,
    );
    if let Some(warning) = engine.startup_warning() {
        warn!("⚠️ Starting with an empty ledger: {}", warning);
    }

    Ok(AppState::new(engine, config.clone()))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a separately served frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:8080"))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/expenses",
            get(io::rest::expense_apis::list_expenses).post(io::rest::expense_apis::add_expense),
        )
        .route("/expenses/clear", post(io::rest::expense_apis::clear_expenses))
        .route(
            "/expenses/export",
            get(io::rest::export_apis::export_csv).post(io::rest::export_apis::export_to_file),
        )
        .route(
            "/expenses/:id",
            put(io::rest::expense_apis::update_expense)
                .delete(io::rest::expense_apis::delete_expense),
        )
        .route("/format/amount", post(io::rest::format_apis::format_amount))
        .route("/format/quantity", post(io::rest::format_apis::format_quantity));

    let static_dir = app_state.config.static_dir.clone();
    let router = Router::new().nest("/api", api_routes);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(cors).with_state(app_state)
}
