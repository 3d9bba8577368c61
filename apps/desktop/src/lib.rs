//! # Facture Desktop Library
//!
//! Application layer of the invoice generator. The window toolkit links
//! against this crate and only translates clicks into commands.
//!
//! ## Module Organization
//! ```text
//! facture_desktop_lib/
//! ├── lib.rs          ◄─── You are here (logging & session startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── facture.toml + FACTURE_* environment
//! │   └── draft.rs    ◄─── The invoice being typed
//! ├── workflow.rs     ◄─── Form state machine, finalization
//! ├── render/
//! │   ├── mod.rs      ◄─── InvoiceRenderer trait, cleanup
//! │   ├── layout.rs   ◄─── Cell placement
//! │   └── xlsx.rs     ◄─── FACTURE {n}.xlsx writer
//! ├── commands/
//! │   ├── client.rs   ◄─── Client picker commands
//! │   └── invoice.rs  ◄─── Form commands and view
//! ├── messages.rs     ◄─── French / Chinese labels
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG or "info,facture=debug"           │
//! │  2. ConfigState::load_or_default(None)                                 │
//! │  3. start_session(&config)                                             │
//! │     • Store::open  ─────────► clients.json, invoiceNumber.json         │
//! │     • XlsxRenderer ─────────► output directory                         │
//! │     • Workflow     ─────────► CollectingClient                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod messages;
pub mod render;
pub mod state;
pub mod workflow;

use facture_core::InvoiceCalculator;
use facture_store::Store;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiResult;
use render::XlsxRenderer;
use state::ConfigState;
use workflow::Workflow;

/// The workflow as wired for the real application.
pub type Session = Workflow<XlsxRenderer>;

/// Installs the global tracing subscriber.
///
/// Uses `RUST_LOG` when set. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,facture=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Opens the data files and returns a workflow on the client page.
///
/// ## Errors
/// `CORRUPT_DATA` when clients.json cannot be parsed, `PERSISTENCE_ERROR`
/// when it cannot be read.
pub fn start_session(config: &ConfigState) -> ApiResult<Session> {
    let store_config = config.store_config();
    let store = Store::open(&store_config)?;

    let output_dir = config.resolve_output_dir();
    info!(
        data_dir = %store_config.data_dir.display(),
        output_dir = %output_dir.display(),
        clients = store.clients().len(),
        next_invoice = store.sequencer().next(),
        "Session started"
    );

    let renderer = XlsxRenderer::new(output_dir).currency_symbol(config.currency_symbol.clone());

    Ok(Workflow::new(store, renderer, InvoiceCalculator::standard()).seller(config.seller.clone()))
}
