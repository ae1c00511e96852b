//! clipms - clipboard URI media server.
//!
//! Polls the desktop clipboard and republishes the most recently copied URI
//! as a single-item MediaServer2 catalog on the session bus, so media
//! players browsing `org.gnome.UPnP.MediaServer2.*` can play whatever link
//! was just copied.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clipms::{config::Config, service_manager::ClipboardMediaService};
//! use clipms::services::clipboard::SystemClipboard;
//!
//! # async fn run() -> clipms::Result<()> {
//! let config = Config::load(None)?;
//! let clipboard = SystemClipboard::open(config.server.selection)?;
//! let service = ClipboardMediaService::start(config).await?;
//! service.run(clipboard).await
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface.
pub mod cli;

/// Clipboard and media server services.
pub mod services;

/// Startup and lifetime of the media server.
pub mod service_manager;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{ClipmsError, Result};
