//! # nhc-app
//!
//! Host-side ports for the Niko Home Control fan bridge.
//!
//! ## Responsibilities
//! - Define the **fan-entity contract** a platform implements: read-only
//!   property getters plus the speed command handlers, as an explicit trait
//!   with a fixed method set (no mutable base class)
//! - Define the **entity registration** callback surface a platform invokes
//!   once with everything it built
//! - Provide the **in-process update bus** entities use to ask the host for
//!   a state refresh
//!
//! ## Dependency rule
//! Depends on `nhc-domain` only (plus `tokio::sync` for channels).
//! Adapter crates depend on *this* crate, not the reverse.

pub mod ports;
pub mod update_bus;
