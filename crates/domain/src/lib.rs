//! # nhc-domain
//!
//! Pure domain vocabulary for the Niko Home Control fan bridge.
//!
//! ## Responsibilities
//! - Define the four **discrete fan speeds** and their preset-mode names,
//!   including the fixed code↔preset table
//! - Define **device metadata** surfaced to the host's device registry
//! - Define the **capability flags** a fan entity advertises
//! - Provide the **percentage helpers** that snap `[0, 100]` onto ordered
//!   preset lists
//! - Define the error conventions shared across the workspace
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.

pub mod device;
pub mod error;
pub mod features;
pub mod percentage;
pub mod speed;
