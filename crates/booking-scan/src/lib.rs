//! # Booking Scan
//!
//! This crate polls the citizen-service booking page for available
//! appointment slots. It fetches and parses the slot listing, and
//! classifies each observation against the previously known earliest
//! date.

/// HTTP client for the booking page.
mod page_client;
pub use page_client::*;

/// Poll classification logic.
mod poll;
pub use poll::*;

/// Error types for scan operations.
mod scan_types;
pub use scan_types::*;
