//! Printing Module
//!
//! Plain-text order receipts sized for thermal paper.

pub mod receipt;

pub use receipt::ReceiptRenderer;

/// Receipt width for 58mm paper
pub const DEFAULT_RECEIPT_WIDTH: usize = 32;
