//! Cross-cutting helpers.
//!
//! - `logging`: tracing initialization and credential redaction.

pub mod logging;
