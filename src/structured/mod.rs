//! Loosely-typed results recovered from model text.
//!
//! Model output is a `serde_json::Value` tree with no schema behind it. The
//! helpers here recover that tree from free-form text and read fields out of
//! it without ever assuming a field is present.

mod access;
mod recovery;

pub use access::{amount, is_blank, pretty, scalar_text, section};
pub use recovery::{RecoveryStep, recover};

#[cfg(test)]
mod tests;
