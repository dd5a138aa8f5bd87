extern crate self as webjump;

#[macro_use]
mod macros;
mod api;
mod commands;
mod engine;
mod store;
mod symbols;

pub use api::{
    Context, DOCUMENTATION_URL, Outcome, decode, decode_with, ensure_protocol, find_with, has_protocol,
};
pub use store::{JsonFileStore, MemoryStore, Store, StoreError};
pub use symbols::{CommandFn, Group, GroupKind, SymbolTable, default_symbols, user_defaults};

// --- Internal types ---------------------------------------------------------

/// A raw request split into its routing parts: an optional leading symbol, the
/// engine id that followed it, and the remaining query text.
///
/// Derived per call in `engine/decode.rs`; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodedRequest<'a> {
    /// First character of the first token, if it is a known symbol.
    pub symbol: Option<char>,
    /// First token with its leading character removed (may be empty).
    pub engine_id: &'a str,
    /// Everything after the first run of whitespace (may be empty).
    pub query: &'a str,
}
