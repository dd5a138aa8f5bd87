//! Request decoding and resolution engine.
//!
//! This module is the core of the router. Turning a raw request into an
//! outcome is a short pipeline:
//!
//! ```text
//! "!m brazil"
//!     │
//!     v
//! decode.rs ── split first token / rest, extract symbol + engine id
//!     │
//!     v
//! resolve.rs ── find the first table in [user, defaults] whose group
//!     │         for that symbol knows the engine id
//!     │
//!     ├─ Templates group ──▶ template.rs ── substitute({} placeholders,
//!     │                                     percent-encoded components)
//!     │                                        │
//!     │                                        v
//!     │                                   Outcome::Url
//!     │
//!     ├─ Commands group ───▶ run the command ─▶ Outcome::Command
//!     │
//!     └─ no symbol / unknown engine ─▶ default search fallback
//! ```
//!
//! Decoding is total: malformed requests fall back to a plain default-search
//! URL, and only an empty request yields `Outcome::NoRequest`. Nothing in
//! here performs I/O beyond reading the user table through the injected
//! store; navigation belongs to the caller.
//!
//! ## Responsibilities by module
//!
//! - `template.rs`: pure `{}` placeholder substitution, including the
//!   multi-placeholder split and the empty-query strip rules.
//! - `resolve.rs`: layered lookup over an ordered list of tables (user
//!   overrides first).
//! - `decode.rs`: request splitting, fallback policy, and dispatch on the
//!   group kind.
//!
//! ## Debugging
//!
//! Decode decisions are traced at `debug` level; run the binary with
//! `RUST_LOG=webjump=debug` to see them.

#[path = "engine/decode.rs"]
mod decode;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/template.rs"]
mod template;

pub(crate) use decode::decode_request;
