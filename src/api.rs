use std::borrow::Cow;

use crate::engine;
use crate::store::{JsonFileStore, Store, load_user_symbols, save_user_symbols};
use crate::symbols::SymbolTable;

/// Where the router's usage documentation lives; surfaced by the `#help`
/// command and the CLI help text.
pub const DOCUMENTATION_URL: &str = "https://github.com/internet4000/find";

/// Routing context.
///
/// This owns the store through which the user table is loaded and persisted.
/// Resolution order and persistence timing are explicit: every decode reads
/// the user table fresh through this store, and `#add` writes the whole table
/// back through it.
pub struct Context {
    store: Box<dyn Store>,
}

impl Default for Context {
    fn default() -> Self {
        Self { store: Box::new(JsonFileStore::default()) }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("store", &"<store>").finish()
    }
}

impl Context {
    /// Create a context backed by `store`.
    pub fn new(store: Box<dyn Store>) -> Self {
        Self { store }
    }

    /// The current user table, freshly loaded. Absent or corrupt stored data
    /// yields a fresh mirrored table (defaults' symbols, empty engines).
    pub fn user_symbols(&self) -> SymbolTable {
        load_user_symbols(self.store.as_ref())
    }

    /// Persist `table` as the new user table, whole-document.
    pub fn set_user_symbols(&self, table: &SymbolTable) {
        save_user_symbols(self.store.as_ref(), table);
    }
}

/// What a request resolved to.
///
/// The three arms are deliberately distinct: only `Url` may be handed to a
/// navigation sink, `Command` carries a command's optional message, and
/// `NoRequest` means no request was supplied at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A destination URL, ready for [`ensure_protocol`] + navigation.
    Url(String),
    /// A command ran; its optional info message.
    Command(Option<String>),
    /// Empty input; nothing to route.
    NoRequest,
}

/// Decode `request` with a default [`Context`] (user table in the config-dir
/// JSON store).
///
/// # Example
/// ```
/// use webjump::{Context, MemoryStore, Outcome, decode_with};
///
/// let mut ctx = Context::new(Box::new(MemoryStore::new()));
/// let out = decode_with("!m brazil", &mut ctx);
/// assert_eq!(out, Outcome::Url("https://www.google.com/maps/search/brazil".to_string()));
/// ```
pub fn decode(request: &str) -> Outcome {
    decode_with(request, &mut Context::default())
}

/// Decode `request` against the user table behind `ctx` and the built-in
/// defaults. Total: malformed requests fall back to the default search and
/// only empty input yields [`Outcome::NoRequest`].
pub fn decode_with(request: &str, ctx: &mut Context) -> Outcome {
    engine::decode_request(ctx, request)
}

/// Decode `request` and, when it resolves to a non-empty URL, hand the
/// protocol-ready destination to `navigate`. Command results and `NoRequest`
/// never reach the sink. Returns the outcome either way.
pub fn find_with(request: &str, ctx: &mut Context, navigate: impl FnOnce(&str)) -> Outcome {
    let outcome = decode_with(request, ctx);
    if let Outcome::Url(url) = &outcome {
        if !url.is_empty() {
            navigate(&ensure_protocol(url));
        }
    }
    outcome
}

/// True if `url` already names a protocol: it starts with `//` or contains
/// `://`.
pub fn has_protocol(url: &str) -> bool {
    url.starts_with("//") || url.contains("://")
}

/// Prefix `url` with `//` when it lacks a protocol, forcing protocol-relative
/// resolution at the navigation sink.
pub fn ensure_protocol(url: &str) -> Cow<'_, str> {
    if has_protocol(url) { Cow::Borrowed(url) } else { Cow::Owned(format!("//{url}")) }
}
