//! Request decoding.
//!
//! Splits a raw request into its routing parts, resolves them against the
//! layered tables, and produces an [`Outcome`]. The user table is read fresh
//! from the store at the start of every decode, so an `#add` in one call is
//! visible to the next.
//!
//! Fallback policy: anything that cannot be routed precisely (no leading
//! symbol, or a symbol with an engine id no table knows) is treated as a
//! plain query against the default search engine (`!` / `d`), using the
//! *entire* raw request as the query. Only an empty request is `NoRequest`.

use tracing::{debug, warn};

use super::resolve::find_group_with_engine;
use super::template::substitute;
use crate::api::{Context, Outcome};
use crate::symbols::{DEFAULT_SYMBOLS, GroupKind};
use crate::DecodedRequest;

/// Symbol and engine id of the fallback destination for unroutable requests.
const FALLBACK_SYMBOL: char = '!';
const FALLBACK_ENGINE: &str = "d";

/// Decode `request` into an outcome. Never panics on malformed input.
pub(crate) fn decode_request(ctx: &mut Context, request: &str) -> Outcome {
    if request.is_empty() {
        return Outcome::NoRequest;
    }

    let decoded = split_request(request);
    let Some(symbol) = decoded.symbol else {
        debug!(request, "no leading symbol, falling back to default search");
        return fallback(request);
    };

    let user = ctx.user_symbols();
    let tables = [&user, &*DEFAULT_SYMBOLS];
    let Some(group) = find_group_with_engine(&tables, symbol, decoded.engine_id) else {
        debug!(%symbol, engine_id = decoded.engine_id, "unknown engine, falling back to default search");
        return fallback(request);
    };

    match &group.kind {
        GroupKind::Templates(engines) => match engines.get(decoded.engine_id) {
            Some(template) => {
                debug!(%symbol, engine_id = decoded.engine_id, group = %group.name, "building url");
                Outcome::Url(substitute(template, decoded.query))
            }
            None => fallback(request),
        },
        GroupKind::Commands(cmds) => match cmds.get(decoded.engine_id).copied() {
            Some(run) => {
                debug!(%symbol, command = decoded.engine_id, "running command");
                Outcome::Command(run(ctx, decoded.query))
            }
            None => fallback(request),
        },
    }
}

/// Split on the first run of whitespace and extract the candidate symbol.
///
/// `!gh rust cli` becomes symbol `!`, engine id `gh`, query `rust cli`. The
/// symbol is only kept if it is a key of the default table.
fn split_request(request: &str) -> DecodedRequest<'_> {
    let (first, query) = match request.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (request, ""),
    };

    let symbol = first.chars().next().filter(|c| DEFAULT_SYMBOLS.contains_key(c));
    let engine_id = match symbol {
        Some(c) => &first[c.len_utf8()..],
        None => first,
    };

    DecodedRequest { symbol, engine_id, query }
}

/// Route the whole raw request to the default search engine.
fn fallback(request: &str) -> Outcome {
    let template = DEFAULT_SYMBOLS
        .get(&FALLBACK_SYMBOL)
        .and_then(|group| match &group.kind {
            GroupKind::Templates(engines) => engines.get(FALLBACK_ENGINE),
            GroupKind::Commands(_) => None,
        });
    match template {
        Some(template) => Outcome::Url(substitute(template, request)),
        None => {
            // Only reachable if the built-in table loses its default engine.
            warn!(symbol = %FALLBACK_SYMBOL, engine_id = FALLBACK_ENGINE, "default search engine missing");
            Outcome::NoRequest
        }
    }
}
