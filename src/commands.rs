//! The `#` command group.
//!
//! Commands look like engines (`#add`, `#help`) but mutate or inspect the
//! router instead of producing a URL. `add` is the only mutator of the user
//! table in the whole crate; everything else is read-only.

use tracing::{info, warn};

use crate::api::{Context, DOCUMENTATION_URL};
use crate::symbols::{Group, GroupKind};

/// Add a user engine: `#add <symbol> <engine-id> <url>`.
///
/// ```text
/// #add ! ex https://example.org/?search={}
/// ```
///
/// The argument must split into exactly three whitespace-separated tokens and
/// the symbol must be a single character that exists in the user table;
/// otherwise the command logs a diagnostic and leaves the table untouched.
pub(crate) fn add(ctx: &mut Context, arg: &str) -> Option<String> {
    let tokens: Vec<&str> = arg.split_whitespace().collect();
    let [symbol, engine_id, url] = tokens[..] else {
        warn!(arg, "add expects `<symbol> <engine-id> <url>`");
        return None;
    };

    let mut chars = symbol.chars();
    let (Some(symbol), None) = (chars.next(), chars.next()) else {
        warn!(symbol, "symbol must be a single character");
        return None;
    };

    let mut user = ctx.user_symbols();
    match user.get_mut(&symbol) {
        Some(Group { kind: GroupKind::Templates(engines), .. }) => {
            engines.insert(engine_id.to_string(), url.to_string());
            ctx.set_user_symbols(&user);
            info!(%symbol, engine_id, url, "added engine");
            Some(format!("added engine {symbol}{engine_id}"))
        }
        Some(_) => {
            // The user table is templates-only by construction.
            warn!(%symbol, "group does not accept engines");
            None
        }
        None => {
            warn!(%symbol, "symbol does not exist in the user table");
            None
        }
    }
}

/// Print usage: `#help`.
pub(crate) fn help(_ctx: &mut Context, _arg: &str) -> Option<String> {
    Some(format!(
        "usage: <symbol><engine-id> <query>, e.g. `!m brazil`\n\
         add your own engine with `#add <symbol> <engine-id> <url>`\n\
         see `webjump --help` for the full list of symbols\n\
         documentation: {DOCUMENTATION_URL}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn context() -> Context {
        Context::new(Box::new(MemoryStore::new()))
    }

    fn user_engine(ctx: &Context, symbol: char, engine_id: &str) -> Option<String> {
        match &ctx.user_symbols().get(&symbol)?.kind {
            GroupKind::Templates(engines) => engines.get(engine_id).cloned(),
            GroupKind::Commands(_) => None,
        }
    }

    #[test]
    fn add_persists_a_new_engine() {
        let mut ctx = context();
        let message = add(&mut ctx, "! ex https://example.org/?search={}");

        assert_eq!(message.as_deref(), Some("added engine !ex"));
        assert_eq!(user_engine(&ctx, '!', "ex").as_deref(), Some("https://example.org/?search={}"));
    }

    #[test]
    fn add_with_unknown_symbol_is_a_no_op() {
        let store = MemoryStore::new();
        let probe = store.clone();
        let mut ctx = Context::new(Box::new(store));

        assert_eq!(add(&mut ctx, "% ex https://example.org/{}"), None);

        // Nothing was persisted at all.
        assert_eq!(probe.snapshot(), None);
    }

    #[test]
    fn add_with_wrong_arity_is_a_no_op() {
        let mut ctx = context();

        assert_eq!(add(&mut ctx, ""), None);
        assert_eq!(add(&mut ctx, "! ex"), None);
        assert_eq!(add(&mut ctx, "! ex https://example.org/{} extra"), None);
        assert_eq!(user_engine(&ctx, '!', "ex"), None);
    }

    #[test]
    fn add_rejects_multi_character_symbols() {
        let mut ctx = context();
        assert_eq!(add(&mut ctx, "!! ex https://example.org/{}"), None);
    }

    #[test]
    fn add_on_the_command_symbol_is_a_no_op() {
        // `#` never exists in the user table, so this hits the unknown-symbol path.
        let mut ctx = context();
        assert_eq!(add(&mut ctx, "# ex https://example.org/{}"), None);
    }

    #[test]
    fn help_returns_usage_and_touches_nothing() {
        let store = MemoryStore::new();
        let probe = store.clone();
        let mut ctx = Context::new(Box::new(store));

        let message = help(&mut ctx, "").unwrap();
        assert!(message.contains("#add"));
        assert!(message.contains(DOCUMENTATION_URL));
        assert_eq!(probe.snapshot(), None);
    }
}
