//! Layered table resolution.
//!
//! Resolution answers one question: given an ordered list of engine tables,
//! which table's group should serve this (symbol, engine id) pair? The caller
//! supplies the tables in priority order (the user table before the built-in
//! defaults), so a user-defined engine always shadows a default one.
//!
//! ```text
//! [user, defaults] ── find_group_with_engine('!', "g")
//!        │
//!        ├─ user has '!' and user['!'] knows "g"  -> user['!']
//!        └─ otherwise, same check on defaults     -> defaults['!'] or None
//! ```
//!
//! Absence is not an error: `None` is the defined "unknown engine" outcome
//! and callers fall back to the default search.

use crate::symbols::{Group, SymbolTable};

/// Return the first table's group that has `symbol` and knows `engine_id`,
/// in the priority order of `tables`. `None` if no table matches or `tables`
/// is empty.
pub(crate) fn find_group_with_engine<'a>(
    tables: &[&'a SymbolTable],
    symbol: char,
    engine_id: &str,
) -> Option<&'a Group> {
    tables.iter().find_map(|table| {
        let group = table.get(&symbol)?;
        group.has_engine(engine_id).then_some(group)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{GroupKind, default_symbols, user_defaults};

    fn user_with_engine(symbol: char, engine_id: &str, url: &str) -> SymbolTable {
        let mut table = user_defaults();
        if let Some(Group { kind: GroupKind::Templates(engines), .. }) = table.get_mut(&symbol) {
            engines.insert(engine_id.to_string(), url.to_string());
        }
        table
    }

    fn template_of(group: &Group, engine_id: &str) -> Option<String> {
        match &group.kind {
            GroupKind::Templates(engines) => engines.get(engine_id).cloned(),
            GroupKind::Commands(_) => None,
        }
    }

    #[test]
    fn defaults_resolve_when_user_table_is_empty() {
        let user = user_defaults();
        let tables = [&user, default_symbols()];

        let group = find_group_with_engine(&tables, '!', "g").unwrap();
        assert_eq!(group.name, "search");
        assert_eq!(template_of(group, "g").as_deref(), Some("https://encrypted.google.com/search?q={}"));
    }

    #[test]
    fn user_engine_shadows_the_default_one() {
        let user = user_with_engine('!', "g", "https://my.google.example/?q={}");
        let tables = [&user, default_symbols()];

        let group = find_group_with_engine(&tables, '!', "g").unwrap();
        assert_eq!(template_of(group, "g").as_deref(), Some("https://my.google.example/?q={}"));
    }

    #[test]
    fn unknown_symbol_or_engine_is_none() {
        let user = user_defaults();
        let tables = [&user, default_symbols()];

        assert!(find_group_with_engine(&tables, '%', "g").is_none());
        assert!(find_group_with_engine(&tables, '!', "no-such-engine").is_none());
        assert!(find_group_with_engine(&[], '!', "g").is_none());
    }

    #[test]
    fn command_groups_resolve_by_their_command_ids() {
        let user = user_defaults();
        let tables = [&user, default_symbols()];

        let group = find_group_with_engine(&tables, '#', "add").unwrap();
        assert!(matches!(group.kind, GroupKind::Commands(_)));
    }
}
