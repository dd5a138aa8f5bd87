//! Engine tables: the data model and the built-in defaults.
//!
//! An engine table maps a *symbol* (one leading character, e.g. `!`) to a
//! [`Group`]. A group is either a set of URL templates keyed by engine id, or
//! a set of commands keyed the same way; the two kinds never mix inside one
//! group. Only the built-in `#` group carries commands.
//!
//! Two tables coexist at runtime: the immutable defaults below, and a user
//! table with the same shape (see [`user_defaults`]) that is persisted through
//! the store and consulted first during resolution.
//!
//! The concrete entries in [`DEFAULT_SYMBOLS`] are starting configuration, not
//! protocol: any table of this shape routes.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::Context;
use crate::commands;

/// An engine table: symbol character to group.
///
/// `BTreeMap` keeps iteration and serialization order deterministic, which in
/// turn keeps the persisted user table stable across writes.
pub type SymbolTable = BTreeMap<char, Group>;

/// A command registered under the command group: takes the runtime context
/// (which owns the store) and the raw argument string after the first token,
/// and returns an optional info message.
pub type CommandFn = fn(&mut Context, &str) -> Option<String>;

/// One symbol group: a display name plus its engines or commands.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub kind: GroupKind,
}

/// What a group dispatches to. Tagged so that resolution and decoding never
/// probe for the presence of one map or the other.
#[derive(Debug, Clone)]
pub enum GroupKind {
    /// Engine id to URL template (`{}` placeholders).
    Templates(BTreeMap<String, String>),
    /// Engine id to command function.
    Commands(BTreeMap<String, CommandFn>),
}

impl Group {
    /// True if this group's kind-map contains `engine_id`.
    pub fn has_engine(&self, engine_id: &str) -> bool {
        match &self.kind {
            GroupKind::Templates(engines) => engines.contains_key(engine_id),
            GroupKind::Commands(cmds) => cmds.contains_key(engine_id),
        }
    }
}

/// The built-in default table. Constructed once, never mutated.
pub(crate) static DEFAULT_SYMBOLS: Lazy<SymbolTable> = Lazy::new(|| {
    BTreeMap::from([
        (
            '!',
            group(
                "search",
                templates([
                    ("?", "https://find.internet4000.com"),
                    ("c", "https://contacts.google.com/search/{}"),
                    ("ciu", "https://caniuse.com/#search={}"),
                    ("d", "https://duckduckgo.com/?q={}"),
                    ("dd", "https://devdocs.io/#q={}"),
                    ("dr", "https://drive.google.com/drive/search?q={}"),
                    ("g", "https://encrypted.google.com/search?q={}"),
                    ("gh", "https://github.com/search?q={}"),
                    ("k", "https://keep.google.com/?q=#search/text%3D{}"),
                    ("l", "https://www.linguee.com/search?query={}"),
                    ("m", "https://www.google.com/maps/search/{}"),
                    ("npm", "https://www.npmjs.com/search?q={}"),
                    ("osm", "https://www.openstreetmap.org/search?query={}"),
                    ("r4", "https://radio4000.com/search?search={}"),
                    ("so", "https://stackoverflow.com/search?q={}"),
                    ("tr", "https://translate.google.com/?q={}"),
                    ("vinyl", "https://vinyl.internet4000.com/#gsc.q={}"),
                    ("w", "https://en.wikipedia.org/w/index.php?search={}"),
                    ("wa", "http://www.wolframalpha.com/input/?i={}"),
                    ("y", "https://www.youtube.com/results?search_query={}"),
                    ("aurl", "https://web.archive.org/web/{}"),
                ]),
            ),
        ),
        (
            '+',
            group(
                "do",
                templates([
                    ("draw", "https://docs.google.com/drawings/create?title={}"),
                    ("doc", "https://docs.google.com/document/create?title={}"),
                    ("r4", "https://radio4000.com/add?url={}"),
                    ("r4p", "https://radio4000.com/{}/play"),
                    ("r4pr", "https://radio4000.com/{}/play/random"),
                    ("sheet", "https://docs.google.com/spreadsheets/create?title={}"),
                    ("gmail", "https://mail.google.com/mail/#inbox?compose=new&title={}"),
                    ("note", "https://note.internet4000.com/note?content={}"),
                    ("wr", "https://en.wikipedia.org/wiki/Special:Random"),
                    ("wri", "https://commons.wikimedia.org/wiki/Special:Random/File"),
                    ("aurl", "https://web.archive.org/save/{}"),
                ]),
            ),
        ),
        (
            '&',
            group(
                "build",
                templates([
                    ("gh", "https://github.com/{}/{}"),
                    ("gl", "https://gitlab.com/{}/{}"),
                    ("firebase", "https://console.firebase.google.com/project/{}/overview"),
                    ("netlify", "https://app.netlify.com/sites/{}/overview"),
                    ("r4", "https://radio4000.com/{}"),
                ]),
            ),
        ),
        (
            '#',
            Group {
                name: "command".to_string(),
                kind: GroupKind::Commands(BTreeMap::from([
                    ("add".to_string(), commands::add as CommandFn),
                    ("help".to_string(), commands::help as CommandFn),
                ])),
            },
        ),
    ])
});

fn group(name: &str, engines: BTreeMap<String, String>) -> Group {
    Group { name: name.to_string(), kind: GroupKind::Templates(engines) }
}

fn templates<const N: usize>(entries: [(&str, &str); N]) -> BTreeMap<String, String> {
    entries.into_iter().map(|(id, url)| (id.to_string(), url.to_string())).collect()
}

/// The built-in default table.
pub fn default_symbols() -> &'static SymbolTable {
    &DEFAULT_SYMBOLS
}

/// A fresh user table: the default table's symbols with every group's engines
/// cleared, minus command groups. This keeps the user table's key set a subset
/// of the defaults' and makes it serializable (commands are code, not data).
pub fn user_defaults() -> SymbolTable {
    DEFAULT_SYMBOLS
        .iter()
        .filter_map(|(symbol, group)| match group.kind {
            GroupKind::Templates(_) => Some((
                *symbol,
                Group { name: group.name.clone(), kind: GroupKind::Templates(BTreeMap::new()) },
            )),
            GroupKind::Commands(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_the_command_group() {
        let table = default_symbols();
        let group = table.get(&'#').unwrap();
        assert_eq!(group.name, "command");
        assert!(matches!(group.kind, GroupKind::Commands(_)));
        assert!(group.has_engine("add"));
        assert!(group.has_engine("help"));
    }

    #[test]
    fn user_defaults_mirror_symbols_without_commands() {
        let user = user_defaults();

        assert!(!user.contains_key(&'#'));
        for (symbol, group) in &user {
            let default = default_symbols().get(symbol).expect("user symbol must exist in defaults");
            assert_eq!(group.name, default.name);
            match &group.kind {
                GroupKind::Templates(engines) => assert!(engines.is_empty()),
                GroupKind::Commands(_) => panic!("user table must not carry commands"),
            }
        }
    }
}
