use std::borrow::Borrow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::{Error, OrderedMap, Result, Value};

const PREFIX: &str = "Symbol[";
const SEPARATOR: &str = "].";

pub const WELL_KNOWN_SYMBOLS: [&str; 15] = [
    "asyncIterator",
    "hasInstance",
    "isConcatSpreadable",
    "iterator",
    "match",
    "matchAll",
    "replace",
    "search",
    "species",
    "split",
    "toPrimitive",
    "toStringTag",
    "unscopables",
    "dispose",
    "asyncDispose",
];

/// Symbolic tag whose text is `Symbol[<name length>].<name>`.
///
/// The length counts characters, not bytes. Tags compare and hash by that
/// text and can be looked up with a plain `&str` of the same form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolTag(Arc<str>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// `@name`
    WellKnown,
    /// `#key`
    Registered,
    /// Any other non-empty name.
    Described,
    /// The empty name.
    Anonymous,
}

impl SymbolTag {
    pub fn new(name: &str) -> Self {
        let canonical = format!("{PREFIX}{}{SEPARATOR}{name}", name.chars().count());
        Self(Arc::from(canonical))
    }

    pub fn from_canonical(text: &str) -> Result<Self> {
        let malformed = || Error::invalid("canonical symbol text", "text");
        let rest = text.strip_prefix(PREFIX).ok_or_else(malformed)?;
        let (digits, name) = rest.split_once(SEPARATOR).ok_or_else(malformed)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let length: usize = digits.parse().map_err(|_| malformed())?;
        if length != name.chars().count() {
            return Err(malformed());
        }
        Ok(Self::new(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn name(&self) -> &str {
        match self.0.split_once(SEPARATOR) {
            Some((_, name)) => name,
            None => "",
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self.name().chars().next() {
            Some('@') => SymbolKind::WellKnown,
            Some('#') => SymbolKind::Registered,
            Some(_) => SymbolKind::Described,
            None => SymbolKind::Anonymous,
        }
    }
}

impl Borrow<str> for SymbolTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SymbolTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&Value> for SymbolTag {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Text(name) => Ok(SymbolTag::new(name)),
            // a tag used as a name nests its canonical text
            Value::Symbol(tag) => Ok(SymbolTag::new(tag.as_str())),
            other => Err(Error::invalid("text", other.type_name())),
        }
    }
}

/// The well-known tags, each keyed by itself.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    symbols: OrderedMap<SymbolTag, SymbolTag>,
}

impl SymbolRegistry {
    pub fn well_known() -> Self {
        let mut symbols = OrderedMap::with_capacity(WELL_KNOWN_SYMBOLS.len());
        for name in WELL_KNOWN_SYMBOLS {
            let tag = SymbolTag::new(&format!("@{name}"));
            symbols.insert(tag.clone(), tag);
        }
        log::debug!("built well-known symbol registry ({} tags)", symbols.len());
        Self { symbols }
    }

    /// Looks up a well-known tag by its bare name, e.g. `"iterator"`.
    pub fn get(&self, name: &str) -> Option<&SymbolTag> {
        self.lookup(&SymbolTag::new(&format!("@{name}")))
    }

    /// Returns the registry's own instance of `tag`.
    pub fn lookup(&self, tag: &SymbolTag) -> Option<&SymbolTag> {
        self.symbols.get(tag)
    }

    pub fn contains(&self, tag: &SymbolTag) -> bool {
        self.symbols.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SymbolTag, &SymbolTag)> {
        self.symbols.iter()
    }
}

/// Process-wide keyed tags: one tag per key, shared by every caller.
#[derive(Debug, Default)]
pub struct GlobalSymbols {
    table: RwLock<HashMap<String, SymbolTag>>,
}

impl GlobalSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_key(&self, key: &str) -> SymbolTag {
        if let Some(tag) = self.table.read().get(key) {
            return tag.clone();
        }
        self.table
            .write()
            .entry(key.to_owned())
            .or_insert_with(|| SymbolTag::new(&format!("#{key}")))
            .clone()
    }

    /// The key `tag` was registered under, if it came from `for_key`.
    pub fn key_for(&self, tag: &SymbolTag) -> Option<String> {
        if tag.kind() != SymbolKind::Registered {
            return None;
        }
        let key = &tag.name()[1..];
        self.table.read().get(key).map(|_| key.to_owned())
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}

static INSTALLED: OnceLock<Symbols> = OnceLock::new();

/// Symbol context handed to decoders.
#[derive(Debug)]
pub struct Symbols {
    well_known: SymbolRegistry,
    global: GlobalSymbols,
}

impl Symbols {
    pub fn new() -> Self {
        Self {
            well_known: SymbolRegistry::well_known(),
            global: GlobalSymbols::new(),
        }
    }

    /// Builds the process-wide context on the first call; later calls
    /// return the same instance.
    pub fn install() -> &'static Symbols {
        INSTALLED.get_or_init(|| {
            log::debug!("installing process-wide symbol context");
            Symbols::new()
        })
    }

    /// `None` until [`Symbols::install`] has run.
    pub fn installed() -> Option<&'static Symbols> {
        INSTALLED.get()
    }

    pub fn well_known(&self) -> &SymbolRegistry {
        &self.well_known
    }

    pub fn global(&self) -> &GlobalSymbols {
        &self.global
    }

    /// Turns a prefixed name (`@iterator`, `#key`, `!description`) back
    /// into a tag. `!` is stripped, so `!x` resolves to the tag named `x`.
    /// Anything without a known prefix is the anonymous tag.
    pub fn resolve(&self, name: &str) -> Result<SymbolTag> {
        match name.chars().next() {
            Some('@') => self
                .well_known
                .get(&name[1..])
                .cloned()
                .ok_or_else(|| Error::UnknownSymbol(name.to_owned())),
            Some('#') => Ok(self.global.for_key(&name[1..])),
            Some('!') => Ok(SymbolTag::new(&name[1..])),
            _ => Ok(SymbolTag::new("")),
        }
    }

    /// Inverse of [`Symbols::resolve`]. Registered well-known and keyed
    /// tags keep their own prefix, every other non-empty name gets `!`,
    /// and only the empty name describes as `?`.
    pub fn describe(&self, tag: &SymbolTag) -> String {
        match tag.kind() {
            SymbolKind::WellKnown if self.well_known.contains(tag) => tag.name().to_owned(),
            SymbolKind::Registered if self.global.key_for(tag).is_some() => tag.name().to_owned(),
            SymbolKind::Anonymous => "?".to_owned(),
            _ => format!("!{}", tag.name()),
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        assert_eq!(SymbolTag::new("x").as_str(), "Symbol[1].x");
        assert_eq!(SymbolTag::new("").as_str(), "Symbol[0].");
        assert_eq!(
            SymbolTag::new("@iterator").to_string(),
            "Symbol[9].@iterator"
        );
    }

    #[test]
    fn length_counts_characters() {
        assert_eq!(SymbolTag::new("é").as_str(), "Symbol[1].é");
        assert_eq!(SymbolTag::new("é").name(), "é");
    }

    #[test]
    fn tags_with_the_same_name_are_equal() {
        assert_eq!(SymbolTag::new("dispose"), SymbolTag::new("dispose"));
        assert_ne!(SymbolTag::new("dispose"), SymbolTag::new("@dispose"));
    }

    #[test]
    fn names_may_contain_the_separator() {
        let tag = SymbolTag::new("a].b");
        assert_eq!(tag.as_str(), "Symbol[4].a].b");
        assert_eq!(tag.name(), "a].b");
        assert_eq!(SymbolTag::from_canonical(tag.as_str()), Ok(tag));
    }

    #[test]
    fn from_canonical_validates() {
        assert_eq!(
            SymbolTag::from_canonical("Symbol[1].x"),
            Ok(SymbolTag::new("x"))
        );
        for text in ["x", "Symbol[2].x", "Symbol[].x", "Symbol[a].x", "Symbol[1]x"] {
            assert!(matches!(
                SymbolTag::from_canonical(text),
                Err(Error::InvalidConstruction { .. })
            ));
        }
    }

    #[test]
    fn only_text_values_build_tags() {
        let tag = SymbolTag::try_from(&Value::Text("x".to_string())).unwrap();
        assert_eq!(tag.as_str(), "Symbol[1].x");

        let nested = SymbolTag::try_from(&Value::Symbol(tag.clone())).unwrap();
        assert_eq!(nested.as_str(), "Symbol[11].Symbol[1].x");
        assert_eq!(nested.name(), tag.as_str());

        assert_eq!(
            SymbolTag::try_from(&Value::Bool(true)),
            Err(Error::InvalidConstruction {
                expected: "text",
                got: "boolean"
            })
        );
    }

    #[test]
    fn kinds_follow_the_name_prefix() {
        assert_eq!(SymbolTag::new("@match").kind(), SymbolKind::WellKnown);
        assert_eq!(SymbolTag::new("#app").kind(), SymbolKind::Registered);
        assert_eq!(SymbolTag::new("!x").kind(), SymbolKind::Described);
        assert_eq!(SymbolTag::new("x").kind(), SymbolKind::Described);
        assert_eq!(SymbolTag::new("").kind(), SymbolKind::Anonymous);
    }

    #[test]
    fn registry_has_one_self_keyed_entry_per_name() {
        let registry = SymbolRegistry::well_known();
        assert_eq!(registry.len(), WELL_KNOWN_SYMBOLS.len());
        for ((key, value), name) in registry.iter().zip(WELL_KNOWN_SYMBOLS) {
            assert_eq!(key, value);
            assert_eq!(key.name(), format!("@{name}"));
        }
        let iterator = registry.get("iterator").unwrap();
        assert_eq!(iterator.as_str(), "Symbol[9].@iterator");
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn registry_lookup_returns_the_shared_instance() {
        let registry = SymbolRegistry::well_known();
        let probe = SymbolTag::new("@dispose");
        let stored = registry.lookup(&probe).unwrap();
        assert_eq!(stored, &probe);
        assert!(Arc::ptr_eq(&stored.0, &registry.get("dispose").unwrap().0));
        assert!(!registry.contains(&SymbolTag::new("dispose")));
    }

    #[test]
    fn global_symbols_share_one_tag_per_key() {
        let global = GlobalSymbols::new();
        let first = global.for_key("app");
        let second = global.for_key("app");
        assert!(Arc::ptr_eq(&first.0, &second.0));
        assert_eq!(first.name(), "#app");
        assert_eq!(global.len(), 1);
        assert_eq!(global.key_for(&first), Some("app".to_string()));
        assert_eq!(global.key_for(&SymbolTag::new("#other")), None);
        assert_eq!(global.key_for(&SymbolTag::new("app")), None);
    }

    #[test]
    fn resolve_and_describe_round_trip() {
        let symbols = Symbols::new();
        let well_known = symbols.resolve("@iterator").unwrap();
        assert_eq!(Some(&well_known), symbols.well_known().get("iterator"));
        assert_eq!(symbols.describe(&well_known), "@iterator");

        let registered = symbols.resolve("#iterator").unwrap();
        assert_ne!(registered, well_known);
        assert_eq!(symbols.describe(&registered), "#iterator");

        let described = symbols.resolve("!iterator").unwrap();
        assert_eq!(described, SymbolTag::new("iterator"));
        assert_eq!(symbols.describe(&described), "!iterator");

        let anonymous = symbols.resolve("?").unwrap();
        assert_eq!(anonymous.kind(), SymbolKind::Anonymous);
        assert_eq!(symbols.describe(&anonymous), "?");

        for tag in [well_known, registered, described, anonymous] {
            let name = symbols.describe(&tag);
            assert_eq!(symbols.resolve(&name).unwrap(), tag);
        }
    }

    #[test]
    fn unregistered_and_plain_names_survive_describe() {
        let symbols = Symbols::new();
        let unregistered = SymbolTag::new("#other");
        assert_eq!(symbols.describe(&unregistered), "!#other");

        let plain = SymbolTag::new("x");
        assert_eq!(symbols.describe(&plain), "!x");

        let unknown_well_known = SymbolTag::new("@nope");
        assert_eq!(symbols.describe(&unknown_well_known), "!@nope");

        let bang = SymbolTag::new("!x");
        assert_eq!(symbols.describe(&bang), "!!x");

        for tag in [unregistered, plain, unknown_well_known, bang] {
            let name = symbols.describe(&tag);
            assert_eq!(symbols.resolve(&name).unwrap(), tag);
        }
        assert!(symbols.global().is_empty());
    }

    #[test]
    fn unknown_well_known_names_fail() {
        let symbols = Symbols::new();
        assert_eq!(
            symbols.resolve("@nope"),
            Err(Error::UnknownSymbol("@nope".to_string()))
        );
    }

    #[test]
    fn install_is_one_shot() {
        let first = Symbols::install();
        let second = Symbols::install();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(Symbols::installed().unwrap(), first));
    }

    #[test]
    fn global_symbols_under_concurrency() {
        let symbols = Symbols::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for i in 0..16 {
                        symbols.global().for_key(&format!("key{i}"));
                    }
                });
            }
        });
        assert_eq!(symbols.global().len(), 16);
    }
}
