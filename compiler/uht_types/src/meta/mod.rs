//! String metadata attached to declarations.
//!
//! Keys optionally carry a small integer index, used for per-enum-value
//! entries (`ToolTip` of value 2 is `ToolTip:2`). Duplicate key + index is
//! last-write-wins.

use std::fmt;

use rustc_hash::FxHashMap;

/// Metadata key with an optional per-value index.
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct MetaKey {
    pub name: String,
    pub index: Option<u32>,
}

impl MetaKey {
    pub fn new(name: impl Into<String>) -> Self {
        MetaKey {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed(name: impl Into<String>, index: u32) -> Self {
        MetaKey {
            name: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}:{index}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Metadata map of a declaration node.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct MetaData {
    entries: FxHashMap<MetaKey, String>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(MetaKey::new(name), value.into());
    }

    pub fn add_indexed(&mut self, name: impl Into<String>, index: u32, value: impl Into<String>) {
        self.entries.insert(MetaKey::indexed(name, index), value.into());
    }

    pub fn insert(&mut self, key: MetaKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&MetaKey::new(name)).map(String::as_str)
    }

    pub fn get_indexed(&self, name: &str, index: u32) -> Option<&str> {
        self.entries
            .get(&MetaKey::indexed(name, index))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&MetaKey::new(name))
    }

    /// Boolean metadata: present and not `"false"`.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|v| !v.eq_ignore_ascii_case("false"))
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(&MetaKey::new(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `other` over this map.
    pub fn merge_from(&mut self, other: &MetaData) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Entries ordered by key.
    pub fn sorted(&self) -> Vec<(&MetaKey, &str)> {
        let mut out: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k, v.as_str()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Canonical text form: `Key="value", Key:1="value"` ordered by key.
    ///
    /// `parse_canonical(to_canonical())` reproduces the map exactly.
    pub fn to_canonical(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&key.to_string());
            out.push_str("=\"");
            for c in value.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
        }
        out
    }

    /// Parse the form produced by [`MetaData::to_canonical`].
    pub fn parse_canonical(text: &str) -> Result<MetaData, String> {
        let mut meta = MetaData::new();
        let mut chars = text.chars().peekable();
        loop {
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            if chars.peek().is_none() {
                return Ok(meta);
            }

            let mut key = String::new();
            while let Some(&c) = chars.peek() {
                if c == '=' {
                    break;
                }
                key.push(c);
                chars.next();
            }
            if chars.next() != Some('=') || chars.next() != Some('"') {
                return Err(format!("expected `=\"` after key '{key}'"));
            }

            let mut value = String::new();
            loop {
                match chars.next() {
                    Some('\\') => match chars.next() {
                        Some(c) => value.push(c),
                        None => return Err("dangling escape".to_owned()),
                    },
                    Some('"') => break,
                    Some(c) => value.push(c),
                    None => return Err(format!("unterminated value for '{key}'")),
                }
            }

            let key = match key.rsplit_once(':') {
                Some((name, index)) if index.chars().all(|c| c.is_ascii_digit()) && !index.is_empty() => {
                    let index = index
                        .parse()
                        .map_err(|_| format!("invalid index in key '{key}'"))?;
                    MetaKey::indexed(name, index)
                }
                _ => MetaKey::new(key),
            };
            meta.insert(key, value);

            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            match chars.next() {
                Some(',') | None => {}
                Some(c) => return Err(format!("unexpected '{c}' between entries")),
            }
        }
    }
}
