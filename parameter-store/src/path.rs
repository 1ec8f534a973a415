//! Structured path lookup over JSON documents.
//!
//! Paths are dot separated. A backslash escapes the next character, so
//! `a\.b` addresses the key `a.b` and `a\*` the key `a*`. Object components
//! match keys literally or with `*` and `?` wildcards; the first key in
//! document order wins. Array components are a decimal index, or `#`: a
//! trailing `#` yields the element count, `#.rest` evaluates `rest` against
//! every element and collects the results that exist.
//!
//! Resolved nodes are returned as they appear in the source text: numbers
//! keep their digits, objects and arrays keep their spacing. Only strings are
//! unescaped.
//!
//! ```
//! use parameter_store::path::get;
//!
//! let doc = r#"{"db":{"hosts":["a","b"],"port":5432}}"#;
//! assert_eq!(get(doc, "db.port").as_deref(), Some("5432"));
//! assert_eq!(get(doc, "db.hosts.1").as_deref(), Some("b"));
//! assert_eq!(get(doc, "db.hosts.#").as_deref(), Some("2"));
//! assert_eq!(get(doc, "db.user"), None);
//! ```

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use std::borrow::Cow;
use std::fmt;

/// Evaluate `path` against the JSON text `document`.
///
/// Returns the string form of the resolved node, or `None` when the document
/// is not JSON or the path does not resolve. Null becomes the empty string.
#[must_use]
pub fn get(document: &str, path: &str) -> Option<String> {
    let root: &RawValue = serde_json::from_str(document).ok()?;
    let components = split_components(path);
    if components.is_empty() {
        return None;
    }
    resolve(root.get(), &components).map(|raw| raw_to_string(&raw))
}

fn raw_to_string(raw: &str) -> String {
    match raw.as_bytes().first() {
        Some(b'"') => serde_json::from_str(raw).unwrap_or_else(|_| raw.to_string()),
        Some(b'n') => String::new(),
        _ => raw.to_string(),
    }
}

/// Object members in document order, duplicates included.
struct Members<'a>(Vec<(String, &'a RawValue)>);

impl<'de> Deserialize<'de> for Members<'de> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members<'de>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
                let mut members = Vec::new();
                while let Some(member) = map.next_entry::<String, &'de RawValue>()? {
                    members.push(member);
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glob {
    Char(char),
    One,
    Any,
}

#[derive(Debug, PartialEq, Eq)]
struct Component {
    text: String,
    glob: Option<Vec<Glob>>,
}

impl Component {
    fn matches(&self, key: &str) -> bool {
        match &self.glob {
            Some(glob) => wildcard_match(glob, key),
            None => self.text == key,
        }
    }
}

fn split_components(path: &str) -> Vec<Component> {
    let mut components = Vec::new();
    let mut text = String::new();
    let mut glob = Vec::new();
    let mut wildcard = false;
    let mut chars = path.chars();

    let mut finish = |text: &mut String, glob: &mut Vec<Glob>, wildcard: &mut bool| {
        let glob = std::mem::take(glob);
        components.push(Component {
            text: std::mem::take(text),
            glob: std::mem::take(wildcard).then_some(glob),
        });
    };

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    text.push(escaped);
                    glob.push(Glob::Char(escaped));
                }
            }
            '.' => finish(&mut text, &mut glob, &mut wildcard),
            '*' | '?' => {
                wildcard = true;
                text.push(c);
                glob.push(if c == '*' { Glob::Any } else { Glob::One });
            }
            _ => {
                text.push(c);
                glob.push(Glob::Char(c));
            }
        }
    }
    if !text.is_empty() || !path.is_empty() {
        finish(&mut text, &mut glob, &mut wildcard);
    }
    components
}

fn resolve<'a>(raw: &'a str, components: &[Component]) -> Option<Cow<'a, str>> {
    let Some((head, rest)) = components.split_first() else {
        return Some(Cow::Borrowed(raw));
    };

    match raw.as_bytes().first()? {
        b'{' => {
            let Members(members) = serde_json::from_str(raw).ok()?;
            let (_, child) = members.into_iter().find(|(key, _)| head.matches(key))?;
            resolve(child.get(), rest)
        }
        b'[' if head.glob.is_none() => {
            let items: Vec<&RawValue> = serde_json::from_str(raw).ok()?;
            if head.text == "#" {
                if rest.is_empty() {
                    return Some(Cow::Owned(items.len().to_string()));
                }
                let collected: Vec<Cow<'_, str>> = items
                    .iter()
                    .filter_map(|item| resolve(item.get(), rest))
                    .collect();
                return Some(Cow::Owned(format!("[{}]", collected.join(","))));
            }
            let index: usize = head.text.parse().ok()?;
            resolve(items.get(index)?.get(), rest)
        }
        _ => None,
    }
}

fn wildcard_match(pattern: &[Glob], candidate: &str) -> bool {
    let candidate: Vec<char> = candidate.chars().collect();
    let (mut p, mut c) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while c < candidate.len() {
        match pattern.get(p) {
            Some(Glob::Any) => {
                backtrack = Some((p, c));
                p += 1;
            }
            Some(Glob::One) => {
                p += 1;
                c += 1;
            }
            Some(Glob::Char(ch)) if *ch == candidate[c] => {
                p += 1;
                c += 1;
            }
            _ => match backtrack {
                Some((star_p, star_c)) => {
                    p = star_p + 1;
                    c = star_c + 1;
                    backtrack = Some((star_p, star_c + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|g| *g == Glob::Any)
}
