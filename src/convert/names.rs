//! Name normalization and collision resolution
//!
//! Every generated artifact name goes through [`normalize_name`] and is then
//! claimed in a per-bundle [`NameRegistry`].

use std::collections::HashSet;

/// Slug returned when nothing usable is left of the input
pub const FALLBACK_NAME: &str = "item";

/// Derive a slug restricted to `[a-z0-9_-]`.
///
/// Lower-cases the trimmed input, turns every other character (path
/// separators, colons, whitespace, punctuation) into a hyphen, collapses
/// hyphen runs and strips leading/trailing hyphens. Total: an input with
/// nothing usable yields [`FALLBACK_NAME`].
pub fn normalize_name(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        slug.to_string()
    }
}

/// Names already claimed within one bundle-generation pass
#[derive(Debug, Default)]
pub struct NameRegistry {
    claimed: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or the first free `base-2`, `base-3`, ... if it is taken.
    pub fn claim(&mut self, base: &str) -> String {
        if self.claimed.insert(base.to_string()) {
            return base.to_string();
        }

        let mut index = 2usize;
        loop {
            let candidate = format!("{base}-{index}");
            if self.claimed.insert(candidate.clone()) {
                return candidate;
            }
            index += 1;
        }
    }

    /// Mark `name` as taken without suffixing; returns false if it already was
    pub fn reserve(&mut self, name: &str) -> bool {
        self.claimed.insert(name.to_string())
    }
}

/// Whether a raw skill name is safe to use as a single path component
pub fn is_valid_skill_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
