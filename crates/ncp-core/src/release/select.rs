//! Asset selection by shell-style filename pattern.

use globset::{GlobBuilder, GlobMatcher};

use super::Asset;

/// Compiled, case-sensitive filename pattern with fnmatch semantics: `*`, `?`
/// and `[...]` are special, everything else (braces, backslash, an unclosed
/// `[`) is literal.
#[derive(Debug, Clone)]
pub struct AssetMatcher {
    matcher: GlobMatcher,
}

impl AssetMatcher {
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let glob = GlobBuilder::new(&escape_literals(pattern))
            .backslash_escape(false)
            .allow_unclosed_class(true)
            .build()?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// Rewrites literal characters that globset would treat as syntax: braces
/// outside a class and an unclosed `[` become one-member classes.
fn escape_literals(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                    continue;
                }
                None => out.push_str("[[]"),
            },
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` right after
/// `[` or `[!` is a member, not the end.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if chars.get(i) == Some(&'!') {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    chars[i.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|p| i + p)
}

/// First asset, in list order, whose name matches.
pub fn find_asset<'a>(assets: &'a [Asset], matcher: &AssetMatcher) -> Option<&'a Asset> {
    assets.iter().find(|a| matcher.is_match(&a.name))
}
