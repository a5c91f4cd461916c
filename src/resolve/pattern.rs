//! Accumulator for one argument being resolved: plaintext and a glob-aware
//! regex built side by side.

/// Regex fragment a `*` compiles to. Never crosses a path separator.
pub const WILDCARD_REGEX: &str = "[^/]*";

/// Path separator recognised in arguments.
pub const SEPARATOR: char = '/';

/// A partially built argument.
///
/// `plaintext` is what the argument looks like with every wildcard taken
/// literally; `regex` is the same text with literals escaped and each
/// unquoted `*` replaced by [`WILDCARD_REGEX`]. The byte offsets of each
/// separator are kept for both forms so the final path segment can be cut
/// out without re-scanning either string.
#[derive(Debug, Clone, Default)]
pub struct RegexArgument {
    plaintext: String,
    regex: String,
    is_glob: bool,
    dirs_only: bool,
    quoted: bool,
    last_was_wildcard: bool,
    separators: Vec<(usize, usize)>,
}

/// The pieces the glob matcher needs: where to look and what to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern<'a> {
    /// Literal directory context, including its trailing separator (may be empty).
    pub prefix: &'a str,
    /// Regex for the final segment, unanchored.
    pub segment_regex: &'a str,
    /// Only directory entries may match (the pattern ended in `*/`).
    pub dirs_only: bool,
}

impl RegexArgument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one character taken literally (quoted text, substitution output
    /// or an ordinary unquoted character).
    pub fn push_literal(&mut self, c: char) {
        if c == SEPARATOR {
            self.dirs_only = self.last_was_wildcard;
            self.separators.push((self.plaintext.len(), self.regex.len()));
        } else {
            self.dirs_only = false;
        }
        self.last_was_wildcard = false;
        self.plaintext.push(c);
        let mut buf = [0u8; 4];
        self.regex.push_str(&regex::escape(c.encode_utf8(&mut buf)));
    }

    pub fn push_literal_str(&mut self, s: &str) {
        for c in s.chars() {
            self.push_literal(c);
        }
    }

    /// Append an unquoted `*`.
    pub fn push_wildcard(&mut self) {
        self.is_glob = true;
        self.dirs_only = false;
        self.last_was_wildcard = true;
        self.plaintext.push('*');
        self.regex.push_str(WILDCARD_REGEX);
    }

    /// Record that a quote pair contributed to this argument, so it survives
    /// even when it resolves to the empty string.
    pub fn mark_quoted(&mut self) {
        self.quoted = true;
    }

    pub fn is_glob(&self) -> bool {
        self.is_glob
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn dirs_only(&self) -> bool {
        self.dirs_only
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn regex(&self) -> &str {
        &self.regex
    }

    pub fn into_plaintext(self) -> String {
        self.plaintext
    }

    /// Split into directory context and final-segment pattern.
    ///
    /// For a `dirs_only` pattern the trailing separator is not a segment
    /// boundary: `src/*/` matches directories of `src/` against `*`.
    /// Returns `None` when the argument contains no wildcard.
    pub fn glob_pattern(&self) -> Option<GlobPattern<'_>> {
        if !self.is_glob {
            return None;
        }
        let (boundaries, end) = if self.dirs_only {
            let (&last, rest) = self.separators.split_last()?;
            (rest, last)
        } else {
            (&self.separators[..], (self.plaintext.len(), self.regex.len()))
        };
        let (plain_start, regex_start) = match boundaries.last() {
            Some(&(p, r)) => (p + SEPARATOR.len_utf8(), r + SEPARATOR.len_utf8()),
            None => (0, 0),
        };
        Some(GlobPattern {
            prefix: &self.plaintext[..plain_start],
            segment_regex: &self.regex[regex_start..end.1],
            dirs_only: self.dirs_only,
        })
    }
}
