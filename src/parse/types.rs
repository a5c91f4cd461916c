//! Types produced by the line parser and consumed by the command builder.

/// Shell operator separating consecutive segments of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `;`: run next unconditionally
    Semi,
    /// `|`: pipe stdout
    Pipe,
}

impl Operator {
    /// The operator's shell syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Semi => ";",
            Operator::Pipe => "|",
        }
    }
}

/// One simple command: raw, still-quoted tokens including any `<`/`>` operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub tokens: Vec<String>,
}

/// Stages joined by `|`. Always holds at least one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

/// A fully split line: pipelines in the order `;` separates them.
///
/// For `echo a | cat; ls` there are two pipelines, the first with two stages.
/// Empty sequence elements (a trailing `;`) are already dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    pub pipelines: Vec<Pipeline>,
}

/// Quote context while scanning raw shell text.
///
/// Backticks nest inside double quotes (`"a `cmd` b"`), so the double-quoted
/// backtick region has its own state that returns to `Double` when closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteState {
    Unquoted,
    Single,
    Double,
    Backtick,
    DoubleBacktick,
}

impl QuoteState {
    /// State after consuming `c`.
    pub fn step(self, c: char) -> Self {
        use QuoteState::*;
        match (self, c) {
            (Unquoted, '\'') => Single,
            (Unquoted, '"') => Double,
            (Unquoted, '`') => Backtick,
            (Single, '\'') => Unquoted,
            (Double, '"') => Unquoted,
            (Double, '`') => DoubleBacktick,
            (Backtick, '`') => Unquoted,
            (DoubleBacktick, '`') => Double,
            (state, _) => state,
        }
    }

    pub fn is_quoted(self) -> bool {
        self != QuoteState::Unquoted
    }

    /// Name of the construct left open, for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            QuoteState::Unquoted => "nothing",
            QuoteState::Single => "single quote",
            QuoteState::Double => "double quote",
            QuoteState::Backtick | QuoteState::DoubleBacktick => "backquote",
        }
    }
}
