pub mod shell;
pub mod tokenize;
pub mod types;

pub use shell::parse_line;
pub use tokenize::{REDIRECT_IN, REDIRECT_OUT, is_redirect_operator, tokenize};
pub use types::{Operator, ParsedLine, Pipeline, QuoteState, Stage};
