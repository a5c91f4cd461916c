use super::types::QuoteState;
use crate::error::ShellError;

/// Redirection operators recognised outside quotes.
pub const REDIRECT_IN: &str = "<";
pub const REDIRECT_OUT: &str = ">";

/// Split one stage into raw tokens.
///
/// Whitespace outside quotes and backticks separates tokens; quote
/// characters are kept so the resolver can interpret them later. `<` and
/// `>` outside quotes always form tokens of their own, so `cat <in >out`
/// and `cat < in > out` tokenize identically.
pub fn tokenize(stage: &str) -> Result<Vec<String>, ShellError> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut state = QuoteState::Unquoted;

    for c in stage.chars() {
        if !state.is_quoted() {
            if c.is_whitespace() {
                flush(&mut buf, &mut tokens);
                continue;
            }
            if c == '<' || c == '>' {
                flush(&mut buf, &mut tokens);
                tokens.push(c.to_string());
                continue;
            }
        }
        state = state.step(c);
        buf.push(c);
    }

    if state.is_quoted() {
        return Err(ShellError::Syntax(format!(
            "unterminated {}",
            state.describe()
        )));
    }
    flush(&mut buf, &mut tokens);
    Ok(tokens)
}

fn flush(buf: &mut String, tokens: &mut Vec<String>) {
    if !buf.is_empty() {
        tokens.push(std::mem::take(buf));
    }
}

/// Whether a raw token is a bare redirection operator.
pub fn is_redirect_operator(token: &str) -> bool {
    token == REDIRECT_IN || token == REDIRECT_OUT
}
