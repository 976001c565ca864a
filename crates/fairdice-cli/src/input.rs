//! Prompt token parsing.
//!
//! Every prompt understands a case-insensitive quit token (`x` or `q`) and a
//! help token (`?`). Unrecognized input is reported and the caller
//! re-prompts; it never terminates the process.

/// Input at a numeric prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericInput {
    Value(u32),
    Help,
    Quit,
}

/// Input at a yes/no prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerInput {
    Yes,
    No,
    Help,
    Quit,
}

fn is_quit(token: &str) -> bool {
    token.eq_ignore_ascii_case("x") || token.eq_ignore_ascii_case("q")
}

/// Parse a line typed at a numeric prompt.
pub fn parse_numeric(line: &str) -> Result<NumericInput, String> {
    let token = line.trim();
    if is_quit(token) {
        return Ok(NumericInput::Quit);
    }
    if token == "?" {
        return Ok(NumericInput::Help);
    }
    token
        .parse::<u32>()
        .map(NumericInput::Value)
        .map_err(|_| format!("unrecognized input {token:?}; enter a number, ? for help or X to exit"))
}

/// Parse a line typed at a yes/no prompt.
pub fn parse_answer(line: &str) -> Result<AnswerInput, String> {
    let token = line.trim();
    if is_quit(token) {
        return Ok(AnswerInput::Quit);
    }
    if token == "?" {
        return Ok(AnswerInput::Help);
    }
    if token.eq_ignore_ascii_case("y") {
        return Ok(AnswerInput::Yes);
    }
    if token.eq_ignore_ascii_case("n") {
        return Ok(AnswerInput::No);
    }
    Err(format!("unrecognized input {token:?}; enter Y or N, ? for help or X to exit"))
}
