//! Parsing of typed input lines.

use beavery_onboarding::Step;

/// What a line of input asks for, given the step on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text for the current field (email, code or name).
    Submit(String),
    /// `:resend` on the code step.
    Resend,
    /// `:back` returns to email entry.
    ChangeEmail,
    /// `:del` on the code step: backspace in the focused cell.
    Backspace,
    Quit,
}

pub fn parse(line: &str, step: Step) -> Command {
    let line = line.trim();
    match (line, step) {
        (":q" | ":quit", _) => Command::Quit,
        (":back", Step::Otp | Step::Info) => Command::ChangeEmail,
        (":resend", Step::Otp) => Command::Resend,
        (":del", Step::Otp) => Command::Backspace,
        _ => Command::Submit(line.to_owned()),
    }
}
