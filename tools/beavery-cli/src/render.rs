//! Text rendering of onboarding and dashboard views.

use beavery_onboarding::otp::OTP_LEN;
use beavery_onboarding::{DashboardView, OtpInput, State};

/// Six cells, the focused one bracketed: ` 1  2 [_] _  _  _ `.
pub fn render_otp(otp: &OtpInput) -> String {
    (0..OTP_LEN)
        .map(|i| {
            let c = otp.cell(i).unwrap_or('_');
            if i == otp.focus() {
                format!("[{c}]")
            } else {
                format!(" {c} ")
            }
        })
        .collect()
}

/// Screen text for the current step, ending with the prompt.
pub fn render_state(state: &State) -> String {
    let mut out = String::new();
    if let Some(error) = state.error() {
        out.push_str(&format!("! {error}\n"));
    }
    match state {
        State::Email { .. } => out.push_str("Email address: "),
        State::Otp { email, otp, .. } => {
            out.push_str(&format!("We sent a 6-digit code to {email}\n"));
            out.push_str(&render_otp(otp));
            out.push_str("\nCode (:resend, :del, :back): ");
        }
        State::Info { .. } => out.push_str("How should we call you? "),
        State::Welcome { name, .. } => out.push_str(&format!("Welcome, {name}!\n")),
    }
    out
}

pub fn render_dashboard(view: &DashboardView) -> String {
    format!("{}\nSigned in as {}\n", view.headline(), view.email)
}
