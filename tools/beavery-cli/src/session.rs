//! Interactive loops over a line source.

use std::io::Write;

use tokio::io::{AsyncBufRead, Lines};

use beavery_onboarding::dashboard::local_hour;
use beavery_onboarding::marker::SessionStore;
use beavery_onboarding::ports::{IdentityClient, ProfileLookup, UserApi};
use beavery_onboarding::{Dashboard, OnboardingController, Redirect, Step};

use crate::command::{Command, parse};
use crate::render::{render_dashboard, render_state};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Onboarding reached the welcome step.
    Finished,
    /// The user quit or input ended.
    Quit,
}

/// Drive `controller` from `input` until onboarding finishes or the user quits.
pub async fn run_onboarding<I, P, A, S, R, W>(
    controller: &mut OnboardingController<I, P, A, S>,
    input: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<Outcome>
where
    I: IdentityClient,
    P: ProfileLookup,
    A: UserApi,
    S: SessionStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        write!(out, "{}", render_state(controller.state()))?;
        out.flush()?;

        let step = controller.state().step();
        if step == Step::Welcome {
            return Ok(Outcome::Finished);
        }
        let Some(line) = input.next_line().await? else {
            return Ok(Outcome::Quit);
        };

        match parse(&line, step) {
            Command::Quit => return Ok(Outcome::Quit),
            Command::ChangeEmail => controller.change_email(),
            Command::Resend => {
                controller.resend_code().await;
                writeln!(out, "Requested a new code.")?;
            }
            Command::Backspace => {
                if let Some(focus) = controller.state().otp().map(|otp| otp.focus()) {
                    controller.backspace(focus);
                }
            }
            Command::Submit(text) => match step {
                Step::Email => controller.submit_email(&text).await,
                Step::Otp => {
                    for c in text.chars() {
                        let Some(focus) = controller.state().otp().map(|otp| otp.focus()) else {
                            break;
                        };
                        controller.type_digit(focus, &c.to_string());
                    }
                    if controller.state().otp().is_some_and(|otp| otp.is_complete()) {
                        controller.submit_code().await;
                    }
                }
                Step::Info => controller.submit_name(&text).await,
                Step::Welcome => {}
            },
        }
    }
}

/// Show the dashboard and wait for `:logout`.
pub async fn run_dashboard<I, P, S, R, W>(
    dashboard: &Dashboard<I, P, S>,
    input: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<()>
where
    I: IdentityClient,
    P: ProfileLookup,
    S: SessionStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let view = match dashboard.load(local_hour()).await {
        Ok(view) => view,
        Err(Redirect::Entry) => {
            writeln!(out, "Not signed in.")?;
            return Ok(());
        }
    };
    write!(out, "{}", render_dashboard(&view))?;

    loop {
        write!(out, "Type :logout to sign out: ")?;
        out.flush()?;
        match input.next_line().await?.as_deref().map(str::trim) {
            Some(":logout") => {
                dashboard.logout().await;
                writeln!(out, "Signed out.")?;
                return Ok(());
            }
            Some(":q" | ":quit") | None => return Ok(()),
            Some(_) => {}
        }
    }
}
