//! The guarded home view shown after onboarding.

use chrono::Timelike;

use crate::marker::{self, SessionStore};
use crate::ports::{IdentityClient, ProfileLookup};

/// Where to send the user instead of rendering the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The email entry view.
    Entry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub email: String,
    pub name: Option<String>,
    pub greeting: &'static str,
}

impl DashboardView {
    pub fn headline(&self) -> String {
        format!("{}, {}!", self.greeting, self.name.as_deref().unwrap_or("there"))
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..12 => "Good morning",
        12..18 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Current hour on the local clock.
pub fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

pub struct Dashboard<I, P, S> {
    identity: I,
    profiles: P,
    store: S,
}

impl<I, P, S> Dashboard<I, P, S>
where
    I: IdentityClient,
    P: ProfileLookup,
    S: SessionStore,
{
    pub fn new(identity: I, profiles: P, store: S) -> Self {
        Self {
            identity,
            profiles,
            store,
        }
    }

    /// Resolve the view for `hour`, or redirect when nobody is signed in.
    pub async fn load(&self, hour: u32) -> Result<DashboardView, Redirect> {
        let user = match self.identity.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(Redirect::Entry),
            Err(err) => {
                tracing::warn!(error = %err, "session check failed");
                return Err(Redirect::Entry);
            }
        };
        let Some(email) = user.email else {
            return Err(Redirect::Entry);
        };

        let name = match self.profiles.find_name(&user.access_token, &email).await {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(email = %email, error = %err, "profile lookup failed");
                None
            }
        };
        if name.is_some() {
            marker::clear_marker(&self.store);
        }

        Ok(DashboardView {
            email,
            name,
            greeting: greeting_for_hour(hour),
        })
    }

    /// Clear session storage and sign out. Always lands on the entry view.
    pub async fn logout(&self) -> Redirect {
        self.store.clear();
        if let Err(err) = self.identity.sign_out().await {
            tracing::warn!(error = %err, "sign-out failed");
        }
        Redirect::Entry
    }
}
