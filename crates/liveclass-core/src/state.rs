//! UI-agnostic application state shared by every view.
//!
//! [`AppState`] is a cheap cloneable handle. Each view receives one and reads
//! snapshots or subscribes to changes; nothing is reachable through globals.
//! Every field has a single writer method, and each write is published on a
//! `tokio::sync::watch` channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::classroom::{Announcement, Doubt, DoubtBoard};
use crate::config::Config;
use crate::error::SessionError;
use crate::session::{Admission, LoginTicket, Role, Session, SessionMachine};
use crate::view::View;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    machine: Mutex<SessionMachine>,
    session_tx: watch::Sender<Session>,
    announcement_tx: watch::Sender<Announcement>,
    doubts_tx: watch::Sender<DoubtBoard>,
    dark_mode_tx: watch::Sender<bool>,
    login_delay: Duration,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let (session_tx, _) = watch::channel(Session::signed_out());
        let (announcement_tx, _) = watch::channel(Announcement::new(config.announcement.clone()));
        let (doubts_tx, _) = watch::channel(DoubtBoard::seeded(config.seed_doubts.iter().cloned()));
        let (dark_mode_tx, _) = watch::channel(config.dark_mode);

        Self {
            inner: Arc::new(Inner {
                machine: Mutex::new(SessionMachine::new()),
                session_tx,
                announcement_tx,
                doubts_tx,
                dark_mode_tx,
                login_delay: config.login_delay(),
            }),
        }
    }

    pub fn login_delay(&self) -> Duration {
        self.inner.login_delay
    }

    // Session

    pub fn session(&self) -> Session {
        self.inner.session_tx.borrow().clone()
    }

    pub fn view(&self) -> View {
        View::select(&self.inner.session_tx.borrow())
    }

    pub fn subscribe_session(&self) -> watch::Receiver<Session> {
        self.inner.session_tx.subscribe()
    }

    /// Validate and admit a login. The session turns pending immediately; the
    /// returned [`PendingLogin`] commits it once the simulated delay elapses.
    pub fn request_login(&self, name: &str, code: &str, role: Role) -> Result<PendingLogin, SessionError> {
        let deadline = Instant::now() + self.inner.login_delay;
        let mut machine = self.machine();
        let admission = match machine.begin_login(name, code, role, deadline) {
            Ok(admission) => admission,
            Err(e) => {
                tracing::info!(error = %e, "login rejected");
                return Err(e.into());
            }
        };

        match admission {
            Admission::Started(_) => {
                tracing::info!(name, role = role.as_str(), "login started");
            }
            Admission::Joined(_) => {
                tracing::debug!(name, role = role.as_str(), "login joined in-flight request");
            }
        }
        self.publish_session(machine.session().clone());

        Ok(PendingLogin {
            state: self.clone(),
            ticket: admission.ticket(),
            joined: matches!(admission, Admission::Joined(_)),
        })
    }

    /// Full login: admit, wait out the delay, commit.
    pub async fn login(&self, name: &str, code: &str, role: Role) -> Result<Session, SessionError> {
        self.request_login(name, code, role)?.finish().await
    }

    /// Sign out and cancel any in-flight login.
    pub fn logout(&self) {
        let mut machine = self.machine();
        let was = machine.session().display_name().map(str::to_string);
        machine.logout();
        tracing::info!(name = was.as_deref().unwrap_or("-"), "logout");
        self.publish_session(machine.session().clone());
    }

    fn complete_login(&self, ticket: LoginTicket) -> Result<Session, SessionError> {
        let mut machine = self.machine();
        match machine.complete(ticket) {
            Ok(session) => {
                let session = session.clone();
                tracing::info!(
                    name = session.display_name().unwrap_or("-"),
                    role = session.role().map(|r| r.as_str()).unwrap_or("-"),
                    "login completed"
                );
                self.publish_session(session.clone());
                Ok(session)
            }
            Err(e) => {
                tracing::debug!("stale login completion ignored");
                Err(e)
            }
        }
    }

    fn publish_session(&self, next: Session) {
        self.inner.session_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn machine(&self) -> MutexGuard<'_, SessionMachine> {
        self.inner.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Announcement

    pub fn announcement(&self) -> Announcement {
        self.inner.announcement_tx.borrow().clone()
    }

    pub fn subscribe_announcement(&self) -> watch::Receiver<Announcement> {
        self.inner.announcement_tx.subscribe()
    }

    /// Replace the announcement. Only a signed-in teacher may write it.
    pub fn announce(&self, text: &str) -> Result<(), SessionError> {
        let session = self.session();
        let teacher = session.require_role(Role::Teacher)?;
        tracing::info!(by = %teacher.name, text, "announcement");
        self.inner.announcement_tx.send_modify(|a| a.replace(text));
        Ok(())
    }

    // Theme

    pub fn dark_mode(&self) -> bool {
        *self.inner.dark_mode_tx.borrow()
    }

    pub fn subscribe_theme(&self) -> watch::Receiver<bool> {
        self.inner.dark_mode_tx.subscribe()
    }

    pub fn set_dark_mode(&self, on: bool) {
        self.inner.dark_mode_tx.send_if_modified(|current| {
            let changed = *current != on;
            *current = on;
            changed
        });
    }

    pub fn toggle_dark_mode(&self) -> bool {
        let on = !self.dark_mode();
        self.set_dark_mode(on);
        on
    }

    // Doubts

    pub fn doubts(&self) -> DoubtBoard {
        self.inner.doubts_tx.borrow().clone()
    }

    pub fn subscribe_doubts(&self) -> watch::Receiver<DoubtBoard> {
        self.inner.doubts_tx.subscribe()
    }

    /// Queue a doubt from the signed-in student. Returns its id.
    pub fn raise_doubt(&self, text: &str) -> Result<u64, SessionError> {
        let session = self.session();
        let student = session.require_role(Role::Student)?;

        let mut result: Result<u64, SessionError> = Ok(0);
        self.inner.doubts_tx.send_if_modified(|board| {
            match board.raise(text, Some(&student.name)) {
                Ok(doubt) => {
                    result = Ok(doubt.id);
                    true
                }
                Err(e) => {
                    result = Err(e.into());
                    false
                }
            }
        });
        if let Ok(id) = result {
            tracing::info!(id, by = %student.name, "doubt raised");
        }
        result
    }

    /// Mark a doubt as solved and drop it from the board.
    pub fn resolve_doubt(&self, id: u64) -> Result<Option<Doubt>, SessionError> {
        self.session().require_role(Role::Teacher)?;

        let mut resolved = None;
        self.inner.doubts_tx.send_if_modified(|board| {
            resolved = board.resolve(id);
            resolved.is_some()
        });
        if resolved.is_some() {
            tracing::info!(id, "doubt resolved");
        }
        Ok(resolved)
    }
}

/// An admitted login waiting for its simulated delay.
#[must_use = "a pending login does nothing until finished"]
pub struct PendingLogin {
    state: AppState,
    ticket: LoginTicket,
    joined: bool,
}

impl PendingLogin {
    /// True when this request shares an identical in-flight login.
    pub fn is_joined(&self) -> bool {
        self.joined
    }

    pub fn deadline(&self) -> Instant {
        self.ticket.deadline()
    }

    /// Wait for the delay and commit. `Superseded` if a newer login or a
    /// logout got there first.
    pub async fn finish(self) -> Result<Session, SessionError> {
        tokio::time::sleep_until(self.ticket.deadline()).await;
        self.state.complete_login(self.ticket)
    }
}
