//! Session record and the login/logout state machine.
//!
//! The machine is synchronous and clock-free: callers supply the deadline of a
//! login request and drive completion themselves. [`crate::state::AppState`]
//! wraps it with a timer and change notification.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::{SessionError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn all() -> Vec<Role> {
        vec![Role::Student, Role::Teacher]
    }

    /// The other role, used by the login form toggle.
    pub fn toggled(self) -> Self {
        match self {
            Role::Teacher => Role::Student,
            Role::Student => Role::Teacher,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is signed in: the name and the code they supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub name: String,
    pub code: String,
}

impl Identity {
    /// Presence check only. Whitespace-only input counts as missing, but
    /// accepted values are stored exactly as typed.
    pub fn parse(name: &str, code: &str) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if code.trim().is_empty() {
            return Err(ValidationError::MissingCode);
        }
        Ok(Self {
            name: name.to_string(),
            code: code.to_string(),
        })
    }
}

/// Snapshot of the local session.
///
/// `identity` and `role` are only ever set or cleared together, so the fields
/// are private and exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    identity: Option<Identity>,
    role: Option<Role>,
    pending: bool,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: Identity, role: Role) -> Self {
        Self {
            identity: Some(identity),
            role: Some(role),
            pending: false,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.name.as_str())
    }

    /// Fails with `Forbidden` unless a completed session holds `role`.
    pub fn require_role(&self, role: Role) -> Result<&Identity, SessionError> {
        match (&self.identity, self.role) {
            (Some(identity), Some(current)) if current == role && !self.pending => Ok(identity),
            _ => Err(SessionError::Forbidden { required: role }),
        }
    }
}

/// Handle for one login request. Completion only commits while the ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginTicket {
    generation: u64,
    deadline: Instant,
}

impl LoginTicket {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// How a login request was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A new request; any previous in-flight request is superseded.
    Started(LoginTicket),
    /// Identical to the request already in flight, which it now shares.
    Joined(LoginTicket),
}

impl Admission {
    pub fn ticket(&self) -> LoginTicket {
        match self {
            Admission::Started(t) | Admission::Joined(t) => *t,
        }
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    identity: Identity,
    role: Role,
    ticket: LoginTicket,
}

#[derive(Debug, Default)]
pub struct SessionMachine {
    session: Session,
    generation: u64,
    in_flight: Option<InFlight>,
    committed: Option<u64>,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Validate and admit a login request that will complete at `deadline`.
    ///
    /// On validation failure the session is left untouched.
    pub fn begin_login(
        &mut self,
        name: &str,
        code: &str,
        role: Role,
        deadline: Instant,
    ) -> Result<Admission, ValidationError> {
        let identity = Identity::parse(name, code)?;

        if let Some(current) = &self.in_flight {
            if current.identity == identity && current.role == role {
                return Ok(Admission::Joined(current.ticket));
            }
        }

        self.generation += 1;
        let ticket = LoginTicket {
            generation: self.generation,
            deadline,
        };
        self.in_flight = Some(InFlight {
            identity,
            role,
            ticket,
        });
        self.session.pending = true;
        Ok(Admission::Started(ticket))
    }

    /// Commit the request behind `ticket`.
    ///
    /// A ticket that was replaced or cancelled yields `Superseded`. A ticket
    /// whose request was already committed (a joined duplicate) yields the
    /// committed session.
    pub fn complete(&mut self, ticket: LoginTicket) -> Result<&Session, SessionError> {
        if ticket.generation != self.generation {
            return Err(SessionError::Superseded);
        }
        match self.in_flight.take() {
            Some(request) => {
                self.session = Session::signed_in(request.identity, request.role);
                self.committed = Some(ticket.generation);
                Ok(&self.session)
            }
            None if self.committed == Some(ticket.generation) => Ok(&self.session),
            None => Err(SessionError::Superseded),
        }
    }

    /// Clear the session and cancel any in-flight login. Idempotent.
    pub fn logout(&mut self) {
        if self.in_flight.take().is_some() {
            // invalidate the outstanding ticket
            self.generation += 1;
        }
        self.committed = None;
        self.session = Session::signed_out();
    }
}
