use crate::session::{Role, Session};

/// The exclusive top-level views of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Loading,
    Login,
    Teacher,
    Student,
}

impl View {
    /// Pick the view for a session. Precedence: pending, signed out, role.
    pub fn select(session: &Session) -> View {
        if session.is_pending() {
            return View::Loading;
        }
        match session.role() {
            None => View::Login,
            Some(Role::Teacher) => View::Teacher,
            Some(Role::Student) => View::Student,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Loading => "Syncing",
            View::Login => "Sign In",
            View::Teacher => "Teacher Dashboard",
            View::Student => "Student Hall",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Identity, SessionMachine};
    use std::time::Duration;
    use tokio::time::Instant;

    #[test]
    fn test_signed_out_selects_login() {
        assert_eq!(View::select(&Session::signed_out()), View::Login);
    }

    #[test]
    fn test_role_selects_dashboard() {
        let id = Identity::parse("Aman", "1234").unwrap();
        assert_eq!(View::select(&Session::signed_in(id.clone(), Role::Teacher)), View::Teacher);
        assert_eq!(View::select(&Session::signed_in(id, Role::Student)), View::Student);
    }

    #[test]
    fn test_pending_takes_precedence() {
        let mut machine = SessionMachine::new();
        let deadline = Instant::now() + Duration::from_secs(1);
        let ticket = machine.begin_login("Aman", "1234", Role::Student, deadline).unwrap().ticket();
        assert_eq!(View::select(machine.session()), View::Loading);

        machine.complete(ticket).unwrap();
        // re-login while signed in still shows the loading view
        machine.begin_login("Priya", "77", Role::Teacher, deadline).unwrap();
        assert_eq!(View::select(machine.session()), View::Loading);
    }

    #[test]
    fn test_selection_is_a_function_of_the_session() {
        let a = Session::signed_in(Identity::parse("Aman", "1234").unwrap(), Role::Student);
        let b = a.clone();
        assert_eq!(View::select(&a), View::select(&b));
        assert_eq!(View::select(&a), View::select(&a));
    }
}
