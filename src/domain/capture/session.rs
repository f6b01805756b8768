//! Listener session state machine

use std::fmt;
use thiserror::Error;

/// Listener states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListenerState {
    #[default]
    Inactive,
    Activating,
    /// Notification listener attached
    Active,
    /// Activated, but no notification listener attached
    Error,
}

impl ListenerState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Activating => "activating",
            Self::Active => "active",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ListenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: ListenerState,
    pub action: String,
}

/// Listener session entity.
/// Tracks where the capture listeners are in their lifecycle.
///
/// State machine:
///   INACTIVE -> ACTIVATING (begin_activation)
///   ACTIVATING -> ACTIVE (attach)
///   ACTIVATING -> ERROR (detach)
///   ERROR -> ACTIVE (attach, permission regained)
///   ACTIVE -> ERROR (detach, permission revoked)
///   any -> INACTIVE (deactivate)
#[derive(Debug, Default)]
pub struct ListenerSession {
    state: ListenerState,
}

impl ListenerSession {
    /// Create a new session in inactive state
    pub fn new() -> Self {
        Self {
            state: ListenerState::Inactive,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn is_inactive(&self) -> bool {
        self.state == ListenerState::Inactive
    }

    pub fn is_active(&self) -> bool {
        self.state == ListenerState::Active
    }

    /// Activated, with or without a notification listener
    pub fn is_engaged(&self) -> bool {
        matches!(self.state, ListenerState::Active | ListenerState::Error)
    }

    /// Transition from INACTIVE to ACTIVATING
    pub fn begin_activation(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != ListenerState::Inactive {
            return Err(self.invalid("activate"));
        }
        self.state = ListenerState::Activating;
        Ok(())
    }

    /// Transition from ACTIVATING or ERROR to ACTIVE
    pub fn attach(&mut self) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, ListenerState::Activating | ListenerState::Error) {
            return Err(self.invalid("attach listener"));
        }
        self.state = ListenerState::Active;
        Ok(())
    }

    /// Transition from ACTIVATING or ACTIVE to ERROR
    pub fn detach(&mut self) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, ListenerState::Activating | ListenerState::Active) {
            return Err(self.invalid("detach listener"));
        }
        self.state = ListenerState::Error;
        Ok(())
    }

    /// Transition from any state to INACTIVE
    pub fn deactivate(&mut self) {
        self.state = ListenerState::Inactive;
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_inactive() {
        let session = ListenerSession::new();
        assert!(session.is_inactive());
        assert!(!session.is_active());
        assert!(!session.is_engaged());
    }

    #[test]
    fn activate_then_attach() {
        let mut session = ListenerSession::new();
        session.begin_activation().unwrap();
        assert_eq!(session.state(), ListenerState::Activating);

        session.attach().unwrap();
        assert!(session.is_active());
        assert!(session.is_engaged());
    }

    #[test]
    fn begin_activation_twice_fails() {
        let mut session = ListenerSession::new();
        session.begin_activation().unwrap();

        let err = session.begin_activation().unwrap_err();
        assert_eq!(err.current_state, ListenerState::Activating);
        assert!(err.action.contains("activate"));
    }

    #[test]
    fn begin_activation_while_active_fails() {
        let mut session = ListenerSession::new();
        session.begin_activation().unwrap();
        session.attach().unwrap();

        let err = session.begin_activation().unwrap_err();
        assert_eq!(err.current_state, ListenerState::Active);
    }

    #[test]
    fn attach_from_inactive_fails() {
        let mut session = ListenerSession::new();
        let err = session.attach().unwrap_err();
        assert_eq!(err.current_state, ListenerState::Inactive);
    }

    #[test]
    fn attach_while_active_fails() {
        let mut session = ListenerSession::new();
        session.begin_activation().unwrap();
        session.attach().unwrap();

        let err = session.attach().unwrap_err();
        assert_eq!(err.current_state, ListenerState::Active);
    }

    #[test]
    fn denied_activation_lands_in_error() {
        let mut session = ListenerSession::new();
        session.begin_activation().unwrap();
        session.detach().unwrap();
        assert_eq!(session.state(), ListenerState::Error);
        assert!(session.is_engaged());
    }

    #[test]
    fn error_recovers_on_attach() {
        let mut session = ListenerSession::new();
        session.begin_activation().unwrap();
        session.detach().unwrap();

        session.attach().unwrap();
        assert!(session.is_active());
    }

    #[test]
    fn detach_from_error_fails() {
        let mut session = ListenerSession::new();
        session.begin_activation().unwrap();
        session.detach().unwrap();

        let err = session.detach().unwrap_err();
        assert_eq!(err.current_state, ListenerState::Error);
    }

    #[test]
    fn deactivate_from_any_state() {
        let mut session = ListenerSession::new();
        session.deactivate();
        assert!(session.is_inactive());

        session.begin_activation().unwrap();
        session.attach().unwrap();
        session.deactivate();
        assert!(session.is_inactive());

        // Can activate again
        session.begin_activation().unwrap();
        assert_eq!(session.state(), ListenerState::Activating);
    }

    #[test]
    fn state_display() {
        assert_eq!(ListenerState::Inactive.to_string(), "inactive");
        assert_eq!(ListenerState::Activating.to_string(), "activating");
        assert_eq!(ListenerState::Active.to_string(), "active");
        assert_eq!(ListenerState::Error.to_string(), "error");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: ListenerState::Active,
            action: "attach listener".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("attach listener"));
        assert!(msg.contains("active"));
    }
}
