//! Read-only view of the auth status for observers.

use tokio::sync::watch;

use super::controller::AuthStatus;
use crate::domain::Identity;

/// The controller that published this status has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("auth controller dropped")]
pub struct ControllerDropped;

/// Subscription to the controller's status.
///
/// Contexts are cheap to clone and never mutate the session.
#[derive(Debug, Clone)]
pub struct AuthContext {
    receiver: watch::Receiver<AuthStatus>,
}

impl AuthContext {
    pub(crate) const fn new(receiver: watch::Receiver<AuthStatus>) -> Self {
        Self { receiver }
    }

    /// Latest published status.
    pub fn status(&self) -> AuthStatus {
        self.receiver.borrow().clone()
    }

    /// Whether the session holds an identity.
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.receiver.borrow(), AuthStatus::Authenticated(_))
    }

    /// Identity of the signed-in user.
    pub fn identity(&self) -> Option<Identity> {
        self.receiver.borrow().identity().cloned()
    }

    /// Wait for the next status change and return it.
    pub async fn changed(&mut self) -> Result<AuthStatus, ControllerDropped> {
        self.receiver.changed().await.map_err(|_| ControllerDropped)?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn reports_changes_until_the_sender_drops() {
        let (sender, receiver) = watch::channel(AuthStatus::Idle);
        let mut context = AuthContext::new(receiver);
        assert!(!context.is_authenticated());
        assert_eq!(context.identity(), None);

        sender.send_replace(AuthStatus::Pending);
        assert_eq!(context.changed().await, Ok(AuthStatus::Pending));
        assert!(context.status().is_pending());

        drop(sender);
        assert_eq!(context.changed().await, Err(ControllerDropped));
    }
}
