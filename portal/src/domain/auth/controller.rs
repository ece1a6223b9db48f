//! Auth-mode controller: the single owner of the auth form and its status.
//!
//! The controller validates locally, then issues exactly one identity
//! provider call per submission. Every call runs under a time budget and a
//! cancellation token. Status changes are published on a watch channel so
//! any number of [`AuthContext`] readers can follow along.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::context::AuthContext;
use super::credentials::FederatedCredential;
use super::failure::{AuthFailure, AuthOperation};
use super::form::{AuthForm, AuthMode, FieldNotInMode, FormValidationError, Submission};
use crate::domain::Identity;
use crate::domain::ports::{IdentityProvider, IdentityProviderError};

/// Budget applied to each provider call when none is configured.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Observable status of the auth session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// Waiting for input.
    #[default]
    Idle,
    /// One provider call is in flight.
    Pending,
    /// The provider accepted the credentials.
    Authenticated(Identity),
    /// The provider accepted a password-reset request.
    PasswordResetSent,
    /// The last call failed.
    Failed(AuthFailure),
}

impl AuthStatus {
    /// Whether a provider call is in flight.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Identity of the signed-in user, if any.
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Result of a submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another call was already in flight; nothing was sent.
    InFlight,
    /// The session is already authenticated; nothing was sent.
    AlreadyAuthenticated,
    /// Local validation failed; nothing was sent.
    Invalid(FormValidationError),
    /// The call finished and the status settled.
    Settled(AuthStatus),
    /// The call was cancelled before it finished.
    Cancelled,
}

/// Controller misuse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// Edits and mode switches are locked while a call is in flight.
    #[error("an auth request is already in flight")]
    InFlight,
    /// The field is not part of the current mode.
    #[error(transparent)]
    FieldNotInMode(#[from] FieldNotInMode),
}

#[derive(Debug, Default)]
struct ControllerState {
    form: AuthForm,
    in_flight: Option<CancellationToken>,
}

enum Request {
    Form(Submission),
    Federated(FederatedCredential),
}

impl Request {
    const fn operation(&self) -> AuthOperation {
        match self {
            Self::Form(Submission::SignIn(_)) => AuthOperation::SignIn,
            Self::Form(Submission::SignUp(_)) => AuthOperation::SignUp,
            Self::Form(Submission::PasswordReset(_)) => AuthOperation::PasswordReset,
            Self::Federated(_) => AuthOperation::FederatedSignIn,
        }
    }
}

/// Drives the auth form against an [`IdentityProvider`].
///
/// The controller is `Send + Sync`; share it through an [`Arc`] between the
/// task that submits and the task that may cancel.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use portal::domain::{AuthController, AuthStatus, SubmitOutcome};
/// use portal::domain::ports::FixtureIdentityProvider;
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let controller = AuthController::new(Arc::new(FixtureIdentityProvider));
/// controller.set_email(FixtureIdentityProvider::EMAIL).unwrap();
/// controller.set_password(FixtureIdentityProvider::PASSWORD).unwrap();
///
/// let outcome = controller.submit().await;
/// assert!(matches!(outcome, SubmitOutcome::Settled(AuthStatus::Authenticated(_))));
/// assert!(controller.context().is_authenticated());
/// # });
/// ```
pub struct AuthController<P: ?Sized> {
    provider: Arc<P>,
    state: Mutex<ControllerState>,
    status: watch::Sender<AuthStatus>,
    timeout: Duration,
}

impl<P> AuthController<P>
where
    P: IdentityProvider + ?Sized,
{
    /// Controller in sign-in mode with an idle status.
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_timeout(provider, DEFAULT_AUTH_TIMEOUT)
    }

    /// Controller with a custom per-call budget.
    pub fn with_timeout(provider: Arc<P>, timeout: Duration) -> Self {
        let (status, _) = watch::channel(AuthStatus::Idle);
        Self {
            provider,
            state: Mutex::new(ControllerState::default()),
            status,
            timeout,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read-only view for observers.
    pub fn context(&self) -> AuthContext {
        AuthContext::new(self.status.subscribe())
    }

    /// Current status.
    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    /// Current mode.
    pub fn mode(&self) -> AuthMode {
        self.lock().form.mode()
    }

    /// Snapshot of the form contents.
    pub fn form(&self) -> AuthForm {
        self.lock().form.clone()
    }

    /// Replace the email input.
    pub fn set_email(&self, value: &str) -> Result<(), ControllerError> {
        self.edit(|form| {
            form.set_email(value);
            Ok(())
        })
    }

    /// Replace the password input.
    pub fn set_password(&self, value: &str) -> Result<(), ControllerError> {
        self.edit(|form| form.set_password(value))
    }

    /// Replace the confirmation input (sign-up only).
    pub fn set_confirm_password(&self, value: &str) -> Result<(), ControllerError> {
        self.edit(|form| form.set_confirm_password(value))
    }

    fn edit(
        &self,
        apply: impl FnOnce(&mut AuthForm) -> Result<(), FieldNotInMode>,
    ) -> Result<(), ControllerError> {
        let mut state = self.lock();
        if state.in_flight.is_some() {
            return Err(ControllerError::InFlight);
        }
        apply(&mut state.form)?;
        self.status.send_if_modified(|status| {
            let settled_outcome =
                matches!(status, AuthStatus::Failed(_) | AuthStatus::PasswordResetSent);
            if settled_outcome {
                *status = AuthStatus::Idle;
            }
            settled_outcome
        });
        Ok(())
    }

    /// Switch mode, discarding every input.
    ///
    /// A failed or acknowledged status returns to idle. An authenticated
    /// session is left alone.
    pub fn switch_mode(&self, mode: AuthMode) -> Result<(), ControllerError> {
        let mut state = self.lock();
        if state.in_flight.is_some() {
            return Err(ControllerError::InFlight);
        }
        state.form = AuthForm::empty(mode);
        self.status.send_if_modified(|status| {
            let reset = !matches!(status, AuthStatus::Idle | AuthStatus::Authenticated(_));
            if reset {
                *status = AuthStatus::Idle;
            }
            reset
        });
        info!(%mode, "auth mode switched");
        Ok(())
    }

    /// Validate the form and send it to the provider.
    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let state = self.lock();
            if let Some(blocked) = self.blocked(&state) {
                return blocked;
            }
            match state.form.validate() {
                Ok(submission) => submission,
                Err(errors) => return SubmitOutcome::Invalid(errors),
            }
        };
        self.run(Request::Form(submission)).await
    }

    /// Sign in with a token obtained from a federated identity provider.
    pub async fn submit_federated(&self, credential: FederatedCredential) -> SubmitOutcome {
        if let Some(blocked) = self.blocked(&self.lock()) {
            return blocked;
        }
        self.run(Request::Federated(credential)).await
    }

    fn blocked(&self, state: &ControllerState) -> Option<SubmitOutcome> {
        if state.in_flight.is_some() {
            Some(SubmitOutcome::InFlight)
        } else if matches!(*self.status.borrow(), AuthStatus::Authenticated(_)) {
            Some(SubmitOutcome::AlreadyAuthenticated)
        } else {
            None
        }
    }

    async fn run(&self, request: Request) -> SubmitOutcome {
        let operation = request.operation();
        let token = match self.begin() {
            Ok(token) => token,
            Err(blocked) => return blocked,
        };
        let mut guard = FlightGuard {
            state: &self.state,
            status: &self.status,
            token: &token,
            armed: true,
        };
        info!(?operation, "auth request started");

        let result = tokio::select! {
            () = token.cancelled() => None,
            result = tokio::time::timeout(self.timeout, self.dispatch(&request)) => Some(result),
        };

        guard.armed = false;
        drop(guard);
        let mut state = self.lock();
        if token.is_cancelled() {
            info!(?operation, "auth request cancelled");
            return SubmitOutcome::Cancelled;
        }
        state.in_flight = None;

        let status = match result {
            Some(Ok(Ok(status))) => {
                info!(?operation, "auth request succeeded");
                status
            }
            Some(Ok(Err(error))) => {
                let failure = AuthFailure::from_provider_error(operation, &error);
                warn!(?operation, category = ?failure.category(), %error, "auth request failed");
                AuthStatus::Failed(failure)
            }
            Some(Err(_elapsed)) => {
                warn!(?operation, timeout = ?self.timeout, "auth request timed out");
                AuthStatus::Failed(AuthFailure::timed_out(operation))
            }
            // The token was observed cancelled by `select!`, which the
            // re-check above already returned for.
            None => AuthStatus::Idle,
        };
        self.status.send_replace(status.clone());
        drop(state);
        SubmitOutcome::Settled(status)
    }

    /// Re-checks the guard under the lock so two racing submits cannot both
    /// enter `Pending`.
    fn begin(&self) -> Result<CancellationToken, SubmitOutcome> {
        let mut state = self.lock();
        if let Some(blocked) = self.blocked(&state) {
            return Err(blocked);
        }
        let token = CancellationToken::new();
        state.in_flight = Some(token.clone());
        self.status.send_replace(AuthStatus::Pending);
        Ok(token)
    }

    async fn dispatch(&self, request: &Request) -> Result<AuthStatus, IdentityProviderError> {
        match request {
            Request::Form(Submission::SignIn(credentials)) => self
                .provider
                .authenticate(credentials)
                .await
                .map(AuthStatus::Authenticated),
            Request::Form(Submission::SignUp(credentials)) => self
                .provider
                .register(credentials)
                .await
                .map(AuthStatus::Authenticated),
            Request::Form(Submission::PasswordReset(email)) => self
                .provider
                .request_password_reset(email)
                .await
                .map(|()| AuthStatus::PasswordResetSent),
            Request::Federated(credential) => self
                .provider
                .authenticate_federated(credential)
                .await
                .map(AuthStatus::Authenticated),
        }
    }

    /// Abort the in-flight call and return to idle.
    ///
    /// Returns `false` when nothing was in flight.
    pub fn cancel_pending(&self) -> bool {
        let mut state = self.lock();
        let Some(token) = state.in_flight.take() else {
            return false;
        };
        token.cancel();
        self.status.send_replace(AuthStatus::Idle);
        true
    }

    /// End the session: cancel any call, clear the form, return to sign-in.
    pub fn sign_out(&self) {
        let mut state = self.lock();
        if let Some(token) = state.in_flight.take() {
            token.cancel();
        }
        state.form = AuthForm::empty(AuthMode::SignIn);
        self.status.send_replace(AuthStatus::Idle);
        info!("signed out");
    }
}

/// Releases the flight when a submit future is dropped before it settles.
///
/// A token that is already cancelled belongs to a flight that `cancel_pending`
/// or `sign_out` has released; any newer flight is left alone.
struct FlightGuard<'a> {
    state: &'a Mutex<ControllerState>,
    status: &'a watch::Sender<AuthStatus>,
    token: &'a CancellationToken,
    armed: bool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        state.in_flight = None;
        self.status.send_replace(AuthStatus::Idle);
        warn!("auth request abandoned before it settled");
    }
}
