//! User authentication: form, credentials, failure categories and the
//! controller that drives them against the identity provider.

mod context;
mod controller;
mod credentials;
mod failure;
mod form;

pub use context::{AuthContext, ControllerDropped};
pub use controller::{
    AuthController, AuthStatus, ControllerError, DEFAULT_AUTH_TIMEOUT, SubmitOutcome,
};
pub use credentials::{
    Credentials, EmailAddress, EmailValidationError, FederatedCredential,
    FederatedCredentialError, Password,
};
pub use failure::{AuthFailure, AuthOperation, FailureCategory};
pub use form::{
    AuthForm, AuthMode, FieldError, FieldNotInMode, FormField, FormValidationError,
    PASSWORD_MIN_LEN, Submission,
};
