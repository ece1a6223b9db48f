//! Domain primitives, services and ports.
//!
//! Purpose: model the auth session, the dashboard, the product table and the
//! weather viewer without knowing which HTTP services back them. Adapters in
//! `crate::outbound` implement the traits in [`ports`].
//!
//! Public surface:
//! - AuthController / AuthContext — single-owner auth session and its
//!   read-only observers.
//! - Dashboard — authenticated shell rendered from an AuthContext.
//! - ProductTable — paginated catalogue view.
//! - WeatherViewer — on-demand forecast lookup.

pub mod auth;
pub mod catalogue;
pub mod dashboard;
pub mod identity;
pub mod ports;
pub mod weather;

pub use self::auth::{
    AuthContext, AuthController, AuthFailure, AuthForm, AuthMode, AuthOperation, AuthStatus,
    ControllerDropped, ControllerError, Credentials, DEFAULT_AUTH_TIMEOUT, EmailAddress,
    EmailValidationError, FailureCategory, FederatedCredential, FederatedCredentialError,
    FieldError, FieldNotInMode, FormField, FormValidationError, PASSWORD_MIN_LEN, Password,
    SubmitOutcome, Submission,
};
pub use self::catalogue::{PageLink, Pager, Price, Product, ProductRating, ProductRow, ProductTable};
pub use self::dashboard::{
    Dashboard, DashboardError, DashboardSection, DashboardView, NO_ACTIVITY, ProfileSummary,
    SETTINGS_ACTIONS,
};
pub use self::identity::{
    Identity, IdentityBuilder, IdentityMetadata, IdentityProfile, IdentityValidationError,
    SessionToken, Uid,
};
pub use self::weather::{
    CurrentConditions, DEFAULT_LOCATION, DailyForecast, FETCH_FAILED_MESSAGE, Forecast,
    TREND_DAYS, TrendPoint, WeatherLocation, WeatherLocationError, WeatherView, WeatherViewer,
};
