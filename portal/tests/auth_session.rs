//! End-to-end auth session flows through the public API: controller,
//! context observers and the dashboard guard.

use std::sync::Arc;

use portal::domain::ports::FixtureIdentityProvider;
use portal::domain::{
    AuthController, AuthMode, AuthStatus, Dashboard, DashboardError, DashboardSection,
    DashboardView, FailureCategory, FederatedCredential, SubmitOutcome,
};
use rstest::{fixture, rstest};

type Controller = AuthController<FixtureIdentityProvider>;

#[fixture]
fn controller() -> Controller {
    AuthController::new(Arc::new(FixtureIdentityProvider))
}

fn sign_in(controller: &Controller, password: &str) {
    controller
        .set_email(FixtureIdentityProvider::EMAIL)
        .expect("email");
    controller.set_password(password).expect("password");
}

#[rstest]
#[tokio::test]
async fn dashboard_requires_an_authenticated_session(controller: Controller) {
    let mut dashboard = Dashboard::new(controller.context());
    assert_eq!(dashboard.render(), Err(DashboardError::NotAuthenticated));
    assert_eq!(
        DashboardError::NotAuthenticated.to_string(),
        "Please log in to access the dashboard"
    );

    sign_in(&controller, FixtureIdentityProvider::PASSWORD);
    controller.submit().await;

    let Ok(DashboardView::Profile(summary)) = dashboard.render() else {
        panic!("expected the profile section");
    };
    assert_eq!(summary.display_name, "Demo User");
    assert_eq!(summary.avatar_initial, 'D');
    assert_eq!(summary.uid_preview, "fixture-ui...");
    assert_eq!(summary.verification, "Email Verified");

    dashboard.select(DashboardSection::Settings);
    assert!(matches!(
        dashboard.render(),
        Ok(DashboardView::Settings { actions }) if actions == ["Edit Profile", "Reset Password"]
    ));

    controller.sign_out();
    assert_eq!(dashboard.render(), Err(DashboardError::NotAuthenticated));
}

#[rstest]
#[tokio::test]
async fn observers_follow_a_failed_then_successful_sign_in(controller: Controller) {
    let mut context = controller.context();

    sign_in(&controller, "Wrong-pass1");
    let SubmitOutcome::Settled(AuthStatus::Failed(failure)) = controller.submit().await else {
        panic!("expected rejection");
    };
    assert_eq!(failure.category(), FailureCategory::InvalidCredentials);
    assert_eq!(failure.message(), "Incorrect email or password.");
    assert!(matches!(
        context.changed().await,
        Ok(AuthStatus::Failed(_))
    ));

    controller
        .set_password(FixtureIdentityProvider::PASSWORD)
        .expect("password");
    assert_eq!(context.status(), AuthStatus::Idle);

    controller.submit().await;
    assert!(context.is_authenticated());
    assert_eq!(
        context.identity().and_then(|identity| identity.email().map(str::to_owned)),
        Some(FixtureIdentityProvider::EMAIL.to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn registering_an_existing_account_reports_account_exists(controller: Controller) {
    controller.switch_mode(AuthMode::SignUp).expect("idle");
    sign_in(&controller, "Password1");
    controller
        .set_confirm_password("Password1")
        .expect("confirmation");

    let SubmitOutcome::Settled(AuthStatus::Failed(failure)) = controller.submit().await else {
        panic!("expected rejection");
    };
    assert_eq!(failure.category(), FailureCategory::AccountExists);
    assert_eq!(failure.code(), Some("auth/email-already-in-use"));
}

#[rstest]
#[tokio::test]
async fn password_reset_for_unknown_account_fails(controller: Controller) {
    controller
        .switch_mode(AuthMode::ForgotPassword)
        .expect("idle");
    controller.set_email("nobody@example.com").expect("email");

    let SubmitOutcome::Settled(AuthStatus::Failed(failure)) = controller.submit().await else {
        panic!("expected rejection");
    };
    assert_eq!(failure.message(), "No user found with this email.");
}

#[rstest]
#[case(FederatedCredential::GOOGLE, true)]
#[case("github.com", false)]
#[tokio::test]
async fn federated_sign_in_depends_on_the_provider(
    controller: Controller,
    #[case] provider_id: &str,
    #[case] accepted: bool,
) {
    let credential = FederatedCredential::try_new(provider_id, "id-token").expect("credential");
    let outcome = controller.submit_federated(credential).await;
    assert_eq!(
        matches!(outcome, SubmitOutcome::Settled(AuthStatus::Authenticated(_))),
        accepted
    );
}

#[rstest]
#[tokio::test]
async fn blank_form_is_rejected_locally(controller: Controller) {
    let SubmitOutcome::Invalid(errors) = controller.submit().await else {
        panic!("expected validation failure");
    };
    assert_eq!(
        errors.to_string(),
        "email: Email is required; password: Password is required"
    );
    assert_eq!(controller.status(), AuthStatus::Idle);
}
