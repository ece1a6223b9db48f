//! Portal entry-point: wires the HTTP adapters into the domain and renders
//! results to the terminal.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::future::Future;
use std::io::{self, BufRead};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, bail, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use portal::config::PortalSettings;
use portal::domain::ports::IdentityProvider;
use portal::domain::{
    AuthController, AuthMode, AuthStatus, DEFAULT_LOCATION, Dashboard, FederatedCredential,
    ProductTable, SubmitOutcome, WeatherView, WeatherViewer,
};
use portal::inbound::cli::{AuthCommand, Cli, Command, PasswordArgs};
use portal::inbound::console::{
    render_dashboard, render_product_page, render_submit_outcome, render_weather_view,
};
use portal::outbound::fakestore::FakeStoreHttpCatalogue;
use portal::outbound::firebase::FirebaseIdentityProvider;
use portal::outbound::visual_crossing::VisualCrossingHttpSource;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = PortalSettings::load_from_iter([OsString::from("portal")])
        .map_err(|error| eyre!("failed to load portal settings: {error}"))?;

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(cli.command, settings))
}

async fn run(command: Command, settings: PortalSettings) -> Result<()> {
    match command {
        Command::Products { page_size, page } => {
            let catalogue =
                FakeStoreHttpCatalogue::new(settings.fakestore_endpoint()?, settings.http_timeout())
                    .wrap_err("failed to build product catalogue client")?;
            let mut table = ProductTable::load(&catalogue, page_size).await?;
            table.paginator_mut().go_to(page);
            print!("{}", render_product_page(&table));
            Ok(())
        }
        Command::Weather { location } => {
            let source = VisualCrossingHttpSource::new(
                settings.weather_endpoint()?,
                settings.weather_api_key()?,
                settings.weather_unit_group(),
                settings.http_timeout(),
            )
            .wrap_err("failed to build weather client")?;
            let mut viewer = WeatherViewer::new(Arc::new(source));
            let view = viewer
                .search(location.as_deref().unwrap_or(DEFAULT_LOCATION))
                .await;
            print!("{}", render_weather_view(view));
            if matches!(view, WeatherView::Failed(_)) {
                bail!("weather lookup failed");
            }
            Ok(())
        }
        Command::Auth { action } => {
            let provider = FirebaseIdentityProvider::new(
                settings.identity_toolkit_endpoint()?,
                settings.firebase_api_key()?,
                settings.http_timeout(),
            )
            .wrap_err("failed to build identity provider client")?;
            let controller =
                AuthController::with_timeout(Arc::new(provider), settings.auth_timeout());
            run_auth(&controller, action).await
        }
    }
}

async fn run_auth<P>(controller: &AuthController<P>, action: AuthCommand) -> Result<()>
where
    P: IdentityProvider + ?Sized,
{
    let outcome = match action {
        AuthCommand::SignIn(args) => {
            fill_password_form(controller, AuthMode::SignIn, args)?;
            interruptible(controller, controller.submit()).await
        }
        AuthCommand::SignUp(args) => {
            fill_password_form(controller, AuthMode::SignUp, args)?;
            interruptible(controller, controller.submit()).await
        }
        AuthCommand::Reset { email } => {
            controller.switch_mode(AuthMode::ForgotPassword)?;
            controller.set_email(&email)?;
            interruptible(controller, controller.submit()).await
        }
        AuthCommand::Federated {
            provider_id,
            id_token,
        } => {
            let credential = FederatedCredential::try_new(&provider_id, &id_token)?;
            interruptible(controller, controller.submit_federated(credential)).await
        }
    };

    print!("{}", render_submit_outcome(&outcome));
    match outcome {
        SubmitOutcome::Settled(AuthStatus::Authenticated(_)) => {
            let dashboard = Dashboard::new(controller.context());
            print!("{}", render_dashboard(&dashboard.render()?));
            Ok(())
        }
        SubmitOutcome::Settled(AuthStatus::PasswordResetSent) => Ok(()),
        _ => bail!("authentication did not complete"),
    }
}

fn fill_password_form<P>(
    controller: &AuthController<P>,
    mode: AuthMode,
    args: PasswordArgs,
) -> Result<()>
where
    P: IdentityProvider + ?Sized,
{
    let password = read_password(args.password)?;
    controller.switch_mode(mode)?;
    controller.set_email(&args.email)?;
    controller.set_password(&password)?;
    if mode == AuthMode::SignUp {
        let confirm = args
            .confirm_password
            .map_or_else(|| password.clone(), Zeroizing::new);
        controller.set_confirm_password(&confirm)?;
    }
    Ok(())
}

/// Cancels the in-flight call when the user presses Ctrl-C.
async fn interruptible<P>(
    controller: &AuthController<P>,
    submission: impl Future<Output = SubmitOutcome>,
) -> SubmitOutcome
where
    P: IdentityProvider + ?Sized,
{
    tokio::select! {
        outcome = submission => outcome,
        _ = tokio::signal::ctrl_c() => {
            controller.cancel_pending();
            SubmitOutcome::Cancelled
        }
    }
}

fn read_password(explicit: Option<String>) -> Result<Zeroizing<String>> {
    if let Some(password) = explicit {
        return Ok(Zeroizing::new(password));
    }
    eprint!("Password: ");
    let mut line = Zeroizing::new(String::new());
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("failed to read password from stdin")?;
    Ok(Zeroizing::new(
        line.trim_end_matches(['\r', '\n']).to_owned(),
    ))
}
