//! Plain-text rendering of domain views for the terminal.
//!
//! Renderers return strings so the binary only decides where to print them.

use crate::domain::{
    AuthStatus, DashboardView, Forecast, Pager, ProductTable, SubmitOutcome, WeatherView,
};

/// Acknowledgement shown after a password-reset request.
pub const RESET_SENT_MESSAGE: &str = "Password reset email sent";

/// Table rows, the entry summary and the pager.
pub fn render_product_page(table: &ProductTable) -> String {
    let mut lines = vec![format!(
        "{:>4}  {:<48} {:>10}  {}",
        "#", "Title", "Price", "Category"
    )];
    lines.extend(table.rows().into_iter().map(|row| {
        format!(
            "{:>4}  {:<48} {:>10}  {}",
            row.id,
            truncate(&row.title, 48),
            row.price,
            row.category
        )
    }));
    lines.push(table.summary());
    let mut out = join_lines(&lines);
    out.push_str(&render_pager(&table.pager()));
    out
}

fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// `« ‹ 1 [2] 3 › »`, with disabled controls shown as `-`.
pub fn render_pager(pager: &Pager) -> String {
    let (first, previous) = if pager.at_start { ("-", "-") } else { ("«", "‹") };
    let (next, last) = if pager.at_end { ("-", "-") } else { ("›", "»") };
    let pages = pager
        .pages
        .iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.page)
            } else {
                link.page.to_string()
            }
        })
        .collect::<Vec<_>>();
    let mut parts = vec![first, previous];
    parts.extend(pages.iter().map(String::as_str));
    parts.extend([next, last]);
    format!("{}\n", parts.join(" "))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_owned()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Current conditions plus the temperature trend.
pub fn render_forecast(forecast: &Forecast) -> String {
    let current = &forecast.current;
    let mut lines = vec![
        forecast.resolved_address.clone(),
        format!("Temperature: {}", current.temp),
    ];
    if let Some(humidity) = current.humidity {
        lines.push(format!("Humidity: {humidity}"));
    }
    if let Some(wind_speed) = current.wind_speed {
        lines.push(format!("Wind Speed: {wind_speed}"));
    }
    if let Some(conditions) = &current.conditions {
        lines.push(format!("Conditions: {conditions}"));
    }
    let trend = forecast.trend();
    if !trend.is_empty() {
        lines.push("Temperature trend:".to_owned());
        lines.extend(
            trend
                .iter()
                .map(|point| format!("  {}  {}", point.date.format("%Y-%m-%d"), point.temp)),
        );
    }
    join_lines(&lines)
}

/// Weather panel, including inline errors.
pub fn render_weather_view(view: &WeatherView) -> String {
    match view {
        WeatherView::Empty => String::new(),
        WeatherView::Loaded(forecast) => render_forecast(forecast),
        WeatherView::Failed(message) => format!("Error: {message}\n"),
    }
}

/// Outcome line for an auth submission.
pub fn render_submit_outcome(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::InFlight => "A request is already in progress\n".to_owned(),
        SubmitOutcome::AlreadyAuthenticated => "Already signed in\n".to_owned(),
        SubmitOutcome::Cancelled => "Request cancelled\n".to_owned(),
        SubmitOutcome::Invalid(errors) => errors
            .errors()
            .iter()
            .map(|error| format!("{}: {}\n", error.field, error.message))
            .collect(),
        SubmitOutcome::Settled(status) => render_status(status),
    }
}

fn render_status(status: &AuthStatus) -> String {
    match status {
        AuthStatus::Idle => String::new(),
        AuthStatus::Pending => "Loading...\n".to_owned(),
        AuthStatus::Authenticated(identity) => format!(
            "Signed in as {}\n",
            identity
                .email()
                .or_else(|| identity.display_name())
                .unwrap_or_else(|| identity.uid().as_ref())
        ),
        AuthStatus::PasswordResetSent => format!("{RESET_SENT_MESSAGE}\n"),
        AuthStatus::Failed(failure) => format!("Error: {}\n", failure.message()),
    }
}

/// One dashboard section.
pub fn render_dashboard(view: &DashboardView) -> String {
    let lines = match view {
        DashboardView::Profile(summary) => {
            let mut lines = vec![format!("({}) {}", summary.avatar_initial, summary.display_name)];
            if let Some(email) = &summary.email {
                lines.push(format!("Email: {email}"));
            }
            lines.push(format!("User ID: {}", summary.uid_preview));
            lines.push(summary.verification.to_owned());
            if let Some(joined) = &summary.joined {
                lines.push(format!("Joined: {joined}"));
            }
            lines
        }
        DashboardView::Activity { message } => vec![(*message).to_owned()],
        DashboardView::Settings { actions } => {
            actions.iter().map(|action| format!("- {action}")).collect()
        }
    };
    join_lines(&lines)
}
