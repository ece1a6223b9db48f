//! The three-mode authentication form and its local validation rules.
//!
//! Each mode carries exactly the fields it needs, so a sign-in form with a
//! confirmation password cannot be built.

use std::fmt;

use zeroize::Zeroizing;

use super::credentials::{Credentials, EmailAddress, EmailValidationError, Password};

/// Minimum password length in every mode that takes a password.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Which form is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthMode {
    /// Existing account, email and password.
    #[default]
    SignIn,
    /// New account with password confirmation.
    SignUp,
    /// Request a password-reset email.
    ForgotPassword,
}

impl AuthMode {
    /// Label of the submit button for this mode.
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
            Self::ForgotPassword => "Reset Password",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.submit_label())
    }
}

/// Input field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Account email.
    Email,
    /// Account password.
    Password,
    /// Repeated password on sign-up.
    ConfirmPassword,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Password => write!(f, "password"),
            Self::ConfirmPassword => write!(f, "confirmPassword"),
        }
    }
}

/// One message attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field.
    pub field: FormField,
    /// Message shown beside the field.
    pub message: &'static str,
}

/// Local validation failure; at most one message per field, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidationError {
    errors: Vec<FieldError>,
}

impl FormValidationError {
    /// All field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Message for `field`, if it failed.
    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

impl fmt::Display for FormValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormValidationError {}

/// Attempted to edit a field the current mode does not show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} is not part of the {mode} form")]
pub struct FieldNotInMode {
    /// Field the caller tried to edit.
    pub field: FormField,
    /// Mode the form was in.
    pub mode: AuthMode,
}

/// Form contents, shaped by mode.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthForm {
    /// Sign-in fields.
    SignIn {
        /// Raw email input.
        email: String,
        /// Raw password input.
        password: Zeroizing<String>,
    },
    /// Sign-up fields.
    SignUp {
        /// Raw email input.
        email: String,
        /// Raw password input.
        password: Zeroizing<String>,
        /// Raw confirmation input.
        confirm_password: Zeroizing<String>,
    },
    /// Password-reset fields.
    ForgotPassword {
        /// Raw email input.
        email: String,
    },
}

/// What a valid form asks the identity provider to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Authenticate an existing account.
    SignIn(Credentials),
    /// Register a new account.
    SignUp(Credentials),
    /// Send a password-reset email.
    PasswordReset(EmailAddress),
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::empty(AuthMode::SignIn)
    }
}

impl AuthForm {
    /// Blank form for `mode`.
    pub fn empty(mode: AuthMode) -> Self {
        match mode {
            AuthMode::SignIn => Self::SignIn {
                email: String::new(),
                password: Zeroizing::default(),
            },
            AuthMode::SignUp => Self::SignUp {
                email: String::new(),
                password: Zeroizing::default(),
                confirm_password: Zeroizing::default(),
            },
            AuthMode::ForgotPassword => Self::ForgotPassword {
                email: String::new(),
            },
        }
    }

    /// Mode this form belongs to.
    pub const fn mode(&self) -> AuthMode {
        match self {
            Self::SignIn { .. } => AuthMode::SignIn,
            Self::SignUp { .. } => AuthMode::SignUp,
            Self::ForgotPassword { .. } => AuthMode::ForgotPassword,
        }
    }

    /// Raw email input.
    pub fn email(&self) -> &str {
        match self {
            Self::SignIn { email, .. }
            | Self::SignUp { email, .. }
            | Self::ForgotPassword { email } => email,
        }
    }

    /// Raw password input, when the mode has one.
    pub fn password(&self) -> Option<&str> {
        match self {
            Self::SignIn { password, .. } | Self::SignUp { password, .. } => {
                Some(password.as_str())
            }
            Self::ForgotPassword { .. } => None,
        }
    }

    /// Raw confirmation input, sign-up only.
    pub fn confirm_password(&self) -> Option<&str> {
        match self {
            Self::SignUp {
                confirm_password, ..
            } => Some(confirm_password.as_str()),
            Self::SignIn { .. } | Self::ForgotPassword { .. } => None,
        }
    }

    /// Replace the email input.
    pub fn set_email(&mut self, value: &str) {
        match self {
            Self::SignIn { email, .. }
            | Self::SignUp { email, .. }
            | Self::ForgotPassword { email } => *email = value.to_owned(),
        }
    }

    /// Replace the password input.
    pub fn set_password(&mut self, value: &str) -> Result<(), FieldNotInMode> {
        match self {
            Self::SignIn { password, .. } | Self::SignUp { password, .. } => {
                *password = Zeroizing::new(value.to_owned());
                Ok(())
            }
            Self::ForgotPassword { .. } => Err(self.not_in_mode(FormField::Password)),
        }
    }

    /// Replace the confirmation input.
    pub fn set_confirm_password(&mut self, value: &str) -> Result<(), FieldNotInMode> {
        match self {
            Self::SignUp {
                confirm_password, ..
            } => {
                *confirm_password = Zeroizing::new(value.to_owned());
                Ok(())
            }
            Self::SignIn { .. } | Self::ForgotPassword { .. } => {
                Err(self.not_in_mode(FormField::ConfirmPassword))
            }
        }
    }

    /// Run every rule for the current mode.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{AuthForm, AuthMode, FormField};
    ///
    /// let mut form = AuthForm::empty(AuthMode::SignUp);
    /// form.set_email("ada@example.com");
    /// form.set_password("abc12345").unwrap();
    /// form.set_confirm_password("abc12345").unwrap();
    ///
    /// let err = form.validate().unwrap_err();
    /// assert_eq!(
    ///     err.message_for(FormField::Password),
    ///     Some("Password must contain at least one uppercase letter"),
    /// );
    /// ```
    pub fn validate(&self) -> Result<Submission, FormValidationError> {
        let mut errors = Vec::new();
        let email = EmailAddress::parse(self.email());
        if let Err(error) = &email {
            errors.push(FieldError {
                field: FormField::Email,
                message: email_message(*error),
            });
        }

        match self {
            Self::SignIn { password, .. } => {
                push_error(&mut errors, FormField::Password, sign_in_password(password));
            }
            Self::SignUp {
                password,
                confirm_password,
                ..
            } => {
                push_error(&mut errors, FormField::Password, sign_up_password(password));
                push_error(
                    &mut errors,
                    FormField::ConfirmPassword,
                    confirmation(password, confirm_password),
                );
            }
            Self::ForgotPassword { .. } => {}
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(self.submission(email)),
            _ => Err(FormValidationError { errors }),
        }
    }

    fn submission(&self, email: EmailAddress) -> Submission {
        match self {
            Self::SignIn { password, .. } => {
                Submission::SignIn(Credentials::new(email, Password::new(password)))
            }
            Self::SignUp { password, .. } => {
                Submission::SignUp(Credentials::new(email, Password::new(password)))
            }
            Self::ForgotPassword { .. } => Submission::PasswordReset(email),
        }
    }

    const fn not_in_mode(&self, field: FormField) -> FieldNotInMode {
        FieldNotInMode {
            field,
            mode: self.mode(),
        }
    }
}

impl fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForm")
            .field("mode", &self.mode())
            .field("email", &self.email())
            .finish_non_exhaustive()
    }
}

const fn email_message(error: EmailValidationError) -> &'static str {
    match error {
        EmailValidationError::Missing => "Email is required",
        EmailValidationError::Malformed => "Invalid email address",
    }
}

fn push_error(errors: &mut Vec<FieldError>, field: FormField, message: Option<&'static str>) {
    if let Some(message) = message {
        errors.push(FieldError { field, message });
    }
}

fn sign_in_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        return Some("Password is required");
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Some("Password must be at least 8 characters");
    }
    None
}

fn sign_up_password(password: &str) -> Option<&'static str> {
    sign_in_password(password).or_else(|| {
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            Some("Password must contain at least one uppercase letter")
        } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
            Some("Password must contain at least one lowercase letter")
        } else if !password.chars().any(|c| c.is_ascii_digit()) {
            Some("Password must contain at least one number")
        } else {
            None
        }
    })
}

fn confirmation(password: &str, confirm_password: &str) -> Option<&'static str> {
    if confirm_password.is_empty() {
        Some("Confirm password is required")
    } else if password != confirm_password {
        Some("Passwords must match")
    } else {
        None
    }
}
