//! Authentication primitives such as login credentials and signup forms.
//!
//! Form validation happens here, before a caller talks to the session store.
//! The store itself never reports validation failures.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use recipehub::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" jamie@example.com ", "password123").unwrap();
/// assert_eq!(creds.email(), "jamie@example.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signup form field, used to report which input was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    /// Full name.
    Name,
    /// Email address.
    Email,
    /// Password.
    Password,
    /// Password confirmation.
    ConfirmPassword,
}

/// Validation failures raised by [`SignupForm::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// At least one required field was blank; the first one is reported.
    MissingField(SignupField),
    /// Password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "Please fill in all fields"),
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for SignupValidationError {}

/// Validated signup form.
///
/// Signup has no backend of its own; a valid form is turned into
/// [`LoginCredentials`] and proceeds as a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    name: String,
    credentials: LoginCredentials,
}

impl SignupForm {
    /// Validate the raw signup inputs.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, SignupValidationError> {
        let required = [
            (SignupField::Name, name.trim()),
            (SignupField::Email, email.trim()),
            (SignupField::Password, password),
            (SignupField::ConfirmPassword, confirm_password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(SignupValidationError::MissingField(*field));
        }
        if password != confirm_password {
            return Err(SignupValidationError::PasswordMismatch);
        }

        let credentials = LoginCredentials::try_from_parts(email, password).map_err(|err| {
            SignupValidationError::MissingField(match err {
                LoginValidationError::EmptyEmail => SignupField::Email,
                LoginValidationError::EmptyPassword => SignupField::Password,
            })
        })?;

        Ok(Self {
            name: name.trim().to_owned(),
            credentials,
        })
    }

    /// Name entered on the form.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Credentials used to sign the new user in.
    pub fn into_credentials(self) -> LoginCredentials {
        self.credentials
    }
}
