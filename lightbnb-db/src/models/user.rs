//! User input validation

use super::validation::required_text;
use super::ValidationError;

/// Column width of the text columns in `users`
const MAX_FIELD_LEN: usize = 255;

/// Email address as stored in `users.email`.
///
/// Surrounding whitespace is trimmed; case is kept as given, so lookups
/// must use the stored case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Create a new email.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::models::Email;
    ///
    /// assert!(Email::new("tristanjacobs@gmail.com").is_ok());
    /// assert!(Email::new("").is_err());
    /// assert!(Email::new("no-at-sign").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let email = required_text("email", s, MAX_FIELD_LEN)?;

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "email",
                    reason: "must look like name@domain",
                })
            }
        }

        if email.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "cannot contain whitespace",
            });
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated insert payload for `users`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: Email,
    password: String,
}

impl NewUser {
    /// The password is stored as given (normally a hash); it is not trimmed.
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        let name = required_text("name", name, MAX_FIELD_LEN)?;
        let email = Email::new(email)?;

        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        if password.chars().count() > MAX_FIELD_LEN {
            return Err(ValidationError::TooLong {
                field: "password",
                max: MAX_FIELD_LEN,
            });
        }

        Ok(Self {
            name,
            email,
            password: password.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails() {
        assert!(Email::new("a@b").is_ok());
        assert!(Email::new("sebastianguerra@ymail.com").is_ok());
        assert_eq!(Email::new("  x@y.com ").unwrap().as_str(), "x@y.com");
    }

    #[test]
    fn email_case_preserved() {
        assert_eq!(Email::new("Mixed@Case.COM").unwrap().as_str(), "Mixed@Case.COM");
    }

    #[test]
    fn rejects_bad_emails() {
        for bad in ["", "   ", "plain", "@domain", "local@", "a@b@c", "a b@c"] {
            assert!(Email::new(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn new_user_keeps_password_verbatim() {
        let user = NewUser::new(" Ada ", "ada@example.com", " secret ").unwrap();
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.password(), " secret ");
    }

    #[test]
    fn new_user_rejects_empty_password() {
        assert_eq!(
            NewUser::new("Ada", "ada@example.com", "").unwrap_err(),
            ValidationError::Empty { field: "password" }
        );
    }

    #[test]
    fn new_user_rejects_long_password() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);
        assert!(matches!(
            NewUser::new("Ada", "ada@example.com", &long).unwrap_err(),
            ValidationError::TooLong { field: "password", .. }
        ));
    }
}
