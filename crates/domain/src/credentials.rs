use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub const MAX_LEN: usize = 254;

    pub fn new(email: &str) -> Result<Self, EmailAddressError> {
        let trimmed_email = email.trim();

        if trimmed_email.is_empty() {
            return Err(EmailAddressError::Empty);
        }

        let len = trimmed_email.len();

        if len > Self::MAX_LEN {
            return Err(EmailAddressError::TooLong(len));
        }

        match trimmed_email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(EmailAddress(trimmed_email.to_string()))
            }
            _ => Err(EmailAddressError::Invalid),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EmailAddressError {
    #[error("Email address must not be empty")]
    Empty,
    #[error("Email address must be 254 characters or fewer ({0} > 254)")]
    TooLong(usize),
    #[error("Invalid email address")]
    Invalid,
}

#[derive(AsRef, Debug, Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LEN: usize = 6;
    pub const MAX_LEN: usize = 128;

    pub fn new(password: &str) -> Result<Self, PasswordError> {
        let len = password.chars().count();

        if len < Self::MIN_LEN {
            return Err(PasswordError::TooShort(len));
        }

        if len > Self::MAX_LEN {
            return Err(PasswordError::TooLong(len));
        }

        Ok(Password(password.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PasswordError {
    #[error("Password must be at least 6 characters ({0} < 6)")]
    TooShort(usize),
    #[error("Password must be 128 characters or fewer ({0} > 128)")]
    TooLong(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alice@example.com", Ok(EmailAddress("alice@example.com".to_string())))]
    #[case("  bob@example.com  ", Ok(EmailAddress("bob@example.com".to_string())))]
    #[case("", Err(EmailAddressError::Empty))]
    #[case("alice", Err(EmailAddressError::Invalid))]
    #[case("@example.com", Err(EmailAddressError::Invalid))]
    #[case("alice@", Err(EmailAddressError::Invalid))]
    fn test_email_address_new(
        #[case] email: &str,
        #[case] expected: Result<EmailAddress, EmailAddressError>,
    ) {
        assert_eq!(EmailAddress::new(email), expected);
    }

    #[test]
    fn test_email_address_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            EmailAddress::new(&email),
            Err(EmailAddressError::TooLong(262))
        );
    }

    #[rstest]
    #[case("secret", Ok(Password("secret".to_string())))]
    #[case("12345", Err(PasswordError::TooShort(5)))]
    #[case(&"x".repeat(129), Err(PasswordError::TooLong(129)))]
    fn test_password_new(#[case] password: &str, #[case] expected: Result<Password, PasswordError>) {
        assert_eq!(Password::new(password), expected);
    }
}
