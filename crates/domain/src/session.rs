use crate::{
    CreateError, Credentials, DeleteError, EmailAddress, Password, ReadError, User,
    ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn request_session(&self, credentials: Credentials) -> Result<User, ReadError>;
    async fn register_user(&self, credentials: Credentials) -> Result<User, CreateError>;
    async fn get_session(&self) -> Result<User, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;

    fn validate_email(&self, email: &str) -> Result<EmailAddress, ValidationError> {
        EmailAddress::new(email).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_password(&self, password: &str) -> Result<Password, ValidationError> {
        Password::new(password).map_err(|err| ValidationError::Other(err.into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn request_session(&self, credentials: Credentials) -> Result<User, ReadError>;
    async fn register_user(&self, credentials: Credentials) -> Result<User, CreateError>;
    async fn initialize_session(&self) -> Result<User, ReadError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}
