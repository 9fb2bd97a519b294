//! Credentials definitions.
//!
//! secret key只作为HMAC的key使用，不会被发送，`Debug`输出时也会被隐藏。

use std::fmt::{Debug, Formatter};

#[derive(Clone)]
pub struct Credentials {
    access_key_id: String,
    secret_key: String,
}

#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("missing {0}")]
    Missing(&'static str),
}

impl Credentials {
    /// access key id 和 secret key 都不能为空
    pub fn new(
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let access_key_id = access_key_id.into();
        let secret_key = secret_key.into();
        if access_key_id.trim().is_empty() {
            return Err(CredentialsError::Missing("AWSAccessKeyId"));
        }
        if secret_key.is_empty() {
            return Err(CredentialsError::Missing("SecretKey"));
        }
        Ok(Self {
            access_key_id,
            secret_key,
        })
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"******")
            .finish()
    }
}
