#![doc = include_str!("../README.md")]

#[cfg(feature = "sqs")]
pub mod sqs;

/// Credentials used to sign SQS requests
#[cfg(feature = "sqs")]
pub mod credentials;
