//! sqs-sdk 的公共工具：时间格式、HMAC-SHA1、query参数的编码和扁平化、xml解析

mod error;
pub use error::Error;

pub mod helper;
pub mod query_sign;
