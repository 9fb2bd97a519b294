#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    Common(String),
    #[error("time format error: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("XML parse error: {0}")]
    Xml(String),
}
