use crate::error::StegoSuiteError;

pub type Result<T> = std::result::Result<T, StegoSuiteError>;
