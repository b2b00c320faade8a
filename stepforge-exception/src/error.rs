use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("empty ErrorEquals in {0} policy")]
    EmptyErrorEquals(&'static str),

    #[error("invalid error class in {0} policy: '{1}'")]
    InvalidErrorClass(&'static str, String),

    #[error("'States.ALL' must be the only error class in its {0} policy")]
    WildcardNotAlone(&'static str),
}
