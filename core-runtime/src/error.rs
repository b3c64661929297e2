use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    #[error("Bridge initialization failed: {0}")]
    Bridge(#[from] bridge_traits::BridgeError),
}

pub type Result<T> = std::result::Result<T, Error>;
