/// Result alias with anyhow::Error, used by every layer of the crate.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
