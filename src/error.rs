use crate::diagram::PeerId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to decode telemetry payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("peer {0} is already registered")]
    DuplicatePeer(PeerId),
}
