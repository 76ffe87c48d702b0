use crate::assets::AssetError;
use crate::device::ProgramLinkError;

/// Why an application could not start. Hosts treat this as fatal.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    ProgramLink(#[from] ProgramLinkError),
}
