#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] bloodlink_types::TextError),
    #[error("invalid identifier: {0}")]
    Uuid(#[from] bloodlink_uuid::UuidError),
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("donor not found: {0}")]
    DonorNotFound(String),
    #[error("blood request not found: {0}")]
    RequestNotFound(String),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to create record directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("record store lock poisoned")]
    LockPoisoned,
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
