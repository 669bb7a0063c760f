use thiserror::Error;

/// Failures surfaced by the containers in this crate.
///
/// Absent keys, elements or sequences on the `remove`/`contains` paths are not
/// errors; those report `false` (or `None`) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("duplicate key: the key is already present")]
    DuplicateKey,
    #[error("key not found")]
    KeyNotFound,
    #[error("container is empty")]
    EmptyContainer,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

/// Bounds check shared by every `copy_to`.
pub(crate) fn check_copy_bounds(dest_len: usize, offset: usize, count: usize) -> Result<()> {
    if offset > dest_len {
        return Err(CollectionError::InvalidArgument(format!(
            "offset {offset} is out of range for a destination of length {dest_len}"
        )));
    }
    if dest_len - offset < count {
        return Err(CollectionError::InvalidArgument(format!(
            "destination has {} slots after offset {offset} but {count} are needed",
            dest_len - offset
        )));
    }
    Ok(())
}
