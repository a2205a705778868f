use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RvfsError {
    #[error("no such entry")]
    NoSuchEntry,
    #[error("entry already exists")]
    AlreadyExists,
    #[error("not a directory")]
    NotADirectory,
    #[error("is a directory")]
    IsADirectory,
    #[error("directory not empty")]
    NotEmpty,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("permission denied")]
    PermissionDenied,
    #[error("result too large for buffer")]
    Range,
    #[error("cross-device link")]
    CrossDevice,
    #[error("out of memory")]
    OutOfMemory,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RvfsError>;

impl RvfsError {
    /// POSIX errno this error maps to at the FUSE boundary.
    pub fn to_errno(&self) -> i32 {
        match self {
            RvfsError::NoSuchEntry => libc::ENOENT,
            RvfsError::AlreadyExists => libc::EEXIST,
            RvfsError::NotADirectory => libc::ENOTDIR,
            RvfsError::IsADirectory => libc::EISDIR,
            RvfsError::NotEmpty => libc::ENOTEMPTY,
            RvfsError::InvalidArgument => libc::EINVAL,
            RvfsError::PermissionDenied => libc::EACCES,
            RvfsError::Range => libc::ERANGE,
            RvfsError::CrossDevice => libc::EXDEV,
            RvfsError::OutOfMemory => libc::ENOMEM,
            RvfsError::Io(e) => e.raw_os_error().unwrap_or(libc::EIO),
        }
    }
}

impl PartialEq for RvfsError {
    fn eq(&self, other: &Self) -> bool {
        self.to_errno() == other.to_errno()
    }
}
