use sso_core::CoreError;
use sso_directory::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(
        "username {user_name} is already taken by pre-existing user {user_id}; import skipped \
         because the requested attributes do not match the existing user"
    )]
    UserConflict { user_name: String, user_id: String },
}
