use thiserror::Error;

/// Validation errors for note, tag and wine requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("Note title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Tag name cannot be empty")]
    EmptyTagName,
    #[error("Tag name too long (max 50 characters)")]
    TagNameTooLong,
    #[error("Wine label image is required")]
    EmptyImage,
}
