mod error;
mod operations;
mod requests;
mod types;

pub use error::NoteError;
pub use operations::{
    filter_notes_by_date, filter_posts, validate_create_note, validate_tag_name,
    validate_update_note, validate_wine_request,
};
pub use requests::{
    CreateNoteRequest, CreateTagRequest, ListNotesQuery, ListPostsQuery, RecognizeWineRequest,
    UpdateNoteRequest,
};
pub use types::{NoteSummary, Tag};
