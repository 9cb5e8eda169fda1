use chrono::NaiveDate;
use serde_json::Value;

use super::error::NoteError;
use super::requests::{CreateNoteRequest, RecognizeWineRequest, UpdateNoteRequest};
use super::types::NoteSummary;

const MAX_TITLE_LEN: usize = 200;
const MAX_TAG_LEN: usize = 50;

/// Notes whose journal day is `date`.
pub fn filter_notes_by_date(notes: &[NoteSummary], date: NaiveDate) -> Vec<&NoteSummary> {
    notes
        .iter()
        .filter(|note| note.journal_date() == Some(date))
        .collect()
}

/// Posts carrying `tag` (all posts when `None`), newest page first.
///
/// Pages are 1-based; page 0 is treated as page 1.
pub fn filter_posts<'a>(
    posts: &'a [Value],
    tag: Option<&str>,
    page: u32,
    page_size: usize,
) -> Vec<&'a Value> {
    let page = page.max(1) as usize;

    posts
        .iter()
        .filter(|post| {
            tag.is_none_or(|tag| {
                post.get("tags")
                    .and_then(Value::as_array)
                    .is_some_and(|tags| tags.iter().any(|t| t.as_str() == Some(tag)))
            })
        })
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect()
}

fn validate_title(title: &str) -> Result<(), NoteError> {
    if title.trim().is_empty() {
        return Err(NoteError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(NoteError::TitleTooLong);
    }
    Ok(())
}

/// Validates a note before creation.
pub fn validate_create_note(request: &CreateNoteRequest) -> Result<(), NoteError> {
    validate_title(&request.title)?;
    request
        .tags
        .iter()
        .try_for_each(|tag| validate_tag_name(tag))
}

/// Validates the fields present in an update.
pub fn validate_update_note(request: &UpdateNoteRequest) -> Result<(), NoteError> {
    if let Some(title) = &request.title {
        validate_title(title)?;
    }
    if let Some(tags) = &request.tags {
        tags.iter().try_for_each(|tag| validate_tag_name(tag))?;
    }
    Ok(())
}

/// Validates a tag name.
pub fn validate_tag_name(name: &str) -> Result<(), NoteError> {
    if name.trim().is_empty() {
        return Err(NoteError::EmptyTagName);
    }
    if name.chars().count() > MAX_TAG_LEN {
        return Err(NoteError::TagNameTooLong);
    }
    Ok(())
}

/// A recognition request needs an image.
pub fn validate_wine_request(request: &RecognizeWineRequest) -> Result<(), NoteError> {
    if request.image.trim().is_empty() {
        return Err(NoteError::EmptyImage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_filter_notes_by_date() {
        let notes = vec![
            NoteSummary::new("a").with_date(date(1)),
            NoteSummary::new("b").with_date(date(2)),
            NoteSummary::new("c"),
            NoteSummary::new("d").with_date(date(1)),
        ];

        let ids: Vec<&str> = filter_notes_by_date(&notes, date(1))
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "d"]);
    }

    #[test]
    fn test_filter_posts_by_tag_and_page() {
        let posts: Vec<Value> = (1..=5)
            .map(|i| json!({ "id": i, "tags": if i % 2 == 0 { vec!["wine"] } else { vec![] } }))
            .collect();

        let wine = filter_posts(&posts, Some("wine"), 1, 10);
        assert_eq!(wine.len(), 2);

        let second_page = filter_posts(&posts, None, 2, 2);
        let ids: Vec<i64> = second_page.iter().filter_map(|p| p["id"].as_i64()).collect();
        assert_eq!(ids, [3, 4]);

        assert_eq!(filter_posts(&posts, None, 0, 2).len(), 2);
        assert!(filter_posts(&posts, None, 9, 2).is_empty());
    }

    #[test]
    fn test_validate_create_note() {
        assert!(validate_create_note(&CreateNoteRequest::new("Lunch", date(1))).is_ok());
        assert_eq!(
            validate_create_note(&CreateNoteRequest::new("  ", date(1))),
            Err(NoteError::EmptyTitle)
        );
        assert_eq!(
            validate_create_note(&CreateNoteRequest::new("x".repeat(201), date(1))),
            Err(NoteError::TitleTooLong)
        );
        assert_eq!(
            validate_create_note(
                &CreateNoteRequest::new("Lunch", date(1)).with_tags(vec![String::new()])
            ),
            Err(NoteError::EmptyTagName)
        );
    }

    #[test]
    fn test_validate_update_note_only_checks_present_fields() {
        assert!(validate_update_note(&UpdateNoteRequest::default()).is_ok());
        let request = UpdateNoteRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(validate_update_note(&request), Err(NoteError::EmptyTitle));
    }

    #[test]
    fn test_validate_tag_name() {
        assert!(validate_tag_name("wine").is_ok());
        assert_eq!(validate_tag_name(""), Err(NoteError::EmptyTagName));
        assert_eq!(
            validate_tag_name(&"t".repeat(51)),
            Err(NoteError::TagNameTooLong)
        );
    }

    #[test]
    fn test_validate_wine_request() {
        let request = RecognizeWineRequest {
            image: " ".to_string(),
            mime_type: None,
        };
        assert_eq!(validate_wine_request(&request), Err(NoteError::EmptyImage));
    }
}
