use crate::core::library::{LibraryError, LibraryResult};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_AUTHOR_LEN: usize = 100;
pub const ISBN_LEN: usize = 13;
pub const PATRON_ID_LEN: usize = 6;

pub const INVALID_PATRON_ID: &str = "Invalid patron ID. Must be exactly 6 digits.";

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_patron_id(patron_id: &str) -> bool {
    is_digits(patron_id, PATRON_ID_LEN)
}

pub fn is_valid_isbn(isbn: &str) -> bool {
    is_digits(isbn, ISBN_LEN)
}

// ISBNs are often typed with grouping spaces
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| *c != ' ').collect()
}

pub fn validate_patron_id(patron_id: &str) -> LibraryResult<()> {
    if is_valid_patron_id(patron_id) {
        Ok(())
    } else {
        Err(LibraryError::validation(INVALID_PATRON_ID, Some("400".to_string())))
    }
}

pub fn validate_title(title: &str) -> LibraryResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LibraryError::validation("Title is required.", Some("400".to_string())));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(LibraryError::validation("Title must be less than 200 characters.", Some("400".to_string())));
    }
    Ok(title.to_string())
}

pub fn validate_author(author: &str) -> LibraryResult<String> {
    let author = author.trim();
    if author.is_empty() {
        return Err(LibraryError::validation("Author is required.", Some("400".to_string())));
    }
    if author.chars().count() > MAX_AUTHOR_LEN {
        return Err(LibraryError::validation("Author must be less than 100 characters.", Some("400".to_string())));
    }
    Ok(author.to_string())
}

pub fn validate_isbn(isbn: &str) -> LibraryResult<String> {
    let isbn = normalize_isbn(isbn);
    if !is_valid_isbn(&isbn) {
        return Err(LibraryError::validation("ISBN must be exactly 13 digits.", Some("400".to_string())));
    }
    Ok(isbn)
}

pub fn validate_total_copies(total_copies: i64) -> LibraryResult<i64> {
    if total_copies <= 0 {
        return Err(LibraryError::validation("Total copies must be a positive integer.", Some("400".to_string())));
    }
    Ok(total_copies)
}
