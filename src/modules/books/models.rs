use bookhouse_db::{Document, Stored};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A catalog entry as returned to clients: `{id, name, description, author,
/// publication, createdAt}`.
pub type Book = Stored<BookDocument>;

/// Persisted body of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDocument {
    /// Title of the book
    pub name: String,
    /// Free-text summary
    pub description: String,
    /// Author's display name
    pub author: String,
    /// Publication year
    pub publication: i64,
    /// Set once when the book is created
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl BookDocument {
    pub fn new(fields: BookFields, created_at: OffsetDateTime) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            author: fields.author,
            publication: fields.publication,
            created_at,
        }
    }
}

impl Document for BookDocument {
    type Patch = BookFields;

    fn apply(&mut self, patch: BookFields) {
        self.name = patch.name;
        self.description = patch.description;
        self.author = patch.author;
        self.publication = patch.publication;
    }
}

/// Client-writable fields of a book, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub name: String,
    pub description: String,
    pub author: String,
    pub publication: i64,
}

impl BookFields {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.description.trim().is_empty()
            && self.author.trim().is_empty()
            && self.publication == 0
    }

    /// True when every text field is non-blank.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.author.trim().is_empty()
    }
}
