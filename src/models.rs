//! Domain records for the bookstore API.
//!
//! Every field is optional so negative fixtures (null fields, minimal
//! payloads) can be built from the same types as realistic data. `None`
//! serializes as JSON `null`, which the negative tests rely on. Unknown
//! properties in responses are ignored on decode.

use serde::{Deserialize, Serialize};

/// A book as the API transports it. `publish_date` travels as an ISO-8601
/// date-time string; format validation is the server's problem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<i32>,
    pub excerpt: Option<String>,
    pub publish_date: Option<String>,
}

impl Book {
    /// A realistic fixed fixture for tests that don't need randomness.
    pub fn sample() -> Self {
        Self {
            id: None,
            title: Some("Sample Book Title".to_string()),
            description: Some(
                "This is a sample book description for testing purposes".to_string(),
            ),
            page_count: Some(250),
            excerpt: Some("This is a sample excerpt from the book".to_string()),
            publish_date: Some("2024-01-01T00:00:00".to_string()),
        }
    }

    /// The smallest payload the API nominally accepts.
    pub fn minimal() -> Self {
        Self {
            title: Some("Minimal Book".to_string()),
            page_count: Some(1),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: Option<i32>) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_page_count(mut self, page_count: Option<i32>) -> Self {
        self.page_count = page_count;
        self
    }

    pub fn with_excerpt(mut self, excerpt: Option<String>) -> Self {
        self.excerpt = excerpt;
        self
    }

    pub fn with_publish_date(mut self, publish_date: Option<String>) -> Self {
        self.publish_date = publish_date;
        self
    }
}

/// An author record. `id_book` is a foreign key to [`Book`], not enforced
/// client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    pub id: Option<i32>,
    pub id_book: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Author {
    pub fn minimal() -> Self {
        Self {
            id: Some(1),
            id_book: Some(1),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: Option<i32>) -> Self {
        self.id = id;
        self
    }

    pub fn with_id_book(mut self, id_book: Option<i32>) -> Self {
        self.id_book = id_book;
        self
    }

    pub fn with_first_name(mut self, first_name: Option<String>) -> Self {
        self.first_name = first_name;
        self
    }

    pub fn with_last_name(mut self, last_name: Option<String>) -> Self {
        self.last_name = last_name;
        self
    }

    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => String::new(),
        }
    }

    /// Both name fields present and non-blank.
    pub fn is_valid(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        filled(&self.first_name) && filled(&self.last_name)
    }
}
