//! Randomized and edge-case test data.
//!
//! Produces Books and Authors along the axes the negative suites need:
//! realistic-random, null fields, empty strings, boundary numbers, oversized
//! and hostile text, malformed and future dates. Generated identifiers are
//! unique for the lifetime of the generator.

#[cfg(test)]
mod tests;

use crate::models::{Author, Book};
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::sync::Mutex;
use tracing::warn;

const BOOK_ID_RANGE: Range<i32> = 1..100_000;
const AUTHOR_ID_RANGE: Range<i32> = 1_000..100_000;

const TITLE_WORDS: &[&str] = &[
    "Silent", "Crimson", "Forgotten", "Winter", "Garden", "Mirror", "Harbor", "Ember", "Hollow",
    "Paper", "Glass", "Iron", "Last", "Broken", "Distant", "Golden",
];
const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua",
];
const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Margaret", "Dennis", "Radia", "Ken",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Hamilton", "Ritchie",
    "Perlman", "Thompson",
];

/// Thread-safe source of identifiers that are never issued twice.
///
/// Draws randomly from a bounded range and retries on collision. The range
/// bounds the memory the used-id set can grow to; once it is consumed the
/// pool reports exhaustion instead of spinning forever.
#[derive(Debug)]
pub struct UniqueIdPool {
    range: Range<i32>,
    used: Mutex<HashSet<i32>>,
}

impl UniqueIdPool {
    pub fn new(range: Range<i32>) -> Self {
        Self {
            range,
            used: Mutex::new(HashSet::new()),
        }
    }

    /// Next never-before-issued id from the range.
    pub fn next_id(&self) -> Result<i32, GeneratorError> {
        let mut used = self.used.lock().unwrap_or_else(|e| e.into_inner());
        let capacity = (self.range.end - self.range.start) as usize;
        if used.len() >= capacity {
            return Err(GeneratorError::IdPoolExhausted {
                start: self.range.start,
                end: self.range.end,
            });
        }
        let mut rng = rand::thread_rng();
        loop {
            let id = rng.gen_range(self.range.clone());
            if used.insert(id) {
                return Ok(id);
            }
        }
    }

    /// How many ids have been handed out so far.
    pub fn issued(&self) -> usize {
        self.used.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[derive(Debug)]
pub enum GeneratorError {
    /// Every id in the configured range has been issued.
    IdPoolExhausted { start: i32, end: i32 },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdPoolExhausted { start, end } => {
                write!(f, "Id pool {}..{} is exhausted", start, end)
            }
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Fixture factory. One instance per suite run; the id pools are scoped to
/// the generator, not the process.
#[derive(Debug)]
pub struct TestDataGenerator {
    book_ids: UniqueIdPool,
    author_ids: UniqueIdPool,
}

impl Default for TestDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDataGenerator {
    pub fn new() -> Self {
        Self {
            book_ids: UniqueIdPool::new(BOOK_ID_RANGE),
            author_ids: UniqueIdPool::new(AUTHOR_ID_RANGE),
        }
    }

    /// Unique book identifier, never repeated within this generator.
    pub fn unique_book_id(&self) -> Result<i32, GeneratorError> {
        self.book_ids.next_id()
    }

    /// Unique author identifier, never repeated within this generator.
    pub fn unique_author_id(&self) -> Result<i32, GeneratorError> {
        self.author_ids.next_id()
    }

    /// ISO-8601 date-time text up to ten years in the past.
    pub fn random_past_date(&self) -> String {
        let days_back = rand::thread_rng().gen_range(0..365 * 10);
        (Utc::now() - ChronoDuration::days(days_back))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    /// ISO-8601 date-time text `years` in the future.
    pub fn future_date(&self, years: i64) -> String {
        (Utc::now() + ChronoDuration::days(365 * years))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    }

    // ------------------------------------------------------------------
    // Books
    // ------------------------------------------------------------------

    /// A fully-populated, realistic book with a unique id.
    pub fn random_book(&self) -> Result<Book, GeneratorError> {
        let mut rng = rand::thread_rng();
        Ok(Book {
            id: Some(self.unique_book_id()?),
            title: Some(pick_words(&mut rng, TITLE_WORDS, 2..4)),
            description: Some(pick_words(&mut rng, LOREM_WORDS, 10..16)),
            page_count: Some(rng.gen_range(50..1000)),
            excerpt: Some(pick_words(&mut rng, LOREM_WORDS, 20..40)),
            publish_date: Some(self.random_past_date()),
        })
    }

    pub fn book_with_all_null_fields(&self) -> Book {
        Book::default()
    }

    /// A valid book with one named field nulled out.
    ///
    /// An unrecognized field name is tolerated: the valid book is returned
    /// unchanged and a warning is logged.
    pub fn book_with_null_field(&self, field: &str) -> Result<Book, GeneratorError> {
        let book = self.random_book()?;
        Ok(match field.to_lowercase().as_str() {
            "id" => book.with_id(None),
            "title" => book.with_title(None),
            "description" => book.with_description(None),
            "pagecount" => book.with_page_count(None),
            "excerpt" => book.with_excerpt(None),
            "publishdate" => book.with_publish_date(None),
            _ => {
                warn!(field, "Unknown book field name; returning unmodified book");
                book
            }
        })
    }

    pub fn book_with_empty_fields(&self) -> Result<Book, GeneratorError> {
        Ok(Book {
            id: Some(self.unique_book_id()?),
            title: Some(String::new()),
            description: Some(String::new()),
            page_count: Some(0),
            excerpt: Some(String::new()),
            publish_date: Some(String::new()),
        })
    }

    pub fn book_with_page_count(&self, page_count: i32) -> Result<Book, GeneratorError> {
        Ok(self.random_book()?.with_page_count(Some(page_count)))
    }

    pub fn book_with_zero_page_count(&self) -> Result<Book, GeneratorError> {
        self.book_with_page_count(0)
    }

    pub fn book_with_negative_page_count(&self) -> Result<Book, GeneratorError> {
        let count = -rand::thread_rng().gen_range(1..100);
        self.book_with_page_count(count)
    }

    /// Title of exactly `length` characters.
    pub fn book_with_long_title(&self, length: usize) -> Result<Book, GeneratorError> {
        let mut rng = rand::thread_rng();
        let title: String = (0..length)
            .map(|_| rng.gen_range(b'a'..=b'z') as char)
            .collect();
        Ok(self.random_book()?.with_title(Some(title)))
    }

    pub fn book_with_special_characters(&self) -> Result<Book, GeneratorError> {
        Ok(self
            .random_book()?
            .with_title(Some("!@#$%^&*()_+{}|:<>?~`-=[]\\;',./".to_string())))
    }

    pub fn book_with_unicode_title(&self) -> Result<Book, GeneratorError> {
        Ok(self
            .random_book()?
            .with_title(Some("Türkçe Kitap öçşğüıÖÇŞĞÜİ 测试书籍".to_string())))
    }

    pub fn book_with_future_publish_date(&self) -> Result<Book, GeneratorError> {
        Ok(self
            .random_book()?
            .with_publish_date(Some(self.future_date(10))))
    }

    /// DD-MM-YYYY, which the API's ISO parser should reject.
    pub fn book_with_invalid_date_format(&self) -> Result<Book, GeneratorError> {
        Ok(self
            .random_book()?
            .with_publish_date(Some("31-12-2023".to_string())))
    }

    pub fn book_with_sql_injection_payload(&self) -> Result<Book, GeneratorError> {
        Ok(self
            .random_book()?
            .with_description(Some("'; DROP TABLE Books; --".to_string())))
    }

    pub fn book_with_xss_payload(&self) -> Result<Book, GeneratorError> {
        Ok(self
            .random_book()?
            .with_title(Some("<script>alert('XSS')</script>".to_string())))
    }

    // ------------------------------------------------------------------
    // Authors
    // ------------------------------------------------------------------

    /// A fully-populated author with a unique id.
    pub fn random_author(&self) -> Result<Author, GeneratorError> {
        let mut rng = rand::thread_rng();
        Ok(Author {
            id: Some(self.unique_author_id()?),
            id_book: Some(rng.gen_range(AUTHOR_ID_RANGE)),
            first_name: Some(FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())].to_string()),
            last_name: Some(LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())].to_string()),
        })
    }

    /// A valid author with one named field nulled out; unknown names warn
    /// and return the author unchanged.
    pub fn author_with_null_field(&self, field: &str) -> Result<Author, GeneratorError> {
        let author = self.random_author()?;
        Ok(match field.to_lowercase().as_str() {
            "id" => author.with_id(None),
            "idbook" => author.with_id_book(None),
            "firstname" => author.with_first_name(None),
            "lastname" => author.with_last_name(None),
            _ => {
                warn!(field, "Unknown author field name; returning unmodified author");
                author
            }
        })
    }
}

fn pick_words<R: Rng>(rng: &mut R, source: &[&str], count: Range<usize>) -> String {
    let n = rng.gen_range(count);
    (0..n)
        .map(|_| source[rng.gen_range(0..source.len())])
        .collect::<Vec<_>>()
        .join(" ")
}
