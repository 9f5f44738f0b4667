//! Tests for the test data generator.

use super::*;

#[test]
fn id_pool_never_issues_a_duplicate() {
    let pool = UniqueIdPool::new(1..50);
    let mut seen = HashSet::new();
    for _ in 0..49 {
        let id = pool.next_id().unwrap();
        assert!(seen.insert(id), "id {} issued twice", id);
        assert!((1..50).contains(&id));
    }
}

#[test]
fn id_pool_reports_exhaustion_instead_of_spinning() {
    let pool = UniqueIdPool::new(1..4);
    for _ in 0..3 {
        pool.next_id().unwrap();
    }
    let err = pool.next_id().unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::IdPoolExhausted { start: 1, end: 4 }
    ));
}

#[test]
fn id_pool_is_safe_under_concurrent_generation() {
    use std::sync::Arc;

    let pool = Arc::new(UniqueIdPool::new(1..10_000));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = Arc::clone(&pool);
            std::thread::spawn(move || (0..100).map(|_| pool.next_id().unwrap()).collect::<Vec<_>>())
        })
        .collect();

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(all.insert(id), "id {} issued twice across threads", id);
        }
    }
    assert_eq!(pool.issued(), 800);
}

#[test]
fn random_book_populates_every_field() {
    let generator = TestDataGenerator::new();
    let book = generator.random_book().unwrap();

    assert!(book.id.is_some());
    assert!(book.title.as_deref().is_some_and(|t| !t.is_empty()));
    assert!(book.description.is_some());
    assert!(book.page_count.is_some_and(|p| (50..1000).contains(&p)));
    assert!(book.excerpt.is_some());
    assert!(book.publish_date.is_some());
}

#[test]
fn generated_book_ids_are_unique_across_axes() {
    let generator = TestDataGenerator::new();
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let id = generator.random_book().unwrap().id.unwrap();
        assert!(seen.insert(id));
    }
}

#[test]
fn null_field_axis_nulls_exactly_the_named_field() {
    let generator = TestDataGenerator::new();

    let book = generator.book_with_null_field("pageCount").unwrap();
    assert!(book.page_count.is_none());
    assert!(book.title.is_some());

    let book = generator.book_with_null_field("publishDate").unwrap();
    assert!(book.publish_date.is_none());
    assert!(book.page_count.is_some());
}

#[test]
fn unknown_null_field_name_returns_valid_book_unchanged() {
    let generator = TestDataGenerator::new();
    let book = generator.book_with_null_field("colour").unwrap();

    // Tolerance policy: unknown key warns, the book stays fully valid.
    assert!(book.id.is_some());
    assert!(book.title.is_some());
    assert!(book.page_count.is_some());
    assert!(book.publish_date.is_some());
}

#[test]
fn all_null_book_has_no_populated_fields() {
    let book = TestDataGenerator::new().book_with_all_null_fields();
    assert_eq!(book, Book::default());
}

#[test]
fn empty_fields_book_uses_empty_strings_not_nulls() {
    let book = TestDataGenerator::new().book_with_empty_fields().unwrap();
    assert_eq!(book.title.as_deref(), Some(""));
    assert_eq!(book.page_count, Some(0));
    assert_eq!(book.publish_date.as_deref(), Some(""));
}

#[test]
fn boundary_page_counts() {
    let generator = TestDataGenerator::new();

    assert_eq!(
        generator.book_with_zero_page_count().unwrap().page_count,
        Some(0)
    );
    let negative = generator.book_with_negative_page_count().unwrap();
    assert!(negative.page_count.unwrap() < 0);
    assert_eq!(
        generator.book_with_page_count(i32::MAX).unwrap().page_count,
        Some(i32::MAX)
    );
}

#[test]
fn long_title_has_requested_length() {
    let book = TestDataGenerator::new().book_with_long_title(5000).unwrap();
    assert_eq!(book.title.unwrap().len(), 5000);
}

#[test]
fn hostile_text_axes_carry_their_payloads() {
    let generator = TestDataGenerator::new();

    let sql = generator.book_with_sql_injection_payload().unwrap();
    assert!(sql.description.unwrap().contains("DROP TABLE"));

    let xss = generator.book_with_xss_payload().unwrap();
    assert!(xss.title.unwrap().contains("<script>"));

    let unicode = generator.book_with_unicode_title().unwrap();
    assert!(unicode.title.unwrap().contains("测试书籍"));
}

#[test]
fn date_axes_produce_the_right_shapes() {
    let generator = TestDataGenerator::new();

    let past = generator.random_past_date();
    assert!(chrono::NaiveDateTime::parse_from_str(&past, "%Y-%m-%dT%H:%M:%S").is_ok());

    let future = generator.book_with_future_publish_date().unwrap();
    let parsed = chrono::NaiveDateTime::parse_from_str(
        future.publish_date.as_deref().unwrap(),
        "%Y-%m-%dT%H:%M:%S",
    )
    .unwrap();
    assert!(parsed > Utc::now().naive_utc());

    let invalid = generator.book_with_invalid_date_format().unwrap();
    assert_eq!(invalid.publish_date.as_deref(), Some("31-12-2023"));
}

#[test]
fn random_author_is_valid_and_unique() {
    let generator = TestDataGenerator::new();
    let mut seen = HashSet::new();
    for _ in 0..50 {
        let author = generator.random_author().unwrap();
        assert!(author.is_valid());
        assert!(seen.insert(author.id.unwrap()));
    }
}

#[test]
fn author_null_field_axis_and_tolerance() {
    let generator = TestDataGenerator::new();

    let author = generator.author_with_null_field("idBook").unwrap();
    assert!(author.id_book.is_none());
    assert!(author.first_name.is_some());

    let untouched = generator.author_with_null_field("middleName").unwrap();
    assert!(untouched.is_valid());
    assert!(untouched.id.is_some());
}
