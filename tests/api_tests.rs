//! Integration tests for the catalog pages

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;

use locallibrary_server::{
    api::create_router, repository::Repository, services::Services, AppState,
};

/// Create a test server over a fresh in-memory database
async fn create_test_server() -> TestServer {
    // One connection that never recycles, so the in-memory database lives
    // as long as the pool.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    Repository::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        services: Arc::new(Services::new(Repository::new(pool))),
    };
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn location(response: &TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("location header is not ascii")
        .to_string()
}

/// Last path segment of a detail url
fn id_of(url: &str) -> String {
    url.rsplit('/').next().unwrap().to_string()
}

async fn create_author(server: &TestServer, first: &str, family: &str, dob: &str) -> String {
    let response = server
        .post("/catalog/author/create")
        .form(&[
            ("first_name", first),
            ("family_name", family),
            ("date_of_birth", dob),
            ("date_of_death", ""),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    id_of(&location(&response))
}

async fn create_genre(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/catalog/genre/create")
        .form(&[("name", name)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    id_of(&location(&response))
}

async fn create_book(server: &TestServer, title: &str, author: &str, genres: &[&str]) -> String {
    let mut fields = vec![
        ("title", title),
        ("author", author),
        ("summary", "A summary."),
        ("isbn", "9780141439518"),
    ];
    fields.extend(genres.iter().map(|g| ("genre", *g)));
    let response = server.post("/catalog/book/create").form(&fields).await;
    response.assert_status(StatusCode::SEE_OTHER);
    id_of(&location(&response))
}

async fn create_copy(server: &TestServer, book: &str, status: &str) -> String {
    let response = server
        .post("/catalog/bookinstance/create")
        .form(&[
            ("book", book),
            ("imprint", "Penguin, 2003"),
            ("status", status),
            ("due_back", "2030-01-31"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    id_of(&location(&response))
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    let response = server.get("/ready").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_home_counts() {
    let server = create_test_server().await;

    let text = server.get("/catalog").await.text();
    assert!(text.contains("<title>Local Library Home</title>"));
    assert!(text.contains(r#"<span id="book_count">0</span>"#));

    let author = create_author(&server, "Jane", "Austen", "").await;
    let genre = create_genre(&server, "Romance").await;
    let book = create_book(&server, "Emma", &author, &[&genre]).await;
    create_copy(&server, &book, "Available").await;
    create_copy(&server, &book, "Loaned").await;

    let text = server.get("/").await.text();
    assert!(text.contains(r#"<span id="book_count">1</span>"#));
    assert!(text.contains(r#"<span id="book_instance_count">2</span>"#));
    assert!(text.contains(r#"<span id="book_instance_available_count">1</span>"#));
    assert!(text.contains(r#"<span id="author_count">1</span>"#));
    assert!(text.contains(r#"<span id="genre_count">1</span>"#));
}

#[tokio::test]
async fn test_author_round_trip() {
    let server = create_test_server().await;

    let response = server
        .post("/catalog/author/create")
        .form(&[
            ("first_name", "Jane"),
            ("family_name", "Austen"),
            ("date_of_birth", "1775-12-16"),
            ("date_of_death", "1817-07-18"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    let url = location(&response);
    assert!(url.starts_with("/catalog/author/"));

    let text = server.get(&url).await.text();
    assert!(text.contains(r#"<h2 id="author_name">Austen, Jane</h2>"#));
    assert!(text.contains("December 16th, 1775 - July 18th, 1817"));

    let text = server.get(&format!("{}/update", url)).await.text();
    assert!(text.contains(r#"value="1775-12-16""#));
    assert!(text.contains(r#"value="1817-07-18""#));
}

#[tokio::test]
async fn test_author_family_name_must_be_alphabetic() {
    let server = create_test_server().await;

    let response = server
        .post("/catalog/author/create")
        .form(&[("first_name", "Flann"), ("family_name", "O'Brien")])
        .await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("<title>Create Author</title>"));
    assert!(text.contains("Family name has non-alphanumeric characters."));
    assert!(text.contains(r#"value="Flann""#));

    let text = server.get("/catalog/authors").await.text();
    assert!(text.contains("There are no authors."));
}

#[tokio::test]
async fn test_author_missing_names_are_reported_in_order() {
    let server = create_test_server().await;

    let text = server
        .post("/catalog/author/create")
        .form(&[("first_name", "  "), ("family_name", "")])
        .await
        .text();
    let first = text.find("First name must be specified.").unwrap();
    let family = text.find("Family name must be specified.").unwrap();
    assert!(first < family);
}

#[tokio::test]
async fn test_duplicate_author_redirects_to_existing() {
    let server = create_test_server().await;

    let first = create_author(&server, "Jane", "Austen", "1775-12-16").await;
    let second = create_author(&server, "Jane", "Austen", "1775-12-16").await;
    assert_eq!(first, second);

    let other = create_author(&server, "Jane", "Austen", "").await;
    assert_ne!(first, other);
}

#[tokio::test]
async fn test_update_keeps_id() {
    let server = create_test_server().await;
    let id = create_author(&server, "Jane", "Austin", "").await;

    let response = server
        .post(&format!("/catalog/author/{}/update", id))
        .form(&[("first_name", "Jane"), ("family_name", "Austen")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/catalog/author/{}", id));

    let text = server.get(&format!("/catalog/author/{}", id)).await.text();
    assert!(text.contains("Austen, Jane"));
    assert!(!text.contains("Austin"));
}

#[tokio::test]
async fn test_detail_reads_are_idempotent() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "1775-12-16").await;
    let book = create_book(&server, "Emma", &author, &[]).await;

    let url = format!("/catalog/book/{}", book);
    let first = server.get(&url).await.text();
    let second = server.get(&url).await.text();
    assert_eq!(first, second);
    assert!(first.contains("<title>Title: Emma</title>"));
}

#[tokio::test]
async fn test_genre_names_are_trimmed_and_deduplicated() {
    let server = create_test_server().await;

    let first = create_genre(&server, "Sci-Fi").await;
    let second = create_genre(&server, "   Sci-Fi  ").await;
    assert_eq!(first, second);

    let text = server.get("/catalog/genres").await.text();
    assert_eq!(text.matches(">Sci-Fi</a>").count(), 1);
}

#[tokio::test]
async fn test_genre_name_required() {
    let server = create_test_server().await;

    let response = server
        .post("/catalog/genre/create")
        .form(&[("name", "   ")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Genre name required"));
}

#[tokio::test]
async fn test_genre_update_to_existing_name_is_rejected() {
    let server = create_test_server().await;
    create_genre(&server, "Fantasy").await;
    let poetry = create_genre(&server, "Poetry").await;

    let response = server
        .post(&format!("/catalog/genre/{}/update", poetry))
        .form(&[("name", "Fantasy")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Genre name already exists"));
}

#[tokio::test]
async fn test_book_create_with_genres() {
    let server = create_test_server().await;
    let author = create_author(&server, "Isaac", "Asimov", "").await;
    let scifi = create_genre(&server, "Science Fiction").await;
    let classics = create_genre(&server, "Classics").await;

    let book = create_book(&server, "Foundation", &author, &[&scifi, &classics]).await;

    let text = server.get(&format!("/catalog/book/{}", book)).await.text();
    assert!(text.contains("Asimov, Isaac"));
    assert!(text.contains("Science Fiction"));
    assert!(text.contains("Classics"));

    let text = server.get(&format!("/catalog/genre/{}", scifi)).await.text();
    assert!(text.contains("Foundation"));

    // Only the book's genres start out checked on the update form
    let other = create_genre(&server, "Poetry").await;
    let text = server
        .get(&format!("/catalog/book/{}/update", book))
        .await
        .text();
    assert!(text.contains(&format!(r#"value="{}" checked"#, scifi)));
    assert!(!text.contains(&format!(r#"value="{}" checked"#, other)));
}

#[tokio::test]
async fn test_book_requires_known_author() {
    let server = create_test_server().await;

    let response = server
        .post("/catalog/book/create")
        .form(&[
            ("title", "Orphan"),
            ("author", "no-such-author"),
            ("summary", "s"),
            ("isbn", "1"),
        ])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Author not found"));

    let text = server.get("/catalog/books").await.text();
    assert!(!text.contains("Orphan"));
}

#[tokio::test]
async fn test_author_delete_blocked_by_books() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let book = create_book(&server, "Emma", &author, &[]).await;

    let response = server
        .post(&format!("/catalog/author/{}/delete", author))
        .form(&[("authorid", author.as_str())])
        .await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Delete the following books"));
    assert!(text.contains("Emma"));
    server
        .get(&format!("/catalog/author/{}", author))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/catalog/book/{}/delete", book))
        .form(&[("bookid", book.as_str())])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/books");

    let response = server
        .post(&format!("/catalog/author/{}/delete", author))
        .form(&[("authorid", author.as_str())])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/authors");

    let response = server.get(&format!("/catalog/author/{}", author)).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/authors");
}

#[tokio::test]
async fn test_genre_delete_blocked_by_books() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let genre = create_genre(&server, "Romance").await;
    let empty = create_genre(&server, "Horror").await;
    create_book(&server, "Emma", &author, &[&genre]).await;

    let response = server
        .post(&format!("/catalog/genre/{}/delete", genre))
        .form(&[("genreid", genre.as_str())])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Delete the following books"));

    let response = server
        .post(&format!("/catalog/genre/{}/delete", empty))
        .form(&[("genreid", empty.as_str())])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/genres");
}

#[tokio::test]
async fn test_book_delete_blocked_by_copies() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let book = create_book(&server, "Emma", &author, &[]).await;
    let copy = create_copy(&server, &book, "Available").await;

    let response = server
        .post(&format!("/catalog/book/{}/delete", book))
        .form(&[("bookid", book.as_str())])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Delete the following copies"));

    let response = server
        .post(&format!("/catalog/bookinstance/{}/delete", copy))
        .form(&[("bookinstanceid", copy.as_str())])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/bookinstances");

    let response = server
        .post(&format!("/catalog/book/{}/delete", book))
        .form(&[("bookid", book.as_str())])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_delete_without_id_redirects_to_list() {
    let server = create_test_server().await;
    let genre = create_genre(&server, "Romance").await;

    let response = server
        .post(&format!("/catalog/genre/{}/delete", genre))
        .form(&[("genreid", "")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/genres");

    // Nothing was deleted
    server
        .get(&format!("/catalog/genre/{}", genre))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_missing_records_redirect_to_list() {
    let server = create_test_server().await;

    for (url, list) in [
        ("/catalog/bookinstance/nope", "/catalog/bookinstances"),
        ("/catalog/book/nope", "/catalog/books"),
        ("/catalog/author/nope/update", "/catalog/authors"),
        ("/catalog/genre/nope/delete", "/catalog/genres"),
    ] {
        let response = server.get(url).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), list);
    }
}

#[tokio::test]
async fn test_book_instance_status() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let book = create_book(&server, "Emma", &author, &[]).await;

    let response = server
        .post("/catalog/bookinstance/create")
        .form(&[("book", book.as_str()), ("imprint", "Penguin"), ("status", "Lost")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Invalid status"));

    let response = server
        .post("/catalog/bookinstance/create")
        .form(&[("book", book.as_str()), ("imprint", "Penguin")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    let text = server.get(&location(&response)).await.text();
    assert!(text.contains(r#"<span id="status">Maintenance</span>"#));
    assert!(text.contains("Emma"));

    let text = server.get("/catalog/bookinstances").await.text();
    assert!(text.contains("Emma : Penguin"));
}

#[tokio::test]
async fn test_book_update_replaces_genres() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let romance = create_genre(&server, "Romance").await;
    let satire = create_genre(&server, "Satire").await;
    let book = create_book(&server, "Emma", &author, &[&romance]).await;

    let response = server
        .post(&format!("/catalog/book/{}/update", book))
        .form(&[
            ("title", "Tom & Jerry"),
            ("author", author.as_str()),
            ("summary", "Cat and mouse."),
            ("isbn", "123"),
            ("genre", satire.as_str()),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/catalog/book/{}", book));

    let text = server.get(&format!("/catalog/book/{}", book)).await.text();
    assert!(text.contains("Satire"));
    assert!(!text.contains("Romance"));
    assert!(text.contains("Cat and mouse."));

    let text = server
        .get(&format!("/catalog/book/{}/update", book))
        .await
        .text();
    assert!(text.contains(r#"value="Tom &amp; Jerry""#));
    assert!(text.contains(&format!(r#"value="{}" checked"#, satire)));
    assert!(!text.contains(&format!(r#"value="{}" checked"#, romance)));

    let text = server.get(&format!("/catalog/genre/{}", romance)).await.text();
    assert!(!text.contains("Tom &amp; Jerry"));
}

#[tokio::test]
async fn test_rejected_book_form_keeps_choices() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let romance = create_genre(&server, "Romance").await;
    let satire = create_genre(&server, "Satire").await;

    let response = server
        .post("/catalog/book/create")
        .form(&[
            ("title", ""),
            ("author", author.as_str()),
            ("summary", "s"),
            ("isbn", "1"),
            ("genre", romance.as_str()),
        ])
        .await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("<title>Create Book</title>"));
    assert!(text.contains("Title must not be empty."));
    assert!(text.contains(&format!(r#"<option value="{}" selected>Austen, Jane"#, author)));
    assert!(text.contains(&format!(r#"value="{}" checked"#, romance)));
    assert!(text.contains(&format!(r#"value="{}">"#, satire)));
}

#[tokio::test]
async fn test_book_instance_update() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let book = create_book(&server, "Emma", &author, &[]).await;
    let copy = create_copy(&server, &book, "Loaned").await;

    let response = server
        .post(&format!("/catalog/bookinstance/{}/update", copy))
        .form(&[
            ("book", book.as_str()),
            ("imprint", "Penguin, 2010"),
            ("status", "Reserved"),
            ("due_back", "2031-02-01"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/catalog/bookinstance/{}", copy));

    let text = server
        .get(&format!("/catalog/bookinstance/{}", copy))
        .await
        .text();
    assert!(text.contains(r#"<span id="status">Reserved</span>"#));
    assert!(text.contains("February 1st, 2031"));
    assert!(text.contains("Penguin, 2010"));

    let text = server
        .get(&format!("/catalog/bookinstance/{}/update", copy))
        .await
        .text();
    assert!(text.contains("<title>Update BookInstance</title>"));
    assert!(text.contains(r#"<option value="Reserved" selected>"#));
    assert!(text.contains(r#"value="2031-02-01""#));
    assert!(text.contains(&format!(r#"<option value="{}" selected>Emma"#, book)));

    let text = server
        .get(&format!("/catalog/bookinstance/{}/delete", copy))
        .await
        .text();
    assert!(text.contains("<title>Delete Book Instance</title>"));
    assert!(text.contains(&format!(r#"name="bookinstanceid" value="{}""#, copy)));
}

#[tokio::test]
async fn test_rejected_book_instance_form_keeps_books() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let book = create_book(&server, "Emma", &author, &[]).await;
    let copy = create_copy(&server, &book, "Available").await;

    let response = server
        .post(&format!("/catalog/bookinstance/{}/update", copy))
        .form(&[("book", book.as_str()), ("imprint", "")])
        .await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Imprint must be specified"));
    assert!(text.contains(&format!(r#"<option value="{}" selected>Emma"#, book)));

    // The stored copy is unchanged
    let text = server
        .get(&format!("/catalog/bookinstance/{}", copy))
        .await
        .text();
    assert!(text.contains("Penguin, 2003"));
}

#[tokio::test]
async fn test_update_of_missing_record_redirects_to_list() {
    let server = create_test_server().await;
    let author = create_author(&server, "Jane", "Austen", "").await;
    let book = create_book(&server, "Emma", &author, &[]).await;

    let response = server
        .post("/catalog/book/nope/update")
        .form(&[
            ("title", "Emma"),
            ("author", author.as_str()),
            ("summary", "s"),
            ("isbn", "1"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/books");

    let response = server
        .post("/catalog/bookinstance/nope/update")
        .form(&[("book", book.as_str()), ("imprint", "Penguin")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/bookinstances");

    let response = server
        .post("/catalog/bookinstance/nope/delete")
        .form(&[("bookinstanceid", "nope")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/bookinstances");
}
