//! Genre pages

use axum::response::Html;

use super::{delete_form, error_list, list_or_empty, page, text_field};
use crate::{
    models::{Book, Genre, GenreInput},
    services::genres::GenreDetail,
    validation::FieldError,
};

pub fn list(genres: &[Genre]) -> Html<String> {
    let items = genres
        .iter()
        .map(|g| format!("<li><a href=\"{}\">{}</a></li>", g.url(), g.name))
        .collect();
    page("Genre List", &list_or_empty(items, "There are no genres."))
}

fn books_section(books: &[Book]) -> String {
    let items = books
        .iter()
        .map(|b| format!("<dt><a href=\"{}\">{}</a></dt><dd>{}</dd>", b.url(), b.title, b.summary))
        .collect::<Vec<_>>();
    if items.is_empty() {
        "<p>This genre has no books.</p>".to_string()
    } else {
        format!("<dl>{}</dl>", items.concat())
    }
}

pub fn detail(detail: &GenreDetail) -> Html<String> {
    let genre = &detail.genre;
    let content = format!(
        r#"<h2 id="genre_name">{}</h2>
<h3>Books</h3>
{}
<hr>
<p><a href="{url}/delete">Delete genre</a> | <a href="{url}/update">Update genre</a></p>"#,
        genre.name,
        books_section(&detail.books),
        url = genre.url(),
    );
    page(&format!("Genre: {}", genre.name), &content)
}

pub fn form(title: &str, input: &GenreInput, errors: &[FieldError]) -> Html<String> {
    let content = format!(
        r#"{}
<form method="POST" action="">
    {}
    <button type="submit">Submit</button>
</form>"#,
        error_list(errors),
        text_field("name", "Genre", &input.name),
    );
    page(title, &content)
}

pub fn delete(detail: &GenreDetail) -> Html<String> {
    let genre = &detail.genre;
    let body = if detail.books.is_empty() {
        format!(
            "<p>Do you really want to delete this Genre?</p>\n{}",
            delete_form("genreid", &genre.id)
        )
    } else {
        format!(
            "<p><strong>Delete the following books before attempting to delete this genre.</strong></p>\n{}",
            books_section(&detail.books)
        )
    };
    page("Delete Genre", &format!("<h2>{}</h2>\n{}", genre.name, body))
}
