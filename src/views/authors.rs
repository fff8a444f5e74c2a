//! Author pages

use axum::response::Html;

use super::{date_field, delete_form, error_list, list_or_empty, page, text_field};
use crate::{
    models::{Author, AuthorInput, Book},
    services::authors::AuthorDetail,
    validation::FieldError,
};

pub fn list(authors: &[Author]) -> Html<String> {
    let items = authors
        .iter()
        .map(|a| format!("<li><a href=\"{}\">{}</a> ({})</li>", a.url(), a.name(), a.lifespan()))
        .collect();
    page("Author List", &list_or_empty(items, "There are no authors."))
}

fn books_section(books: &[Book]) -> String {
    let items = books
        .iter()
        .map(|b| format!("<dt><a href=\"{}\">{}</a></dt><dd>{}</dd>", b.url(), b.title, b.summary))
        .collect::<Vec<_>>();
    if items.is_empty() {
        "<p>This author has no books.</p>".to_string()
    } else {
        format!("<dl>{}</dl>", items.concat())
    }
}

pub fn detail(detail: &AuthorDetail) -> Html<String> {
    let author = &detail.author;
    let content = format!(
        r#"<h2 id="author_name">{}</h2>
<p id="lifespan">{}</p>
<h3>Books</h3>
{}
<hr>
<p><a href="{url}/delete">Delete author</a> | <a href="{url}/update">Update author</a></p>"#,
        author.name(),
        author.lifespan(),
        books_section(&detail.books),
        url = author.url(),
    );
    page(&format!("Author: {}", author.name()), &content)
}

pub fn form(title: &str, input: &AuthorInput, errors: &[FieldError]) -> Html<String> {
    let content = format!(
        r#"{}
<form method="POST" action="">
    {}
    {}
    {}
    {}
    <button type="submit">Submit</button>
</form>"#,
        error_list(errors),
        text_field("first_name", "First Name", &input.first_name),
        text_field("family_name", "Family Name", &input.family_name),
        date_field(
            "date_of_birth",
            "Date of birth",
            input.date_of_birth.as_deref().unwrap_or_default()
        ),
        date_field(
            "date_of_death",
            "Date of death",
            input.date_of_death.as_deref().unwrap_or_default()
        ),
    );
    page(title, &content)
}

/// Delete confirmation; lists the books that block the delete, if any
pub fn delete(detail: &AuthorDetail) -> Html<String> {
    let author = &detail.author;
    let body = if detail.books.is_empty() {
        format!(
            "<p>Do you really want to delete this Author?</p>\n{}",
            delete_form("authorid", &author.id)
        )
    } else {
        format!(
            "<p><strong>Delete the following books before attempting to delete this author.</strong></p>\n{}",
            books_section(&detail.books)
        )
    };
    let content = format!("<h2>{}</h2>\n<p>{}</p>\n{}", author.name(), author.lifespan(), body);
    page("Delete Author", &content)
}
