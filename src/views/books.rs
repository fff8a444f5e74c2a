//! Book pages

use axum::response::Html;

use super::{delete_form, error_list, list_or_empty, page, text_field};
use crate::{
    models::{book::genre_choices, Book, BookInput, BookInstance},
    services::books::{BookChoices, BookCopies, BookDetail},
    validation::FieldError,
};

pub fn list(books: &[Book]) -> Html<String> {
    let items = books
        .iter()
        .map(|b| {
            format!(
                "<li><a href=\"{}\">{}</a> ({})</li>",
                b.url(),
                b.title,
                b.author_name.as_deref().unwrap_or_default()
            )
        })
        .collect();
    page("Book List", &list_or_empty(items, "There are no books."))
}

fn copies_section(instances: &[BookInstance]) -> String {
    let items = instances
        .iter()
        .map(|i| {
            format!(
                "<li><a href=\"{}\">{}</a> - {} (due {})</li>",
                i.url(),
                i.imprint,
                i.status,
                i.due_back_formatted()
            )
        })
        .collect();
    list_or_empty(items, "There are no copies of this book in the library.")
}

pub fn detail(detail: &BookDetail) -> Html<String> {
    let book = &detail.book;
    let author = detail
        .author
        .as_ref()
        .map(|a| format!("<a href=\"{}\">{}</a>", a.url(), a.name()))
        .unwrap_or_default();
    let genres = detail
        .genres
        .iter()
        .map(|g| format!("<a href=\"{}\">{}</a>", g.url(), g.name))
        .collect::<Vec<_>>()
        .join(", ");
    let content = format!(
        r#"<p><strong>Author:</strong> <span id="author">{}</span></p>
<p><strong>Summary:</strong> {}</p>
<p><strong>ISBN:</strong> {}</p>
<p><strong>Genre:</strong> <span id="genres">{}</span></p>
<h3>Copies</h3>
{}
<hr>
<p><a href="{url}/delete">Delete book</a> | <a href="{url}/update">Update book</a></p>"#,
        author,
        book.summary,
        book.isbn,
        genres,
        copies_section(&detail.instances),
        url = book.url(),
    );
    page(&format!("Title: {}", book.title), &content)
}

pub fn form(
    title: &str,
    input: &BookInput,
    choices: &BookChoices,
    errors: &[FieldError],
) -> Html<String> {
    let authors: String = choices
        .authors
        .iter()
        .map(|a| {
            let selected = if a.id == input.author { " selected" } else { "" };
            format!("<option value=\"{}\"{}>{}</option>", a.id, selected, a.name())
        })
        .collect();
    let genres: String = genre_choices(choices.genres.clone(), &input.genre)
        .iter()
        .map(|choice| {
            let checked = if choice.checked { " checked" } else { "" };
            format!(
                "<label><input type=\"checkbox\" name=\"genre\" value=\"{}\"{}> {}</label>",
                choice.genre.id, checked, choice.genre.name
            )
        })
        .collect();
    let content = format!(
        r#"{}
<form method="POST" action="">
    {}
    <label for="author">Author:</label>
    <select id="author" name="author">
        <option value="">--Please select an author--</option>
        {}
    </select>
    <label for="summary">Summary:</label>
    <textarea id="summary" name="summary">{}</textarea>
    {}
    <fieldset><legend>Genre</legend>{}</fieldset>
    <button type="submit">Submit</button>
</form>"#,
        error_list(errors),
        text_field("title", "Title", &input.title),
        authors,
        input.summary,
        text_field("isbn", "ISBN", &input.isbn),
        genres,
    );
    page(title, &content)
}

pub fn delete(copies: &BookCopies) -> Html<String> {
    let book = &copies.book;
    let body = if copies.instances.is_empty() {
        format!(
            "<p>Do you really want to delete this Book?</p>\n{}",
            delete_form("bookid", &book.id)
        )
    } else {
        format!(
            "<p><strong>Delete the following copies before attempting to delete this book.</strong></p>\n{}",
            copies_section(&copies.instances)
        )
    };
    page("Delete Book", &format!("<h2>{}</h2>\n{}", book.title, body))
}
