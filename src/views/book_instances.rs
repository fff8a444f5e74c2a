//! Book instance pages

use axum::response::Html;

use super::{date_field, delete_form, error_list, list_or_empty, page, text_field};
use crate::{
    models::{Book, BookInstance, BookInstanceInput, BookInstanceStatus},
    services::book_instances::BookInstanceDetail,
    validation::FieldError,
};

pub fn list(instances: &[BookInstance]) -> Html<String> {
    let items = instances
        .iter()
        .map(|i| {
            format!(
                "<li><a href=\"{}\">{} : {}</a> - {}</li>",
                i.url(),
                i.book_title.as_deref().unwrap_or_default(),
                i.imprint,
                i.status
            )
        })
        .collect();
    page(
        "Book Instance List",
        &list_or_empty(items, "There are no book copies in this library."),
    )
}

pub fn detail(detail: &BookInstanceDetail) -> Html<String> {
    let instance = &detail.instance;
    let book = detail
        .book
        .as_ref()
        .map(|b| format!("<a href=\"{}\">{}</a>", b.url(), b.title))
        .unwrap_or_default();
    let due = if instance.status == BookInstanceStatus::Available {
        String::new()
    } else {
        format!("<p><strong>Due back:</strong> {}</p>", instance.due_back_formatted())
    };
    let content = format!(
        r#"<p><strong>Title:</strong> <span id="book">{}</span></p>
<p><strong>Imprint:</strong> {}</p>
<p><strong>Status:</strong> <span id="status">{}</span></p>
{}
<hr>
<p><a href="{url}/delete">Delete copy</a> | <a href="{url}/update">Update copy</a></p>"#,
        book,
        instance.imprint,
        instance.status,
        due,
        url = instance.url(),
    );
    page(&format!("ID: {}", instance.id), &content)
}

pub fn form(
    title: &str,
    input: &BookInstanceInput,
    books: &[Book],
    errors: &[FieldError],
) -> Html<String> {
    let book_options: String = books
        .iter()
        .map(|b| {
            let selected = if b.id == input.book { " selected" } else { "" };
            format!("<option value=\"{}\"{}>{}</option>", b.id, selected, b.title)
        })
        .collect();
    let current = input.status();
    let status_options: String = BookInstanceStatus::ALL
        .iter()
        .map(|status| {
            let selected = if *status == current { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>", status, selected)
        })
        .collect();
    let content = format!(
        r#"{}
<form method="POST" action="">
    <label for="book">Book:</label>
    <select id="book" name="book">
        <option value="">--Please select a book--</option>
        {}
    </select>
    {}
    {}
    <label for="status">Status:</label>
    <select id="status" name="status">{}</select>
    <button type="submit">Submit</button>
</form>"#,
        error_list(errors),
        book_options,
        text_field("imprint", "Imprint", &input.imprint),
        date_field(
            "due_back",
            "Date when book available",
            input.due_back.as_deref().unwrap_or_default()
        ),
        status_options,
    );
    page(title, &content)
}

pub fn delete(instance: &BookInstance) -> Html<String> {
    let content = format!(
        "<h2>{} : {}</h2>\n<p>Do you really want to delete this Book Instance?</p>\n{}",
        instance.book_title.as_deref().unwrap_or_default(),
        instance.imprint,
        delete_form("bookinstanceid", &instance.id)
    );
    page("Delete Book Instance", &content)
}
