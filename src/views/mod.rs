//! Server-rendered HTML pages
//!
//! Text fields reach these functions already escaped (form input is
//! sanitized before it is stored), so values are interpolated as-is.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod home;

use axum::{http::StatusCode, response::Html};

use crate::validation::FieldError;

/// Wrap page content in the common layout (sidebar navigation)
pub fn page(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            display: flex;
            margin: 0;
            line-height: 1.5;
        }}
        nav {{
            min-width: 180px;
            padding: 20px;
            background-color: #f2f2f2;
        }}
        nav ul {{
            list-style: none;
            padding: 0;
        }}
        main {{
            padding: 20px;
        }}
        .errors {{
            color: #b00020;
        }}
        label {{
            display: block;
            margin-top: 10px;
        }}
    </style>
</head>
<body>
    <nav>
        <ul>
            <li><a href="/catalog">Home</a></li>
            <li><a href="/catalog/books">All books</a></li>
            <li><a href="/catalog/authors">All authors</a></li>
            <li><a href="/catalog/genres">All genres</a></li>
            <li><a href="/catalog/bookinstances">All book-instances</a></li>
        </ul>
        <hr>
        <ul>
            <li><a href="/catalog/author/create">Create new author</a></li>
            <li><a href="/catalog/genre/create">Create new genre</a></li>
            <li><a href="/catalog/book/create">Create new book</a></li>
            <li><a href="/catalog/bookinstance/create">Create new book instance (copy)</a></li>
        </ul>
    </nav>
    <main>
        <h1>{title}</h1>
        {content}
    </main>
</body>
</html>"#
    ))
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    page(
        "Error",
        &format!("<h2>{}</h2>\n<p>{}</p>", status, message),
    )
}

/// Validation messages shown above a re-rendered form
fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li data-field=\"{}\">{}</li>", e.field, e.message))
        .collect();
    format!("<ul class=\"errors\">{}</ul>", items)
}

/// Bulleted list, or a fallback paragraph when there is nothing to show
fn list_or_empty(items: Vec<String>, empty: &str) -> String {
    if items.is_empty() {
        format!("<p>{}</p>", empty)
    } else {
        format!("<ul>{}</ul>", items.concat())
    }
}

fn text_field(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="{name}">{label}:</label>
<input id="{name}" type="text" name="{name}" value="{value}">"#
    )
}

fn date_field(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="{name}">{label}:</label>
<input id="{name}" type="date" name="{name}" value="{value}">"#
    )
}

fn delete_form(field: &str, id: &str) -> String {
    format!(
        r#"<form method="POST" action="">
    <input type="hidden" name="{field}" value="{id}">
    <button type="submit">Delete</button>
</form>"#
    )
}
