use axum::response::Html;

use super::page;
use crate::services::stats::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Html<String> {
    let content = format!(
        r#"<p>Welcome to <em>LocalLibrary</em>.</p>
<h2>Dynamic content</h2>
<p>The library has the following record counts:</p>
<ul>
    <li><strong>Books:</strong> <span id="book_count">{}</span></li>
    <li><strong>Copies:</strong> <span id="book_instance_count">{}</span></li>
    <li><strong>Copies available:</strong> <span id="book_instance_available_count">{}</span></li>
    <li><strong>Authors:</strong> <span id="author_count">{}</span></li>
    <li><strong>Genres:</strong> <span id="genre_count">{}</span></li>
</ul>"#,
        counts.book_count,
        counts.book_instance_count,
        counts.book_instance_available_count,
        counts.author_count,
        counts.genre_count,
    );
    page("Local Library Home", &content)
}
