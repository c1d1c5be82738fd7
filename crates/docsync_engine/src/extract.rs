use scraper::{Html, Selector};

const ELLIPSIS: &str = "...";

/// Short description of a document:
/// - the first `<p>`'s trimmed text, even if that is empty
/// - otherwise the whole `<body>` text
/// - otherwise `placeholder`.
///
/// Text longer than `max_chars` characters is cut and suffixed with `...`.
pub fn document_sample(html: &str, max_chars: usize, placeholder: &str) -> String {
    let doc = Html::parse_document(html);

    if let Some(text) = first_text(&doc, "p") {
        return truncate(&text, max_chars);
    }

    match first_text(&doc, "body") {
        Some(text) if !text.is_empty() => truncate(&text, max_chars),
        _ => placeholder.to_string(),
    }
}

/// `src` of the first `<img>` in the document, if it has one.
pub fn first_image_url(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("img").ok()?;
    doc.select(&sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
