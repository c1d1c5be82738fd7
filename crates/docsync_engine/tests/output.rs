use chrono::NaiveDate;
use docsync_engine::{document_sample, first_image_url, FrontMatter};
use pretty_assertions::assert_eq;

fn front_matter() -> FrontMatter {
    FrontMatter {
        title: "Getting Started".to_string(),
        description: "First paragraph".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        sidebar_position: 1,
        image: "guides/getting-started/img_42.png".to_string(),
    }
}

#[test]
fn document_starts_with_front_matter_then_imports_then_body() {
    let doc = front_matter().render("# Hello\n\n");
    assert_eq!(
        doc,
        "---\n\
title: \"Getting Started\"\n\
description: \"First paragraph\"\n\
date: '2024-03-09'\n\
sidebar_position: 1\n\
image: 'guides/getting-started/img_42.png'\n\
---\n\
\n\
import ColorText from '@site/src/components/ColorText';\n\
import VideoPlayer from '@site/src/components/VideoPlayer';\n\
\n\
# Hello\n\n"
    );
}

#[test]
fn quotes_in_title_and_description_are_escaped() {
    let mut fm = front_matter();
    fm.title = r#"The "best" guide"#.to_string();
    fm.description = "line one\nline \\two".to_string();
    let doc = fm.render("");
    assert!(doc.contains(r#"title: "The \"best\" guide""#));
    assert!(doc.contains(r#"description: "line one line \\two""#));
}

#[test]
fn sample_and_first_image_come_from_exported_html() {
    let html = r#"<html><body><p class="title">Welcome to the handbook</p><p><img src="https://lh3.example/img1" alt=""></p></body></html>"#;
    assert_eq!(
        document_sample(html, 200, "No description available."),
        "Welcome to the handbook"
    );
    assert_eq!(first_image_url(html).as_deref(), Some("https://lh3.example/img1"));
}
