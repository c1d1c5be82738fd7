use docsync_core::{DocumentName, Language, SyncReport};
use pretty_assertions::assert_eq;

#[test]
fn slug_is_lowercase_with_separators_replaced() {
    let name = DocumentName::from_display_name("Getting Started/Part One");
    assert_eq!(name.slug, "getting-started-part-one");
    assert_eq!(name.title, "Getting Started/Part One");
    assert_eq!(name.language, Language::Primary);
    assert_eq!(name.output_filename(), "getting-started-part-one.mdx");
}

#[test]
fn foreign_extension_is_dropped() {
    let name = DocumentName::from_display_name("Annual Report.DOCX");
    assert_eq!(name.slug, "annual-report");
    assert_eq!(name.title, "Annual Report");
}

#[test]
fn english_suffix_routes_language_and_is_stripped() {
    let name = DocumentName::from_display_name("Welcome Letter_en.docx");
    assert_eq!(name.language, Language::English);
    assert_eq!(name.slug, "welcome-letter");
    assert_eq!(name.title, "Welcome Letter");

    let native = DocumentName::from_display_name("Rules_en");
    assert_eq!(native.language, Language::English);
    assert_eq!(native.slug, "rules");
}

#[test]
fn suffix_in_the_middle_is_not_a_language_marker() {
    let name = DocumentName::from_display_name("my_entry notes");
    assert_eq!(name.language, Language::Primary);
    assert_eq!(name.slug, "my_entry-notes");
}

#[test]
fn report_counts_every_kind_of_write() {
    let report = SyncReport {
        documents_written: 2,
        categories_written: 1,
        images_downloaded: 3,
        cache_saved: true,
        documents_unchanged: 9,
        ..SyncReport::default()
    };
    assert_eq!(report.files_written(), 7);
    assert_eq!(SyncReport::default().files_written(), 0);
}

#[test]
fn english_suffix_ignores_case_like_the_extension() {
    let name = DocumentName::from_display_name("Notes_EN.Docx");
    assert_eq!(name.language, Language::English);
    assert_eq!(name.slug, "notes");
    assert_eq!(name.title, "Notes");

    let upper = DocumentName::from_display_name("Notes_En");
    assert_eq!(upper.language, Language::English);
    assert_eq!(upper.output_filename(), "notes.mdx");
}
