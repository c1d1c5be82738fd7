const FOREIGN_EXTENSION: &str = ".docx";
const ENGLISH_SUFFIX: &str = "_en";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Documents without a language suffix.
    Primary,
    /// Documents whose base name ends in `_en`.
    English,
}

/// Names derived from a remote document's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentName {
    /// Front-matter title: display name without the `.docx` extension and `_en` suffix.
    pub title: String,
    /// Filesystem-safe slug used for the output file and image namespace.
    pub slug: String,
    pub language: Language,
}

impl DocumentName {
    pub fn from_display_name(display_name: &str) -> Self {
        let stem = strip_suffix_ignore_case(display_name, FOREIGN_EXTENSION).unwrap_or(display_name);
        let (base, language) = match strip_suffix_ignore_case(stem, ENGLISH_SUFFIX) {
            Some(base) => (base, Language::English),
            None => (stem, Language::Primary),
        };

        Self {
            title: base.to_string(),
            slug: slugify(base),
            language,
        }
    }

    pub fn output_filename(&self) -> String {
        format!("{}.mdx", self.slug)
    }
}

fn slugify(name: &str) -> String {
    name.to_lowercase().replace([' ', '/'], "-")
}

/// Both suffixes match without regard to ASCII case.
fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
