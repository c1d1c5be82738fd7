use chrono::NaiveDate;

const COMPONENT_IMPORTS: &str = "import ColorText from '@site/src/components/ColorText';\n\
import VideoPlayer from '@site/src/components/VideoPlayer';\n";

/// Header block written at the top of every generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub sidebar_position: u32,
    /// Thumbnail path relative to the static image root.
    pub image: String,
}

impl FrontMatter {
    /// Front matter, component imports and `body`, in that order.
    pub fn render(&self, body: &str) -> String {
        format!(
            "---\ntitle: \"{title}\"\ndescription: \"{description}\"\ndate: '{date}'\nsidebar_position: {position}\nimage: '{image}'\n---\n\n{imports}\n{body}",
            title = escape_double_quoted(&self.title),
            description = escape_double_quoted(&self.description),
            date = self.date.format("%Y-%m-%d"),
            position = self.sidebar_position,
            image = self.image.replace('\'', "''"),
            imports = COMPONENT_IMPORTS,
            body = body,
        )
    }
}

fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}
