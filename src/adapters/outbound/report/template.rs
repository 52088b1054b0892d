use crate::pipeline::domain::ReportRecord;
use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

const BUILTIN_TEMPLATE: &str = include_str!("../../../../templates/report.html.tmpl");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },

    #[error("Unknown placeholder '{name}' at byte {offset}. Expected project_name, project_version or project_link")]
    UnknownPlaceholder { name: String, offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ProjectName,
    ProjectVersion,
    ProjectLink,
}

impl Field {
    /// Accepts snake_case names and Go-template style `.ProjectName` names
    fn from_name(name: &str) -> Option<Self> {
        match name.trim_start_matches('.') {
            "project_name" | "ProjectName" => Some(Field::ProjectName),
            "project_version" | "ProjectVersion" => Some(Field::ProjectVersion),
            "project_link" | "ProjectLink" | "DTProjectLink" => Some(Field::ProjectLink),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Field),
}

/// A parsed report template
///
/// Placeholders are written `{{ project_name }}`; every substituted value is
/// HTML-escaped. Rendering cannot fail once parsing has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    segments: Vec<Segment>,
}

impl ReportTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        while let Some(found) = source[cursor..].find(OPEN) {
            let open_at = cursor + found;
            if open_at > cursor {
                segments.push(Segment::Literal(source[cursor..open_at].to_string()));
            }

            let inner_start = open_at + OPEN.len();
            let close_at = source[inner_start..]
                .find(CLOSE)
                .map(|i| inner_start + i)
                .ok_or(TemplateError::Unterminated { offset: open_at })?;

            let name = source[inner_start..close_at].trim();
            let field = Field::from_name(name).ok_or_else(|| TemplateError::UnknownPlaceholder {
                name: name.to_string(),
                offset: open_at,
            })?;
            segments.push(Segment::Placeholder(field));

            cursor = close_at + CLOSE.len();
        }

        if cursor < source.len() {
            segments.push(Segment::Literal(source[cursor..].to_string()));
        }

        Ok(Self { segments })
    }

    /// The template shipped with the binary
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::parse(BUILTIN_TEMPLATE)
    }

    pub fn render(&self, record: &ReportRecord) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(Field::ProjectName) => {
                    output.push_str(&escape_html(record.project_name()))
                }
                Segment::Placeholder(Field::ProjectVersion) => {
                    output.push_str(&escape_html(record.project_version()))
                }
                Segment::Placeholder(Field::ProjectLink) => {
                    output.push_str(&escape_html(record.link().as_str()))
                }
            }
        }
        output
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
