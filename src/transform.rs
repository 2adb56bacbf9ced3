use serde::{Deserialize, Serialize};

use crate::model::input_row::InputRow;
use crate::model::work_item::{StoryKind, WorkItem};

pub const SINGLE_NAME_TEMPLATE: &str = "【{app}】{usecase}";
pub const LABELED_NAME_TEMPLATE: &str = "{usecase}";
pub const DEFAULT_CATEGORIES: [&str; 3] = ["backend", "frontend", "style"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// One story per row, grouping key in the name.
    #[default]
    Single,
    /// One story per category per row, grouping key as a label.
    Labeled,
}

impl ImportMode {
    pub fn default_name_template(&self) -> &'static str {
        match self {
            ImportMode::Single => SINGLE_NAME_TEMPLATE,
            ImportMode::Labeled => LABELED_NAME_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub mode: ImportMode,
    pub name_template: String,
    pub categories: Vec<String>,
}

impl TransformOptions {
    pub fn for_mode(mode: ImportMode) -> Self {
        Self {
            mode,
            name_template: mode.default_name_template().to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::for_mode(ImportMode::Single)
    }
}

/// Map one row to the stories it produces. Never fails; empty optional
/// columns are left out of the description.
pub fn transform(row: &InputRow, options: &TransformOptions) -> Vec<WorkItem> {
    let name = render_name(&options.name_template, row);
    let description = build_description(row);

    match options.mode {
        ImportMode::Single => vec![WorkItem {
            name,
            kind: StoryKind::Feature,
            description,
            labels: Vec::new(),
        }],
        ImportMode::Labeled => options
            .categories
            .iter()
            .map(|category| WorkItem {
                name: name.clone(),
                kind: StoryKind::Feature,
                description: description.clone(),
                labels: vec![category.clone(), row.app.clone()],
            })
            .collect(),
    }
}

pub fn build_description(row: &InputRow) -> String {
    let sections = [("path", &row.path), ("memo", &row.memo), ("figma", &row.figma)];
    let blocks: Vec<String> = sections
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("■{label}\n{value}"))
        .collect();

    // Only the first escaped CRLF is collapsed.
    blocks.join("\n\n").replacen("\\r\\n", "\n", 1)
}

/// Substitute `{app}` and `{usecase}` in one pass. Substituted text is not
/// scanned again, and unknown `{...}` sequences are kept verbatim.
pub fn render_name(template: &str, row: &InputRow) -> String {
    let mut out = String::with_capacity(template.len() + row.app.len() + row.usecase.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{app}") {
            out.push_str(&row.app);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{usecase}") {
            out.push_str(&row.usecase);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
