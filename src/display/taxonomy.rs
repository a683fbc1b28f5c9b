//! Category and item list formatting

use crate::models::VocabularyKind;

/// Format a vocabulary as a numbered list in display order
pub fn format_vocabulary(kind: VocabularyKind, names: &[String]) -> String {
    let plural = match kind {
        VocabularyKind::Category => "categories",
        VocabularyKind::Item => "items",
    };

    if names.is_empty() {
        return format!(
            "No {} found.\n\nRun 'tracker init' to create the default {}.\n",
            plural, plural
        );
    }

    let width = names.len().to_string().len();
    let mut output = String::new();
    for (i, name) in names.iter().enumerate() {
        output.push_str(&format!("{:>width$}. {}\n", i + 1, name, width = width));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list() {
        let names: Vec<String> = (1..=10).map(|i| format!("Name {}", i)).collect();
        let output = format_vocabulary(VocabularyKind::Item, &names);
        assert!(output.starts_with(" 1. Name 1\n"));
        assert!(output.ends_with("10. Name 10\n"));
    }

    #[test]
    fn test_empty_list() {
        let output = format_vocabulary(VocabularyKind::Category, &[]);
        assert!(output.starts_with("No categories found."));
    }
}
