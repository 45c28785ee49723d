//! Placeholder scanning and preview rendering.
//!
//! Templates use `{{name}}`-style named tokens and `{{1}}`-style
//! positional tokens. Rendering substitutes from a variable map and
//! leaves unresolved tokens intact so the preview shows exactly what
//! still needs a value.

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

/// Compiled placeholder pattern, built once per service.
#[derive(Debug, Clone)]
pub struct VariableScanner {
    token: Regex,
}

impl Default for VariableScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableScanner {
    pub fn new() -> Self {
        Self {
            // "{{ name }}", "{{name}}", "{{1}}"
            token: Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap(),
        }
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn extract_variables(&self, body: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for caps in self.token.captures_iter(body) {
            let name = caps[1].to_string();
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }

    /// Substitute placeholders from the map; unknown tokens stay as
    /// written.
    pub fn render(&self, body: &str, variables: &HashMap<String, String>) -> String {
        self.token
            .replace_all(body, |caps: &regex::Captures| {
                match variables.get(&caps[1]) {
                    Some(value) => Cow::Owned(value.clone()),
                    None => Cow::Owned(caps[0].to_string()),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_in_order_without_duplicates() {
        let scanner = VariableScanner::new();
        let body = "Hi {{name}}, your order {{1}} ships to {{ name }} at {{city}}.";
        assert_eq!(scanner.extract_variables(body), vec!["name", "1", "city"]);
    }

    #[test]
    fn test_render_substitutes_named_and_positional() {
        let scanner = VariableScanner::new();
        let body = "Hi {{name}}, order {{1}} is ready.";
        let rendered = scanner.render(body, &vars(&[("name", "Rita"), ("1", "#442")]));
        assert_eq!(rendered, "Hi Rita, order #442 is ready.");
    }

    #[test]
    fn test_unresolved_tokens_left_intact() {
        let scanner = VariableScanner::new();
        let body = "Hi {{name}}, code {{code}}.";
        let rendered = scanner.render(body, &vars(&[("name", "Rita")]));
        assert_eq!(rendered, "Hi Rita, code {{code}}.");
    }

    #[test]
    fn test_whitespace_inside_braces_tolerated() {
        let scanner = VariableScanner::new();
        let rendered = scanner.render("Hello {{ name }}!", &vars(&[("name", "Rita")]));
        assert_eq!(rendered, "Hello Rita!");
    }

    #[test]
    fn test_plain_text_untouched() {
        let scanner = VariableScanner::new();
        let body = "No placeholders here. Single {braces} survive.";
        assert_eq!(scanner.render(body, &HashMap::new()), body);
        assert!(scanner.extract_variables(body).is_empty());
    }
}
