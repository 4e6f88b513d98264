use crate::collection::{compose, page_key, read_parts, FunctionRegistry};
use crate::config::Layout;
use crate::error::Result;
use crate::source::TemplateSource;

/// Result of validating a template tree.
pub struct CheckResult {
    /// Registered name of the base layout.
    pub base: String,
    pub partials: Vec<String>,
    pub pages: Vec<String>,
    /// One entry per page that fails to compose, with the full error chain.
    pub errors: Vec<String>,
}

impl CheckResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a template tree, composing every page instead of stopping at the
/// first broken one.
///
/// A missing base layout, an empty pages directory or a bad glob pattern is
/// still returned as an error since nothing can be composed at all.
pub fn check_tree<S>(
    source: &S,
    layout: &Layout,
    functions: &FunctionRegistry,
) -> Result<CheckResult>
where
    S: TemplateSource + ?Sized,
{
    let parts = read_parts(source, layout)?;

    let mut errors = Vec::new();
    for page in &parts.pages {
        if let Err(e) = compose(&parts, page, functions) {
            errors.push(format!("{}: {}", page_key(&page.name), error_chain(&e)));
        }
    }

    Ok(CheckResult {
        base: parts.base.name.clone(),
        partials: parts.partials.iter().map(|p| p.name.clone()).collect(),
        pages: parts
            .pages
            .iter()
            .map(|p| page_key(&p.name).to_string())
            .collect(),
        errors,
    })
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PagesetError;
    use crate::source::MemorySource;

    fn source_with_broken_pages() -> MemorySource {
        MemorySource::from_iter([
            ("templates/base.html", "{% block main %}{% endblock %}"),
            ("templates/partials/nav.html", "nav"),
            (
                "templates/pages/a.html",
                r#"{% extends "base.html" %}{% block main %}{{ oops {% endblock %}"#,
            ),
            (
                "templates/pages/b.html",
                r#"{% extends "base.html" %}{% block main %}fine{% endblock %}"#,
            ),
            ("templates/pages/c.html", "{% if %}"),
        ])
    }

    #[test]
    fn test_reports_every_broken_page() {
        let result = check_tree(
            &source_with_broken_pages(),
            &Layout::default(),
            &FunctionRegistry::new(),
        )
        .unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.base, "base.html");
        assert_eq!(result.partials, vec!["partials/nav.html"]);
        assert_eq!(result.pages, vec!["a.html", "b.html", "c.html"]);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].starts_with("a.html: "));
        assert!(result.errors[1].starts_with("c.html: "));
    }

    #[test]
    fn test_reports_page_without_base() {
        let source = MemorySource::from_iter([
            ("templates/base.html", "{% block main %}{% endblock main %}"),
            (
                "templates/pages/a.html",
                r#"{% extends "base.html" %}{% block main %}a{% endblock main %}"#,
            ),
            ("templates/pages/b.html", "{% block main %}b{% endblock main %}"),
        ]);
        let result =
            check_tree(&source, &Layout::default(), &FunctionRegistry::new()).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("b.html: "));
        assert!(result.errors[0].contains("does not extend the base layout"));
    }

    #[test]
    fn test_missing_base_is_still_an_error() {
        let source = MemorySource::new().with_file("templates/pages/a.html", "a");
        let result = check_tree(&source, &Layout::default(), &FunctionRegistry::new());
        assert!(matches!(result, Err(PagesetError::BaseLayoutMissing { .. })));
    }
}
