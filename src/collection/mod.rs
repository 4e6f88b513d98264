pub mod functions;

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::Layout;
use crate::error::{PagesetError, Result};
use crate::source::{glob, TemplateSource};

pub use functions::FunctionRegistry;

/// A set of pages that share a base layout, partials, and template functions.
///
/// Each page is composed into its own `Tera` holding the base layout, every
/// partial, and that page alone. Pages are looked up by file name
/// (`page1.html`), and a collection never changes once built.
#[derive(Debug, Clone)]
pub struct Collection {
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Clone)]
struct Page {
    /// Registered name of the page inside `tera`, e.g. `pages/page1.html`.
    entry: String,
    tera: Tera,
}

/// A template file read out of a source, under its registered name.
pub(crate) struct SourceFile {
    pub name: String,
    pub content: String,
}

/// The raw pieces every composed page is made from.
pub(crate) struct Parts {
    pub base: SourceFile,
    pub partials: Vec<SourceFile>,
    pub pages: Vec<SourceFile>,
}

impl Collection {
    /// Build a collection from a source laid out as
    ///
    /// ```text
    /// templates/
    /// ├─ base.html
    /// ├─ partials/
    /// │  ├─ nav.html
    /// ├─ pages/
    /// │  ├─ page1.html
    /// │  ├─ page2.html
    /// ```
    ///
    /// `base.html` is required and is the root of every page's inheritance
    /// chain. Partials are included by their path (`partials/nav.html`).
    /// Pages `{% extends "base.html" %}` and are rendered by file name.
    pub fn build<S>(source: &S, functions: &FunctionRegistry) -> Result<Self>
    where
        S: TemplateSource + ?Sized,
    {
        Self::build_with_layout(source, functions, &Layout::default())
    }

    /// Like [`Collection::build`] with a non-default directory layout.
    pub fn build_with_layout<S>(
        source: &S,
        functions: &FunctionRegistry,
        layout: &Layout,
    ) -> Result<Self>
    where
        S: TemplateSource + ?Sized,
    {
        let parts = read_parts(source, layout)?;

        let mut pages = BTreeMap::new();
        for page in &parts.pages {
            let tera = compose(&parts, page, functions)?;
            pages.insert(
                page_key(&page.name).to_string(),
                Page {
                    entry: page.name.clone(),
                    tera,
                },
            );
        }

        Ok(Self { pages })
    }

    /// Render `page` with `context` into `dest`.
    ///
    /// The page is rendered into a buffer first; `dest` receives either the
    /// complete output or nothing at all.
    pub fn render<W>(&self, dest: &mut W, page: &str, context: &Context) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let buf = self.render_buffered(page, context)?;
        dest.write_all(&buf).map_err(|e| PagesetError::Write {
            page: page.to_string(),
            source: e,
        })
    }

    /// Render `page` with any serializable map-like value as its context.
    pub fn render_serialize<W, T>(&self, dest: &mut W, page: &str, data: &T) -> Result<()>
    where
        W: Write + ?Sized,
        T: Serialize + ?Sized,
    {
        let context =
            Context::from_serialize(data).map_err(|e| PagesetError::InvalidData { source: e })?;
        self.render(dest, page, &context)
    }

    pub fn render_to_string(&self, page: &str, context: &Context) -> Result<String> {
        let buf = self.render_buffered(page, context)?;
        // Tera only ever produces valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Page names in sorted order.
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn contains(&self, page: &str) -> bool {
        self.pages.contains_key(page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false for a built collection, which holds at least one page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn render_buffered(&self, page: &str, context: &Context) -> Result<Vec<u8>> {
        assert!(
            !self.pages.is_empty(),
            "must use Collection::build to create a Collection"
        );

        let composed = self
            .pages
            .get(page)
            .ok_or_else(|| PagesetError::PageNotFound {
                page: page.to_string(),
            })?;

        let mut buf: Vec<u8> = Vec::new();
        composed
            .tera
            .render_to(&composed.entry, context, &mut buf)
            .map_err(|e| PagesetError::Render {
                page: page.to_string(),
                source: e,
            })?;
        Ok(buf)
    }
}

/// Locate and read the base layout, partials and pages, in that order.
pub(crate) fn read_parts<S>(source: &S, layout: &Layout) -> Result<Parts>
where
    S: TemplateSource + ?Sized,
{
    layout.validate()?;

    let base_path = layout.base_path();
    if !source.is_file(&base_path) {
        return Err(PagesetError::BaseLayoutMissing { path: base_path });
    }

    let pages_pattern = layout.pages_pattern();
    let page_paths = glob(source, &pages_pattern)?;
    if page_paths.is_empty() {
        return Err(PagesetError::NoPages {
            pattern: pages_pattern,
        });
    }

    let partial_paths = glob(source, &layout.partials_pattern())?;

    let read = |path: &str| -> Result<SourceFile> {
        Ok(SourceFile {
            name: layout.template_name(path).to_string(),
            content: source.read_to_string(path)?,
        })
    };

    Ok(Parts {
        base: read(&base_path)?,
        partials: partial_paths
            .iter()
            .map(|p| read(p.as_str()))
            .collect::<Result<_>>()?,
        pages: page_paths
            .iter()
            .map(|p| read(p.as_str()))
            .collect::<Result<_>>()?,
    })
}

/// Parse the base layout, all partials and one page into a fresh `Tera`.
///
/// The page must reach the base layout through its `extends` chain, since
/// rendering starts from the page.
pub(crate) fn compose(
    parts: &Parts,
    page: &SourceFile,
    functions: &FunctionRegistry,
) -> Result<Tera> {
    let mut tera = Tera::default();
    functions.install(&mut tera);

    let files = std::iter::once(&parts.base)
        .chain(&parts.partials)
        .chain(std::iter::once(page))
        .map(|f| (f.name.as_str(), f.content.as_str()));

    tera.add_raw_templates(files)
        .map_err(|e| PagesetError::Parse {
            page: page_key(&page.name).to_string(),
            source: e,
        })?;

    let extends_base = tera
        .get_template(&page.name)
        .map(|template| template.parents.iter().any(|p| *p == parts.base.name))
        .unwrap_or(false);
    if !extends_base {
        return Err(PagesetError::PageNotExtendingBase {
            page: page_key(&page.name).to_string(),
            base: parts.base.name.clone(),
        });
    }

    Ok(tera)
}

/// File name of a page, directory stripped.
pub(crate) fn page_key(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use rstest::rstest;
    use std::collections::HashMap;
    use tera::Value;

    const BASE: &str = r#"<title>{% block title %}{% endblock %}</title>
{% include "partials/nav.html" %}
<main>{% block main %}{% endblock %}</main>
<footer>I'm the base.</footer>"#;

    fn valid_source() -> MemorySource {
        MemorySource::from_iter([
            ("templates/base.html", BASE),
            ("templates/partials/nav.html", "<nav>This is the nav</nav>"),
            (
                "templates/pages/page1.html",
                r#"{% extends "base.html" %}{% block title %}Title 1{% endblock %}{% block main %}Main 1{% endblock %}"#,
            ),
            (
                "templates/pages/page2.html",
                r#"{% extends "base.html" %}{% block title %}Title 2{% endblock %}{% block main %}Hello {{ name }}{% endblock %}"#,
            ),
        ])
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_build_keys_by_file_name() {
        let collection = Collection::build(&valid_source(), &FunctionRegistry::new()).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.page_names().collect::<Vec<_>>(),
            vec!["page1.html", "page2.html"]
        );
        assert!(collection.contains("page1.html"));
        assert!(!collection.contains("pages/page1.html"));
    }

    #[test]
    fn test_render_page1() {
        let collection = Collection::build(&valid_source(), &FunctionRegistry::new()).unwrap();
        let mut out: Vec<u8> = Vec::new();
        collection
            .render(&mut out, "page1.html", &Context::new())
            .unwrap();
        let contents = String::from_utf8(out).unwrap();
        assert!(contents.contains("Title 1"));
        assert!(contents.contains("This is the nav"));
        assert!(contents.contains("Main 1"));
        assert!(contents.contains("I'm the base."));
        assert!(!contents.contains("Title 2"));
    }

    #[test]
    fn test_each_page_is_composed_alone() {
        // Both pages define the same blocks; neither leaks into the other.
        let collection = Collection::build(&valid_source(), &FunctionRegistry::new()).unwrap();
        let mut context = Context::new();
        context.insert("name", "world");
        let out = collection.render_to_string("page2.html", &context).unwrap();
        assert!(out.contains("Title 2"));
        assert!(out.contains("Hello world"));
        assert!(!out.contains("Main 1"));
    }

    #[test]
    fn test_functions_reach_every_page() {
        let source = MemorySource::from_iter([
            ("templates/base.html", "{% block main %}{% endblock %}"),
            (
                "templates/pages/a.html",
                r#"{% extends "base.html" %}{% block main %}{{ greet() }}{% endblock %}"#,
            ),
            (
                "templates/pages/b.html",
                r#"{% extends "base.html" %}{% block main %}{{ greet() }}!{% endblock %}"#,
            ),
        ]);
        let functions = FunctionRegistry::new().with_function(
            "greet",
            |_: &HashMap<String, Value>| -> tera::Result<Value> { Ok(Value::from("hi")) },
        );
        let collection = Collection::build(&source, &functions).unwrap();
        assert_eq!(
            collection
                .render_to_string("a.html", &Context::new())
                .unwrap(),
            "hi"
        );
        assert_eq!(
            collection
                .render_to_string("b.html", &Context::new())
                .unwrap(),
            "hi!"
        );
    }

    #[test]
    fn test_missing_parent_fails_parse() {
        let source = MemorySource::from_iter([
            ("templates/base.html", "{% block main %}{% endblock %}"),
            (
                "templates/pages/a.html",
                r#"{% extends "layout.html" %}{% block main %}x{% endblock %}"#,
            ),
        ]);
        let result = Collection::build(&source, &FunctionRegistry::new());
        assert!(matches!(result, Err(PagesetError::Parse { page, .. }) if page == "a.html"));
    }

    #[rstest]
    #[case("{% block main %}Main 1{% endblock main %}")]
    #[case(r#"{% extends "partials/nav.html" %}{% block main %}Main 1{% endblock main %}"#)]
    fn test_page_must_extend_base(#[case] page: &str) {
        let mut source = valid_source();
        source.insert("templates/pages/page3.html", page);
        let result = Collection::build(&source, &FunctionRegistry::new());
        assert!(matches!(
            result,
            Err(PagesetError::PageNotExtendingBase { page, base })
                if page == "page3.html" && base == "base.html"
        ));
    }

    #[test]
    fn test_write_failure() {
        let collection = Collection::build(&valid_source(), &FunctionRegistry::new()).unwrap();
        let result = collection.render(&mut FailingWriter, "page1.html", &Context::new());
        assert!(matches!(result, Err(PagesetError::Write { page, .. }) if page == "page1.html"));
    }

    #[test]
    fn test_render_serialize_rejects_non_map() {
        let collection = Collection::build(&valid_source(), &FunctionRegistry::new()).unwrap();
        let mut out: Vec<u8> = Vec::new();
        let result = collection.render_serialize(&mut out, "page1.html", &[1, 2, 3]);
        assert!(matches!(result, Err(PagesetError::InvalidData { .. })));
        assert!(out.is_empty());
    }

    #[test]
    #[should_panic(expected = "must use Collection::build")]
    fn test_unbuilt_collection_panics() {
        let collection = Collection {
            pages: BTreeMap::new(),
        };
        let _ = collection.render(&mut Vec::<u8>::new(), "page1.html", &Context::new());
    }

    #[test]
    fn test_collection_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Collection>();
    }

    #[test]
    fn test_page_key() {
        assert_eq!(page_key("pages/page1.html"), "page1.html");
        assert_eq!(page_key("page1.html"), "page1.html");
    }
}
