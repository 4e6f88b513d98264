//! Compose a directory of Tera templates (a base layout, shared partials, and
//! per-page templates) into a [`Collection`] of pages, then render pages by
//! name.
//!
//! ```no_run
//! use pageset::{Collection, DirSource, FunctionRegistry};
//!
//! let collection = Collection::build(&DirSource::new("."), &FunctionRegistry::new())?;
//! let mut context = tera::Context::new();
//! context.insert("user", "ferris");
//! collection.render(&mut std::io::stdout(), "index.html", &context)?;
//! # Ok::<(), pageset::PagesetError>(())
//! ```

pub mod check;
pub mod collection;
pub mod config;
pub mod error;
pub mod source;

pub use collection::{Collection, FunctionRegistry};
pub use config::Layout;
pub use error::{PagesetError, Result};
pub use source::{DirSource, MemorySource, TemplateSource};
