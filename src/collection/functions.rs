use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tera::{Filter, Function, Tera, Value};

/// Functions and filters made available to every page of a collection.
///
/// Each composed page gets its own `Tera`, so the callables are held behind
/// `Arc` and shared between them.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Arc<dyn Function>>,
    filters: BTreeMap<String, Arc<dyn Filter>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function<F: Function + 'static>(mut self, name: &str, function: F) -> Self {
        self.register_function(name, function);
        self
    }

    pub fn with_filter<F: Filter + 'static>(mut self, name: &str, filter: F) -> Self {
        self.register_filter(name, filter);
        self
    }

    pub fn register_function<F: Function + 'static>(&mut self, name: &str, function: F) {
        self.functions.insert(name.to_string(), Arc::new(function));
    }

    pub fn register_filter<F: Filter + 'static>(&mut self, name: &str, filter: F) {
        self.filters.insert(name.to_string(), Arc::new(filter));
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.functions.len() + self.filters.len()
    }

    /// Register everything into a freshly created `Tera`.
    pub(crate) fn install(&self, tera: &mut Tera) {
        for (name, function) in &self.functions {
            tera.register_function(name, SharedFunction(Arc::clone(function)));
        }
        for (name, filter) in &self.filters {
            tera.register_filter(name, SharedFilter(Arc::clone(filter)));
        }
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}

struct SharedFunction(Arc<dyn Function>);

impl Function for SharedFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.call(args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}

struct SharedFilter(Arc<dyn Filter>);

impl Filter for SharedFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.filter(value, args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}
