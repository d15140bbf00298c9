use std::collections::HashMap;

use serde_json::Value;
use sortable_templates::TagArg;
use thiserror::Error;

/// Raised when a template variable cannot be looked up.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("variable '{name}' does not exist")]
pub struct VariableDoesNotExist {
    pub name: String,
}

impl VariableDoesNotExist {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Template variable lookup supplied by the host.
pub trait Context {
    /// Resolve a dotted variable path to its rendered text.
    fn resolve(&self, path: &str) -> Result<String, VariableDoesNotExist>;
}

impl<C: Context + ?Sized> Context for &C {
    fn resolve(&self, path: &str) -> Result<String, VariableDoesNotExist> {
        (**self).resolve(path)
    }
}

/// A context with nothing in it; every lookup misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyContext;

impl Context for EmptyContext {
    fn resolve(&self, path: &str) -> Result<String, VariableDoesNotExist> {
        Err(VariableDoesNotExist::new(path))
    }
}

impl Context for HashMap<String, String> {
    fn resolve(&self, path: &str) -> Result<String, VariableDoesNotExist> {
        self.get(path)
            .cloned()
            .ok_or_else(|| VariableDoesNotExist::new(path))
    }
}

/// Context backed by a JSON document.
///
/// Dotted paths walk object keys; numeric segments also index arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonContext {
    root: Value,
}

impl JsonContext {
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Set a top-level variable, turning the root into an object if needed.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        if !self.root.is_object() {
            self.root = Value::Object(serde_json::Map::new());
        }
        if let Value::Object(map) = &mut self.root {
            map.insert(name.into(), value);
        }
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.root, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        })
    }
}

impl Context for JsonContext {
    fn resolve(&self, path: &str) -> Result<String, VariableDoesNotExist> {
        match self.lookup(path) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(true)) => Ok("True".to_string()),
            Some(Value::Bool(false)) => Ok("False".to_string()),
            Some(Value::Null) => Ok("None".to_string()),
            Some(Value::Array(_) | Value::Object(_)) | None => Err(VariableDoesNotExist::new(path)),
        }
    }
}

/// A declared title or image URL, resolved against a [`Context`] at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    var: String,
    literal: bool,
}

impl Variable {
    /// A name to look up in the context.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            literal: false,
        }
    }

    /// A string that resolves to itself.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            var: text.into(),
            literal: true,
        }
    }

    /// The token as written in the tag.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Literals, numeric ones included, resolve to themselves; everything
    /// else is looked up.
    pub fn resolve(&self, context: &dyn Context) -> Result<String, VariableDoesNotExist> {
        if self.literal || is_numeric_literal(&self.var) {
            return Ok(self.var.clone());
        }
        context.resolve(&self.var)
    }

    /// Resolve, or fall back to `fallback` when the lookup misses.
    #[must_use]
    pub fn resolve_or(&self, context: &dyn Context, fallback: &str) -> String {
        self.resolve(context).unwrap_or_else(|err| {
            tracing::trace!(variable = %err.name, fallback, "variable not found, using fallback");
            fallback.to_string()
        })
    }

    /// Resolve, falling back to the token itself.
    #[must_use]
    pub fn resolve_or_literal(&self, context: &dyn Context) -> String {
        self.resolve_or(context, &self.var)
    }
}

impl From<TagArg> for Variable {
    fn from(arg: TagArg) -> Self {
        match arg {
            TagArg::Literal(text) => Variable::literal(text),
            TagArg::Variable(var) => Variable::new(var),
        }
    }
}

fn is_numeric_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
