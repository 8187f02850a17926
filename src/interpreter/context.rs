use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// Supplies variable values during evaluation.
///
/// A context is a tree: [`get`](Context::get) reads an attribute of this
/// context and [`nested`](Context::nested) steps into a child context. The
/// variable `person.address.city` is resolved as
/// `nested("person")`, then `nested("address")`, then `get("city")`.
///
/// Hosts implement this trait over their own data; [`MapContext`] is a
/// ready-made implementation backed by hash maps.
pub trait Context {
    /// Gets the value bound to `field`, if any.
    fn get(&self, field: &str) -> Option<Value>;

    /// Gets the child context bound to `field`, if any.
    fn nested(&self, field: &str) -> Option<&dyn Context>;
}

/// A context with no bindings.
///
/// Used by [`Expression::evaluate`]; every variable lookup fails.
///
/// [`Expression::evaluate`]: crate::ast::Expression::evaluate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyContext;

impl Context for EmptyContext {
    fn get(&self, _: &str) -> Option<Value> {
        None
    }

    fn nested(&self, _: &str) -> Option<&dyn Context> {
        None
    }
}

/// A binding in a [`MapContext`].
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Value(Value),
    Nested(MapContext),
}

/// A context backed by a hash map.
///
/// Each name is bound either to a value or to a nested context. Binding a
/// name again replaces the earlier binding of either kind.
///
/// ## Example
/// ```
/// use tyexpr::{Context, MapContext, Value};
///
/// let context = MapContext::new().with("age", 19)
///                                .with_nested("person", MapContext::new().with("name", "Sarah"));
///
/// assert_eq!(context.get("age"), Some(Value::Int(19)));
/// assert_eq!(context.nested("person").and_then(|p| p.get("name")),
///            Some(Value::from("Sarah")));
/// assert!(context.nested("age").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapContext {
    entries: HashMap<String, Entry>,
}

impl MapContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to a value and returns the context.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name` to a nested context and returns the context.
    #[must_use]
    pub fn with_nested(mut self, name: impl Into<String>, context: Self) -> Self {
        self.insert_nested(name, context);
        self
    }

    /// Binds `name` to a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), Entry::Value(value.into()));
    }

    /// Binds `name` to a nested context.
    pub fn insert_nested(&mut self, name: impl Into<String>, context: Self) {
        self.entries.insert(name.into(), Entry::Nested(context));
    }

    /// Binds a dotted path to a value, creating the intermediate contexts.
    ///
    /// A path segment currently bound to a value is replaced by a nested
    /// context.
    ///
    /// ## Example
    /// ```
    /// use tyexpr::{MapContext, parse_int_expression};
    ///
    /// let mut context = MapContext::new();
    /// context.insert_path("a.b.c", 5);
    ///
    /// let expr = parse_int_expression("a.b.c * 2").unwrap();
    /// assert_eq!(expr.resolve(&context), Ok(10));
    /// ```
    pub fn insert_path(&mut self, path: &str, value: impl Into<Value>) {
        let Some((head, rest)) = path.split_once('.') else {
            self.insert(path, value);
            return;
        };

        let entry = self.entries
                        .entry(head.to_string())
                        .or_insert_with(|| Entry::Nested(Self::new()));
        if matches!(entry, Entry::Value(_)) {
            *entry = Entry::Nested(Self::new());
        }
        if let Entry::Nested(child) = entry {
            child.insert_path(rest, value);
        }
    }

    /// Gets the number of bindings at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether this level has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Context for MapContext {
    fn get(&self, field: &str) -> Option<Value> {
        match self.entries.get(field)? {
            Entry::Value(value) => Some(value.clone()),
            Entry::Nested(_) => None,
        }
    }

    fn nested(&self, field: &str) -> Option<&dyn Context> {
        match self.entries.get(field)? {
            Entry::Nested(context) => Some(context as &dyn Context),
            Entry::Value(_) => None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapContext {
    /// Collects flat bindings; dotted keys are bound as paths.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (name, value) in iter {
            context.insert_path(&name.into(), value);
        }
        context
    }
}

impl Context for HashMap<String, Value> {
    fn get(&self, field: &str) -> Option<Value> {
        HashMap::get(self, field).cloned()
    }

    fn nested(&self, _: &str) -> Option<&dyn Context> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_replaces_either_kind() {
        let mut context = MapContext::new().with("a", 1);
        context.insert_nested("a", MapContext::new().with("b", 2));
        assert!(context.get("a").is_none());
        assert!(context.nested("a").is_some());

        context.insert("a", 3);
        assert_eq!(context.get("a"), Some(Value::Int(3)));
        assert!(context.nested("a").is_none());
    }

    #[test]
    fn insert_path_overwrites_values_on_the_way() {
        let mut context = MapContext::new().with("a", 1);
        context.insert_path("a.b", 2);

        let child = context.nested("a").map(|a| a.get("b"));
        assert_eq!(child, Some(Some(Value::Int(2))));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn collects_dotted_keys_as_paths() {
        let context: MapContext = [("person.age", Value::Int(19)), ("city", Value::from("Oslo"))].into_iter()
                                                                                                 .collect();

        assert_eq!(context.nested("person").and_then(|p| p.get("age")),
                   Some(Value::Int(19)));
        assert_eq!(context.get("city"), Some(Value::from("Oslo")));
    }

    #[test]
    fn hash_map_has_no_nested_contexts() {
        let map = HashMap::from([("x".to_string(), Value::Bool(true))]);

        assert_eq!(Context::get(&map, "x"), Some(Value::Bool(true)));
        assert!(map.nested("x").is_none());
    }
}
