//! Variables bound in a render session.
use std::collections::HashMap;
use std::ops::Index;

/// Mapping of variable names to their current values. Setting a variable
/// again replaces the old value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Context {
    values: HashMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|value| value.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: ToString, V: ToString, const N: usize> From<[(K, V); N]> for Context {
    fn from(values: [(K, V); N]) -> Context {
        values.into_iter().collect()
    }
}

impl<K: ToString, V: ToString> From<Vec<(K, V)>> for Context {
    fn from(values: Vec<(K, V)>) -> Context {
        values.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for Context {
    fn from(values: HashMap<String, String>) -> Context {
        Context { values }
    }
}

impl From<&Context> for Context {
    fn from(context: &Context) -> Context {
        context.clone()
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        for (key, value) in iter {
            context.set(&key.to_string(), value);
        }

        context
    }
}

/// Unset variables are blank.
impl Index<&str> for Context {
    type Output = str;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).unwrap_or("")
    }
}
