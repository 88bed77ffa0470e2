use crate::error::{RegistryError, Result};
use std::fmt;

/// Separator between namespace components and between a namespace and a name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// A hierarchical category path, ordered from most general to most specific.
///
/// For example `["Selector", "AtomSelector", "AnnotatedRegionSelector"]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Category(Vec<String>);

impl Category {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(path.into_iter().map(Into::into).collect())
    }

    /// Parses a comma-separated path such as `"Selector,AtomSelector"`.
    pub fn parse(path: &str) -> Self {
        Self::new(
            path.split(',')
                .map(str::trim)
                .filter(|component| !component.is_empty()),
        )
    }

    pub fn path(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `self` equals `other` or is an ancestor of it.
    pub fn is_prefix_of(&self, other: &Category) -> bool {
        self.0.len() <= other.0.len() && other.0.starts_with(&self.0)
    }

    /// Every non-empty prefix of this path, shortest first.
    pub fn prefixes(&self) -> impl Iterator<Item = Category> + '_ {
        (1..=self.0.len()).map(|end| Category(self.0[..end].to_vec()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl<S: Into<String>> FromIterator<S> for Category {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The categories a plugin type declares.
///
/// The primary category is a dedicated field rather than "whatever comes first",
/// since it is the one that determines the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorySet {
    pub primary: Category,
    pub secondary: Vec<Category>,
}

impl CategorySet {
    pub fn new(primary: Category) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
        }
    }

    pub fn with_secondary(mut self, category: Category) -> Self {
        self.secondary.push(category);
        self
    }

    /// The primary category followed by the secondary ones.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        std::iter::once(&self.primary).chain(self.secondary.iter())
    }

    /// Checks that every declared path is non-empty.
    pub fn validate(&self, plugin: &str) -> Result<()> {
        if self.primary.is_empty() {
            return Err(RegistryError::Configuration {
                plugin: plugin.to_string(),
                reason: "no primary category path was declared".to_string(),
            });
        }
        if self.secondary.iter().any(Category::is_empty) {
            return Err(RegistryError::Configuration {
                plugin: plugin.to_string(),
                reason: "a secondary category path is empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Joins a namespace and a name as `ns::name`. An empty namespace yields the bare name.
pub fn namespace_and_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
    }
}

/// Splits `a::b::Name` into (`"a::b"`, `"Name"`). A bare name has an empty namespace.
pub fn split_namespace_and_name(qualified: &str) -> (&str, &str) {
    match qualified.rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => (&qualified[..idx], &qualified[idx + NAMESPACE_SEPARATOR.len()..]),
        None => ("", qualified),
    }
}

/// Builds the registry key: the primary path joined by commas, a colon, then
/// the fully qualified name.
///
/// # Errors
///
/// Returns [`RegistryError::Configuration`] if the primary category path is empty.
pub fn derive_manager_key(categories: &CategorySet, namespace: &str, name: &str) -> Result<String> {
    let qualified = namespace_and_name(namespace, name);
    if categories.primary.is_empty() {
        return Err(RegistryError::Configuration {
            plugin: qualified,
            reason: "no hierarchical category path was declared for the primary category"
                .to_string(),
        });
    }
    Ok(format!("{}:{}", categories.primary, qualified))
}

/// Compares two class names, either of which may be namespace-qualified.
///
/// Two qualified names match only if identical, two bare names likewise. A
/// qualified and a bare name match when the bare name equals the last
/// component of the qualified one. The relation is symmetric but not
/// transitive: `Foo` matches both `ns1::Foo` and `ns2::Foo`, which do not
/// match each other.
pub fn class_names_match(first: &str, second: &str) -> bool {
    let first_qualified = first.contains(NAMESPACE_SEPARATOR);
    let second_qualified = second.contains(NAMESPACE_SEPARATOR);
    match (first_qualified, second_qualified) {
        (true, true) | (false, false) => first == second,
        (true, false) => split_namespace_and_name(first).1 == second,
        (false, true) => split_namespace_and_name(second).1 == first,
    }
}
