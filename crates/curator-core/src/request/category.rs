use super::criterion::Criterion;
use crate::plugin::PluginCreator;
use crate::plugin::identity::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMode {
    MustBeInAtLeastOneCategory,
    MustNotBeInAnyCategory,
}

/// Filters creators on the categories they declare (primary or secondary).
///
/// With `allow_subcategories`, a requested path also matches any category it
/// is a prefix of: `["Selector"]` matches `["Selector", "AtomSelector"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCriterion {
    categories: Vec<Category>,
    mode: CategoryMode,
    allow_subcategories: bool,
}

impl CategoryCriterion {
    pub fn new(
        categories: impl IntoIterator<Item = Category>,
        mode: CategoryMode,
        allow_subcategories: bool,
    ) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            mode,
            allow_subcategories,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn mode(&self) -> CategoryMode {
        self.mode
    }

    fn matches(&self, requested: &Category, declared: &Category) -> bool {
        if self.allow_subcategories {
            requested.is_prefix_of(declared)
        } else {
            requested == declared
        }
    }
}

impl<C: PluginCreator + ?Sized> Criterion<C> for CategoryCriterion {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        let declared = creator.plugin_object_categories();
        let in_any = self.categories.iter().any(|requested| {
            declared
                .iter()
                .any(|category| self.matches(requested, category))
        });
        match self.mode {
            CategoryMode::MustBeInAtLeastOneCategory => in_any,
            CategoryMode::MustNotBeInAnyCategory => !in_any,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMode {
    MustHaveAtLeastOne,
    MustHaveAll,
    MustHaveNone,
}

/// Filters creators on their keywords.
///
/// An empty keyword list fails `MustHaveAtLeastOne` and `MustHaveAll`, and
/// passes `MustHaveNone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCriterion {
    keywords: Vec<String>,
    mode: KeywordMode,
}

impl KeywordCriterion {
    pub fn new<I, S>(keywords: I, mode: KeywordMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mode(&self) -> KeywordMode {
        self.mode
    }
}

impl<C: PluginCreator + ?Sized> Criterion<C> for KeywordCriterion {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        if self.keywords.is_empty() {
            return self.mode == KeywordMode::MustHaveNone;
        }
        let declared = creator.plugin_object_keywords();
        let has = |keyword: &String| declared.contains(keyword);
        match self.mode {
            KeywordMode::MustHaveAtLeastOne => self.keywords.iter().any(has),
            KeywordMode::MustHaveAll => self.keywords.iter().all(has),
            KeywordMode::MustHaveNone => !self.keywords.iter().any(has),
        }
    }
}
