use crate::plugin::PluginCreator;
use crate::plugin::identity::class_names_match;
use std::sync::Arc;

/// A single predicate over creators of type `C`.
///
/// Criteria are immutable once built and may be shared between requests
/// (and threads) through `Arc`.
pub trait Criterion<C: ?Sized>: Send + Sync {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool;
}

impl<C: ?Sized, F> Criterion<C> for F
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        self(creator)
    }
}

/// Shared handle to a criterion over `C`.
pub type CriterionRef<C> = Arc<dyn Criterion<C>>;

/// Passes creators whose object name matches, qualified or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRequirementCriterion {
    name: String,
}

impl NameRequirementCriterion {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C: PluginCreator + ?Sized> Criterion<C> for NameRequirementCriterion {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        class_names_match(&self.name, &creator.plugin_object_namespace_and_name())
    }
}

/// Passes when every child passes. With no children it always passes.
pub struct AndCriterion<C: ?Sized> {
    children: Vec<CriterionRef<C>>,
}

impl<C: ?Sized> AndCriterion<C> {
    pub fn new(children: Vec<CriterionRef<C>>) -> Self {
        Self { children }
    }

    pub fn with(mut self, child: CriterionRef<C>) -> Self {
        self.children.push(child);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C: ?Sized> Criterion<C> for AndCriterion<C> {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        self.children
            .iter()
            .all(|child| child.is_compatible_with_criterion(creator))
    }
}

/// Passes when at least one child passes. With no children it never passes.
pub struct OrCriterion<C: ?Sized> {
    children: Vec<CriterionRef<C>>,
}

impl<C: ?Sized> OrCriterion<C> {
    pub fn new(children: Vec<CriterionRef<C>>) -> Self {
        Self { children }
    }

    pub fn with(mut self, child: CriterionRef<C>) -> Self {
        self.children.push(child);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C: ?Sized> Criterion<C> for OrCriterion<C> {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        self.children
            .iter()
            .any(|child| child.is_compatible_with_criterion(creator))
    }
}

/// Inverts its child.
pub struct NotCriterion<C: ?Sized> {
    child: CriterionRef<C>,
}

impl<C: ?Sized> NotCriterion<C> {
    pub fn new(child: CriterionRef<C>) -> Self {
        Self { child }
    }
}

impl<C: ?Sized> Criterion<C> for NotCriterion<C> {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        !self.child.is_compatible_with_criterion(creator)
    }
}
