//! Composable requests for selecting registered creators.
//!
//! A [`Request`] is an implicit AND over a list of [`Criterion`] objects. An
//! empty request matches every creator. Requests are evaluated against creator
//! metadata only; nothing is instantiated.

pub mod category;
pub mod compatibility;
pub mod criterion;

pub use category::{CategoryCriterion, CategoryMode, KeywordCriterion, KeywordMode};
pub use compatibility::{
    EngineCompatibilityCriterion, EngineCompatibilityMode, PropertyCriterion, PropertyMode,
};
pub use criterion::{
    AndCriterion, Criterion, CriterionRef, NameRequirementCriterion, NotCriterion, OrCriterion,
};

use crate::plugin::identity::Category;
use crate::plugin::{DataRepresentationCreator, EngineCreator, PluginCreator};
use std::fmt;
use std::sync::Arc;

/// An ordered list of criteria, all of which must pass.
pub struct Request<C: ?Sized> {
    criteria: Vec<CriterionRef<C>>,
}

pub type PluginRequest = Request<dyn PluginCreator>;
pub type EngineRequest = Request<dyn EngineCreator>;
pub type DataRepresentationRequest = Request<dyn DataRepresentationCreator>;

impl<C: ?Sized> Request<C> {
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    pub fn add_criterion(&mut self, criterion: CriterionRef<C>) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn criteria(&self) -> &[CriterionRef<C>] {
        &self.criteria
    }

    /// True if every criterion passes. Stops at the first failure.
    pub fn all_criteria_satisfied(&self, creator: &C) -> bool {
        self.criteria
            .iter()
            .all(|criterion| criterion.is_compatible_with_criterion(creator))
    }
}

impl<C: PluginCreator + ?Sized> Request<C> {
    pub fn add_name_requirement(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_criterion(Arc::new(NameRequirementCriterion::new(name)))
    }

    /// The creator must be in at least one of `categories`.
    pub fn add_category_requirement(
        &mut self,
        categories: impl IntoIterator<Item = Category>,
        allow_subcategories: bool,
    ) -> &mut Self {
        self.add_criterion(Arc::new(CategoryCriterion::new(
            categories,
            CategoryMode::MustBeInAtLeastOneCategory,
            allow_subcategories,
        )))
    }

    /// The creator must be in none of `categories`.
    pub fn add_category_exclusion(
        &mut self,
        categories: impl IntoIterator<Item = Category>,
        allow_subcategories: bool,
    ) -> &mut Self {
        self.add_criterion(Arc::new(CategoryCriterion::new(
            categories,
            CategoryMode::MustNotBeInAnyCategory,
            allow_subcategories,
        )))
    }

    pub fn add_keyword_requirement<I, S>(&mut self, keywords: I, mode: KeywordMode) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_criterion(Arc::new(KeywordCriterion::new(keywords, mode)))
    }
}

impl<C: DataRepresentationCreator + ?Sized> Request<C> {
    pub fn add_engine_compatibility_requirement(&mut self, engine: impl Into<String>) -> &mut Self {
        self.add_engines_compatibility_requirement([engine.into()], true)
    }

    pub fn add_engines_compatibility_requirement<I, S>(
        &mut self,
        engines: I,
        match_any: bool,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_criterion(Arc::new(EngineCompatibilityCriterion::new(
            engines,
            EngineCompatibilityMode::MustBeExplicitlyCompatible,
            match_any,
        )))
    }

    pub fn add_engine_incompatibility_requirement(
        &mut self,
        engine: impl Into<String>,
    ) -> &mut Self {
        self.add_engines_incompatibility_requirement([engine.into()], true)
    }

    pub fn add_engines_incompatibility_requirement<I, S>(
        &mut self,
        engines: I,
        match_any: bool,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_criterion(Arc::new(EngineCompatibilityCriterion::new(
            engines,
            EngineCompatibilityMode::MustBeExplicitlyIncompatible,
            match_any,
        )))
    }

    pub fn add_property_requirement<I, S>(&mut self, properties: I, mode: PropertyMode) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_criterion(Arc::new(PropertyCriterion::new(properties, mode)))
    }
}

impl<C: ?Sized> Default for Request<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> Clone for Request<C> {
    fn clone(&self) -> Self {
        Self {
            criteria: self.criteria.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Request<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("criteria", &self.criteria.len())
            .finish()
    }
}
