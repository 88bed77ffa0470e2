use super::criterion::Criterion;
use crate::plugin::DataRepresentationCreator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCompatibilityMode {
    MustBeExplicitlyCompatible,
    MustBeExplicitlyIncompatible,
}

/// Filters data representation creators on the engines they declare
/// compatibility or incompatibility with.
///
/// Engine names are compared exactly against the creator's declared
/// namespace-qualified names. With `match_any`, one listed engine suffices;
/// otherwise every listed engine must be declared. An empty engine list never
/// passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCompatibilityCriterion {
    engines: Vec<String>,
    mode: EngineCompatibilityMode,
    match_any: bool,
}

impl EngineCompatibilityCriterion {
    pub fn new<I, S>(engines: I, mode: EngineCompatibilityMode, match_any: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            engines: engines.into_iter().map(Into::into).collect(),
            mode,
            match_any,
        }
    }

    pub fn engines(&self) -> &[String] {
        &self.engines
    }
}

impl<C: DataRepresentationCreator + ?Sized> Criterion<C> for EngineCompatibilityCriterion {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        if self.engines.is_empty() {
            return false;
        }
        let declared = match self.mode {
            EngineCompatibilityMode::MustBeExplicitlyCompatible => creator.compatible_engines(),
            EngineCompatibilityMode::MustBeExplicitlyIncompatible => creator.incompatible_engines(),
        };
        let listed = |engine: &String| declared.contains(engine);
        if self.match_any {
            self.engines.iter().any(listed)
        } else {
            self.engines.iter().all(listed)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyMode {
    MustBePresent,
    MustBeAbsent,
}

/// Requires a data representation creator to declare every listed property
/// as present (or as absent). An empty property list always passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCriterion {
    properties: Vec<String>,
    mode: PropertyMode,
}

impl PropertyCriterion {
    pub fn new<I, S>(properties: I, mode: PropertyMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }
}

impl<C: DataRepresentationCreator + ?Sized> Criterion<C> for PropertyCriterion {
    fn is_compatible_with_criterion(&self, creator: &C) -> bool {
        let declared = match self.mode {
            PropertyMode::MustBePresent => creator.present_properties(),
            PropertyMode::MustBeAbsent => creator.absent_properties(),
        };
        self.properties
            .iter()
            .all(|property| declared.contains(property))
    }
}
