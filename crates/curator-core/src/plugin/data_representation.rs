use super::creator::{CreationPolicy, PluginCreator, role_mismatch, verify_identity};
use super::plugin::{AsPlugin, Plugin};
use crate::error::Result;

/// A plugin that holds data an engine works on (coordinates, energy tables...).
pub trait DataRepresentation: Plugin + AsPlugin {
    fn is_empty(&self) -> bool;

    /// Discards all contents, leaving the representation as if freshly created.
    fn clear(&mut self);
}

/// A creator whose objects are data representations.
///
/// Besides identity and categories, these creators describe which engines the
/// representation is known to work (or not work) with and which properties it
/// has. All of this metadata is available without instantiation.
pub trait DataRepresentationCreator: PluginCreator {
    /// Qualified names of engines this representation is explicitly compatible with.
    fn compatible_engines(&self) -> Vec<String> {
        Vec::new()
    }

    /// Qualified names of engines this representation is explicitly incompatible with.
    fn incompatible_engines(&self) -> Vec<String> {
        Vec::new()
    }

    fn present_properties(&self) -> Vec<String> {
        Vec::new()
    }

    fn absent_properties(&self) -> Vec<String> {
        Vec::new()
    }

    fn create_data_representation(&self) -> Result<Box<dyn DataRepresentation>> {
        self.create_data_representation_with(CreationPolicy::default())
    }

    /// Creates an object and narrows it to a data representation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::TypeMismatch`] if the object is not a
    /// data representation, or (when the policy verifies) if its identity
    /// differs from the creator's.
    fn create_data_representation_with(
        &self,
        policy: CreationPolicy,
    ) -> Result<Box<dyn DataRepresentation>> {
        let object = self.create_plugin_object();
        if policy.verify_created_objects {
            verify_identity(self, &object, "data representation")?;
        }
        object
            .into_data_representation()
            .map_err(|other| role_mismatch(self, &other, "data representation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryError;
    use crate::plugin::identity::{Category, CategorySet};
    use crate::plugin::plugin::PluginObject;
    use std::any::Any;

    #[derive(Debug, Default)]
    struct PointCloud {
        points: Vec<[f64; 3]>,
    }

    impl Plugin for PointCloud {
        fn class_name(&self) -> &str {
            "PointCloud"
        }
        fn class_namespace(&self) -> &str {
            "test::data"
        }
        fn categories(&self) -> CategorySet {
            CategorySet::new(Category::new(["DataRepresentation", "Coordinates"]))
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl DataRepresentation for PointCloud {
        fn is_empty(&self) -> bool {
            self.points.is_empty()
        }
        fn clear(&mut self) {
            self.points.clear();
        }
    }

    struct PointCloudCreator;

    impl PluginCreator for PointCloudCreator {
        fn create_plugin_object(&self) -> PluginObject {
            PluginObject::DataRepresentation(Box::new(PointCloud::default()))
        }
        fn plugin_object_categories(&self) -> CategorySet {
            CategorySet::new(Category::new(["DataRepresentation", "Coordinates"]))
        }
        fn plugin_object_name(&self) -> &str {
            "PointCloud"
        }
        fn plugin_object_namespace(&self) -> &str {
            "test::data"
        }
    }

    impl DataRepresentationCreator for PointCloudCreator {}

    #[test]
    fn metadata_defaults_to_empty() {
        let creator = PointCloudCreator;
        assert!(creator.compatible_engines().is_empty());
        assert!(creator.incompatible_engines().is_empty());
        assert!(creator.present_properties().is_empty());
        assert!(creator.absent_properties().is_empty());
    }

    #[test]
    fn created_representation_starts_empty_and_clears() {
        let mut representation = PointCloudCreator
            .create_data_representation_with(CreationPolicy::CHECKED)
            .unwrap();
        assert!(representation.is_empty());
        representation.clear();
        assert!(representation.is_empty());
        assert_eq!(representation.class_namespace_and_name(), "test::data::PointCloud");
    }

    #[test]
    fn engine_object_is_not_a_data_representation() {
        #[derive(Debug)]
        struct Minimizer;
        impl Plugin for Minimizer {
            fn class_name(&self) -> &str {
                "Minimizer"
            }
            fn class_namespace(&self) -> &str {
                "test::engines"
            }
            fn categories(&self) -> CategorySet {
                CategorySet::new(Category::new(["Engine"]))
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
        impl crate::plugin::engine::Engine for Minimizer {}

        struct Confused;
        impl PluginCreator for Confused {
            fn create_plugin_object(&self) -> PluginObject {
                PluginObject::Engine(Box::new(Minimizer))
            }
            fn plugin_object_categories(&self) -> CategorySet {
                CategorySet::new(Category::new(["DataRepresentation"]))
            }
            fn plugin_object_name(&self) -> &str {
                "Confused"
            }
            fn plugin_object_namespace(&self) -> &str {
                "test::data"
            }
        }
        impl DataRepresentationCreator for Confused {}

        let error = Confused
            .create_data_representation_with(CreationPolicy::UNCHECKED)
            .unwrap_err();
        match error {
            RegistryError::TypeMismatch {
                key,
                expected,
                detail,
            } => {
                assert_eq!(key, "DataRepresentation:test::data::Confused");
                assert_eq!(expected, "data representation");
                assert!(detail.contains("test::engines::Minimizer"));
                assert!(detail.contains("engine"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
