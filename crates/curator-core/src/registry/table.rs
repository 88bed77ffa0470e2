use crate::config::RegistryConfig;
use crate::context::ManagerCreationKey;
use crate::error::{RegistryError, Result};
use crate::plugin::identity::Category;
use crate::plugin::{PluginCreator, PluginObject};
use crate::request::Request;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A thread-safe table of creators keyed by category key, with secondary
/// indices by keyword and by category.
///
/// Every operation takes the single lock once, so each call is atomic with
/// respect to every other call. Lookups return creators in key order.
pub struct Registry<C: ?Sized> {
    name: &'static str,
    strict_unregistration: bool,
    table: RwLock<Table<C>>,
}

struct Table<C: ?Sized> {
    by_key: BTreeMap<String, Arc<C>>,
    by_keyword: BTreeMap<String, BTreeSet<String>>,
    /// A creator is listed under every prefix of each of its category paths.
    by_category_prefix: BTreeMap<Category, BTreeSet<String>>,
    by_exact_category: BTreeMap<Category, BTreeSet<String>>,
}

impl<C: ?Sized> Default for Table<C> {
    fn default() -> Self {
        Self {
            by_key: BTreeMap::new(),
            by_keyword: BTreeMap::new(),
            by_category_prefix: BTreeMap::new(),
            by_exact_category: BTreeMap::new(),
        }
    }
}

impl<C: PluginCreator + ?Sized> Table<C> {
    fn insert(&mut self, key: String, creator: Arc<C>) {
        for keyword in creator.plugin_object_keywords() {
            self.by_keyword
                .entry(keyword)
                .or_default()
                .insert(key.clone());
        }
        for category in creator.plugin_object_categories().iter() {
            for prefix in category.prefixes() {
                self.by_category_prefix
                    .entry(prefix)
                    .or_default()
                    .insert(key.clone());
            }
            self.by_exact_category
                .entry(category.clone())
                .or_default()
                .insert(key.clone());
        }
        self.by_key.insert(key, creator);
    }

    fn remove(&mut self, key: &str) -> Option<Arc<C>> {
        let creator = self.by_key.remove(key)?;
        for keyword in creator.plugin_object_keywords() {
            detach(&mut self.by_keyword, &keyword, key);
        }
        for category in creator.plugin_object_categories().iter() {
            for prefix in category.prefixes() {
                detach(&mut self.by_category_prefix, &prefix, key);
            }
            detach(&mut self.by_exact_category, category, key);
        }
        Some(creator)
    }

    fn resolve<'a>(&'a self, keys: Option<&'a BTreeSet<String>>) -> Vec<Arc<C>> {
        keys.into_iter()
            .flatten()
            .filter_map(|key| self.by_key.get(key).cloned())
            .collect()
    }

    fn category_index(&self, include_subcategories: bool) -> &BTreeMap<Category, BTreeSet<String>> {
        if include_subcategories {
            &self.by_category_prefix
        } else {
            &self.by_exact_category
        }
    }
}

fn detach<K: Ord>(index: &mut BTreeMap<K, BTreeSet<String>>, at: &K, key: &str) {
    let emptied = match index.get_mut(at) {
        Some(keys) => {
            keys.remove(key);
            keys.is_empty()
        }
        None => false,
    };
    if emptied {
        index.remove(at);
    }
}

fn display_name<C: PluginCreator + ?Sized>(creator: &C, include_namespace: bool) -> String {
    if include_namespace {
        creator.plugin_object_namespace_and_name()
    } else {
        creator.plugin_object_name().to_string()
    }
}

impl<C: PluginCreator + ?Sized> Registry<C> {
    /// Creates an empty registry. `name` labels its log output.
    pub fn new(_key: ManagerCreationKey, name: &'static str, config: &RegistryConfig) -> Self {
        Self {
            name,
            strict_unregistration: config.strict_unregistration,
            table: RwLock::new(Table::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_strict(&self) -> bool {
        self.strict_unregistration
    }

    /// Registers a batch of creators, all or nothing.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::Configuration`] if a creator declares malformed categories.
    /// * [`RegistryError::DuplicateRegistration`] if a key is already registered
    ///   or appears twice in the batch.
    pub fn add_plugins(&self, creators: &[Arc<C>]) -> Result<()> {
        let keyed = keyed(creators)?;
        let mut table = self.table.write();

        {
            let mut batch = BTreeSet::new();
            for (key, _) in &keyed {
                if table.by_key.contains_key(key) || !batch.insert(key.as_str()) {
                    return Err(RegistryError::DuplicateRegistration { key: key.clone() });
                }
            }
        }

        for (key, creator) in keyed {
            debug!(registry = self.name, key = %key, "Registering plugin.");
            table.insert(key, Arc::clone(creator));
        }
        info!(
            registry = self.name,
            added = creators.len(),
            total = table.by_key.len(),
            "Plugins registered."
        );
        Ok(())
    }

    pub fn add_plugin(&self, creator: Arc<C>) -> Result<()> {
        self.add_plugins(std::slice::from_ref(&creator))
    }

    /// Removes a batch of creators by key.
    ///
    /// Keys that are not registered are skipped, unless the registry is strict,
    /// in which case the whole batch fails and nothing is removed.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::Configuration`] if a creator declares no primary category.
    /// * [`RegistryError::MissingRegistration`] in strict mode.
    pub fn remove_plugins(&self, creators: &[Arc<C>]) -> Result<()> {
        let keys = removal_keys(creators)?;
        let mut table = self.table.write();
        self.check_removable(&table, &keys)?;

        let mut removed = 0;
        for key in &keys {
            if table.remove(key).is_some() {
                removed += 1;
            } else {
                debug!(registry = self.name, key = %key, "Plugin is not registered; nothing to remove.");
            }
        }
        info!(
            registry = self.name,
            removed,
            total = table.by_key.len(),
            "Plugins unregistered."
        );
        Ok(())
    }

    /// Fails exactly when [`Registry::remove_plugins`] would, without removing anything.
    pub fn check_removal(&self, creators: &[Arc<C>]) -> Result<()> {
        let keys = removal_keys(creators)?;
        self.check_removable(&self.table.read(), &keys)
    }

    fn check_removable(&self, table: &Table<C>, keys: &[String]) -> Result<()> {
        if !self.strict_unregistration {
            return Ok(());
        }
        match keys.iter().find(|key| !table.by_key.contains_key(*key)) {
            Some(missing) => Err(RegistryError::MissingRegistration {
                key: missing.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn remove_plugin(&self, creator: &Arc<C>) -> Result<()> {
        self.remove_plugins(std::slice::from_ref(creator))
    }

    pub fn get_plugin(&self, key: &str) -> Result<Arc<C>> {
        self.table
            .read()
            .by_key
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                key: key.to_string(),
            })
    }

    pub fn has_plugin(&self, key: &str) -> bool {
        self.table.read().by_key.contains_key(key)
    }

    pub fn has_any_plugin(&self) -> bool {
        !self.table.read().by_key.is_empty()
    }

    pub fn total_plugins(&self) -> usize {
        self.table.read().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_any_plugin()
    }

    /// Drops every registration.
    pub fn reset(&self) {
        let mut table = self.table.write();
        let dropped = table.by_key.len();
        *table = Table::default();
        info!(registry = self.name, dropped, "Registry reset.");
    }

    /// Creators in `category`, or also in any of its subcategories.
    pub fn get_all_plugins_by_category(
        &self,
        category: &Category,
        include_subcategories: bool,
    ) -> Vec<Arc<C>> {
        let table = self.table.read();
        table.resolve(table.category_index(include_subcategories).get(category))
    }

    pub fn plugin_names_by_category(
        &self,
        category: &Category,
        include_subcategories: bool,
        include_namespace: bool,
    ) -> Vec<String> {
        self.get_all_plugins_by_category(category, include_subcategories)
            .iter()
            .map(|creator| display_name(creator.as_ref(), include_namespace))
            .collect()
    }

    pub fn plugins_by_keyword(&self, keyword: &str) -> Vec<Arc<C>> {
        let table = self.table.read();
        table.resolve(table.by_keyword.get(keyword))
    }

    /// Names of creators carrying every keyword in `keywords`.
    ///
    /// An empty keyword list selects every creator.
    pub fn plugin_names_by_keywords<S: AsRef<str>>(
        &self,
        keywords: &[S],
        include_namespace: bool,
    ) -> Vec<String> {
        let table = self.table.read();
        let Some(sets) = keywords
            .iter()
            .map(|keyword| table.by_keyword.get(keyword.as_ref()))
            .collect::<Option<Vec<_>>>()
        else {
            return Vec::new();
        };
        table
            .by_key
            .iter()
            .filter(|(key, _)| sets.iter().all(|keys| keys.contains(*key)))
            .map(|(_, creator)| display_name(creator.as_ref(), include_namespace))
            .collect()
    }

    pub fn all_keys(&self) -> Vec<String> {
        self.table.read().by_key.keys().cloned().collect()
    }

    /// Every declared category path (primary and secondary), without parents.
    pub fn all_categories(&self) -> Vec<Category> {
        self.table.read().by_exact_category.keys().cloned().collect()
    }

    pub fn all_keywords(&self) -> Vec<String> {
        self.table.read().by_keyword.keys().cloned().collect()
    }

    /// Every creator satisfying `request`, in key order.
    pub fn get_plugins_matching(&self, request: &Request<C>) -> Vec<Arc<C>> {
        let table = self.table.read();
        let matches: Vec<_> = table
            .by_key
            .values()
            .filter(|creator| request.all_criteria_satisfied(creator))
            .cloned()
            .collect();
        debug!(
            registry = self.name,
            criteria = request.criteria_count(),
            matches = matches.len(),
            "Evaluated request."
        );
        matches
    }

    /// The single creator answering to `name`, bare or namespace-qualified.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no creator matches `name`.
    /// * [`RegistryError::AmbiguousName`] if several do (e.g. a bare name
    ///   shared by two namespaces).
    pub fn get_plugin_by_name(&self, name: &str) -> Result<Arc<C>> {
        let mut request = Request::<C>::new();
        request.add_name_requirement(name);
        single_match(name, self.get_plugins_matching(&request))
    }

    /// Instantiates the creator in `category` (or a subcategory) whose
    /// namespace-qualified name is exactly `name`.
    pub fn create_plugin_object_instance(
        &self,
        category: &Category,
        name: &str,
    ) -> Result<PluginObject> {
        let found = {
            let table = self.table.read();
            find_named(&table, table.by_category_prefix.get(category), name)
        };
        let creator = found.ok_or_else(|| RegistryError::NotFound {
            key: format!("{category}:{name}"),
        })?;
        debug!(registry = self.name, name, "Creating plugin object.");
        Ok(creator.create_plugin_object())
    }

    /// Instantiates the creator carrying `keyword` whose namespace-qualified
    /// name is exactly `name`.
    pub fn create_plugin_object_instance_by_keyword(
        &self,
        keyword: &str,
        name: &str,
    ) -> Result<PluginObject> {
        let found = {
            let table = self.table.read();
            find_named(&table, table.by_keyword.get(keyword), name)
        };
        let creator = found.ok_or_else(|| RegistryError::NotFound {
            key: format!("{name} (keyword '{keyword}')"),
        })?;
        debug!(registry = self.name, name, keyword, "Creating plugin object.");
        Ok(creator.create_plugin_object())
    }
}

fn keyed<C: PluginCreator + ?Sized>(creators: &[Arc<C>]) -> Result<Vec<(String, &Arc<C>)>> {
    creators
        .iter()
        .map(|creator| {
            let key = creator.plugin_object_manager_key()?;
            creator
                .plugin_object_categories()
                .validate(&creator.plugin_object_namespace_and_name())?;
            Ok((key, creator))
        })
        .collect()
}

fn removal_keys<C: PluginCreator + ?Sized>(creators: &[Arc<C>]) -> Result<Vec<String>> {
    creators
        .iter()
        .map(|creator| creator.plugin_object_manager_key())
        .collect()
}

/// Narrows a name lookup to exactly one creator.
fn single_match<C>(name: &str, mut matches: Vec<Arc<C>>) -> Result<Arc<C>>
where
    C: PluginCreator + ?Sized,
{
    match matches.len() {
        0 => Err(RegistryError::NotFound {
            key: name.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(RegistryError::AmbiguousName {
            name: name.to_string(),
            candidates: matches
                .iter()
                .map(|creator| creator.plugin_object_namespace_and_name())
                .collect(),
        }),
    }
}

fn find_named<C: PluginCreator + ?Sized>(
    table: &Table<C>,
    keys: Option<&BTreeSet<String>>,
    name: &str,
) -> Option<Arc<C>> {
    table
        .resolve(keys)
        .into_iter()
        .find(|creator| creator.plugin_object_namespace_and_name() == name)
}

impl<C: ?Sized> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("strict_unregistration", &self.strict_unregistration)
            .field("plugins", &self.table.read().by_key.len())
            .finish()
    }
}
