//! Instance Registry - Key → Scope mapping and instance construction.
//!
//! The registry is an explicit context object rather than ambient global
//! state: the application owns a [`Relapse`] (document + registry) and every
//! construction and lookup goes through it. Keys are unique; entries keep
//! insertion order.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::Rng;
use tracing::{debug, info};

use crate::config::{Config, Options};
use crate::dom::{Document, Element};
use crate::error::{RelapseError, Result};
use crate::types::Target;

use super::reconcile;
use super::scope::Scope;

type Entries = RefCell<Vec<(String, Scope)>>;

// =============================================================================
// Registry
// =============================================================================

/// Shared key → Scope map. Clones share the same entries.
#[derive(Clone, Default)]
pub struct Registry(Rc<Entries>);

/// Non-owning registry handle held by scopes.
#[derive(Clone, Default)]
pub struct WeakRegistry(Weak<Entries>);

impl WeakRegistry {
    pub fn upgrade(&self) -> Option<Registry> {
        self.0.upgrade().map(Registry)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.borrow().iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<Scope> {
        self.0
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, scope)| scope.clone())
    }

    /// Keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Every (key, scope) entry in registration order.
    pub fn entries(&self) -> Vec<(String, Scope)> {
        self.0.borrow().clone()
    }

    pub(crate) fn insert(&self, key: String, scope: Scope) -> Result<()> {
        if self.contains(&key) {
            return Err(RelapseError::DuplicateInstance { key });
        }
        self.0.borrow_mut().push((key, scope));
        Ok(())
    }

    pub(crate) fn remove(&self, key: &str) -> Option<Scope> {
        let mut entries = self.0.borrow_mut();
        let position = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(position).1)
    }

    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry(Rc::downgrade(&self.0))
    }
}

// =============================================================================
// Relapse Context
// =============================================================================

/// Application-owned entry point: the document plus its instance registry.
#[derive(Debug, Clone, Default)]
pub struct Relapse {
    document: Document,
    registry: Registry,
}

impl Relapse {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            registry: Registry::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// One instance by key.
    pub fn get(&self, key: &str) -> Option<Scope> {
        self.registry.get(key)
    }

    /// Create accordion instances.
    ///
    /// A single element (direct, or `#id`) yields `Some(scope)`. A batch
    /// (any other selector, or a list of elements) creates one independent
    /// instance per element and yields `None`; the first failure aborts it.
    pub fn create(&self, target: impl Into<Target>, options: Options) -> Result<Option<Scope>> {
        match target.into() {
            Target::Element(element) => self.create_one(&element, &options).map(Some),
            Target::Selector(selector) if selector.starts_with('#') => {
                let element = self
                    .document
                    .query_selector(&selector)
                    .ok_or(RelapseError::ElementNotFound { selector })?;
                self.create_one(&element, &options).map(Some)
            }
            Target::Selector(selector) => {
                for element in self.document.query_selector_all(&selector) {
                    self.create_one(&element, &options)?;
                }
                Ok(None)
            }
            Target::Elements(elements) => {
                for element in &elements {
                    self.create_one(element, &options)?;
                }
                Ok(None)
            }
        }
    }

    fn create_one(&self, element: &Element, options: &Options) -> Result<Scope> {
        let config = Config::resolve(options, element)?;
        let pairs = reconcile::pair(element)?;

        let markup_id = element.id();
        let explicit = config
            .instance_attribute()
            .and_then(|attribute| element.attribute(attribute))
            .filter(|key| !key.is_empty());
        let (key, generated) = match (explicit, &markup_id) {
            (Some(key), _) => (key, false),
            (None, Some(id)) => (id.clone(), false),
            (None, None) => (self.unused_key(), true),
        };

        for candidate in std::iter::once(&key).chain(markup_id.as_ref()) {
            if self.registry.contains(candidate) {
                return Err(RelapseError::DuplicateInstance {
                    key: candidate.clone(),
                });
            }
        }

        if generated {
            if let Some(attribute) = config.instance_attribute() {
                element.set_attribute(attribute, &key);
            }
        }
        element.set_attribute("aria-multiselectable", &config.multiple.to_string());

        let id = self.unused_id();
        let folds = reconcile::reconcile(&id, &config, pairs);
        let scope = Scope::new(
            id,
            key.clone(),
            element.clone(),
            config,
            folds,
            self.registry.downgrade(),
        );
        scope.bind();
        self.registry.insert(key, scope.clone())?;

        info!(
            scope = %scope.id(),
            key = %scope.key(),
            folds = scope.len(),
            multiple = scope.config().multiple,
            persist = scope.config().persist,
            "instance created"
        );
        Ok(scope)
    }

    /// `A{n}` starting at the registry size, skipping ids still held by
    /// live instances.
    fn unused_id(&self) -> String {
        let taken: Vec<String> = self
            .registry
            .entries()
            .iter()
            .map(|(_, scope)| scope.id().to_string())
            .collect();
        let mut n = self.registry.len();
        loop {
            let id = format!("A{}", n);
            if !taken.contains(&id) {
                return id;
            }
            n += 1;
        }
    }

    /// Random base-36 key not yet in the registry.
    fn unused_key(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let key = base36(rng.random::<u64>());
            if !self.registry.contains(&key) {
                debug!(%key, "generated instance key");
                return key;
            }
        }
    }
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
