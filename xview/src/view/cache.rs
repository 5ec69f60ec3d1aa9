//! Global template cache.
//!
//! Using the cache ensures that templates are only compiled once.
//! The template cache is enabled by default in production (`release`), and disabled
//! in development (`debug`) so changes to templates show up without a restart.
//!
//! [`Template::load`] uses the template cache automatically.
use super::{template::Error, Template};
use crate::config::get_config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};
use tracing::info;

static TEMPLATES: Lazy<Mutex<Templates>> = Lazy::new(|| Mutex::new(Templates::new()));

/// Templates cache.
pub struct Templates {
    templates: HashMap<PathBuf, Arc<Template>>,
    enabled: bool,
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

impl Templates {
    /// Create new empty template cache, enabled or disabled according to configuration.
    pub fn new() -> Self {
        Self::enabled(get_config().general.cache_templates)
    }

    /// Create new empty template cache.
    pub fn enabled(enabled: bool) -> Self {
        Self {
            templates: HashMap::new(),
            enabled,
        }
    }

    /// Retrieve a template from the cache. If the template doesn't exist, it will be read
    /// from disk and compiled.
    ///
    /// Holding the global lock while reading the template from disk
    /// prevents the thundering herd problem.
    pub fn get(&mut self, path: impl AsRef<Path> + Copy) -> Result<Arc<Template>, Error> {
        if let Some(t) = self.templates.get(path.as_ref()) {
            return Ok(t.clone());
        }

        let template = Arc::new(Template::new(path)?);

        if self.enabled {
            info!("Cached template \"{}\"", path.as_ref().display());
            self.templates
                .insert(path.as_ref().to_owned(), template.clone());
        }

        Ok(template)
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Drop all cached templates.
    pub fn clear(&mut self) {
        self.templates.clear();
    }

    /// Obtain a lock to the global template cache.
    pub fn cache() -> MutexGuard<'static, Templates> {
        TEMPLATES.lock()
    }
}
