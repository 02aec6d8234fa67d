//! Lazy course tree provider.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use learnme_core::resolve;
use learnme_manifest::{CourseModule, ElementConfig, LearnmeToml, config_location};
use tokio::sync::watch;

use crate::{CourseItem, Lesson, Result, Submodule, results::read_results};

/// Access to a course tree, one level at a time.
///
/// Traversal only ever needs these two operations, so anything that can list
/// children in a stable order can be navigated.
#[allow(async_fn_in_trait)]
pub trait CourseTree {
    /// Children of `item`, or the root modules when `item` is `None`.
    ///
    /// Fetching the same item twice against unchanged storage must return
    /// the same children in the same order.
    async fn children(&self, item: Option<&CourseItem>) -> Result<Vec<CourseItem>>;

    /// The parent of `item`, absent for roots.
    fn parent(&self, item: &CourseItem) -> Option<CourseItem> {
        item.parent()
    }
}

/// Materializes the course tree from learnme.toml files on demand.
///
/// Nothing is cached: every call re-reads the configs and test artifacts it
/// needs, so concurrent calls never share mutable state.
#[derive(Debug)]
pub struct CourseDataProvider {
    roots: Vec<PathBuf>,
    generation: watch::Sender<u64>,
}

impl CourseDataProvider {
    /// Create a provider over workspace root directories, each holding a
    /// learnme.toml.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let (generation, _) = watch::channel(0);
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            generation,
        }
    }

    /// Mark every previously returned node as stale.
    ///
    /// Subscribers are notified; the next `children` call reads storage
    /// afresh either way.
    pub fn refresh(&self) {
        self.generation.send_modify(|generation| *generation += 1);
        tracing::debug!(generation = self.generation(), "course tree refreshed");
    }

    /// Number of refreshes so far.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Watch for refreshes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    async fn load_module(dir: &Path) -> Result<(PathBuf, CourseModule)> {
        let file = LearnmeToml::load(config_location(dir)).await?;
        Ok(file.into_parts())
    }

    async fn root_items(&self) -> Result<Vec<CourseItem>> {
        let mut items: Vec<CourseItem> = Vec::with_capacity(self.roots.len());
        for (position, root) in self.roots.iter().enumerate() {
            let (location, module) = Self::load_module(root).await?;
            items.push(Submodule::new(location, position, module, None).into());
        }
        Ok(items)
    }

    async fn submodule_items(&self, submodule: &Arc<Submodule>) -> Result<Vec<CourseItem>> {
        let entries = &submodule.module().modules;
        let mut items: Vec<CourseItem> = Vec::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            match entry {
                ElementConfig::Lesson(config) => {
                    let lesson = Lesson::new(position, config.clone(), submodule.clone());
                    let results = read_results(&lesson).await?;
                    items.push(lesson.with_results(results).into());
                }
                ElementConfig::Submodule(reference) => {
                    let dir = resolve(submodule.config_location(), None, &[&reference.path]);
                    let (location, module) = Self::load_module(&dir).await?;
                    items.push(
                        Submodule::new(location, position, module, Some(submodule.clone())).into(),
                    );
                }
            }
        }

        Ok(items)
    }
}

impl CourseTree for CourseDataProvider {
    async fn children(&self, item: Option<&CourseItem>) -> Result<Vec<CourseItem>> {
        match item {
            None => self.root_items().await,
            Some(CourseItem::Submodule(submodule)) => self.submodule_items(submodule).await,
            Some(CourseItem::Lesson(_)) => Ok(Vec::new()),
        }
    }
}
