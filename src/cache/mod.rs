// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Render caching
//!
//! A [`RenderCache`] holds exactly one [`CacheStrategy`]. The default strategy
//! passes solids through untouched; [`StlCache`] renders each solid to STL once
//! per distinct script and hands back an import of the cached mesh.

mod stl;

pub use stl::{content_hash, StlCache, LAST_SUFFIX, PRIMARY_EXTENSION};

use crate::ast::Node;
use crate::error::Result;
use crate::render::{posix, Renderer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Cached solids keyed by their logical name
pub type CachedSolids = BTreeMap<String, Node>;

/// A way of turning named solids into (possibly cached) solids
pub trait CacheStrategy: Send + Sync {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn cache_to_stl(&self, items: Vec<(Node, PathBuf)>) -> Result<CachedSolids>;
}

impl<F> CacheStrategy for F
where
    F: Fn(Vec<(Node, PathBuf)>) -> Result<CachedSolids> + Send + Sync,
{
    fn cache_to_stl(&self, items: Vec<(Node, PathBuf)>) -> Result<CachedSolids> {
        self(items)
    }
}

/// Pass-through strategy: every solid is returned as given
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl CacheStrategy for NoCache {
    fn name(&self) -> &'static str {
        "none"
    }

    fn cache_to_stl(&self, items: Vec<(Node, PathBuf)>) -> Result<CachedSolids> {
        Ok(items
            .into_iter()
            .map(|(solid, name)| (logical_name(&name), solid))
            .collect())
    }
}

/// Holder of the active cache strategy
pub struct RenderCache {
    strategy: Box<dyn CacheStrategy>,
}

impl RenderCache {
    pub fn new(strategy: impl CacheStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Install `strategy`, returning the one it replaces
    pub fn set_strategy(&mut self, strategy: Box<dyn CacheStrategy>) -> Box<dyn CacheStrategy> {
        std::mem::replace(&mut self.strategy, strategy)
    }

    /// Install an [`StlCache`] rendering with `renderer` into `cache_dir`
    pub fn use_stl_cache(
        &mut self,
        renderer: Renderer,
        cache_dir: impl Into<PathBuf>,
    ) -> Box<dyn CacheStrategy> {
        self.set_strategy(Box::new(StlCache::new(renderer, cache_dir)))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn cache_to_stl<I, P>(&self, items: I) -> Result<CachedSolids>
    where
        I: IntoIterator<Item = (Node, P)>,
        P: Into<PathBuf>,
    {
        let items = items
            .into_iter()
            .map(|(solid, name)| (solid, name.into()))
            .collect();
        self.strategy.cache_to_stl(items)
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(NoCache)
    }
}

impl std::fmt::Debug for RenderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCache")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

pub(crate) fn logical_name(name: &Path) -> String {
    posix(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Vec3;

    fn cube() -> Node {
        Node::cube(Vec3::new(2.0, 2.0, 2.0))
    }

    #[test]
    fn test_default_is_pass_through() -> Result<()> {
        let cache = RenderCache::default();
        assert_eq!(cache.strategy_name(), "none");

        let solids = cache.cache_to_stl([(cube(), "parts/cube")])?;
        assert_eq!(solids.len(), 1);
        assert_eq!(solids["parts/cube"], cube());
        Ok(())
    }

    #[test]
    fn test_set_strategy_returns_previous() -> Result<()> {
        let mut cache = RenderCache::default();
        let previous = cache.set_strategy(Box::new(|items: Vec<(Node, PathBuf)>| -> Result<CachedSolids> {
            Ok(items
                .into_iter()
                .map(|(_, name)| (logical_name(&name), Node::empty()))
                .collect())
        }));
        assert_eq!(previous.name(), "none");
        assert_eq!(cache.strategy_name(), "custom");
        assert_eq!(cache.cache_to_stl([(cube(), "a")])?["a"], Node::empty());

        let custom = cache.set_strategy(previous);
        assert_eq!(custom.name(), "custom");
        assert_eq!(cache.cache_to_stl([(cube(), "a")])?["a"], cube());
        Ok(())
    }
}
