//! Model acquisition with tiered fallback.
//!
//! ```text
//! Attempting(Primary) ──ok──▶ Loaded(Primary)
//!        │ err
//!        ▼
//! Attempting(Fallback) ──ok──▶ Loaded(Fallback)   (uniform material)
//!        │ err
//!        ▼
//!   Placeholder
//! ```
//!
//! Every transition happens at most once and failures are logged, never
//! returned: [`ModelLoader::load`] always resolves to a displayable graph.
//! Whatever the tier, the result is recentred so its bounds centre sits on
//! the world origin before it is handed out.

mod source;

use std::fmt;
use std::future::Future;

use glam::Vec3;
pub use source::{JsonFileSource, MemorySource};

use crate::bounds::{compute_bounds, compute_size};
use crate::options::{Options, PlaceholderOptions};
use crate::scene::{placeholder, Material, ModelGraph, ModelKind, Node};

// ── Errors ───────────────────────────────────────────────────────────────

/// Why a single asset tier could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// Nothing exists at the path.
    NotFound(String),
    /// The asset exists but could not be decoded.
    Parse(String),
    /// Reading the asset failed.
    Io(std::io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "asset not found: {path}"),
            Self::Parse(msg) => write!(f, "asset parse error: {msg}"),
            Self::Io(e) => write!(f, "asset I/O error: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ── States ───────────────────────────────────────────────────────────────

/// Which asset a load attempt targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Textured primary asset.
    Primary,
    /// Untextured fallback asset.
    Fallback,
}

/// Loader state machine position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Fetching the given tier.
    Attempting(Tier),
    /// The given tier loaded successfully.
    Loaded(Tier),
    /// Both tiers failed; the synthetic scene is in use.
    Placeholder,
}

impl LoadState {
    /// Whether this is a terminal, displayable state.
    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Attempting(_))
    }
}

/// Result of a completed load: always a displayable graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    /// The recentred model graph.
    pub graph: ModelGraph,
    /// Terminal state reached.
    pub state: LoadState,
}

// ── Seams ────────────────────────────────────────────────────────────────

/// Receives loader progress. Purely informational; it cannot influence the
/// load.
pub trait LoadObserver {
    /// Bytes of `path` received so far, with the total when known.
    fn on_progress(&self, path: &str, loaded: u64, total: Option<u64>) {
        let _ = (path, loaded, total);
    }

    /// The loader moved to `state`.
    fn on_state(&self, state: LoadState) {
        let _ = state;
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LoadObserver for NoopObserver {}

/// Observer that logs progress at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_progress(&self, path: &str, loaded: u64, total: Option<u64>) {
        match total {
            Some(total) if total > 0 => log::debug!(
                "loading {path}: {:.0}%",
                loaded as f64 / total as f64 * 100.0
            ),
            _ => log::debug!("loading {path}: {loaded} bytes"),
        }
    }

    fn on_state(&self, state: LoadState) {
        log::debug!("model loader: {state:?}");
    }
}

/// Something that can turn an asset path into a node tree.
///
/// Fetching is the only suspension point in the crate; implementations
/// report progress through `observer` and signal failure with a
/// [`LoadError`].
pub trait AssetSource {
    /// Fetch and decode the asset at `path`.
    fn fetch(
        &self,
        path: &str,
        observer: &dyn LoadObserver,
    ) -> impl Future<Output = Result<Node, LoadError>>;
}

// ── Loader ───────────────────────────────────────────────────────────────

/// Loads a model from an [`AssetSource`], falling back tier by tier.
pub struct ModelLoader<S> {
    source: S,
    observer: Box<dyn LoadObserver>,
    untextured_material: Material,
    placeholder: PlaceholderOptions,
}

impl<S: AssetSource> ModelLoader<S> {
    /// Loader over `source` using the untextured colour and placeholder
    /// settings from `options`.
    #[must_use]
    pub fn new(source: S, options: &Options) -> Self {
        Self {
            source,
            observer: Box::new(LogObserver),
            untextured_material: Material::color(
                options.assets.untextured_color,
            ),
            placeholder: options.placeholder.clone(),
        }
    }

    /// Replace the progress observer.
    #[must_use]
    pub fn with_observer(
        mut self,
        observer: impl LoadObserver + 'static,
    ) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// The underlying asset source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Material applied to every mesh of a fallback-tier model.
    #[must_use]
    pub fn untextured_material(&self) -> &Material {
        &self.untextured_material
    }

    /// Try `primary`, then `fallback`, then synthesize the placeholder.
    pub async fn load(&self, primary: &str, fallback: &str) -> LoadOutcome {
        if let Some(outcome) = self.attempt(Tier::Primary, primary).await {
            return outcome;
        }
        if let Some(outcome) = self.attempt(Tier::Fallback, fallback).await {
            return outcome;
        }
        log::info!("no model asset available, showing placeholder scene");
        self.placeholder()
    }

    async fn attempt(&self, tier: Tier, path: &str) -> Option<LoadOutcome> {
        self.observer.on_state(LoadState::Attempting(tier));
        match self.source.fetch(path, &*self.observer).await {
            Ok(root) => {
                log::info!("loaded {tier:?} model from {path}");
                Some(self.finish(root, tier))
            }
            Err(e) => {
                log::warn!("{tier:?} model {path} unavailable: {e}");
                None
            }
        }
    }

    fn finish(&self, root: Node, tier: Tier) -> LoadOutcome {
        let kind = match tier {
            Tier::Primary => ModelKind::Textured,
            Tier::Fallback => ModelKind::Untextured,
        };
        let mut graph = ModelGraph::new(root, kind);
        if tier == Tier::Fallback {
            graph.apply_uniform_material(&self.untextured_material);
        }
        let _ = center_on_origin(&mut graph);
        let state = LoadState::Loaded(tier);
        self.observer.on_state(state);
        LoadOutcome { graph, state }
    }

    /// The synthetic scene, recentred, without touching the source.
    #[must_use]
    pub fn placeholder(&self) -> LoadOutcome {
        let mut graph = ModelGraph::new(
            placeholder::build(&self.placeholder),
            ModelKind::Placeholder,
        );
        let _ = center_on_origin(&mut graph);
        self.observer.on_state(LoadState::Placeholder);
        LoadOutcome {
            graph,
            state: LoadState::Placeholder,
        }
    }
}

/// Translate the root so the graph's bounds centre lies on the origin.
/// Returns the applied offset.
pub fn center_on_origin(graph: &mut ModelGraph) -> Vec3 {
    let center = compute_size(&compute_bounds(graph)).center;
    let offset = -center;
    graph.translate(offset);
    offset
}
