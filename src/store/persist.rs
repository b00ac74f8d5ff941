use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::pipeline::{BuildObserver, BuildOutputs, StageKind};

use super::state::BusinessState;

/// Owner of the process-wide business state and its backing file.
///
/// Reads and writes go through an async `RwLock`. Builds additionally take
/// `build_lock` so at most one build runs at a time without blocking readers.
#[derive(Debug)]
pub struct BusinessStore {
    path: Option<PathBuf>,
    state: RwLock<BusinessState>,
    build_lock: Arc<Mutex<()>>,
}

impl BusinessStore {
    /// Loads `path` if it holds a readable state, otherwise starts fresh.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match load_state(&path) {
            Ok(Some(state)) => {
                tracing::info!(path = %path.display(), "loaded existing business state");
                state
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "starting with fresh business state");
                BusinessState::default()
            }
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{error:#}"),
                    "could not load business state, starting fresh"
                );
                BusinessState::default()
            }
        };
        Self::with_state(Some(path), state)
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::with_state(None, BusinessState::default())
    }

    fn with_state(path: Option<PathBuf>, state: BusinessState) -> Self {
        Self {
            path,
            state: RwLock::new(state),
            build_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn snapshot(&self) -> BusinessState {
        self.state.read().await.clone()
    }

    pub async fn read<R>(&self, f: impl FnOnce(&BusinessState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Applies `f` and flushes the result to disk. The in-memory change
    /// stands even when the flush fails.
    pub async fn update<R>(&self, f: impl FnOnce(&mut BusinessState) -> R) -> Result<R> {
        let mut state = self.state.write().await;
        let result = f(&mut state);

        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&*state)
                .context("Failed to serialize business state")?;
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write business state to {}", path.display()))?;
            tracing::debug!(path = %path.display(), "business state saved");
        }

        Ok(result)
    }

    /// `None` while another build holds the lock. The guard is owned so it
    /// can move into a spawned build task.
    pub fn try_begin_build(&self) -> Option<OwnedMutexGuard<()>> {
        self.build_lock.clone().try_lock_owned().ok()
    }
}

/// Saves each stage as soon as it completes, so an interrupted build still
/// leaves the earlier stages behind.
#[async_trait]
impl BuildObserver for BusinessStore {
    async fn stage_completed(&self, stage: StageKind, outputs: &BuildOutputs) {
        if let Err(error) = self
            .update(|business| business.merge_outputs(outputs))
            .await
        {
            tracing::warn!(%stage, error = %format!("{error:#}"), "failed to save stage output");
        }
    }
}

fn load_state(path: &Path) -> Result<Option<BusinessState>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed reading business state at {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(None);
    }

    let state = serde_json::from_str(&contents)
        .with_context(|| format!("Failed parsing business state at {}", path.display()))?;
    Ok(Some(state))
}
