use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{anyhow, Result};

use crate::actor::{Actor, Spawned};
use crate::scene::{NodeKind, SceneGraph, Transform};

use super::obj::{load_obj, ModelData};

/// A finished load, waiting to be applied on the frame thread.
struct Completion {
    label: String,
    transform: Transform,
    result: Result<ModelData>,
}

/// Asynchronous asset loads with frame-thread completion.
///
/// Loads run on worker threads. Their results are queued and only touch the
/// scene when the owner calls [`apply_completed`](Self::apply_completed),
/// which the frame loop does before each frame. Each load is applied exactly once.
///
/// A failed load is logged and dropped; the scene carries on without it.
/// A loader that panics counts as a failed load.
pub struct LoadQueue {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    pending: usize,
}

impl LoadQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, pending: 0 }
    }

    /// Number of loads started but not yet applied.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Runs `load` on a worker thread; its result becomes a model node named `label`.
    pub fn spawn_with<F>(&mut self, label: impl Into<String>, transform: Transform, load: F)
    where
        F: FnOnce() -> Result<ModelData> + Send + 'static,
    {
        let label = label.into();
        let tx = self.tx.clone();
        self.pending += 1;

        log::debug!("loading {label}");

        let worker_label = label.clone();
        let spawned = thread::Builder::new()
            .name(format!("load:{label}"))
            .spawn(move || {
                // A panic would otherwise never report back and leave `pending` stuck.
                let result = panic::catch_unwind(AssertUnwindSafe(load)).unwrap_or_else(|payload| {
                    Err(anyhow!("loader panicked: {}", panic_message(&*payload)))
                });
                // The receiver only disappears with the queue itself.
                let _ = tx.send(Completion {
                    label: worker_label,
                    transform,
                    result,
                });
            });

        if let Err(e) = spawned {
            self.pending -= 1;
            log::error!("failed to start loader for {label}: {e}");
        }
    }

    /// Reads and parses an OBJ file in the background.
    pub fn spawn_obj(&mut self, path: impl AsRef<Path>, transform: Transform) {
        let path: PathBuf = path.as_ref().to_path_buf();
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.spawn_with(label, transform, move || load_obj(&path));
    }

    /// Applies every load that has finished so far. Never blocks.
    ///
    /// Returns the number of completions handled, failures included.
    pub fn apply_completed(&mut self, scene: &mut SceneGraph) -> usize {
        let mut handled = 0;
        while let Ok(done) = self.rx.try_recv() {
            self.apply(done, scene);
            handled += 1;
        }
        handled
    }

    /// Blocks until every pending load has finished, then applies them.
    pub fn finish(&mut self, scene: &mut SceneGraph) -> usize {
        let mut handled = 0;
        while self.pending > 0 {
            match self.rx.recv() {
                Ok(done) => {
                    self.apply(done, scene);
                    handled += 1;
                }
                Err(_) => break,
            }
        }
        handled
    }

    fn apply(&mut self, done: Completion, scene: &mut SceneGraph) {
        self.pending = self.pending.saturating_sub(1);

        match done.result {
            Ok(model) => {
                let kind = NodeKind::Model {
                    vertices: model.vertices.len(),
                    faces: model.faces.len(),
                };
                scene.spawn(done.label.as_str(), kind, done.transform);
                log::info!(
                    "loaded {} ({} vertices, {} faces)",
                    done.label,
                    model.vertices.len(),
                    model.faces.len()
                );
            }
            Err(e) => log::error!("failed to load {}: {e:#}", done.label),
        }
    }
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string payload")
}

/// Starts loading an OBJ model and returns the placeholder actor for it.
///
/// The model node shows up in the scene once the load completes.
pub fn spawn_model(loads: &mut LoadQueue, path: impl AsRef<Path>, transform: Transform) -> Spawned {
    let path = path.as_ref();
    loads.spawn_obj(path, transform);

    Spawned {
        actor: Actor::Deferred { label: path.display().to_string() },
        node: None,
        body: None,
    }
}
