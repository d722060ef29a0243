use std::sync::{Arc, Mutex};

use super::{
    Backdrop, BackdropOptions, Surface, Viewport,
    frame_loop::{FrameLoop, SharedBackdrop, lock},
};

/// What callers hold on to. Without a surface the handle is inert and every
/// operation is a no-op, so owners never need to check.
#[derive(Debug)]
pub struct BackdropHandle<S> {
    live: Option<SharedBackdrop<S>>,
    frames: Option<FrameLoop>,
}

impl<S> BackdropHandle<S> {
    #[must_use]
    pub fn inert() -> Self {
        Self {
            live: None,
            frames: None,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frames.as_ref().is_some_and(FrameLoop::is_active)
    }

    /// Cancels the frame schedule. The backdrop keeps its last state.
    pub fn stop(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
            log::debug!("backdrop frame loop stopped");
        }
    }
}

impl<S: Surface> BackdropHandle<S> {
    /// Builds the backdrop without scheduling frames.
    pub fn attach(surface: Option<S>, initial: Option<&str>, options: &BackdropOptions) -> Self {
        let Some(surface) = surface else {
            log::warn!("no drawing surface available, backdrop disabled");
            return Self::inert();
        };
        Self {
            live: Some(Arc::new(Mutex::new(Backdrop::new(surface, initial, options)))),
            frames: None,
        }
    }

    pub fn set_condition(&self, condition: &str) {
        self.with_backdrop_mut(|backdrop| backdrop.set_condition(condition));
    }

    pub fn resize(&self, viewport: Viewport) {
        self.with_backdrop_mut(|backdrop| backdrop.resize(viewport));
    }

    pub fn with_backdrop<R>(&self, f: impl FnOnce(&Backdrop<S>) -> R) -> Option<R> {
        self.live.as_deref().map(|shared| f(&lock(shared)))
    }

    pub fn with_backdrop_mut<R>(&self, f: impl FnOnce(&mut Backdrop<S>) -> R) -> Option<R> {
        self.live.as_deref().map(|shared| f(&mut lock(shared)))
    }
}

impl<S: Surface + Send + 'static> BackdropHandle<S> {
    /// Builds the backdrop and starts its frame loop; `on_frame` runs after every
    /// completed frame. Needs a tokio runtime when a surface is given.
    pub fn start<F>(
        surface: Option<S>,
        initial: Option<&str>,
        options: &BackdropOptions,
        on_frame: F,
    ) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let mut handle = Self::attach(surface, initial, options);
        if let Some(shared) = &handle.live {
            handle.frames = Some(FrameLoop::spawn(Arc::clone(shared), options.fps, on_frame));
        }
        handle
    }
}

impl<S> Default for BackdropHandle<S> {
    fn default() -> Self {
        Self::inert()
    }
}
