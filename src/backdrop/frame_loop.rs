use std::{
    any::Any,
    cell::Cell,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval},
};

use super::{Backdrop, FrameTime, Surface};

pub const MIN_FPS: u8 = 15;
pub const MAX_FPS: u8 = 60;

pub type SharedBackdrop<S> = Arc<Mutex<Backdrop<S>>>;

thread_local! {
    static IN_GUARDED_FRAME: Cell<bool> = const { Cell::new(false) };
}

/// True while the current thread is inside a guarded frame. The terminal
/// panic hook uses it to leave the screen alone for panics that get caught here.
#[must_use]
pub fn in_guarded_frame() -> bool {
    IN_GUARDED_FRAME.with(Cell::get)
}

/// Recurring frame schedule. Aborted on [`FrameLoop::cancel`] and on drop,
/// so no tick can outlive the backdrop's owner.
#[derive(Debug)]
pub struct FrameLoop {
    task: JoinHandle<()>,
}

impl FrameLoop {
    /// Spawns the ticking task on the current tokio runtime.
    pub fn spawn<S, F>(backdrop: SharedBackdrop<S>, fps: u8, on_frame: F) -> Self
    where
        S: Surface + Send + 'static,
        F: Fn() + Send + 'static,
    {
        let period = frame_period(fps);
        let task = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let now = FrameTime::new(started.elapsed(), wall_clock_ms());
                if run_frame(&backdrop, now) {
                    on_frame();
                }
            }
        });
        Self { task }
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[must_use]
pub fn frame_period(fps: u8) -> Duration {
    Duration::from_millis(1000 / u64::from(fps.clamp(MIN_FPS, MAX_FPS)))
}

/// Runs one frame, containing any panic so the schedule keeps going.
/// Returns whether the frame completed.
pub(crate) fn run_frame<S: Surface>(backdrop: &Mutex<Backdrop<S>>, now: FrameTime) -> bool {
    IN_GUARDED_FRAME.with(|flag| flag.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| lock(backdrop).frame(now)));
    IN_GUARDED_FRAME.with(|flag| flag.set(false));

    match outcome {
        Ok(()) => true,
        Err(payload) => {
            log::warn!("backdrop frame aborted: {}", panic_message(payload.as_ref()));
            false
        }
    }
}

/// A frame that panicked mid-draw poisons the lock; the pool is still usable.
pub(crate) fn lock<S>(backdrop: &Mutex<Backdrop<S>>) -> MutexGuard<'_, Backdrop<S>> {
    backdrop.lock().unwrap_or_else(PoisonError::into_inner)
}

#[allow(clippy::cast_precision_loss)]
fn wall_clock_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::backdrop::{
        BackdropOptions, LinearGradient, Point, Rgba, Viewport, raster::PixelSurface,
    };

    #[test]
    fn fps_is_clamped_to_supported_range() {
        assert_eq!(frame_period(1), Duration::from_millis(66));
        assert_eq!(frame_period(30), Duration::from_millis(33));
        assert_eq!(frame_period(240), Duration::from_millis(16));
    }

    /// Panics on the first `failures` clears, then behaves.
    #[derive(Debug)]
    struct FlakySurface {
        failures: Arc<AtomicUsize>,
        viewport: Viewport,
    }

    impl Surface for FlakySurface {
        fn viewport(&self) -> Viewport {
            self.viewport
        }
        fn resize(&mut self, viewport: Viewport) {
            self.viewport = viewport;
        }
        fn clear(&mut self) {
            let left = self.failures.load(Ordering::SeqCst);
            if left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                panic!("surface lost");
            }
        }
        fn fill_gradient(&mut self, _: &LinearGradient) {}
        fn set_blur(&mut self, _: f32) {}
        fn stroke_line(&mut self, _: Point, _: Point, _: f32, _: Rgba) {}
        fn fill_circle(&mut self, _: Point, _: f32, _: Rgba, _: f32) {}
        fn fill_overlay(&mut self, _: Rgba) {}
    }

    #[test]
    fn panicking_frame_is_contained_and_next_frame_runs() {
        let failures = Arc::new(AtomicUsize::new(1));
        let surface = FlakySurface {
            failures: Arc::clone(&failures),
            viewport: Viewport::new(100, 100),
        };
        let backdrop = Mutex::new(Backdrop::new(
            surface,
            Some("Rain"),
            &BackdropOptions {
                seed: Some(5),
                ..BackdropOptions::default()
            },
        ));

        let first = FrameTime::new(Duration::ZERO, 0.0);
        assert!(!run_frame(&backdrop, first));
        assert!(!in_guarded_frame());

        let second = FrameTime::new(Duration::from_millis(16), 16.0);
        assert!(run_frame(&backdrop, second));
        assert_eq!(lock(&backdrop).frames_drawn(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_ticks_until_cancelled() {
        let shared = Arc::new(Mutex::new(Backdrop::new(
            PixelSurface::new(Viewport::new(160, 96)),
            Some("Snow"),
            &BackdropOptions {
                seed: Some(9),
                ..BackdropOptions::default()
            },
        )));
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let frames = FrameLoop::spawn(Arc::clone(&shared), 30, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        let seen = ticks.load(Ordering::SeqCst);
        assert!(seen >= 10, "only {seen} frames in 500ms");
        assert!(frames.is_active());

        frames.cancel();
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
        assert!(!frames.is_active());
    }
}
