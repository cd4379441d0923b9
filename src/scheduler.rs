//! Frame scheduler.
//!
//! One worker thread owns the [`Registry`] for the whole session. Each
//! iteration locks the surface canvas, drains queued input in FIFO order,
//! advances the simulation by one fixed step, draws, and presents. Input
//! arrives over a `crossbeam_channel` from any number of producer threads.
//!
//! # Stopping
//!
//! [`FrameScheduler::stop`] raises a flag that the worker checks between
//! iterations, then blocks until the thread has exited and hands the registry
//! back. A frame in progress always completes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{error, info};

use crate::error::EngineError;
use crate::events::input::InputEvent;
use crate::registry::Registry;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::rendertarget::Surface;

/// How long the worker waits before retrying an unavailable surface.
const UNAVAILABLE_BACKOFF: Duration = Duration::from_millis(5);

/// Timing knobs for the worker loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Fixed simulation step.
    pub step: Duration,
    /// Sleep out the remainder of `step` after each frame.
    pub pace: bool,
    /// Throughput log period; `None` disables it.
    pub fps_log_interval: Option<Duration>,
}

impl FrameTiming {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            step: config.step(),
            pace: config.pace,
            fps_log_interval: config.fps_log_interval(),
        }
    }

    /// Unpaced, silent loop with the given step. Handy in tests.
    pub fn unpaced(step: Duration) -> Self {
        Self {
            step,
            pace: false,
            fps_log_interval: None,
        }
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

pub struct FrameScheduler {
    tx_input: Sender<InputEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<Registry>>,
}

impl FrameScheduler {
    /// Move the registry and surface onto a new worker thread and start ticking.
    pub fn start(
        registry: Registry,
        surface: Box<dyn Surface>,
        timing: FrameTiming,
    ) -> Result<Self, EngineError> {
        let (tx_input, rx_input) = unbounded::<InputEvent>();
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = stop.clone();
        let handle = thread::Builder::new()
            .name("frame-scheduler".into())
            .spawn(move || run_frames(registry, surface, rx_input, worker_stop, timing))
            .map_err(EngineError::WorkerSpawn)?;
        info!(
            "frame scheduler started (step {:?}, pace {})",
            timing.step, timing.pace
        );
        Ok(Self {
            tx_input,
            stop,
            handle: Some(handle),
        })
    }

    /// Producer side of the input queue. Clone freely.
    pub fn sender(&self) -> Sender<InputEvent> {
        self.tx_input.clone()
    }

    /// Queue one event for the next frame. Dropped silently once the worker is gone.
    pub fn send(&self, event: InputEvent) {
        let _ = self.tx_input.send(event);
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the worker, wait for it, and take the registry back.
    pub fn stop(mut self) -> Result<Registry, EngineError> {
        self.join()
    }

    fn join(&mut self) -> Result<Registry, EngineError> {
        self.stop.store(true, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return Err(EngineError::WorkerPanicked("worker already joined".into()));
        };
        match handle.join() {
            Ok(registry) => {
                info!("frame scheduler stopped");
                Ok(registry)
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                error!("frame worker panicked: {}", reason);
                Err(EngineError::WorkerPanicked(reason))
            }
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.join();
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn run_frames(
    mut registry: Registry,
    mut surface: Box<dyn Surface>,
    rx_input: Receiver<InputEvent>,
    stop: Arc<AtomicBool>,
    timing: FrameTiming,
) -> Registry {
    let dt = timing.step.as_secs_f32();
    let mut frames_since_log: u32 = 0;
    let mut last_log = Instant::now();

    while !stop.load(Ordering::Acquire) {
        let frame_start = Instant::now();

        let Some(canvas) = surface.lock_canvas() else {
            thread::sleep(UNAVAILABLE_BACKOFF);
            continue;
        };
        for event in rx_input.try_iter() {
            registry.dispatch(event);
        }
        registry.update_frame(dt);
        registry.draw(canvas);
        surface.unlock_and_post();
        frames_since_log += 1;

        if let Some(interval) = timing.fps_log_interval {
            let since = last_log.elapsed();
            if since >= interval {
                info!(
                    "{:.1} fps, {} entities",
                    frames_since_log as f32 / since.as_secs_f32(),
                    registry.len()
                );
                frames_since_log = 0;
                last_log = Instant::now();
            }
        }

        if timing.pace
            && let Some(rest) = timing.step.checked_sub(frame_start.elapsed())
        {
            thread::sleep(rest);
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::rendertarget::HeadlessSurface;

    fn wait_for(mut done: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done() {
            assert!(Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_stop_returns_registry_after_frames() {
        let surface = HeadlessSurface::new(160.0, 90.0, 4);
        let presented = surface.presented();
        let scheduler = FrameScheduler::start(
            Registry::default(),
            Box::new(surface),
            FrameTiming::unpaced(Duration::from_millis(16)),
        )
        .unwrap();
        wait_for(|| presented.lock().unwrap().len() >= 2);
        assert!(scheduler.is_running());
        let registry = scheduler.stop().unwrap();
        assert!(registry.time().frame_count >= 2);
    }

    #[test]
    fn test_timing_from_config() {
        let config = EngineConfig {
            step_ms: 20,
            pace: false,
            fps_log_secs: 0,
            ..EngineConfig::default()
        };
        let timing = FrameTiming::from_config(&config);
        assert_eq!(timing.step, Duration::from_millis(20));
        assert!(!timing.pace);
        assert_eq!(timing.fps_log_interval, None);
    }

    #[test]
    fn test_panic_message_variants() {
        let s: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(s.as_ref()), "boom");
        let s: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(s.as_ref()), "bang");
        let s: Box<dyn std::any::Any + Send> = Box::new(3_u8);
        assert_eq!(panic_message(s.as_ref()), "unknown panic");
    }
}
