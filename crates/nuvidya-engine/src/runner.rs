// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Energy Loop Runner - Background thread that ticks the simulator at a fixed cadence.

Each iteration:
1. Applies queued preset changes (between ticks, never mid-tick)
2. Ticks the simulator
3. Replaces the cached latest update
4. Fans the update out to subscribers and the optional publisher
5. Sleeps out the remainder of the interval in chunks of at most 50ms

Stopping flips the shared flag and joins the thread with a 2 second timeout.
*/

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender, TryRecvError, TrySendError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use nuvidya_config::{EnergyConfig, EngineConfig, NuvidyaConfig};
use nuvidya_energy::{lookup_preset, Preset, PresetName};
use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::error::{EngineError, Result};
use crate::simulator::{EnergySimulator, EnergyUpdate};

const SLEEP_CHUNK: Duration = Duration::from_millis(50);
const STOP_TIMEOUT: Duration = Duration::from_secs(2);
const STATS_INTERVAL: Duration = Duration::from_secs(5);

/// Sink called once per tick from the loop thread
pub trait UpdatePublisher: Send + Sync {
    fn publish(&self, update: &EnergyUpdate) -> std::result::Result<(), String>;
}

enum Subscriber {
    Bounded(SyncSender<Arc<EnergyUpdate>>),
    Unbounded(Sender<Arc<EnergyUpdate>>),
}

impl Subscriber {
    /// `false` once the receiving side is gone
    fn deliver(&self, update: &Arc<EnergyUpdate>) -> bool {
        match self {
            Subscriber::Bounded(tx) => match tx.try_send(Arc::clone(update)) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    trace!("Subscriber queue full, dropping tick {}", update.tick);
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            },
            Subscriber::Unbounded(tx) => tx.send(Arc::clone(update)).is_ok(),
        }
    }
}

/// Handles shared between the runner and its loop thread
#[derive(Clone)]
struct LoopShared {
    simulator: Arc<Mutex<EnergySimulator>>,
    interval: Arc<Mutex<Duration>>,
    running: Arc<AtomicBool>,
    tick_count: Arc<AtomicU64>,
    latest: Arc<Mutex<Option<Arc<EnergyUpdate>>>>,
    pending_presets: Arc<Mutex<VecDeque<&'static Preset>>>,
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
    publisher: Option<Arc<dyn UpdatePublisher>>,
}

pub struct EnergyLoopRunner {
    shared: LoopShared,
    subscriber_buffer: usize,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl EnergyLoopRunner {
    pub fn new(preset: &'static Preset, engine: &EngineConfig, energy: &EnergyConfig) -> Result<Self> {
        let simulator = EnergySimulator::new(preset, engine, energy)?;

        Ok(Self {
            shared: LoopShared {
                simulator: Arc::new(Mutex::new(simulator)),
                interval: Arc::new(Mutex::new(Duration::from_millis(engine.tick_interval_ms))),
                running: Arc::new(AtomicBool::new(false)),
                tick_count: Arc::new(AtomicU64::new(0)),
                latest: Arc::new(Mutex::new(None)),
                pending_presets: Arc::new(Mutex::new(VecDeque::new())),
                subscribers: Arc::new(Mutex::new(Vec::new())),
                publisher: None,
            },
            subscriber_buffer: engine.subscriber_buffer,
            thread_handle: None,
        })
    }

    /// Runner for a named preset with default energy constants
    pub fn for_preset(name: &str, engine: &EngineConfig) -> Result<Self> {
        let preset = lookup_preset(name)?;
        Self::new(preset, engine, &EnergyConfig::default())
    }

    /// Runner for `engine.default_preset`
    pub fn from_config(config: &NuvidyaConfig) -> Result<Self> {
        let preset = lookup_preset(&config.engine.default_preset)?;
        Self::new(preset, &config.engine, &config.energy)
    }

    /// Attach a publisher; takes effect on the next `start`
    pub fn set_publisher<P: UpdatePublisher + 'static>(&mut self, publisher: P) {
        self.shared.publisher = Some(Arc::new(publisher));
    }

    /// Open a new update stream
    ///
    /// The receiver sees every tick from now on. With a non-zero
    /// `subscriber_buffer`, ticks are dropped for a subscriber whose queue is
    /// full instead of stalling the loop.
    pub fn subscribe(&self) -> Receiver<Arc<EnergyUpdate>> {
        let (subscriber, rx) = if self.subscriber_buffer == 0 {
            let (tx, rx) = mpsc::channel();
            (Subscriber::Unbounded(tx), rx)
        } else {
            let (tx, rx) = mpsc::sync_channel(self.subscriber_buffer);
            (Subscriber::Bounded(tx), rx)
        };
        self.shared.subscribers.lock().push(subscriber);
        rx
    }

    /// Subscribers still attached as of the last tick
    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.lock().len()
    }

    /// Queue a preset change, applied before the next tick
    pub fn set_preset(&self, name: &str) -> Result<()> {
        let preset = lookup_preset(name)?;
        self.shared.pending_presets.lock().push_back(preset);
        info!("Preset change to '{}' queued", preset.name);
        Ok(())
    }

    /// Preset used by the most recent tick
    pub fn preset(&self) -> PresetName {
        self.shared.simulator.lock().preset().name
    }

    /// Change the wall-clock cadence
    ///
    /// Simulation time still advances by the configured `tick_interval_ms`
    /// per tick.
    pub fn set_interval(&self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(EngineError::InvalidConfig(
                "tick interval must be > 0".to_string(),
            ));
        }
        *self.shared.interval.lock() = interval;
        info!("Tick interval set to {:?}", interval);
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        *self.shared.interval.lock()
    }

    /// Start ticking in a background thread
    pub fn start(&mut self) -> Result<()> {
        if self.shared.running.load(Ordering::Acquire) {
            return Err(EngineError::AlreadyRunning);
        }

        // A loop that exited on its own (panic) leaves its handle behind
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                warn!("Previous energy loop thread had panicked");
            }
        }

        info!(
            "Starting energy loop: preset={}, interval={:?}",
            self.preset(),
            self.interval()
        );

        self.shared.running.store(true, Ordering::Release);

        let shared = self.shared.clone();
        let spawned = thread::Builder::new()
            .name("nuvidya-energy-loop".to_string())
            .spawn(move || energy_loop(shared));

        match spawned {
            Ok(handle) => {
                self.thread_handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.shared.running.store(false, Ordering::Release);
                Err(EngineError::ThreadSpawn(e.to_string()))
            }
        }
    }

    /// Stop the loop and wait up to 2 seconds for the thread to exit
    pub fn stop(&mut self) {
        if !self.shared.running.load(Ordering::Acquire) {
            return;
        }

        info!("Stopping energy loop...");
        self.shared.running.store(false, Ordering::Release);

        if let Some(handle) = self.thread_handle.take() {
            let start = Instant::now();
            let (tx, rx) = mpsc::channel();

            // JoinHandle has no timed join
            thread::spawn(move || {
                let _ = tx.send(handle.join());
            });

            match rx.recv_timeout(STOP_TIMEOUT) {
                Ok(Ok(())) => info!("Energy loop stopped cleanly"),
                Ok(Err(_)) => warn!("Energy loop thread panicked during shutdown"),
                Err(mpsc::RecvTimeoutError::Timeout) => warn!(
                    "Energy loop did not stop within {:?}, proceeding with shutdown",
                    start.elapsed()
                ),
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    warn!("Join thread disconnected unexpectedly")
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Ticks completed (lock-free read)
    pub fn tick_count(&self) -> u64 {
        self.shared.tick_count.load(Ordering::Relaxed)
    }

    /// Most recent update, `None` before the first tick
    pub fn latest(&self) -> Option<Arc<EnergyUpdate>> {
        self.shared.latest.lock().clone()
    }

    /// Rewind simulation time and clear the influence window
    ///
    /// The loop publishes `latest` and the tick count under the simulator
    /// lock, so no pre-reset update can land after this returns.
    pub fn reset(&self) {
        let mut simulator = self.shared.simulator.lock();
        simulator.reset();
        self.shared.tick_count.store(0, Ordering::Relaxed);
        *self.shared.latest.lock() = None;
        drop(simulator);
        debug!("Energy simulator reset");
    }
}

impl Drop for EnergyLoopRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Clears the run flag when the loop thread exits, including by unwinding
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        if self.0.swap(false, Ordering::AcqRel) && thread::panicking() {
            warn!("Energy loop thread panicked, runner marked stopped");
        }
    }
}

fn energy_loop(shared: LoopShared) {
    let _guard = RunningGuard(Arc::clone(&shared.running));
    let mut last_stats = Instant::now();
    let mut ticks_since_stats: u64 = 0;
    let mut busy_since_stats = Duration::ZERO;
    let mut overshoots: u64 = 0;

    while shared.running.load(Ordering::Acquire) {
        let tick_start = Instant::now();

        let update = {
            let mut simulator = shared.simulator.lock();
            for preset in shared.pending_presets.lock().drain(..) {
                simulator.set_preset(preset);
                info!("Preset '{}' applied", preset.name);
            }
            let update = Arc::new(simulator.tick());
            *shared.latest.lock() = Some(Arc::clone(&update));
            shared.tick_count.store(update.tick + 1, Ordering::Relaxed);
            update
        };

        shared
            .subscribers
            .lock()
            .retain(|subscriber| subscriber.deliver(&update));

        if let Some(publisher) = &shared.publisher {
            if let Err(e) = publisher.publish(&update) {
                warn!("Update publisher failed on tick {}: {}", update.tick, e);
            }
        }

        let interval = *shared.interval.lock();
        let busy = tick_start.elapsed();
        ticks_since_stats += 1;
        busy_since_stats += busy;

        if busy >= interval {
            overshoots += 1;
            warn!(
                "Tick {} took {:?}, exceeding the {:?} interval",
                update.tick, busy, interval
            );
        } else {
            sleep_while_running(&shared.running, interval - busy);
        }

        if last_stats.elapsed() >= STATS_INTERVAL {
            debug!(
                "Energy loop stats: {} ticks, avg step {:?}, {} overshoots, {} subscribers",
                ticks_since_stats,
                busy_since_stats / ticks_since_stats.max(1) as u32,
                overshoots,
                shared.subscribers.lock().len()
            );
            last_stats = Instant::now();
            ticks_since_stats = 0;
            busy_since_stats = Duration::ZERO;
            overshoots = 0;
        }
    }

    debug!("Energy loop thread exiting");
}

/// Sleep in short chunks so a stop request is noticed promptly
fn sleep_while_running(running: &AtomicBool, duration: Duration) {
    let deadline = Instant::now() + duration;
    while running.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep((deadline - now).min(SLEEP_CHUNK));
    }
}

/// Drain whatever is already queued on a subscription
pub fn drain_pending(rx: &Receiver<Arc<EnergyUpdate>>) -> Vec<Arc<EnergyUpdate>> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(update) => out.push(update),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
    out
}
