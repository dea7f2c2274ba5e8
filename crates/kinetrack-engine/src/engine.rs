//! The gesture engine runtime.
//!
//! Two independent tasks share one lock-protected state block: a
//! frame task that pumps the body-frame source and refreshes focus
//! and current hand positions, and a tick task that drives the
//! gesture clock, snapshots the sampled windows, and classifies
//! swipes. Guards are held only for field copies, never across the
//! projection call, the threshold arithmetic, or an await on the
//! source.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use kinetrack_core::{
    BodyId, FocusState, Gesture, GestureLog, HandPoints, HandSide, HandState, JointLabel,
    Result, ScreenPoint, SessionId, SwipeGesture, TrackedBody,
};
use kinetrack_sensor::{joint_to_screen, BodyFrameSource, CoordinateMapper};

use crate::classifier::GestureClassifier;
use crate::config::EngineConfig;
use crate::focus::select_focus;
use crate::sampler::MotionState;

/// Everything the frame and tick tasks share
#[derive(Debug)]
struct EngineShared {
    focus: FocusState,
    motion: MotionState,
    hand_points: HandPoints,
    left_hand: Option<HandState>,
    right_hand: Option<HandState>,
    log: GestureLog,
    frames_processed: u64,
    ticks_elapsed: u64,
    swipes_classified: u64,
}

impl EngineShared {
    fn new() -> Self {
        Self {
            focus: FocusState::none(),
            motion: MotionState::new(),
            hand_points: HandPoints::default(),
            left_hand: None,
            right_hand: None,
            log: GestureLog::new(),
            frames_processed: 0,
            ticks_elapsed: 0,
            swipes_classified: 0,
        }
    }
}

/// One coherent view of engine state for display binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub session_id: SessionId,
    pub focus: FocusState,
    pub hand_points: HandPoints,
    pub left_hand_state: Option<HandState>,
    pub right_hand_state: Option<HandState>,
    pub latest_gesture: Gesture,
    pub frames_processed: u64,
    pub ticks_elapsed: u64,
    pub swipes_classified: u64,
}

/// Projected joints and hand-state readings for one focused body,
/// computed before any lock is taken
struct FocusedReadings {
    hand_points: HandPoints,
    left_hand: HandState,
    right_hand: HandState,
}

fn read_focused_body<M: CoordinateMapper + ?Sized>(
    mapper: &M,
    body: &TrackedBody,
) -> FocusedReadings {
    let screen = |label: JointLabel| {
        body.joint(label)
            .map(|joint| joint_to_screen(mapper, joint))
            .unwrap_or_else(ScreenPoint::origin)
    };

    FocusedReadings {
        hand_points: HandPoints {
            left_hand: screen(JointLabel::LeftHand),
            right_hand: screen(JointLabel::RightHand),
            left_thumb: screen(JointLabel::LeftThumb),
            right_thumb: screen(JointLabel::RightThumb),
        },
        left_hand: body.hand_state(HandSide::Left),
        right_hand: body.hand_state(HandSide::Right),
    }
}

/// The motion sampling and gesture classification engine.
///
/// Owns the frame and tick tasks for one session; dropping the engine
/// aborts both.
pub struct GestureEngine {
    session_id: SessionId,
    config: EngineConfig,
    shared: Arc<RwLock<EngineShared>>,
    is_running: Arc<RwLock<bool>>,
    stop_signal: Arc<Notify>,
    gesture_tx: broadcast::Sender<SwipeGesture>,
    frame_task: JoinHandle<()>,
    tick_task: JoinHandle<()>,
}

impl GestureEngine {
    /// Start the engine: validate configuration, open the source, and
    /// spawn the frame and tick tasks.
    ///
    /// A source that cannot deliver frames or a configuration whose
    /// gesture clock cannot be armed fails here, never silently.
    pub async fn start<S, M>(mut source: S, mapper: M, config: EngineConfig) -> Result<Self>
    where
        S: BodyFrameSource + 'static,
        M: CoordinateMapper + 'static,
    {
        config.validate()?;
        source.start().await?;

        let session_id = SessionId::new();
        let shared = Arc::new(RwLock::new(EngineShared::new()));
        let is_running = Arc::new(RwLock::new(true));
        let stop_signal = Arc::new(Notify::new());
        let (gesture_tx, _) = broadcast::channel(config.gesture_channel_capacity);

        tracing::info!(
            session = %session_id.0,
            tick_ms = config.tick_interval_ms,
            threshold_px = config.displacement_threshold_px,
            "gesture engine starting"
        );

        let frame_task = {
            let shared = shared.clone();
            let is_running = is_running.clone();
            let stop_signal = stop_signal.clone();

            tokio::spawn(async move {
                loop {
                    if !*is_running.read().await {
                        break;
                    }

                    // Teardown must not wait for the next frame; the
                    // stop signal releases the receive wait.
                    let received = tokio::select! {
                        _ = stop_signal.notified() => break,
                        received = source.recv() => received,
                    };

                    match received {
                        Ok(frame) => {
                            let focus = select_focus(&frame.bodies);

                            // Projection happens before the write guard.
                            let readings = focus.body_id().and_then(|id| {
                                frame
                                    .bodies
                                    .iter()
                                    .find(|b| b.id == id)
                                    .map(|body| read_focused_body(&mapper, body))
                            });

                            let mut state = shared.write().await;
                            state.focus = focus;
                            state.frames_processed += 1;

                            if let Some(readings) = readings {
                                state.motion.record(
                                    readings.hand_points.left_hand,
                                    readings.hand_points.right_hand,
                                );
                                state.hand_points = readings.hand_points;
                                state.left_hand = Some(readings.left_hand);
                                state.right_hand = Some(readings.right_hand);
                            }
                        }
                        Err(kinetrack_core::Error::ChannelClosed) => {
                            tracing::debug!("frame stream ended");
                            break;
                        }
                        Err(e) => {
                            tracing::error!("frame source error: {}", e);
                            break;
                        }
                    }
                }

                if let Err(e) = source.stop().await {
                    tracing::warn!("frame source stop failed: {}", e);
                }
            })
        };

        let tick_task = {
            let shared = shared.clone();
            let is_running = is_running.clone();
            let gesture_tx = gesture_tx.clone();
            let classifier = GestureClassifier::new(
                config.displacement_threshold_px,
                config.tick_interval_ms as f32,
            );
            let tick_interval = Duration::from_millis(config.tick_interval_ms);

            tokio::spawn(async move {
                let mut clock = interval(tick_interval);
                clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    clock.tick().await;

                    if !*is_running.read().await {
                        break;
                    }

                    // One short critical section: copy the windows out
                    // and advance the snapshots.
                    let windows = {
                        let mut state = shared.write().await;
                        state.ticks_elapsed += 1;
                        state.motion.snapshot()
                    };

                    if let Some(gesture) = classifier.classify(&windows) {
                        {
                            let mut state = shared.write().await;
                            state.log.append(gesture);
                            state.swipes_classified += 1;
                        }

                        tracing::debug!(
                            hand = ?gesture.hand,
                            direction = gesture.direction.text(),
                            vx = gesture.velocity.vx,
                            vy = gesture.velocity.vy,
                            "swipe classified"
                        );

                        // Nobody subscribed is fine.
                        let _ = gesture_tx.send(gesture);
                    }
                }
            })
        };

        Ok(Self {
            session_id,
            config,
            shared,
            is_running,
            stop_signal,
            gesture_tx,
            frame_task,
            tick_task,
        })
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Subscribe to classified swipes as they are appended
    pub fn subscribe(&self) -> broadcast::Receiver<SwipeGesture> {
        self.gesture_tx.subscribe()
    }

    /// Identity of the body in focus, if any
    pub async fn current_focus(&self) -> Option<BodyId> {
        self.shared.read().await.focus.body_id()
    }

    /// Tracked bodies other than the one in focus
    pub async fn other_tracked_count(&self) -> usize {
        self.shared.read().await.focus.other_tracked
    }

    /// Latest projected hand and thumb positions
    pub async fn current_hand_points(&self) -> HandPoints {
        self.shared.read().await.hand_points
    }

    /// Display text for a hand's state; `"-"` before the first reading
    pub async fn hand_state_text(&self, side: HandSide) -> &'static str {
        let state = self.shared.read().await;
        let reading = match side {
            HandSide::Left => state.left_hand,
            HandSide::Right => state.right_hand,
        };
        HandState::text_or_default(reading)
    }

    /// Most recent gesture; the `None` sentinel until a swipe fires
    pub async fn latest_gesture(&self) -> Gesture {
        *self.shared.read().await.log.latest()
    }

    /// One coherent snapshot of everything the display binds to
    pub async fn snapshot(&self) -> EngineSnapshot {
        let state = self.shared.read().await;
        EngineSnapshot {
            session_id: self.session_id,
            focus: state.focus,
            hand_points: state.hand_points,
            left_hand_state: state.left_hand,
            right_hand_state: state.right_hand,
            latest_gesture: *state.log.latest(),
            frames_processed: state.frames_processed,
            ticks_elapsed: state.ticks_elapsed,
            swipes_classified: state.swipes_classified,
        }
    }

    /// Begin teardown: no further ticks fire, the frame task is
    /// released from its receive wait and stops the source. An
    /// in-flight frame is allowed to complete but queues no further
    /// work.
    pub async fn shutdown(&self) {
        *self.is_running.write().await = false;
        self.stop_signal.notify_one();
        self.tick_task.abort();
        tracing::info!(session = %self.session_id.0, "gesture engine shut down");
    }
}

impl Drop for GestureEngine {
    fn drop(&mut self) {
        self.frame_task.abort();
        self.tick_task.abort();
    }
}
