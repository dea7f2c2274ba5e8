//! Body-frame acquisition interfaces.
//!
//! This module abstracts over how skeletal frames reach the engine:
//!
//! - `ChannelSource` adapts a host SDK callback that pushes frames
//! - `ScriptedSource` replays a prerecorded frame list at a fixed
//!   cadence, for tests and simulation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use kinetrack_core::{BodyFrame, Error, Result};

/// Frame source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Nominal sensor frame rate (Hz)
    pub frame_rate_hz: u32,

    /// Maximum simultaneously tracked bodies (the sensor hardware
    /// tracks at most six)
    pub max_bodies: usize,

    /// Frame channel capacity
    pub channel_capacity: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 30,
            max_bodies: 6,
            channel_capacity: 64,
        }
    }
}

impl SourceConfig {
    /// Delivery interval implied by the frame rate
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / self.frame_rate_hz.max(1) as u64
    }
}

/// Trait for body-frame acquisition backends
#[async_trait]
pub trait BodyFrameSource: Send + Sync {
    /// Start frame delivery. A backend that cannot deliver frames
    /// fails here with `Error::SensorUnavailable`, never silently.
    async fn start(&mut self) -> Result<()>;

    /// Stop frame delivery
    async fn stop(&mut self) -> Result<()>;

    /// Check if delivery is active
    fn is_running(&self) -> bool;

    /// Get source configuration
    fn config(&self) -> &SourceConfig;

    /// Receive next frame (blocking)
    async fn recv(&mut self) -> Result<BodyFrame>;

    /// Try to receive a frame (non-blocking)
    fn try_recv(&mut self) -> Option<BodyFrame>;
}

/// Cloneable handle the host's frame callback pushes into
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<BodyFrame>,
    max_bodies: usize,
}

impl FrameSender {
    /// Push one frame. Rejects frames that report more candidate
    /// bodies than the sensor can track.
    pub async fn push(&self, frame: BodyFrame) -> Result<()> {
        if frame.bodies.len() > self.max_bodies {
            return Err(Error::InvalidInput(format!(
                "frame reports {} bodies, sensor tracks at most {}",
                frame.bodies.len(),
                self.max_bodies
            )));
        }

        self.tx.send(frame).await.map_err(|_| Error::ChannelClosed)
    }
}

/// Host-push frame source backed by an mpsc channel.
///
/// The SDK event handler keeps a `FrameSender` and pushes each
/// arriving frame; the engine drains the receiving side. Sampling in
/// the engine is intentionally lossy, so the channel stays bounded.
pub struct ChannelSource {
    config: SourceConfig,
    is_running: bool,
    rx: Option<mpsc::Receiver<BodyFrame>>,
}

impl ChannelSource {
    pub fn new(config: SourceConfig) -> (Self, FrameSender) {
        let (tx, rx) = mpsc::channel(config.channel_capacity);
        let sender = FrameSender {
            tx,
            max_bodies: config.max_bodies,
        };

        (
            Self {
                config,
                is_running: false,
                rx: Some(rx),
            },
            sender,
        )
    }
}

#[async_trait]
impl BodyFrameSource for ChannelSource {
    async fn start(&mut self) -> Result<()> {
        if self.is_running {
            return Ok(());
        }

        if self.rx.is_none() {
            return Err(Error::SensorUnavailable("frame channel closed".into()));
        }

        self.is_running = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.is_running = false;
        self.rx = None;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn recv(&mut self) -> Result<BodyFrame> {
        match &mut self.rx {
            Some(rx) => rx.recv().await.ok_or(Error::ChannelClosed),
            None => Err(Error::SensorUnavailable("source not started".into())),
        }
    }

    fn try_recv(&mut self) -> Option<BodyFrame> {
        self.rx.as_mut()?.try_recv().ok()
    }
}

/// Replays a prerecorded frame list at the configured frame rate.
///
/// After the script is exhausted the channel closes and `recv`
/// reports `ChannelClosed`, like a sensor going away.
pub struct ScriptedSource {
    config: SourceConfig,
    script: Vec<BodyFrame>,
    is_running: bool,
    rx: Option<mpsc::Receiver<BodyFrame>>,
}

impl ScriptedSource {
    pub fn new(config: SourceConfig, script: Vec<BodyFrame>) -> Self {
        Self {
            config,
            script,
            is_running: false,
            rx: None,
        }
    }
}

#[async_trait]
impl BodyFrameSource for ScriptedSource {
    async fn start(&mut self) -> Result<()> {
        if self.is_running {
            return Ok(());
        }

        if self.script.is_empty() {
            return Err(Error::SensorUnavailable("empty frame script".into()));
        }

        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        self.rx = Some(rx);
        self.is_running = true;

        let frames = self.script.clone();
        let interval_ms = self.config.frame_interval_ms();

        tokio::spawn(async move {
            for frame in frames {
                tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;

                if tx.send(frame).await.is_err() {
                    break;
                }
            }
            tracing::debug!("scripted frame source exhausted");
        });

        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.is_running = false;
        self.rx = None;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn recv(&mut self) -> Result<BodyFrame> {
        match &mut self.rx {
            Some(rx) => rx.recv().await.ok_or(Error::ChannelClosed),
            None => Err(Error::SensorUnavailable("source not started".into())),
        }
    }

    fn try_recv(&mut self) -> Option<BodyFrame> {
        self.rx.as_mut()?.try_recv().ok()
    }
}
