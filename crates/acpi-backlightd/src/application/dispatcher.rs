//! EventDispatcher: the daemon's control loop.
//!
//! ```text
//! EventSource ──raw record──▶ classify ──event──▶ Adjustment ──▶ BacklightStore
//! ```
//!
//! The loop has a single state, "waiting".  Each iteration blocks until acpid
//! delivers a record or shutdown is requested, then handles the record to
//! completion before waiting again.  Any error from the store or the source
//! ends the loop; both resources are closed exactly once on every exit path.

use std::future::Future;

use async_trait::async_trait;
use backlight_core::{classify, Adjustment, AdjustmentError, BrightnessEvent};
use tracing::{debug, error, info, trace};

use crate::domain::config::{DEFAULT_PLUGGED_FACTOR, DEFAULT_UNPLUGGED_FACTOR};
use crate::domain::DaemonError;

/// Access to a backlight device's brightness attributes.
///
/// The production implementation is
/// [`SysfsBacklight`](crate::infrastructure::backlight::SysfsBacklight);
/// tests use [`MemoryBacklight`](crate::infrastructure::backlight::mock::MemoryBacklight).
pub trait BacklightStore: Send {
    /// Maximum brightness, fixed for the lifetime of the store.
    fn max_brightness(&self) -> i64;

    /// Brightness change per hotkey press.
    fn step(&self) -> i64;

    /// Reads the current brightness.
    fn read_current(&mut self) -> Result<i64, DaemonError>;

    /// Writes a new current brightness.
    fn write_current(&mut self, value: i64) -> Result<(), DaemonError>;

    /// Releases the underlying resource.
    fn close(self)
    where
        Self: Sized;
}

/// A stream of raw acpid event records.
///
/// The production implementation is
/// [`AcpiEventConnection`](crate::infrastructure::acpi::AcpiEventConnection);
/// tests use [`ScriptedEventSource`](crate::infrastructure::acpi::mock::ScriptedEventSource).
#[async_trait]
pub trait EventSource: Send {
    /// Waits, without timeout, for the next record.
    ///
    /// Must be cancel-safe: the dispatcher drops this future when shutdown
    /// wins the race.
    async fn wait_for_event(&mut self) -> Result<Vec<u8>, DaemonError>;

    /// Releases the underlying resource.
    fn close(self)
    where
        Self: Sized;
}

/// Multipliers applied on AC adapter transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdapterFactors {
    unplugged: Adjustment,
    plugged: Adjustment,
}

impl AdapterFactors {
    /// Validates and stores the two factors.
    ///
    /// # Errors
    ///
    /// Returns [`AdjustmentError::InvalidFactor`] for a factor that is not
    /// finite and strictly positive.
    pub fn new(unplugged: f64, plugged: f64) -> Result<Self, AdjustmentError> {
        Ok(Self {
            unplugged: Adjustment::factor(unplugged)?,
            plugged: Adjustment::factor(plugged)?,
        })
    }
}

impl Default for AdapterFactors {
    fn default() -> Self {
        Self {
            unplugged: Adjustment::Factor(DEFAULT_UNPLUGGED_FACTOR),
            plugged: Adjustment::Factor(DEFAULT_PLUGGED_FACTOR),
        }
    }
}

/// Owns the backlight store and the event source for the daemon's lifetime
/// and runs the event loop over them.
pub struct EventDispatcher<S, E> {
    store: S,
    source: E,
    factors: AdapterFactors,
}

impl<S, E> EventDispatcher<S, E>
where
    S: BacklightStore,
    E: EventSource,
{
    /// Takes ownership of both resources.
    pub fn new(store: S, source: E, factors: AdapterFactors) -> Self {
        Self {
            store,
            source,
            factors,
        }
    }

    /// Maps an event to the brightness change it requests, if any.
    pub fn adjustment_for(&self, event: BrightnessEvent) -> Option<Adjustment> {
        let step = self.store.step();
        match event {
            BrightnessEvent::StepUp => Some(Adjustment::Delta(step)),
            BrightnessEvent::StepDown => Some(Adjustment::Delta(-step)),
            BrightnessEvent::AcUnplugged => Some(self.factors.unplugged),
            BrightnessEvent::AcPlugged => Some(self.factors.plugged),
            BrightnessEvent::Unrecognized => None,
        }
    }

    /// Applies one classified event to the backlight.
    ///
    /// Returns the value written, or `None` for an unrecognized event.
    ///
    /// # Errors
    ///
    /// Propagates any read or write failure from the store.
    pub fn handle_event(&mut self, event: BrightnessEvent) -> Result<Option<i64>, DaemonError> {
        let Some(adjustment) = self.adjustment_for(event) else {
            return Ok(None);
        };

        let current = self.store.read_current()?;
        let next = adjustment.apply(current, self.store.max_brightness());
        self.store.write_current(next)?;

        debug!(?event, current, next, "brightness adjusted");
        Ok(Some(next))
    }

    /// Runs the event loop until `shutdown` resolves or an error occurs,
    /// then closes the event source and the backlight store.
    ///
    /// `shutdown` is raced against every wait, so a shutdown request takes
    /// effect immediately even when acpid is silent.
    ///
    /// # Errors
    ///
    /// Returns the first [`DaemonError`] raised by the source or the store,
    /// including [`DaemonError::Disconnected`] when acpid goes away.
    pub async fn run<F>(mut self, shutdown: F) -> Result<(), DaemonError>
    where
        F: Future<Output = ()>,
    {
        let result = self.event_loop(shutdown).await;
        if let Err(err) = &result {
            error!(error = %err, "event loop stopped");
        }

        let Self { store, source, .. } = self;
        source.close();
        store.close();
        result
    }

    async fn event_loop<F>(&mut self, shutdown: F) -> Result<(), DaemonError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let raw = tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("shutdown requested; leaving event loop");
                    return Ok(());
                }
                raw = self.source.wait_for_event() => raw?,
            };

            let event = classify(&raw);
            if event == BrightnessEvent::Unrecognized {
                trace!(
                    record = %String::from_utf8_lossy(&raw).trim_end(),
                    "ignoring unrecognized event"
                );
                continue;
            }
            self.handle_event(event)?;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
