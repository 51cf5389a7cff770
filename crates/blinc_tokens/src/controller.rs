//! Mode-switch controller
//!
//! The controller owns which mode is active and whether a transition is in
//! flight. It never touches a document directly: class list changes and
//! stylesheet text go to an injected [`StyleSink`], and the `system`
//! pseudo-mode is answered by an injected [`SchemeProbe`].
//!
//! Each switch marks the controller as transitioning and starts a timer that
//! clears the flag after [`ControllerConfig::transition`]. There is a single
//! timer slot: switching again before it fires aborts the pending timer and
//! starts a fresh one, so the flag always clears relative to the last switch.
//!
//! The timer runs on the ambient tokio runtime. Without one, the flag is
//! cleared immediately.
//!
//! Sink calls are made without holding the controller's state lock, so a sink
//! may query [`ModeController::current`] or
//! [`ModeController::is_transitioning`] while it is being driven.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indexmap::IndexMap;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::Result;
use crate::mode::{ColorScheme, EffectFlags, ModeRegistry, SYSTEM_MODE};

/// Receives the computed class list changes and stylesheet text
///
/// Adapters bridge this to a live document, a native window, or a file.
pub trait StyleSink: Send + Sync {
    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Replace the stylesheet registered under `id`
    fn write_styles(&self, id: &str, css: &str);
}

/// Answers which scheme the environment prefers, for `system`
pub trait SchemeProbe: Send + Sync {
    fn preferred_scheme(&self) -> ColorScheme;
}

/// Probe that always reports the same scheme
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedScheme(pub ColorScheme);

impl SchemeProbe for FixedScheme {
    fn preferred_scheme(&self) -> ColorScheme {
        self.0
    }
}

/// In-memory sink, for headless use and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    classes: Mutex<BTreeSet<String>>,
    styles: Mutex<IndexMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classes currently applied
    pub fn classes(&self) -> Vec<String> {
        lock(&self.classes).iter().cloned().collect()
    }

    pub fn has_class(&self, class: &str) -> bool {
        lock(&self.classes).contains(class)
    }

    /// Stylesheet last written under `id`
    pub fn styles(&self, id: &str) -> Option<String> {
        lock(&self.styles).get(id).cloned()
    }
}

impl StyleSink for MemorySink {
    fn add_class(&self, class: &str) {
        lock(&self.classes).insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        lock(&self.classes).remove(class);
    }

    fn write_styles(&self, id: &str, css: &str) {
        lock(&self.styles).insert(id.to_string(), css.to_string());
    }
}

/// Controller settings
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// How long the transitioning flag stays set after a switch
    pub transition: Duration,
    /// Class present on the root while transitioning
    pub transition_class: String,
    /// Variable prefix for role stylesheets
    pub prefix: String,
    /// Stylesheet id role declarations are written under
    pub style_id: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            transition: Duration::from_millis(300),
            transition_class: "theme-transitioning".to_string(),
            prefix: "ds".to_string(),
            style_id: "blinc-theme-roles".to_string(),
        }
    }
}

/// Which mode is applied
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModeState {
    #[default]
    Unset,
    Active(String),
}

impl ModeState {
    pub fn name(&self) -> Option<&str> {
        match self {
            ModeState::Unset => None,
            ModeState::Active(name) => Some(name),
        }
    }
}

#[derive(Default)]
struct Inner {
    state: ModeState,
    transitioning: bool,
    /// Bumped on every switch; a timer only clears the flag for its own switch
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Applies modes to a [`StyleSink`] and tracks transitions
pub struct ModeController {
    registry: Arc<ModeRegistry>,
    sink: Arc<dyn StyleSink>,
    probe: Arc<dyn SchemeProbe>,
    config: ControllerConfig,
    inner: Arc<Mutex<Inner>>,
    /// Serializes sink updates between switches and the clearing timer
    applying: Arc<Mutex<()>>,
}

impl ModeController {
    pub fn new(registry: Arc<ModeRegistry>, sink: Arc<dyn StyleSink>) -> Self {
        Self {
            registry,
            sink,
            probe: Arc::new(FixedScheme::default()),
            config: ControllerConfig::default(),
            inner: Arc::new(Mutex::new(Inner::default())),
            applying: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn SchemeProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> ModeState {
        lock(&self.inner).state.clone()
    }

    pub fn current(&self) -> Option<String> {
        lock(&self.inner).state.name().map(str::to_string)
    }

    pub fn is_transitioning(&self) -> bool {
        lock(&self.inner).transitioning
    }

    pub fn class_name_for(&self, mode: &str) -> Result<&str> {
        self.registry.class_name_for(mode)
    }

    pub fn effect_flags(&self, mode: &str) -> Result<EffectFlags> {
        self.registry.effect_flags(mode)
    }

    /// Resolve `system` to a concrete mode name; other names pass through
    pub fn concrete_mode(&self, name: &str) -> String {
        if name == SYSTEM_MODE {
            self.probe.preferred_scheme().css_value().to_string()
        } else {
            name.to_string()
        }
    }

    /// Switch to `name` (or `system`), returning the concrete mode applied
    pub fn set_mode(&self, name: &str) -> Result<String> {
        let concrete = self.concrete_mode(name);
        let mode = self.registry.get(&concrete)?;

        let _applying = lock(&self.applying);
        let generation = {
            let mut inner = lock(&self.inner);
            if let Some(timer) = inner.timer.take() {
                timer.abort();
            }
            inner.generation = inner.generation.wrapping_add(1);
            debug!(
                "mode switch {:?} -> `{}` (generation {})",
                inner.state.name(),
                concrete,
                inner.generation
            );
            inner.state = ModeState::Active(concrete.clone());
            inner.transitioning = true;
            inner.generation
        };

        for other in self.registry.all_modes() {
            if other.css_class != mode.css_class {
                self.sink.remove_class(&other.css_class);
            }
        }
        self.sink.add_class(&mode.css_class);
        self.sink
            .write_styles(&self.config.style_id, &mode.role_css(&self.config.prefix));
        self.sink.add_class(&self.config.transition_class);

        match self.schedule_clear(generation) {
            Some(timer) => lock(&self.inner).timer = Some(timer),
            None => {
                lock(&self.inner).transitioning = false;
                self.sink.remove_class(&self.config.transition_class);
            }
        }

        Ok(concrete)
    }

    /// Flip between the light and dark schemes of the current mode
    pub fn toggle(&self) -> Result<String> {
        let scheme = match self.current() {
            Some(current) => self.registry.get(&current)?.scheme,
            None => self.probe.preferred_scheme(),
        };
        self.set_mode(scheme.toggle().css_value())
    }

    fn schedule_clear(&self, generation: u64) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime, clearing mode transition immediately");
            return None;
        };

        let inner = Arc::clone(&self.inner);
        let applying = Arc::clone(&self.applying);
        let sink = Arc::clone(&self.sink);
        let delay = self.config.transition;
        let class = self.config.transition_class.clone();
        Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _applying = lock(&applying);
            let current = {
                let mut inner = lock(&inner);
                let current = inner.generation == generation;
                if current {
                    inner.transitioning = false;
                    inner.timer = None;
                }
                current
            };
            if current {
                sink.remove_class(&class);
            }
        }))
    }
}

impl Drop for ModeController {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.inner).timer.take() {
            timer.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
