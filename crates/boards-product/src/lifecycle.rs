//! # Lifecycle Controller
//!
//! Owns the boards product state machine.
//!
//! ```text
//!                 ┌─ flag off ─→ [Disabled] ──stop──┐
//! new(registry) ──┤                                 ├──→ [Stopped]
//!                 └─ flag on ──→ [Constructed] ─────┤
//!                                     │ start       │
//!                                     ↓             │
//!                                 [Active] ───stop──┘
//! ```
//!
//! - The boards app handle lives only in `Constructed` and `Active`; hooks
//!   reach it only in `Active`.
//! - `start` registers the adapter with the host before starting the app.
//!   Either failure aborts the start and leaves the state at `Constructed`
//!   with the hooks unregistered, so a later `start` runs both steps again.
//! - `stop` moves to `Stopped` before stopping the app, so hooks arriving
//!   during or after shutdown are no-ops. A second `stop` succeeds.

use crate::app::{BoardsApp, BoardsAppFactory};
use crate::binder::BoundServices;
use crate::error::{ProductError, ProductResult};
use crate::gate::FeatureGate;
use crate::logging::{log_server_info, ScopedLogger};
use crate::services::ServiceApi;
use crate::BOARDS_PRODUCT_NAME;
use host_api::{ProductHooks, ServiceKey, ServiceRegistry};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Boards app built but not started.
    Constructed,
    /// Feature flag was off at construction; no boards app exists.
    Disabled,
    /// Boards app running; hooks are forwarded.
    Active,
    /// Stop was called.
    Stopped,
}

#[derive(Clone)]
enum Slot {
    Disabled,
    Constructed(Arc<dyn BoardsApp>),
    Active(Arc<dyn BoardsApp>),
    Stopped,
}

impl Slot {
    fn state(&self) -> LifecycleState {
        match self {
            Self::Disabled => LifecycleState::Disabled,
            Self::Constructed(_) => LifecycleState::Constructed,
            Self::Active(_) => LifecycleState::Active,
            Self::Stopped => LifecycleState::Stopped,
        }
    }
}

#[derive(Default)]
struct Transitions {
    hooks_registered: bool,
}

/// The boards product adapter.
pub struct BoardsProduct {
    services: BoundServices,
    logger: ScopedLogger,
    gate: FeatureGate,
    slot: RwLock<Slot>,
    /// Serializes start/stop.
    transitions: Mutex<Transitions>,
    this: Weak<BoardsProduct>,
}

impl BoardsProduct {
    /// Bind `registry`, read the feature flag and, if it is on, build the
    /// boards app with `factory`. The app is not started.
    pub fn new(registry: &ServiceRegistry, factory: BoardsAppFactory) -> ProductResult<Arc<Self>> {
        let services = BoundServices::bind(registry)?;
        let gate = FeatureGate::capture(&**services.require_config()?);
        let logger = services.logger.clone();

        let slot = if gate.is_enabled() {
            let api = ServiceApi::from_bound(&services)?;
            let app = factory(api).map_err(ProductError::SubsystemConstruction)?;
            log_server_info(&logger);
            Slot::Constructed(app)
        } else {
            logger.info("Boards product disabled via feature flag");
            Slot::Disabled
        };

        debug!(
            product = BOARDS_PRODUCT_NAME,
            state = ?slot.state(),
            bound = services.bound_keys().len(),
            "Boards product constructed"
        );

        Ok(Arc::new_cyclic(|this| Self {
            services,
            logger,
            gate,
            slot: RwLock::new(slot),
            transitions: Mutex::new(Transitions::default()),
            this: this.clone(),
        }))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.slot.read().state()
    }

    /// Feature gate captured at construction.
    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub fn services(&self) -> &BoundServices {
        &self.services
    }

    pub fn logger(&self) -> &ScopedLogger {
        &self.logger
    }

    /// The boards app, if hooks should reach it right now.
    pub(crate) fn delegate(&self) -> Option<Arc<dyn BoardsApp>> {
        match &*self.slot.read() {
            Slot::Active(app) => Some(Arc::clone(app)),
            Slot::Constructed(_) | Slot::Disabled | Slot::Stopped => None,
        }
    }

    /// Register with the host and start the boards app.
    pub fn start(&self) -> ProductResult<()> {
        let mut transitions = self.transitions.lock();
        let current = self.slot.read().clone();

        let app = match current {
            Slot::Disabled => {
                self.logger.info("Boards product disabled via feature flag");
                return Ok(());
            }
            Slot::Constructed(app) => app,
            other => {
                return Err(ProductError::InvalidTransition {
                    state: other.state(),
                    operation: "start",
                });
            }
        };

        self.logger.info("Starting boards service");

        let hooks = self
            .services
            .hooks
            .as_ref()
            .ok_or(ProductError::MissingCapability {
                key: ServiceKey::Hooks,
            })?;
        let receiver: Arc<dyn ProductHooks> = match self.this.upgrade() {
            Some(this) => this as Arc<dyn ProductHooks>,
            None => {
                return Err(ProductError::InvalidTransition {
                    state: LifecycleState::Constructed,
                    operation: "start",
                });
            }
        };

        hooks
            .register_hooks(BOARDS_PRODUCT_NAME, receiver)
            .map_err(ProductError::HookRegistration)?;
        transitions.hooks_registered = true;

        if let Err(err) = app.start() {
            self.release_hooks(&mut transitions);
            return Err(ProductError::SubsystemStart(err));
        }

        *self.slot.write() = Slot::Active(app);
        info!(product = BOARDS_PRODUCT_NAME, "Boards service started");
        Ok(())
    }

    /// Stop the boards app. Safe to call more than once.
    pub fn stop(&self) -> ProductResult<()> {
        let mut transitions = self.transitions.lock();
        let previous = std::mem::replace(&mut *self.slot.write(), Slot::Stopped);

        let app = match previous {
            Slot::Stopped => {
                debug!(product = BOARDS_PRODUCT_NAME, "Boards product already stopped");
                return Ok(());
            }
            Slot::Disabled => {
                self.logger.info("Stopping boards service");
                return Ok(());
            }
            Slot::Constructed(app) | Slot::Active(app) => app,
        };

        self.logger.info("Stopping boards service");

        self.release_hooks(&mut transitions);

        app.stop().map_err(ProductError::SubsystemStop)?;
        info!(product = BOARDS_PRODUCT_NAME, "Boards service stopped");
        Ok(())
    }

    fn release_hooks(&self, transitions: &mut Transitions) {
        if !transitions.hooks_registered {
            return;
        }
        if let Some(hooks) = &self.services.hooks {
            if let Err(err) = hooks.unregister_hooks(BOARDS_PRODUCT_NAME) {
                warn!(product = BOARDS_PRODUCT_NAME, error = %err, "Failed to unregister hooks");
            }
        }
        transitions.hooks_registered = false;
    }
}

impl std::fmt::Debug for BoardsProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardsProduct")
            .field("state", &self.state())
            .field("gate", &self.gate)
            .field("bound", &self.services.bound_keys())
            .finish()
    }
}
