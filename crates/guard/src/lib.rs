//! `photomart-guard` — synchronous access-control decisions for screens.
//!
//! Route guarding redirects away from screens the session may not see;
//! inline gates hide fragments within screens the session may. Both are
//! pure functions over a [`photomart_session::SessionSnapshot`], so every
//! decision is testable without a store or a navigator.

pub mod gate;
pub mod photographer;
pub mod policy;
pub mod route;

pub use gate::{CapabilityGate, GateDecision};
pub use photographer::{
    CallToAction, PanelReason, PhotographerGateDecision, PhotographerStatusGate, StatusPanel,
};
pub use policy::RoutePolicy;
pub use route::{RouteDecision, RouteGuard, evaluate_route};
