//! Geo/language redirect subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → decision.rs (path check; build RequestContext)
//!         → origin.rs (peer address / X-Real-Ip → client IP)
//!         → geo resolver (client IP → country)
//!         → locale.rs (lang cookie / Accept-Language → candidates)
//!     → match policy: country OR language OR unconstrained rule
//!     → response.rs (Location + 301/302/307/308) | next handler
//! ```
//!
//! # Design Decisions
//! - Rules are built once and immutable; evaluation is lock-free
//! - Lookups run only for requests on the rule's exact `from` path
//! - Resolution failures mean "no match", never an error response
//! - A destination that fails to parse answers 502 instead of forwarding

pub mod decision;
pub mod locale;
pub mod middleware;
pub mod origin;
pub mod response;
pub mod rule;

pub use decision::{Decision, RequestContext};
pub use middleware::{chain_middleware, ChainHandler, Outcome};
pub use rule::{GeoRedirect, RedirectError, StatusMode};
