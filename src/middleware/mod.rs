//! Middleware module
//!
//! The update pipeline and its stages: request logging, database handle
//! injection, subscription tracking and presence synchronization.

pub mod pipeline;
pub mod throttle;
pub mod database;
pub mod logging;
pub mod presence;
pub mod subscription;

// Re-export commonly used middleware
pub use pipeline::{Context, Endpoint, MiddlewareStack, Next, UpdateMiddleware};
pub use throttle::SyncThrottle;
pub use database::DatabaseMiddleware;
pub use logging::RequestLoggingMiddleware;
pub use presence::{PresenceSynchronizer, extract_event_user};
pub use subscription::{SubscriptionTracker, membership_transition, subscription_flag};
