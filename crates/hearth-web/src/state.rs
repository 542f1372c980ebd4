use std::sync::{Arc, Mutex};

use hearth_core::RateLimiter;

use crate::config::ServerConfig;
use crate::notify::LeadNotifier;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Fixed-window limiter guarding the contact endpoint. One map per
    /// process instance; the effective limit multiplies when horizontally
    /// scaled.
    pub limiter: Arc<Mutex<RateLimiter>>,
    /// Outbound lead delivery. `None` means submissions are captured in
    /// logs only.
    pub notifier: Option<Arc<LeadNotifier>>,
}
