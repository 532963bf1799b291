//! Catalog orchestration shared by every frontend.
//!
//! Wires the validation layer and a [`RecordStore`](cpc_vault_catalog::RecordStore)
//! together behind the admin session gate, and prepares catalog entries for
//! the player widget.

pub mod error;
pub mod player;
pub mod service;
pub mod session;
pub mod settings;

pub use error::CatalogError;
pub use player::{
    PlayerContainer, PlayerError, PlayerLaunch, PlayerSession, PlayerStatus, PlayerWidget,
    unescape_command,
};
pub use service::{CatalogService, SeedStats};
pub use session::{ADMIN_ENV_VAR, EnvSessionGate, FixedSession, Session, SessionGate};
