//! Player widget launch preparation and session lifecycle.
//!
//! The emulator itself is an external component. This module decides what it
//! is handed (media URL, start command, emulator options) and keeps the
//! container it renders into clean: emptied before every load, and torn down
//! with focus released before the children go away.

use serde::Serialize;
use thiserror::Error;

use cpc_vault_catalog::CatalogEntry;

/// Disk image format handed to the emulator.
pub const DISK_TYPE: &str = "dsk";

/// Frames to fast-forward while booting (20 seconds at 50 Hz).
pub const WARP_FRAMES: u32 = 20 * 50;

/// Everything the player widget needs to boot one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLaunch {
    pub title: String,
    pub media_url: String,
    /// Start command with escaped newlines already turned into line breaks.
    pub command: String,
    pub disk_type: String,
    pub warp_frames: u32,
    /// Hold the warp until the machine starts producing sound.
    pub wait_audio: bool,
}

impl PlayerLaunch {
    pub fn for_entry(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            media_url: entry.media_url.clone(),
            command: unescape_command(&entry.play_command),
            disk_type: DISK_TYPE.to_string(),
            warp_frames: WARP_FRAMES,
            wait_audio: true,
        }
    }
}

/// Turn every two-character `\n` token into a real line break.
///
/// Nothing else in the command is touched.
pub fn unescape_command(command: &str) -> String {
    command.replace("\\n", "\n")
}

/// Errors from loading the player.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Entry has no media URL to load")]
    MissingMedia,

    #[error("Player widget failed: {0}")]
    Widget(String),
}

/// The host element the player renders into.
pub trait PlayerContainer {
    /// Number of child elements currently attached.
    fn child_count(&self) -> usize;

    /// Whether the focused element lives inside this container.
    fn has_focus_within(&self) -> bool;

    /// Release focus from whatever element inside the container holds it.
    fn blur_focused(&mut self);

    /// Detach every child element.
    fn remove_children(&mut self);
}

/// The external emulator component.
pub trait PlayerWidget<C: PlayerContainer> {
    type Error: std::fmt::Display;

    /// Render a player for `launch` into `container`.
    fn render(&mut self, container: &mut C, launch: &PlayerLaunch) -> Result<(), Self::Error>;
}

/// Where a [`PlayerSession`] is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// One player container plus the widget that fills it.
///
/// Dropping the session tears the player down.
pub struct PlayerSession<C: PlayerContainer, W: PlayerWidget<C>> {
    container: C,
    widget: W,
    status: PlayerStatus,
}

impl<C: PlayerContainer, W: PlayerWidget<C>> PlayerSession<C, W> {
    pub fn new(container: C, widget: W) -> Self {
        Self {
            container,
            widget,
            status: PlayerStatus::Idle,
        }
    }

    pub fn status(&self) -> &PlayerStatus {
        &self.status
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Empty the container, then render a fresh player for `launch`.
    pub fn load(&mut self, launch: &PlayerLaunch) -> Result<(), PlayerError> {
        self.clear();

        if launch.media_url.trim().is_empty() {
            self.status = PlayerStatus::Failed(PlayerError::MissingMedia.to_string());
            return Err(PlayerError::MissingMedia);
        }

        self.status = PlayerStatus::Loading;
        log::debug!("Loading '{}' from {}", launch.title, launch.media_url);

        match self.widget.render(&mut self.container, launch) {
            Ok(()) => {
                self.status = PlayerStatus::Ready;
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("Player for '{}' failed to load: {}", launch.title, message);
                self.status = PlayerStatus::Failed(message.clone());
                Err(PlayerError::Widget(message))
            }
        }
    }

    /// Release focus held inside the player and detach it.
    pub fn teardown(&mut self) {
        self.clear();
        self.status = PlayerStatus::Idle;
    }

    fn clear(&mut self) {
        if self.container.has_focus_within() {
            self.container.blur_focused();
        }
        if self.container.child_count() > 0 {
            self.container.remove_children();
        }
    }
}

impl<C: PlayerContainer, W: PlayerWidget<C>> Drop for PlayerSession<C, W> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "tests/player_tests.rs"]
mod tests;
