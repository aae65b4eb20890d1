//! Play status tracking

use crate::error::UnknownStatus;
use crate::numeric::coerce_number;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Hours at which a game counts as played
pub const PLAYED_HOURS: f64 = 0.5;
/// Hours at which a game counts as being played
pub const PLAYING_HOURS: f64 = 1.0;

/// Tracked play status of a game.
///
/// Stored as the spreadsheet wording ("Must Play", "Unplayed", ...);
/// an empty cell is [`PlayStatus::Unset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum PlayStatus {
    #[default]
    Unset,
    Unplayed,
    Played,
    Playing,
    MustPlay,
    Finished,
    Waiting,
    Quit,
    Ignore,
}

impl PlayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayStatus::Unset => "",
            PlayStatus::Unplayed => "Unplayed",
            PlayStatus::Played => "Played",
            PlayStatus::Playing => "Playing",
            PlayStatus::MustPlay => "Must Play",
            PlayStatus::Finished => "Finished",
            PlayStatus::Waiting => "Waiting",
            PlayStatus::Quit => "Quit",
            PlayStatus::Ignore => "Ignore",
        }
    }

    /// Statuses set by hand that automatic updates never change
    pub fn is_sticky(&self) -> bool {
        matches!(
            self,
            PlayStatus::Finished | PlayStatus::Waiting | PlayStatus::Quit | PlayStatus::Ignore
        )
    }
}

impl fmt::Display for PlayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_lowercase().as_str() {
            "" => PlayStatus::Unset,
            "unplayed" => PlayStatus::Unplayed,
            "played" => PlayStatus::Played,
            "playing" => PlayStatus::Playing,
            "must play" | "mustplay" => PlayStatus::MustPlay,
            "finished" => PlayStatus::Finished,
            "waiting" => PlayStatus::Waiting,
            "quit" => PlayStatus::Quit,
            "ignore" => PlayStatus::Ignore,
            _ => return Err(UnknownStatus(s.to_string())),
        };
        Ok(status)
    }
}

impl From<Option<String>> for PlayStatus {
    fn from(cell: Option<String>) -> Self {
        let Some(cell) = cell else {
            return PlayStatus::Unset;
        };
        cell.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, treating as unset", e);
            PlayStatus::Unset
        })
    }
}

impl From<PlayStatus> for String {
    fn from(status: PlayStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Next status for a game given its current status and hours played.
///
/// - unknown hours: nothing changes
/// - Finished, Waiting, Quit and Ignore never change
/// - Must Play holds until the game reaches [`PLAYED_HOURS`]
/// - otherwise: under 0.5h Unplayed, under 1h Played, then Playing
pub fn next_status(current: PlayStatus, hours: Option<f64>) -> PlayStatus {
    let Some(hours) = hours.filter(|h| h.is_finite()) else {
        return current;
    };
    if current.is_sticky() {
        return current;
    }
    if current == PlayStatus::MustPlay && hours < PLAYED_HOURS {
        return current;
    }

    let next = if hours >= PLAYING_HOURS {
        PlayStatus::Playing
    } else if hours >= PLAYED_HOURS {
        PlayStatus::Played
    } else {
        PlayStatus::Unplayed
    };

    if next != current {
        tracing::debug!("Play status {:?} -> {:?} at {} hours", current, next, hours);
    }
    next
}

/// [`next_status`] for an hours cell that may hold a number, a numeric
/// string or junk
pub fn next_status_value(current: PlayStatus, hours: &Value) -> PlayStatus {
    next_status(current, coerce_number(hours))
}
