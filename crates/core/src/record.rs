//! Per-game tracking record, as saved by the persistence layer

use crate::status::{next_status, PlayStatus};
use crate::steam::OwnedGame;
use crate::time::{hours_played, time_passed};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedGame {
    pub appid: u64,
    pub name: String,
    #[serde(default)]
    pub play_status: PlayStatus,
    /// None until the game has been played
    #[serde(default)]
    pub hours_played: Option<f64>,
    /// When the playtime last went up
    #[serde(default)]
    pub last_played: Option<NaiveDateTime>,
    /// e.g. "3.0 Weeks", refreshed on every update
    #[serde(default)]
    pub time_since_played: Option<String>,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
}

impl TrackedGame {
    pub fn new(game: &OwnedGame) -> Self {
        Self {
            appid: game.appid,
            name: game.name.clone(),
            ..Default::default()
        }
    }

    /// Apply a fresh playtime reading taken at `now`.
    ///
    /// Returns true when the playtime went up.
    pub fn update(&mut self, playtime_minutes: Option<f64>, now: NaiveDateTime) -> bool {
        let hours = hours_played(playtime_minutes);
        let played_more = match (hours, self.hours_played) {
            (Some(new), Some(old)) => new > old,
            (Some(_), None) => true,
            _ => false,
        };

        if played_more {
            self.last_played = Some(now);
        }
        if hours.is_some() {
            self.hours_played = hours;
        }

        // Never-played games still move from unset to Unplayed
        let hours_for_status = hours.or(playtime_minutes.map(|_| 0.0));
        self.play_status = next_status(self.play_status, hours_for_status);

        self.time_since_played = self.last_played.map(|played| time_passed(played, now));
        self.last_updated = Some(now);

        if played_more {
            tracing::debug!(
                "{} now at {:?} hours ({})",
                self.name,
                self.hours_played,
                self.play_status
            );
        }
        played_more
    }
}
