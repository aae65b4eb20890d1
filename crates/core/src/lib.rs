//! Tracker core - title matching, normalization, time accounting and play status
//! for a personal game library.
//!
//! Everything here is synchronous and free of network or storage I/O. The
//! storefront client and the persistence layer live outside this crate and
//! talk to it through the types in [`steam`] and [`record`].

pub mod config;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod numeric;
pub mod recency;
pub mod record;
pub mod status;
pub mod steam;
pub mod time;

pub use config::TrackerConfig;
pub use error::{ConfigError, StorefrontError, TimeError, UnknownStatus};
pub use matching::{
    best_match, distance, find_app_id, rank_matches, resolve_app_id, Ranked, Titled, TopMatcher,
};
pub use normalize::{clean_for_search, list_to_sentence, slugify, strip_decorations};
pub use numeric::{coerce_number, parse_number};
pub use recency::RunRecord;
pub use record::TrackedGame;
pub use status::{next_status, PlayStatus};
pub use steam::{AppListEntry, GameInfo, IgnoreRules, OwnedGame, ReviewSummary, Storefront};
pub use time::{convert_duration, days_since, extract_year, hours_played, DurationParts};
