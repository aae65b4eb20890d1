//! Storefront boundary - the records the Steam client hands to the core, and
//! small helpers around Steam ids, keys and links.
//!
//! The HTTP client itself is not part of this crate; it implements
//! [`Storefront`].

use crate::error::StorefrontError;
use crate::matching::Titled;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

const STORE_APP_URL: &str = "https://store.steampowered.com/app/";

pub const NO_DATA: &str = "No Data";
pub const NO_SCORE: &str = "No Score";
pub const NO_REVIEWS: &str = "No Reviews";
pub const NO_YEAR: &str = "No Year";
pub const PAGE_ERROR: &str = "Page Error";

/// Game from GetOwnedGames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub appid: u64,
    #[serde(default)]
    pub name: String,
    /// Total playtime in minutes
    #[serde(default)]
    pub playtime_forever: u64,
}

/// Entry from the full app catalog (GetAppList)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppListEntry {
    pub appid: u64,
    pub name: String,
}

impl Titled for AppListEntry {
    fn title(&self) -> &str {
        &self.name
    }
}

impl Titled for OwnedGame {
    fn title(&self) -> &str {
        &self.name
    }
}

/// User review aggregate for one app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ReviewSummary {
    Scored { percent: f64, total: u64 },
    NoReviews,
    /// Review page could not be reached
    PageError,
}

impl ReviewSummary {
    /// Percent positive, as a spreadsheet cell
    pub fn percent_display(&self) -> String {
        match self {
            ReviewSummary::Scored { percent, .. } => format!("{:.0}%", percent * 100.0),
            ReviewSummary::NoReviews => NO_REVIEWS.to_string(),
            ReviewSummary::PageError => PAGE_ERROR.to_string(),
        }
    }

    pub fn total_display(&self) -> String {
        match self {
            ReviewSummary::Scored { total, .. } => total.to_string(),
            ReviewSummary::NoReviews => NO_REVIEWS.to_string(),
            ReviewSummary::PageError => PAGE_ERROR.to_string(),
        }
    }
}

/// Store metadata for one app. Missing fields stay `None` and render as the
/// sentinel strings the spreadsheet expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(default)]
    pub developers: Option<String>,
    #[serde(default)]
    pub publishers: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub early_access: bool,
    #[serde(default)]
    pub metacritic: Option<u8>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub price: Option<String>,
    /// Discount as a fraction, 0.0 when not on sale
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub drm_notice: Option<String>,
    #[serde(default)]
    pub ext_user_account_notice: Option<String>,
    #[serde(default)]
    pub linux_compat: bool,
}

impl GameInfo {
    pub fn developers_display(&self) -> &str {
        self.developers.as_deref().unwrap_or(NO_DATA)
    }

    pub fn publishers_display(&self) -> &str {
        self.publishers.as_deref().unwrap_or(NO_DATA)
    }

    pub fn genre_display(&self) -> &str {
        self.genre.as_deref().unwrap_or(NO_DATA)
    }

    pub fn price_display(&self) -> &str {
        self.price.as_deref().unwrap_or(NO_DATA)
    }

    pub fn metacritic_display(&self) -> String {
        self.metacritic
            .map(|score| score.to_string())
            .unwrap_or_else(|| NO_SCORE.to_string())
    }

    pub fn release_year_display(&self) -> String {
        self.release_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| NO_YEAR.to_string())
    }

    pub fn early_access_display(&self) -> &'static str {
        yes_no(self.early_access)
    }

    pub fn on_sale(&self) -> bool {
        self.discount > 0.0
    }

    pub fn on_sale_display(&self) -> &'static str {
        yes_no(self.on_sale())
    }

    pub fn categories_display(&self) -> &str {
        self.categories.as_deref().unwrap_or(NO_DATA)
    }

    pub fn drm_notice_display(&self) -> &str {
        self.drm_notice.as_deref().unwrap_or(NO_DATA)
    }

    pub fn ext_user_account_notice_display(&self) -> &str {
        self.ext_user_account_notice.as_deref().unwrap_or(NO_DATA)
    }

    pub fn linux_compat_display(&self) -> &'static str {
        if self.linux_compat {
            "Supported"
        } else {
            "Unsupported"
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// What the core needs from a storefront client
pub trait Storefront {
    fn owned_games(&self) -> Result<Vec<OwnedGame>, StorefrontError>;
    fn recently_played(&self, count: usize) -> Result<Vec<OwnedGame>, StorefrontError>;
    fn app_list(&self) -> Result<Vec<AppListEntry>, StorefrontError>;
    fn review_summary(&self, appid: u64) -> Result<ReviewSummary, StorefrontError>;
    fn game_info(&self, appid: u64) -> Result<GameInfo, StorefrontError>;
}

/// Store page for an app
pub fn store_link(appid: u64) -> String {
    format!("{}{}/", STORE_APP_URL, appid)
}

/// Steam IDs are exactly 17 digits. Accepts numbers and numeric strings.
pub fn validate_steam_id(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_u64().is_some_and(|id| id.to_string().len() == 17),
        Value::String(s) => s.len() == 17 && s.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Steam Web API keys are 32 alphanumeric characters
pub fn validate_steam_key(key: &str) -> bool {
    key.len() == 32 && key.bytes().all(|b| b.is_ascii_alphanumeric())
}

static PROFILE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://steamcommunity\.com/id/([^/\s]+)/?$").expect("valid profile regex")
});

/// Vanity name from a community profile URL such as
/// `http://steamcommunity.com/id/gabelogannewell/`
pub fn profile_username(url: &str) -> Option<String> {
    PROFILE_URL
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

static IGNORE_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(beta|public test(ing)?|playtest|demo|dedicated server|soundtrack|sdk)\b")
        .expect("valid ignore regex")
});

/// Decides which owned apps should never be tracked
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    /// Lowercased names
    names: Vec<String>,
    appids: Vec<u64>,
}

impl IgnoreRules {
    pub fn new<S: AsRef<str>>(names: &[S], appids: &[u64]) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_lowercase()).collect(),
            appids: appids.to_vec(),
        }
    }

    /// True when the app id or name is ignored, or the name looks like a
    /// beta, demo, test branch or other non-game app
    pub fn should_ignore(&self, appid: Option<u64>, name: Option<&str>) -> bool {
        if let Some(appid) = appid {
            if self.appids.contains(&appid) {
                return true;
            }
        }
        if let Some(name) = name {
            if self.names.contains(&name.to_lowercase()) {
                return true;
            }
            if IGNORE_KEYWORDS.is_match(name) {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewSummary::Scored { percent, total } => {
                write!(f, "{:.0}% of {} reviews", percent * 100.0, total)
            }
            ReviewSummary::NoReviews => write!(f, "{}", NO_REVIEWS),
            ReviewSummary::PageError => write!(f, "{}", PAGE_ERROR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_link() {
        assert_eq!(store_link(752590), "https://store.steampowered.com/app/752590/");
        assert_eq!(store_link(629730), "https://store.steampowered.com/app/629730/");
    }

    #[test]
    fn test_validate_steam_id() {
        assert!(validate_steam_id(&Value::from(76561197960287930u64)));
        assert!(validate_steam_id(&Value::from("76561197960287930")));
        assert!(!validate_steam_id(&Value::from(765611028793u64)));
        assert!(!validate_steam_id(&Value::from("asjkdhadsjdhjssaj")));
        assert!(!validate_steam_id(&Value::Null));
    }

    #[test]
    fn test_validate_steam_key() {
        assert!(validate_steam_key("15D4C014D419C0642B1E707BED41G7D4"));
        assert!(!validate_steam_key("15D4C014D419C0642B7D4"));
    }

    #[test]
    fn test_profile_username() {
        let expected = Some("gabelogannewell".to_string());
        assert_eq!(profile_username("http://steamcommunity.com/id/gabelogannewell"), expected);
        assert_eq!(profile_username("http://steamcommunity.com/id/gabelogannewell/"), expected);
        assert_eq!(profile_username("this is not a url"), None);
    }

    #[test]
    fn test_should_ignore() {
        let rules = IgnoreRules::new(&["Half-Life 2: Lost Coast"], &[61600, 12345864489]);

        assert!(rules.should_ignore(Some(61600), None));
        assert!(rules.should_ignore(Some(12345864489), None));
        assert!(rules.should_ignore(None, Some("Game Beta")));
        assert!(rules.should_ignore(None, Some("Squad - Public Testing")));
        assert!(rules.should_ignore(None, Some("Half-Life 2: Lost Coast")));

        assert!(!rules.should_ignore(Some(345643), None));
        assert!(!rules.should_ignore(None, Some("This is a great game")));
        assert!(!rules.should_ignore(None, Some("Demolition Company")));
        assert!(!rules.should_ignore(None, None));
    }

    #[test]
    fn test_game_info_defaults() {
        let info = GameInfo::default();
        assert_eq!(info.developers_display(), "No Data");
        assert_eq!(info.publishers_display(), "No Data");
        assert_eq!(info.genre_display(), "No Data");
        assert_eq!(info.metacritic_display(), "No Score");
        assert_eq!(info.release_year_display(), "No Year");
        assert_eq!(info.price_display(), "No Data");
        assert_eq!(info.early_access_display(), "No");
        assert_eq!(info.linux_compat_display(), "Unsupported");
        assert_eq!(info.on_sale_display(), "No");
        assert_eq!(info.drm_notice_display(), "No Data");
        assert_eq!(info.categories_display(), "No Data");
        assert_eq!(info.ext_user_account_notice_display(), "No Data");
        assert!(!info.on_sale());
    }

    #[test]
    fn test_game_info_filled() {
        let info = GameInfo {
            discount: 0.25,
            categories: Some("Single-player, Steam Achievements".to_string()),
            drm_notice: Some("Denuvo Anti-tamper".to_string()),
            ..Default::default()
        };
        assert!(info.on_sale());
        assert_eq!(info.on_sale_display(), "Yes");
        assert_eq!(info.categories_display(), "Single-player, Steam Achievements");
        assert_eq!(info.drm_notice_display(), "Denuvo Anti-tamper");
        assert_eq!(info.ext_user_account_notice_display(), "No Data");
    }

    #[test]
    fn test_review_summary_display() {
        let scored = ReviewSummary::Scored {
            percent: 0.94,
            total: 1200,
        };
        assert_eq!(scored.percent_display(), "94%");
        assert_eq!(scored.total_display(), "1200");
        assert_eq!(ReviewSummary::NoReviews.percent_display(), "No Reviews");
        assert_eq!(ReviewSummary::PageError.total_display(), "Page Error");
    }

    #[test]
    fn test_owned_game_deserializes_steam_payload() {
        let json =
            r#"{"appid": 123, "name": "Game 1", "playtime_forever": 10, "img_icon_url": "abc"}"#;
        let game: OwnedGame = serde_json::from_str(json).unwrap();
        assert_eq!(game.appid, 123);
        assert_eq!(game.name, "Game 1");
        assert_eq!(game.playtime_forever, 10);
    }

    /// In-memory storefront standing in for the Steam client
    struct FakeStore {
        owned: Vec<OwnedGame>,
        apps: Vec<AppListEntry>,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                owned: vec![
                    OwnedGame {
                        appid: 1145360,
                        name: "Hades".to_string(),
                        playtime_forever: 800,
                    },
                    OwnedGame {
                        appid: 752590,
                        name: "A Plague Tale: Innocence".to_string(),
                        playtime_forever: 0,
                    },
                ],
                apps: vec![
                    AppListEntry {
                        appid: 1145360,
                        name: "Hades".to_string(),
                    },
                    AppListEntry {
                        appid: 1145350,
                        name: "Hades II".to_string(),
                    },
                ],
            }
        }
    }

    impl Storefront for FakeStore {
        fn owned_games(&self) -> Result<Vec<OwnedGame>, StorefrontError> {
            Ok(self.owned.clone())
        }

        fn recently_played(&self, count: usize) -> Result<Vec<OwnedGame>, StorefrontError> {
            Ok(self.owned.iter().take(count).cloned().collect())
        }

        fn app_list(&self) -> Result<Vec<AppListEntry>, StorefrontError> {
            Ok(self.apps.clone())
        }

        fn review_summary(&self, appid: u64) -> Result<ReviewSummary, StorefrontError> {
            match appid {
                1145360 => Ok(ReviewSummary::Scored {
                    percent: 0.98,
                    total: 250000,
                }),
                752590 => Ok(ReviewSummary::NoReviews),
                _ => Err(StorefrontError::NotFound(appid)),
            }
        }

        fn game_info(&self, appid: u64) -> Result<GameInfo, StorefrontError> {
            if self.apps.iter().any(|app| app.appid == appid) {
                Ok(GameInfo {
                    developers: Some("Supergiant Games".to_string()),
                    ..Default::default()
                })
            } else {
                Err(StorefrontError::NotFound(appid))
            }
        }
    }

    #[test]
    fn test_storefront_owned_games_feed_tracked_records() {
        use crate::record::TrackedGame;
        use crate::status::PlayStatus;
        use chrono::NaiveDate;

        let now = NaiveDate::from_ymd_opt(2022, 4, 22)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let store = FakeStore::new();

        let tracked: Vec<TrackedGame> = store
            .owned_games()
            .unwrap()
            .iter()
            .map(|owned| {
                let mut game = TrackedGame::new(owned);
                game.update(Some(owned.playtime_forever as f64), now);
                game
            })
            .collect();

        assert_eq!(tracked[0].hours_played, Some(13.3));
        assert_eq!(tracked[0].play_status, PlayStatus::Playing);
        assert_eq!(tracked[1].hours_played, None);
        assert_eq!(tracked[1].play_status, PlayStatus::Unplayed);
        assert_eq!(store.recently_played(1).unwrap().len(), 1);
    }

    #[test]
    fn test_storefront_app_list_resolves_names() {
        use crate::matching::resolve_app_id;

        let store = FakeStore::new();
        let apps = store.app_list().unwrap();
        assert_eq!(resolve_app_id("Hades", &apps), Some(1145360));
        assert_eq!(resolve_app_id("Hadez", &apps), Some(1145360));
        assert_eq!(resolve_app_id("HADES II™", &apps), Some(1145350));
    }

    #[test]
    fn test_storefront_errors() {
        let store = FakeStore::new();
        let err = store.game_info(42).unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(42)));
        assert_eq!(err.to_string(), "app 42 not found");
        assert!(store.review_summary(42).is_err());

        assert_eq!(store.review_summary(752590).unwrap().percent_display(), "No Reviews");
        assert_eq!(store.game_info(1145350).unwrap().developers_display(), "Supergiant Games");
    }
}
