use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::{Map, Value, json};

use crate::config::Presentation;
use crate::foundation::error::BoardResult;
use crate::view::View;
use crate::view::registry::ViewConfig;
use crate::view::schema::{ConfigSchema, FieldKind, FieldRule};

const TEMPLATE: &str = r#"<template direction="column">
{{- with .Title }}
  <template height="{{ div $.Height $.Rows }}" justify="center" align="center">
    <text>{{ . | xml }}</text>
  </template>
{{- end }}
{{- range $i, $g := .Games }}
  <template height="{{ div $.Height $.Rows }}" justify="space-between" align="center">
    <text>{{ $g.Away | upper | xml }} {{ $g.AwayScore }}</text>
    <text>{{ $g.Home | upper | xml }} {{ $g.HomeScore }}</text>
    <text>{{ if $g.Final }}F{{ else }}{{ ordinal $g.Period }}{{ end }}</text>
  </template>
{{- else }}
  <template justify="center" align="center">
    <text>No games</text>
  </template>
{{- end }}
</template>"#;

/// One game line.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Game {
    /// Home team abbreviation.
    pub home: String,
    /// Away team abbreviation.
    pub away: String,
    /// Home score.
    #[serde(default)]
    pub home_score: u32,
    /// Away score.
    #[serde(default)]
    pub away_score: u32,
    /// Current period (inning, quarter, ...).
    #[serde(default)]
    pub period: u32,
    /// Game is over.
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

impl Game {
    fn to_value(&self) -> Value {
        json!({
            "Home": self.home,
            "Away": self.away,
            "HomeScore": self.home_score,
            "AwayScore": self.away_score,
            "Period": self.period,
            "Final": self.is_final,
        })
    }
}

/// Source of live scores.
pub trait ScoreFeed: Send + Sync + Debug {
    /// Current games.
    fn games(&self) -> BoardResult<Vec<Game>>;
}

/// Fixed list of games.
#[derive(Clone, Debug, Default)]
pub struct StaticFeed {
    games: Vec<Game>,
}

impl StaticFeed {
    /// Feed that always returns `games`.
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }
}

impl ScoreFeed for StaticFeed {
    fn games(&self) -> BoardResult<Vec<Game>> {
        Ok(self.games.clone())
    }
}

/// Configuration of the `scoreboard` view.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreboardConfig {
    /// Optional header line.
    #[serde(default)]
    pub title: Option<String>,
    /// Games served by a [`StaticFeed`].
    #[serde(default)]
    pub games: Vec<Game>,
    /// Seconds between feed polls.
    #[serde(default = "default_refresh")]
    pub refresh_secs: u64,
}

fn default_refresh() -> u64 {
    30
}

impl ViewConfig for ScoreboardConfig {
    const KIND: &'static str = "scoreboard";

    fn schema() -> ConfigSchema {
        let score = || FieldKind::int(Some(0), Some(i64::from(u32::MAX)));
        let game = FieldKind::object(vec![
            FieldRule::required("home", FieldKind::string(Some(1), Some(8))),
            FieldRule::required("away", FieldKind::string(Some(1), Some(8))),
            FieldRule::optional("home_score", score()),
            FieldRule::optional("away_score", score()),
            FieldRule::optional("period", score()),
            FieldRule::optional("final", FieldKind::Bool),
        ]);
        ConfigSchema::new()
            .field(FieldRule::optional("title", FieldKind::string(Some(1), Some(64))))
            .field(FieldRule::optional("games", FieldKind::list(game)))
            .field(FieldRule::optional(
                "refresh_secs",
                FieldKind::int(Some(1), Some(86_400)),
            ))
    }

    fn build(self, _presentation: &Presentation) -> BoardResult<Arc<dyn View>> {
        Ok(Arc::new(ScoreboardView::new(
            Box::new(StaticFeed::new(self.games)),
            self.title,
            Duration::from_secs(self.refresh_secs),
        )))
    }
}

/// One row per game, pulled from a [`ScoreFeed`].
#[derive(Debug)]
pub struct ScoreboardView {
    feed: Box<dyn ScoreFeed>,
    title: Option<String>,
    refresh: Duration,
    games: Mutex<Vec<Game>>,
}

impl ScoreboardView {
    /// Scoreboard over `feed`, polled every `refresh`.
    pub fn new(feed: Box<dyn ScoreFeed>, title: Option<String>, refresh: Duration) -> Self {
        Self {
            feed,
            title,
            refresh,
            games: Mutex::new(Vec::new()),
        }
    }
}

impl View for ScoreboardView {
    fn kind(&self) -> &'static str {
        ScoreboardConfig::KIND
    }

    fn template(&self) -> String {
        TEMPLATE.to_owned()
    }

    fn data(&self) -> Map<String, Value> {
        let games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = games.len() + usize::from(self.title.is_some());
        let mut m = Map::new();
        m.insert("Title".into(), self.title.clone().into());
        m.insert(
            "Games".into(),
            Value::Array(games.iter().map(Game::to_value).collect()),
        );
        m.insert("Rows".into(), rows.max(1).into());
        m
    }

    fn update(&self) -> BoardResult<()> {
        let fresh = self.feed.games()?;
        *self.games.lock().unwrap_or_else(PoisonError::into_inner) = fresh;
        Ok(())
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.refresh)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/scoreboard.rs"]
mod tests;
