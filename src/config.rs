// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::read_to_string;
use std::path::Path;

use clap::ValueEnum;
use ripasso_core::IntervalTable;
use ripasso_core::ItemCount;
use ripasso_core::SessionMode;
use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "ripasso.toml";

/// Settings read from `ripasso.toml` in the collection directory. Every key
/// is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub intervals: IntervalTable,
    /// Target number of new words per week.
    pub weekly_goal: Option<usize>,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Defaults for the `session` and `drill` commands.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SessionConfig {
    pub mode: ModeName,
    pub new_items: ItemCount,
    pub review_items: ItemCount,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: ModeName::Standard,
            new_items: ItemCount::Limit(10),
            review_items: ItemCount::All,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    /// Fixed numbers of new cards and reviews.
    Standard,
    /// All due reviews, new cards scaled to the review load.
    Intelligent,
    /// The ten weakest learned cards, due or not.
    #[serde(alias = "weak-points")]
    WeakPoints,
}

impl Display for ModeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeName::Standard => write!(f, "standard"),
            ModeName::Intelligent => write!(f, "intelligent"),
            ModeName::WeakPoints => write!(f, "weak-points"),
        }
    }
}

impl Config {
    /// Read the config file in `directory`. A missing file gives the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} found, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// The session mode, with command line overrides applied on top of the
    /// configured defaults.
    pub fn session_mode(
        &self,
        mode: Option<ModeName>,
        new_items: Option<ItemCount>,
        review_items: Option<ItemCount>,
    ) -> SessionMode {
        match mode.unwrap_or(self.session.mode) {
            ModeName::Standard => SessionMode::Standard {
                new_items: new_items.unwrap_or(self.session.new_items),
                review_items: review_items.unwrap_or(self.session.review_items),
            },
            ModeName::Intelligent => SessionMode::Intelligent,
            ModeName::WeakPoints => SessionMode::WeakPoints,
        }
    }
}
