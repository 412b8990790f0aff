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

//! WASM bindings for ripasso. Cards, study events and session parameters
//! cross the boundary as JSON strings; storage stays with the caller.

use wasm_bindgen::prelude::*;
use web_sys::console;

use ripasso_core::Card;
use ripasso_core::Date;
use ripasso_core::Drill;
use ripasso_core::Fallible;
use ripasso_core::IntervalTable;
use ripasso_core::SessionMode;
use ripasso_core::StudyEvent;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"ripasso WASM initialized".into());
}

fn to_js(result: Fallible<String>) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_date(today: &str) -> Fallible<Date> {
    Date::try_from(today.to_string())
}

/// The default table, or the one given as a JSON array of day counts.
fn parse_intervals(intervals_json: Option<&str>) -> Fallible<IntervalTable> {
    match intervals_json {
        Some(json) => Ok(serde_json::from_str(json)?),
        None => Ok(IntervalTable::default()),
    }
}

fn review_json(
    card_json: &str,
    remembered: bool,
    today: &str,
    intervals_json: Option<&str>,
) -> Fallible<String> {
    let card: Card = serde_json::from_str(card_json)?;
    let intervals = parse_intervals(intervals_json)?;
    let updated = ripasso_core::review_card(&card, remembered, parse_date(today)?, &intervals);
    Ok(serde_json::to_string(&updated)?)
}

fn compose_json(cards_json: &str, params_json: &str, today: &str) -> Fallible<String> {
    let cards: Vec<Card> = serde_json::from_str(cards_json)?;
    let mode: SessionMode = serde_json::from_str(params_json)?;
    let plan = ripasso_core::compose_session(&cards, &mode, parse_date(today)?);
    Ok(serde_json::to_string(&plan)?)
}

fn streak_of(events_json: &str, today: &str) -> Fallible<u32> {
    let events: Vec<StudyEvent> = serde_json::from_str(events_json)?;
    Ok(ripasso_core::compute_streak(&events, parse_date(today)?))
}

fn record_json(events_json: &str, today: &str) -> Fallible<String> {
    let events: Vec<StudyEvent> = serde_json::from_str(events_json)?;
    let events = ripasso_core::record_study_session(&events, parse_date(today)?);
    Ok(serde_json::to_string(&events)?)
}

fn stats_json(
    cards_json: &str,
    events_json: &str,
    today: &str,
    weekly_goal: Option<usize>,
    intervals_json: Option<&str>,
) -> Fallible<String> {
    let cards: Vec<Card> = serde_json::from_str(cards_json)?;
    let events: Vec<StudyEvent> = serde_json::from_str(events_json)?;
    let intervals = parse_intervals(intervals_json)?;
    let stats = ripasso_core::collection_stats(
        &cards,
        &events,
        &intervals,
        parse_date(today)?,
        weekly_goal,
    );
    Ok(serde_json::to_string(&stats)?)
}

/// Reschedule a card after a review. Returns the updated card as JSON.
#[wasm_bindgen]
pub fn review_card(
    card_json: &str,
    remembered: bool,
    today: &str,
    intervals_json: Option<String>,
) -> Result<String, JsValue> {
    to_js(review_json(
        card_json,
        remembered,
        today,
        intervals_json.as_deref(),
    ))
}

/// Pick the cards for a session. Returns the plan as JSON, or `null` when
/// there is nothing to study.
///
/// `params_json` looks like `{"mode":"standard","newItems":5,"reviewItems":"all"}`,
/// `{"mode":"intelligent"}` or `{"mode":"weak_points"}`.
#[wasm_bindgen]
pub fn compose_session(cards_json: &str, params_json: &str, today: &str) -> Result<String, JsValue> {
    to_js(compose_json(cards_json, params_json, today))
}

#[wasm_bindgen]
pub fn compute_streak(events_json: &str, today: &str) -> Result<u32, JsValue> {
    streak_of(events_json, today).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Append today to the study log if it is not there yet.
#[wasm_bindgen]
pub fn record_study_session(events_json: &str, today: &str) -> Result<String, JsValue> {
    to_js(record_json(events_json, today))
}

/// Dashboard numbers for the whole collection.
#[wasm_bindgen]
pub fn collection_stats(
    cards_json: &str,
    events_json: &str,
    today: &str,
    weekly_goal: Option<usize>,
    intervals_json: Option<String>,
) -> Result<String, JsValue> {
    to_js(stats_json(
        cards_json,
        events_json,
        today,
        weekly_goal,
        intervals_json.as_deref(),
    ))
}

/// A session being drilled in the browser.
#[wasm_bindgen]
pub struct DrillSession {
    drill: Drill,
    intervals: IntervalTable,
}

impl DrillSession {
    fn start(
        cards_json: &str,
        params_json: &str,
        today: &str,
        intervals_json: Option<&str>,
    ) -> Fallible<Option<Self>> {
        let cards: Vec<Card> = serde_json::from_str(cards_json)?;
        let mode: SessionMode = serde_json::from_str(params_json)?;
        let intervals = parse_intervals(intervals_json)?;
        let plan = ripasso_core::compose_session(&cards, &mode, parse_date(today)?);
        Ok(plan.map(|plan| Self {
            drill: Drill::new(plan),
            intervals,
        }))
    }

    fn grade_json(&mut self, remembered: bool, today: &str) -> Fallible<String> {
        let updated = self
            .drill
            .grade(remembered, parse_date(today)?, &self.intervals)?;
        Ok(serde_json::to_string(&updated)?)
    }
}

#[wasm_bindgen]
impl DrillSession {
    /// Start a drill. Returns `undefined` when there is nothing to study.
    #[wasm_bindgen]
    pub fn begin(
        cards_json: &str,
        params_json: &str,
        today: &str,
        intervals_json: Option<String>,
    ) -> Result<Option<DrillSession>, JsValue> {
        Self::start(cards_json, params_json, today, intervals_json.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The card to show, as JSON.
    #[wasm_bindgen]
    pub fn current_card(&self) -> Option<String> {
        self.drill
            .current()
            .and_then(|card| serde_json::to_string(card).ok())
    }

    /// Grade the current card. Returns the rescheduled card, which the caller
    /// should save along with `record_study_session`.
    #[wasm_bindgen]
    pub fn grade(&mut self, remembered: bool, today: &str) -> Result<String, JsValue> {
        to_js(self.grade_json(remembered, today))
    }

    #[wasm_bindgen]
    pub fn remaining(&self) -> usize {
        self.drill.remaining()
    }

    #[wasm_bindgen]
    pub fn total(&self) -> usize {
        self.drill.total()
    }

    #[wasm_bindgen]
    pub fn is_finished(&self) -> bool {
        self.drill.is_finished()
    }

    #[wasm_bindgen]
    pub fn summary(&self) -> String {
        serde_json::to_string(&self.drill.summary()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Get today's date as a string (YYYY-MM-DD).
#[wasm_bindgen]
pub fn today_date() -> String {
    let date = js_sys::Date::new_0();
    let year = date.get_full_year();
    let month = date.get_month() + 1;
    let day = date.get_date();
    format!("{:04}-{:02}-{:02}", year, month, day)
}
