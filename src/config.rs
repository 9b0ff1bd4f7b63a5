//! Page-level tuning read from an optional inline JSON block. Every value is
//! optional; anything missing, malformed or out of bounds keeps its default.

use log::LevelFilter;
use serde::Deserialize;

use crate::contact::{FormTiming, DEFAULT_SEND_DELAY_MS, DEFAULT_SUCCESS_VISIBLE_MS};
use crate::typed::{
    TypingTiming, DEFAULT_DELETE_SPEED_MS, DEFAULT_PAUSE_MS, DEFAULT_PHRASES,
    DEFAULT_START_DELAY_MS, DEFAULT_TYPE_SPEED_MS,
};

pub const CONFIG_ELEMENT_ID: &str = "motion-config";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

const TYPE_SPEED_MS_BOUNDS: (u32, u32) = (10, 1_000);
const DELETE_SPEED_MS_BOUNDS: (u32, u32) = (10, 1_000);
const PAUSE_MS_BOUNDS: (u32, u32) = (0, 30_000);
const START_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const SEND_DELAY_MS_BOUNDS: (u32, u32) = (0, 30_000);
const SUCCESS_VISIBLE_MS_BOUNDS: (u32, u32) = (500, 60_000);
const MAX_PHRASES: usize = 32;

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub phrases: Vec<String>,
    pub typing: TypingTiming,
    pub form: FormTiming,
    pub log_level: LevelFilter,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(ToString::to_string).collect(),
            typing: TypingTiming::default(),
            form: FormTiming::default(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawMotionConfig {
    phrases: Option<Vec<String>>,
    type_speed_ms: Option<u32>,
    delete_speed_ms: Option<u32>,
    pause_ms: Option<u32>,
    start_delay_ms: Option<u32>,
    send_delay_ms: Option<u32>,
    success_visible_ms: Option<u32>,
    log_level: Option<String>,
}

impl MotionConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let raw: RawMotionConfig = serde_json::from_str(raw)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawMotionConfig) -> Self {
        let typing = TypingTiming {
            type_ms: within(raw.type_speed_ms, DEFAULT_TYPE_SPEED_MS, TYPE_SPEED_MS_BOUNDS),
            delete_ms: within(raw.delete_speed_ms, DEFAULT_DELETE_SPEED_MS, DELETE_SPEED_MS_BOUNDS),
            pause_ms: within(raw.pause_ms, DEFAULT_PAUSE_MS, PAUSE_MS_BOUNDS),
            start_delay_ms: within(raw.start_delay_ms, DEFAULT_START_DELAY_MS, START_DELAY_MS_BOUNDS),
        };
        let form = FormTiming {
            send_delay_ms: within(raw.send_delay_ms, DEFAULT_SEND_DELAY_MS, SEND_DELAY_MS_BOUNDS),
            success_visible_ms: within(
                raw.success_visible_ms,
                DEFAULT_SUCCESS_VISIBLE_MS,
                SUCCESS_VISIBLE_MS_BOUNDS,
            ),
        };

        Self {
            phrases: parse_phrases(raw.phrases),
            typing,
            form,
            log_level: parse_log_level(raw.log_level.as_deref(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn within(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_phrases(phrases: Option<Vec<String>>) -> Vec<String> {
    let cleaned: Vec<String> = phrases
        .unwrap_or_default()
        .into_iter()
        .map(|phrase| phrase.trim().to_string())
        .filter(|phrase| !phrase.is_empty())
        .take(MAX_PHRASES)
        .collect();

    if cleaned.is_empty() {
        DEFAULT_PHRASES.iter().map(ToString::to_string).collect()
    } else {
        cleaned
    }
}

fn parse_log_level(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    match value.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => default,
    }
}
