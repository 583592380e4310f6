use serde_json::{Map, Value};
use thiserror::Error;

use crate::{AnalysisView, CaptionEntry, Decision, Platform, PlatformBlock};

pub const MULTI_PLATFORM_ORDER: [Platform; 3] =
    [Platform::Instagram, Platform::Facebook, Platform::Linkedin];

const INSIGHT_KEYS: [&str; 8] = [
    "sentiment",
    "engagement_score",
    "toxicity_level",
    "readability",
    "visual_appeal",
    "authenticity",
    "best_time_to_post",
    "engagement_prediction",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const APPROVED_REASON: &str =
    "Content analyzed by AI models (Transformers + OpenCV) - Safe for posting";
const FLAGGED_REASON: &str =
    "Content contains potentially sensitive material detected by ML models";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("unrecognized payload shape")]
    UnrecognizedPayloadShape,
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

pub fn normalize(raw: &Value) -> Result<AnalysisView, NormalizeError> {
    let platforms = match raw.get("captions") {
        Some(Value::Array(captions)) => vec![platform_scoped_block(raw, captions)],
        Some(Value::Object(captions)) => {
            let blocks = multi_platform_blocks(raw, captions);
            if blocks.is_empty() {
                return Err(NormalizeError::UnrecognizedPayloadShape);
            }
            blocks
        }
        _ => return Err(NormalizeError::UnrecognizedPayloadShape),
    };

    let decision_label = raw
        .get("decision")
        .and_then(Value::as_str)
        .ok_or(NormalizeError::MissingField("decision"))?;
    let confidence = raw
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or(NormalizeError::MissingField("confidence"))?;

    let approved = decision_label == "approved";
    let reason = if approved { APPROVED_REASON } else { FLAGGED_REASON };

    Ok(AnalysisView {
        decision: Decision {
            approved,
            confidence_percent: round_one_decimal(confidence * 100.0),
            reason: reason.to_string(),
        },
        platforms,
        insights: collect_insights(raw),
        schedule: collect_schedule(raw),
        original_text: string_field(raw, "originalText"),
        original_image: string_field(raw, "originalImage"),
    })
}

fn platform_scoped_block(raw: &Value, captions: &[Value]) -> PlatformBlock {
    let platform = raw
        .get("platform")
        .and_then(Value::as_str)
        .and_then(Platform::from_str)
        .unwrap_or(Platform::Instagram);
    let groups = raw
        .get("hashtags")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    PlatformBlock {
        platform,
        captions: pair_captions(captions, groups),
    }
}

fn multi_platform_blocks(raw: &Value, captions: &Map<String, Value>) -> Vec<PlatformBlock> {
    let hashtags = raw.get("hashtags");
    MULTI_PLATFORM_ORDER
        .iter()
        .filter_map(|platform| {
            let list = captions.get(platform.label()).and_then(Value::as_array)?;
            let groups = hashtags
                .and_then(|value| value.get(platform.label()))
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            Some(PlatformBlock {
                platform: *platform,
                captions: pair_captions(list, groups),
            })
        })
        .collect()
}

// Captions and hashtag groups are positionally paired; mismatched lengths
// truncate to the shorter side.
fn pair_captions(captions: &[Value], groups: &[Value]) -> Vec<CaptionEntry> {
    let count = captions.len().min(groups.len());
    (0..count)
        .map(|index| CaptionEntry {
            text: captions[index].as_str().unwrap_or_default().to_string(),
            default_hashtags: string_list(&groups[index]),
        })
        .collect()
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn collect_insights(raw: &Value) -> Vec<(String, String)> {
    let map = match raw.get("insights").and_then(Value::as_object) {
        Some(map) => map,
        None => return Vec::new(),
    };

    let mut insights = Vec::new();
    for key in INSIGHT_KEYS {
        if let Some(value) = map.get(key) {
            insights.push((key.to_string(), display_value(value)));
        }
    }
    for (key, value) in map {
        if !INSIGHT_KEYS.contains(&key.as_str()) {
            insights.push((key.clone(), display_value(value)));
        }
    }
    insights
}

fn collect_schedule(raw: &Value) -> Option<Vec<(String, String)>> {
    let map = raw.get("best_time_schedule")?.as_object()?;
    let mut schedule = Vec::new();
    for day in WEEKDAYS {
        if let Some(time) = map.get(day).and_then(Value::as_str) {
            schedule.push((day.to_string(), time.to_string()));
        }
    }
    for (day, time) in map {
        if !WEEKDAYS.contains(&day.as_str()) {
            if let Some(time) = time.as_str() {
                schedule.push((day.clone(), time.to_string()));
            }
        }
    }
    Some(schedule)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
