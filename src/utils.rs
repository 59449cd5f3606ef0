use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

pub const PROMPT_PREVIEW_CHARS: usize = 100;

// JavaScript-style truthiness for JSON values
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn truncate_prompt(prompt: &str) -> String {
    prompt.chars().take(PROMPT_PREVIEW_CHARS).collect()
}

/// Renders a duration value the way it was submitted, e.g. `45` -> `"45 minutes"`.
pub fn duration_label(duration: &Value) -> String {
    format!("{} minutes", js_string(duration))
}

// String conversion as a template literal would do it
fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => js_number(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// Shortest round-trip digits; exponent form outside [1e-6, 1e21).
fn js_number(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if f.abs() < 1e21 && f.abs() >= 1e-6 {
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// checking validity of the video url
pub fn valid_url(url: &str) -> bool {
    url::Url::parse(url).is_ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(""), json!(0), json!(0.0), json!(false)] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
        for value in [json!(" "), json!(1), json!(-3), json!(true), json!([]), json!({})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn prompt_is_cut_at_one_hundred_characters() {
        let long = "a".repeat(250);
        assert_eq!(truncate_prompt(&long).chars().count(), 100);
        assert_eq!(truncate_prompt("short"), "short");
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let long = "é".repeat(120);
        let cut = truncate_prompt(&long);
        assert_eq!(cut.chars().count(), 100);
        assert_eq!(cut, "é".repeat(100));
    }

    #[test]
    fn duration_labels() {
        assert_eq!(duration_label(&json!(45)), "45 minutes");
        assert_eq!(duration_label(&json!(45.0)), "45 minutes");
        assert_eq!(duration_label(&json!(42.5)), "42.5 minutes");
        assert_eq!(duration_label(&json!("60")), "60 minutes");
    }

    #[test]
    fn extreme_floats_use_exponent_form() {
        assert_eq!(duration_label(&json!(1e20)), "100000000000000000000 minutes");
        assert_eq!(duration_label(&json!(1e21)), "1e+21 minutes");
        assert_eq!(duration_label(&json!(1.5e300)), "1.5e+300 minutes");
        assert_eq!(duration_label(&json!(-2e22)), "-2e+22 minutes");
        assert_eq!(duration_label(&json!(0.000001)), "0.000001 minutes");
        assert_eq!(duration_label(&json!(1e-7)), "1e-7 minutes");
        assert_eq!(duration_label(&json!(-0.0)), "0 minutes");
    }

    #[test]
    fn non_numeric_durations_are_stringified() {
        assert_eq!(duration_label(&json!(true)), "true minutes");
        assert_eq!(duration_label(&json!([45])), "45 minutes");
        assert_eq!(duration_label(&json!([30, null, "x"])), "30,,x minutes");
        assert_eq!(duration_label(&json!({"m": 1})), "[object Object] minutes");
    }

    #[test]
    fn timestamp_has_millis_and_zulu_suffix() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 1).unwrap();
        assert_eq!(iso_timestamp(at), "2024-03-09T08:05:01.000Z");
    }

    #[test]
    fn url_validation() {
        assert!(valid_url("https://example.com/video.mp4"));
        assert!(!valid_url("not a url"));
    }
}
