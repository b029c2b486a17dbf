use slotti::components::gemini::models::{Candidate, Content, GenerateContentResponse, Part};
use slotti::components::gemini::{build_prompt, pick_candidate};
use slotti::components::google_calendar::time::FreeInterval;
use chrono::{TimeZone, Utc};
use std::collections::HashSet;

fn candidate(text: &str) -> Candidate {
    serde_json::from_value(serde_json::json!({
        "content": { "parts": [{ "text": text }] }
    }))
    .unwrap()
}

#[test]
fn test_pick_candidate_empty_list() {
    assert!(pick_candidate(&[]).is_none());
}

#[test]
fn test_pick_candidate_covers_all_candidates() {
    let candidates = vec![candidate("hike"), candidate("museum"), candidate("concert")];

    // Statistical: with 300 draws the chance of missing any of the three
    // candidates is negligible
    let mut seen = HashSet::new();
    for _ in 0..300 {
        let picked = pick_candidate(&candidates).unwrap();
        seen.insert(picked.text().unwrap().to_string());
    }

    assert_eq!(seen.len(), 3);
}

#[test]
fn test_candidate_text_missing_parts() {
    let empty = Candidate {
        content: Content { parts: Vec::new() },
    };
    assert!(empty.text().is_none());

    let full = Candidate {
        content: Content {
            parts: vec![Part {
                text: "picnic".to_string(),
            }],
        },
    };
    assert_eq!(full.text(), Some("picnic"));
}

#[test]
fn test_response_parsing_with_candidates() {
    let body = r#"{
        "candidates": [
            { "content": { "parts": [{ "text": "Evening pottery class" }], "role": "model" },
              "finishReason": "STOP" }
        ],
        "modelVersion": "gemini-2.0-flash"
    }"#;

    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    let candidates = response.candidates.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].text(), Some("Evening pottery class"));
}

#[test]
fn test_response_parsing_without_candidates() {
    let body = r#"{ "modelVersion": "gemini-2.0-flash" }"#;

    let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
    assert!(response.candidates.is_none());
}

#[test]
fn test_prompt_embeds_intervals_and_persona() {
    let intervals = vec![FreeInterval {
        start: Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 5, 1, 17, 0, 0).unwrap(),
    }];

    let prompt = build_prompt(&intervals);

    assert!(prompt.contains("18 years old in Los Angeles"));
    assert!(prompt.contains("2024-05-01T15:00:00+00:00"));
    assert!(prompt.contains("2024-05-01T17:00:00+00:00"));
    assert!(prompt.contains("Just pick one event that fits."));
}
