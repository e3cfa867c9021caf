//! Extraction behavior through the public API
//!
//! Run with: cargo test --test extraction

use serde::Deserialize;
use simple_mcp::{
    AppError, BraceScan, CandidateSource, DecodeKind, ErrorCode, ExtractError, ExtractionPolicy,
    JsonOutputParser, Message, extract_and_decode, extract_candidate,
};

#[derive(Debug, Deserialize, PartialEq)]
struct Answer {
    answer: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Report {
    title: String,
    tags: Vec<String>,
    score: f64,
}

// ============================================================================
// Documented cases
// ============================================================================

#[test]
fn test_fenced_answer_with_prose() {
    let raw = "Here is the result:\n```json\n{\"answer\": \"ok\"}\n```\nThanks.";
    let parsed: Answer = extract_and_decode(raw, &ExtractionPolicy::default()).unwrap();
    assert_eq!(
        parsed,
        Answer {
            answer: "ok".to_string()
        }
    );
}

#[test]
fn test_unbalanced_input() {
    let result: Result<Answer, _> =
        extract_and_decode("{\"answer\": \"partial\"", &ExtractionPolicy::default());
    assert!(matches!(
        result,
        Err(ExtractError::UnbalancedBraces { start: 0 })
    ));
}

#[test]
fn test_no_json() {
    let result: Result<Answer, _> = extract_and_decode("no json here", &ExtractionPolicy::default());
    assert_eq!(result.unwrap_err(), ExtractError::NoCandidateFound);
}

#[test]
fn test_type_mismatch_is_decode_error() {
    let result: Result<Answer, _> =
        extract_and_decode("{\"answer\": 123}", &ExtractionPolicy::default());
    match result.unwrap_err() {
        ExtractError::Decode { kind, message, .. } => {
            assert_eq!(kind, DecodeKind::Shape);
            assert!(message.contains("invalid type"));
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn test_two_fenced_blocks_use_first() {
    let raw = "```json\n{\"answer\": \"first\"}\n```\nand also\n```json\n{\"answer\": \"second\"}\n```";
    let parsed: Answer = extract_and_decode(raw, &ExtractionPolicy::default()).unwrap();
    assert_eq!(parsed.answer, "first");
}

#[test]
fn test_reextracting_candidate_is_stable() {
    let raw = "Sure!\n```json\n{\"title\": \"Q3\", \"tags\": [\"a\", \"b\"], \"score\": 0.5}\n```";
    let policy = ExtractionPolicy::default();

    let candidate = extract_candidate(raw, &policy).unwrap();
    let from_raw: Report = extract_and_decode(raw, &policy).unwrap();
    let from_candidate: Report = extract_and_decode(candidate.text, &policy).unwrap();
    assert_eq!(from_raw, from_candidate);
}

// ============================================================================
// Bare objects in prose
// ============================================================================

#[test]
fn test_single_object_with_prose() {
    let policy = ExtractionPolicy::default();
    let bodies = [
        "{\"answer\": \"x\"}",
        "{ \"answer\" : \"x\" }",
        "{\n  \"answer\": \"x\"\n}",
    ];
    let wrappers = [
        ("", ""),
        ("The answer is ", "."),
        ("Result:\n", "\n\nLet me know!"),
        ("(see below) ", " -- done"),
    ];

    for body in bodies {
        for (before, after) in wrappers {
            let raw = format!("{before}{body}{after}");
            let candidate = extract_candidate(&raw, &policy).unwrap();
            assert_eq!(candidate.source, CandidateSource::BraceSpan);
            let parsed: Answer = extract_and_decode(&raw, &policy).unwrap();
            assert_eq!(parsed.answer, "x", "input: {raw:?}");
        }
    }
}

#[test]
fn test_richer_target_shape() {
    let raw = r#"Report follows {"title": "Weekly {summary}", "tags": ["ops"], "score": 9.5} end"#;
    let parsed: Report = extract_and_decode(raw, &ExtractionPolicy::default()).unwrap();
    assert_eq!(parsed.title, "Weekly {summary}");
    assert_eq!(parsed.tags, vec!["ops".to_string()]);
}

#[test]
fn test_naive_policy_differs_on_quoted_braces() {
    let raw = r#"{"title": "a } b", "tags": [], "score": 1}"#;

    let aware: Report = extract_and_decode(raw, &ExtractionPolicy::default()).unwrap();
    assert_eq!(aware.title, "a } b");

    let naive = ExtractionPolicy::default().with_brace_scan(BraceScan::Naive);
    let err = extract_and_decode::<Report>(raw, &naive).unwrap_err();
    assert!(err.is_decode());
}

// ============================================================================
// Parser and error codes
// ============================================================================

#[test]
fn test_parser_from_message() {
    let parser = JsonOutputParser::<Answer>::default();
    let msg = Message::assistant("```\n{\"answer\": \"from message\"}\n```");
    assert_eq!(
        parser.parse_message(Some(&msg)).unwrap().answer,
        "from message"
    );
    assert_eq!(
        parser.parse_message(None).unwrap_err(),
        ExtractError::EmptyInput
    );
}

#[test]
fn test_extract_errors_map_to_invalid_parameter() {
    let errors = [
        ExtractError::EmptyInput,
        ExtractError::NoCandidateFound,
        ExtractError::UnbalancedBraces { start: 3 },
    ];
    for err in errors {
        let app = AppError::from(err);
        assert_eq!(app.code, ErrorCode::InvalidParameter);
    }
}

#[test]
fn test_concurrent_callers() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let raw = format!("thread {i}: ```json\n{{\"answer\": \"{i}\"}}\n```");
                let parsed: Answer =
                    extract_and_decode(&raw, &ExtractionPolicy::default()).unwrap();
                parsed.answer
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i.to_string());
    }
}
