//! Report Extraction Example
//!
//! Model replies rarely come back as clean JSON, even when the prompt asks
//! for it. This example feeds a handful of realistic replies through the
//! extractor and shows what each one produces.
//!
//! ## Scenario
//!
//! The prompt asked for `{"answer": "<report text>"}`. The replies:
//! - a fenced block surrounded by chatter
//! - a bare object inside a sentence
//! - a reply cut off mid-object
//! - a reply with the wrong field type
//! - a reply with no JSON at all
//!
//! Run with: `cargo run --example report_extraction`

use serde::Deserialize;
use simple_mcp::{ExtractError, ExtractionPolicy, JsonOutputParser, extract_candidate};

#[derive(Debug, Deserialize)]
struct JsonResponse {
    answer: String,
}

fn main() {
    println!("=== Report Extraction Example ===\n");

    let replies = [
        (
            "fenced",
            "Of course! Here is the report:\n```json\n{\"answer\": \"WonjinSin report for Wherever I go on 2026-01-01\"}\n```\nAnything else?",
        ),
        (
            "bare object",
            "The report is {\"answer\": \"Quarterly {draft} summary\"} as requested.",
        ),
        ("truncated", "{\"answer\": \"The person started working"),
        ("wrong type", "{\"answer\": 2026}"),
        ("no json", "I'm sorry, I can't produce a report today."),
    ];

    let policy = ExtractionPolicy::default();
    let parser: JsonOutputParser<JsonResponse> = JsonOutputParser::with_policy(policy.clone());

    for (label, raw) in replies {
        println!("--- {label} ---");

        match extract_candidate(raw, &policy) {
            Ok(candidate) => println!("candidate ({:?}): {}", candidate.source, candidate.text),
            Err(e) => println!("candidate: none ({e})"),
        }

        match parser.parse(raw) {
            Ok(response) => println!("answer: {}", response.answer),
            Err(ExtractError::Decode { kind, message, .. }) => {
                println!("decode failed ({kind:?}): {message}")
            }
            Err(e) => println!("extraction failed: {e}"),
        }
        println!();
    }

    println!("=== Lenient policy ===\n");
    let lenient = ExtractionPolicy::lenient();
    let raw = "no braces at all";
    match extract_candidate(raw, &lenient) {
        Ok(candidate) => println!(
            "whole-text candidate ({:?}): {}",
            candidate.source, candidate.text
        ),
        Err(e) => println!("unexpected: {e}"),
    }
}
