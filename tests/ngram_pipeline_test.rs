//! End-to-end tests for the tokenize → extract → statistics pipeline.

use std::sync::Arc;

use tanager::analysis::{SocialTokenizer, TokenizerConfig};
use tanager::ngram::{
    MessageRecord, NgramExtractor, NgramParams, compute_statistics, full_report, summarize,
};

fn default_extractor(min_n: usize, max_n: usize) -> NgramExtractor {
    NgramExtractor::new(
        NgramParams { min_n, max_n },
        Arc::new(SocialTokenizer::new(TokenizerConfig::default())),
    )
    .unwrap()
}

#[test]
fn test_within_message_dedup_scenario() {
    let records = vec![
        MessageRecord::new("m1", "a1", "go go go now"),
        MessageRecord::new("m2", "a2", "go go go it's very bad"),
        MessageRecord::new("m3", "a3", "go go go it's very bad it's very bad"),
    ];

    let extraction = default_extractor(3, 4).extract(&records).unwrap();
    let stats = compute_statistics(&extraction);

    let find = |words: &str| {
        extraction
            .definitions
            .iter()
            .find(|def| def.words == words)
            .map(|def| def.ngram_id)
    };

    // "go go go" occurs once per message: 3 in total.
    let go_id = find("go go go").unwrap();
    let go_stat = stats.iter().find(|s| s.ngram_id == go_id).unwrap();
    assert_eq!(go_stat.total_reps, 3);
    assert_eq!(go_stat.distinct_posters, 3);

    // "it's very bad" repeats twice inside the third message but is
    // counted once per message: 2 in total, not 3.
    let bad_id = find("it's very bad").unwrap();
    let bad_stat = stats.iter().find(|s| s.ngram_id == bad_id).unwrap();
    assert_eq!(bad_stat.total_reps, 2);
    assert_eq!(bad_stat.distinct_posters, 2);
}

#[test]
fn test_definitions_table_shape() {
    let records = vec![MessageRecord::new("m1", "a1", "one two three four five")];
    let extraction = default_extractor(3, 5).extract(&records).unwrap();

    // 3 trigrams + 2 four-grams + 1 five-gram, all distinct.
    assert_eq!(extraction.definitions.len(), 6);
    for def in &extraction.definitions {
        assert_eq!(def.length, def.words.split(' ').count());
        assert!((3..=5).contains(&def.length));
    }

    // IDs are contiguous from zero in first-seen order.
    let ids: Vec<u64> = extraction.definitions.iter().map(|d| d.ngram_id).collect();
    assert_eq!(ids, (0..6).collect::<Vec<u64>>());
}

#[test]
fn test_tokenizer_config_flows_through_extraction() {
    // Hashtags tokenize atomically, so they participate in n-grams.
    let records = vec![
        MessageRecord::new("m1", "a1", "buy #crypto now friends"),
        MessageRecord::new("m2", "a2", "buy #crypto now folks"),
    ];
    let extraction = default_extractor(3, 3).extract(&records).unwrap();
    let words: Vec<&str> = extraction
        .definitions
        .iter()
        .map(|def| def.words.as_str())
        .collect();
    assert!(words.contains(&"buy #crypto now"));
}

#[test]
fn test_empty_and_invalid_messages_are_skipped() {
    let records = vec![
        MessageRecord::new("m1", "a1", ""),
        MessageRecord::new("m2", "", "valid text here"),
        MessageRecord::new("m3", "a3", "valid text here"),
    ];
    let extraction = default_extractor(3, 3).extract(&records).unwrap();

    assert_eq!(extraction.messages.len(), 1);
    assert_eq!(extraction.messages[0].surrogate_id, 3);
    assert_eq!(extraction.definitions.len(), 1);
    assert_eq!(extraction.definitions[0].words, "valid text here");
}

#[test]
fn test_summary_and_report_end_to_end() {
    let records = vec![
        MessageRecord::new("m1", "bot", "act now before it ends"),
        MessageRecord::new("m2", "bot", "act now before it ends"),
        MessageRecord::new("m3", "human", "act now before it ends"),
        MessageRecord::new("m4", "human", "unrelated message entirely"),
    ];

    let extraction = default_extractor(3, 5).extract(&records).unwrap();
    let stats = compute_statistics(&extraction);
    let summary = summarize(&extraction, &stats);
    let report = full_report(&extraction, &summary);

    // The five-gram shared by three messages dominates the summary.
    assert_eq!(summary[0].words, "act now before it ends");
    assert_eq!(summary[0].length, 5);
    assert_eq!(summary[0].total_reps, 3);
    assert_eq!(summary[0].distinct_posters, 2);

    // Singleton n-grams from m4 never reach the summary.
    assert!(summary.iter().all(|row| row.total_reps > 1));

    // Report rows expand per containing message, bot first (2 reps).
    let top_rows: Vec<_> = report
        .iter()
        .filter(|row| row.words == "act now before it ends")
        .collect();
    assert_eq!(top_rows.len(), 3);
    assert_eq!(top_rows[0].author_id, "bot");
    assert_eq!(top_rows[0].reps_per_author, 2);
    assert_eq!(top_rows[2].author_id, "human");
    assert_eq!(top_rows[2].reps_per_author, 1);
}

#[test]
fn test_ngram_ids_stable_across_runs_for_same_input() {
    let records: Vec<MessageRecord> = (0..50)
        .map(|i| {
            MessageRecord::new(
                format!("m{i}"),
                format!("a{}", i % 7),
                format!("repeated filler text number {} goes here", i % 5),
            )
        })
        .collect();

    let first = default_extractor(3, 4).extract(&records).unwrap();
    let second = default_extractor(3, 4).extract(&records).unwrap();
    assert_eq!(first.definitions, second.definitions);
    assert_eq!(first.message_ngrams, second.message_ngrams);
}
