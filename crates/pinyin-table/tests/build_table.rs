//! End-to-end table builds over in-memory and tab-separated sources.

use pinyin_core::Entry;
use pinyin_table::source::{MemorySource, TsvSource};
use pinyin_table::{
    CorpusCounter, OutputFormat, OverrideTable, PinyinTable, TableBuilder, TableError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build(corpus: &str, pairs: &[(&str, &str)]) -> PinyinTable {
    TableBuilder::new(CorpusCounter::from_text(corpus))
        .build(MemorySource::from_pairs(pairs.iter().copied()))
        .unwrap()
}

fn records(table: &PinyinTable) -> Vec<String> {
    table.entries().iter().map(Entry::to_record).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn report_example() {
    let table = build("报告", &[("报告", "bào gào\nnotes...")]);
    assert_eq!(
        records(&table),
        ["告|gào|1|0", "报|bào|1|0", "报告|bào gào|1,1|0"]
    );
}

#[test]
fn unspaced_transcription_is_segmented() {
    let table = build("", &[("中国", "zhōngguó\nChina")]);
    assert_eq!(table.get("中国").unwrap().pinyin, "zhōng guó");
    assert_eq!(table.get("中").unwrap().pinyin, "zhōng");
    assert_eq!(table.get("国").unwrap().pinyin, "guó");
}

#[test]
fn first_accepted_wins() {
    let table = build(
        "",
        &[("报告", "bào gào"), ("报告", "bào gao"), ("报告", "pào gào")],
    );
    assert_eq!(table.get("报告").unwrap().pinyin, "bào gào");
    assert_eq!(table.stats().duplicates, 2);
}

#[test]
fn rejected_line_does_not_block_later_one() {
    let table = build("", &[("报告", "bào"), ("报告", "bào gào")]);
    assert_eq!(table.get("报告").unwrap().pinyin, "bào gào");
    assert_eq!(table.stats().length_mismatches, 1);
}

#[test]
fn corpus_counts_every_occurrence() {
    let table = build("报报报\n告\n", &[("报告", "bào gào")]);
    assert_eq!(table.get("报告").unwrap().frequency, vec![3, 1]);
    assert_eq!(table.get("报").unwrap().frequency, vec![3]);
}

#[test]
fn unseen_character_has_zero_frequency() {
    let table = build("报", &[("报告", "bào gào")]);
    assert_eq!(table.get("报告").unwrap().frequency, vec![1, 0]);
}

#[test]
fn word_separators_split_into_subwords() {
    let table = build("", &[("山，水", "shān, shuǐ")]);
    assert_eq!(table.get("山").unwrap().pinyin, "shān");
    assert_eq!(table.get("水").unwrap().pinyin, "shuǐ");
    assert!(table.get("山，水").is_none());
}

#[test]
fn dominant_reading_wins_single_character() {
    let table = build(
        "",
        &[
            ("长", "zhǎng"),
            ("长城", "cháng chéng"),
            ("长江", "cháng jiāng"),
        ],
    );
    let entry = table.get("长").unwrap();
    assert_eq!(entry.pinyin, "cháng");
    assert_eq!(entry.pinyin_frequency, 1);
    assert_eq!(table.stats().overwritten, 1);
}

#[test]
fn builtin_override_is_used_verbatim() {
    let table = build("", &[("䦆头", "juétou\nmattock")]);
    assert_eq!(table.get("䦆头").unwrap().pinyin, "jué tóu");
    assert_eq!(table.stats().verified, 1);
}

#[test]
fn override_still_respects_first_accepted() {
    let table = build("", &[("䦆头", "jué tou"), ("䦆头", "anything")]);
    assert_eq!(table.get("䦆头").unwrap().pinyin, "jué tóu");
    assert_eq!(table.stats().duplicates, 1);
}

#[test]
fn custom_overrides_replace_builtin() {
    let mut overrides = OverrideTable::new();
    overrides.extend_from_str("报告\tbào gào\n").unwrap();
    let table = TableBuilder::new(CorpusCounter::new())
        .with_overrides(overrides)
        .build(MemorySource::from_pairs([("报告", "garbage"), ("䦆头", "jué tóu")]))
        .unwrap();
    assert_eq!(table.get("报告").unwrap().pinyin, "bào gào");
    assert_eq!(table.stats().verified, 1);
}

#[test]
fn output_is_sorted_by_word() {
    let table = build("", &[("水", "shuǐ"), ("山", "shān"), ("中", "zhōng")]);
    let words: Vec<&str> = table.entries().iter().map(|e| e.word.as_str()).collect();
    let mut sorted = words.clone();
    sorted.sort_unstable();
    assert_eq!(words, sorted);
}

#[test]
fn tsv_source_end_to_end() {
    let text = "报告\tbàogào\\nreport\n头\ttóu\n";
    let table = TableBuilder::new(CorpusCounter::from_text("报告头"))
        .build(TsvSource::new(text.as_bytes()))
        .unwrap();
    assert_eq!(
        records(&table),
        ["告|gào|1|0", "头|tóu|1|0", "报|bào|1|0", "报告|bào gào|1,1|0"]
    );
}

#[test]
fn tsv_error_is_fatal() {
    let text = "报告\tbào gào\nno tab here\n";
    let err = TableBuilder::new(CorpusCounter::new())
        .build(TsvSource::new(text.as_bytes()))
        .unwrap_err();
    assert!(matches!(err, TableError::Source(_)));
}

#[test]
fn jsonl_output() {
    let table = build("报告", &[("报告", "bào gào")]);
    let mut buf = Vec::new();
    table.write(&mut buf, OutputFormat::Jsonl).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let last: Entry = serde_json::from_str(text.lines().last().unwrap()).unwrap();
    assert_eq!(last, Entry::new("报告", "bào gào", vec![1, 1], 0));
}

#[test]
fn pipe_output_parses_back() {
    let table = build("报告", &[("报告", "bào gào")]);
    let mut buf = Vec::new();
    table.write(&mut buf, OutputFormat::Pipe).unwrap();
    let parsed: Vec<Entry> = String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(|line| Entry::from_record(line).unwrap())
        .collect();
    assert_eq!(parsed, table.entries());
}
