use bytes::Bytes;
use stagepipe::error::{Error, Result};
use stagepipe::prelude::*;
use stagepipe::text::{LineNumberer, LineSplitter, Utf8Decoder};

mod common;
use common::strings;

fn split_push(splitter: LineSplitter, chunks: &[&str]) -> Result<Vec<String>> {
    let (sink, lines) = CollectSink::shared();
    let mut head = push_chain::<String>().stage(splitter).into_sink(sink);
    send(strings(chunks), &mut head)?;
    let out = lines.lock().unwrap().clone();
    Ok(out)
}

fn split_pull(splitter: LineSplitter, chunks: &[&str]) -> Result<Vec<String>> {
    from_iter(strings(chunks)).stage(splitter).collect()
}

fn split_both(chunks: &[&str]) -> Vec<String> {
    let pushed = split_push(LineSplitter::new(), chunks).unwrap();
    let pulled = split_pull(LineSplitter::new(), chunks).unwrap();
    assert_eq!(pushed, pulled, "push and pull disagree for {chunks:?}");
    pushed
}

#[test]
fn units_cross_chunk_boundaries() {
    assert_eq!(split_both(&["ab\ncd", "\n", "ef"]), vec!["ab", "cd", "ef"]);
}

#[test]
fn only_delimiters_yield_empty_units() {
    assert_eq!(split_both(&["\n\n"]), vec!["", ""]);
    assert_eq!(split_both(&["\n", "\n", "\n"]), vec!["", "", ""]);
}

#[test]
fn no_chunks_emit_nothing() {
    assert!(split_both(&[]).is_empty());
}

#[test]
fn empty_chunks_emit_nothing() {
    assert!(split_both(&["", "", ""]).is_empty());
}

#[test]
fn boundary_on_delimiter_adds_no_trailing_unit() {
    assert_eq!(split_both(&["ab\n", "cd\n"]), vec!["ab", "cd"]);
    assert_eq!(split_both(&["ab\n"]), vec!["ab"]);
}

#[test]
fn trailing_partial_unit_is_flushed() {
    assert_eq!(split_both(&["one\ntw", "o"]), vec!["one", "two"]);
}

#[test]
fn consecutive_delimiters_are_not_coalesced() {
    assert_eq!(split_both(&["a\n\nb"]), vec!["a", "", "b"]);
    assert_eq!(split_both(&["a\n", "\n", "b"]), vec!["a", "", "b"]);
}

#[test]
fn single_character_chunks() {
    let input = "x\ny\n\nz";
    let chunks: Vec<String> = input.chars().map(String::from).collect();
    let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
    assert_eq!(split_both(&refs), vec!["x", "y", "", "z"]);
}

#[test]
fn custom_multibyte_delimiter() -> Result<()> {
    let out = split_push(LineSplitter::new().delimiter('¶'), &["a¶b", "¶", "c"])?;
    assert_eq!(out, vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn strip_cr_handles_crlf() -> Result<()> {
    let out = split_push(LineSplitter::new().strip_cr(true), &["a\r", "\nb\r\n", "c\r"])?;
    assert_eq!(out, vec!["a", "b", "c"]);

    let raw = split_push(LineSplitter::new(), &["a\r\n"])?;
    assert_eq!(raw, vec!["a\r"]);
    Ok(())
}

#[test]
fn pending_text_waits_for_delimiter() -> Result<()> {
    let (sink, lines) = CollectSink::shared();
    let mut head = push_chain::<String>()
        .stage(LineSplitter::new())
        .into_sink(sink);

    head.accept(String::from("abc"))?;
    assert_eq!(head.stage().pending(), "abc");
    assert!(lines.lock().unwrap().is_empty());

    head.accept(String::from("\nde"))?;
    assert_eq!(head.stage().pending(), "de");
    assert_eq!(*lines.lock().unwrap(), vec!["abc"]);

    head.finish()?;
    assert_eq!(*lines.lock().unwrap(), vec!["abc", "de"]);
    Ok(())
}

#[test]
fn over_long_line_fails_the_stage() {
    let err = split_push(LineSplitter::new().max_line_bytes(4), &["ab", "cdef", "\n"]).unwrap_err();
    assert!(
        matches!(err, Error::Stage { stage: "line_splitter", .. }),
        "unexpected error: {err}"
    );

    let ok = split_push(LineSplitter::new().max_line_bytes(4), &["abcd\nef"]).unwrap();
    assert_eq!(ok, vec!["abcd", "ef"]);
}

#[test]
fn numbered_lines_start_at_zero() -> Result<()> {
    let (sink, lines) = CollectSink::shared();
    let mut head = push_chain::<String>()
        .stage(LineSplitter::new())
        .stage(LineNumberer::new())
        .into_sink(sink);

    send(strings(&["first\nsec", "ond\n\nlast"]), &mut head)?;

    assert_eq!(
        *lines.lock().unwrap(),
        vec!["0: first", "1: second", "2: ", "3: last"]
    );
    Ok(())
}

#[test]
fn numbering_start_is_configurable() -> Result<()> {
    let lines = from_iter(strings(&["a", "b"]))
        .stage(LineNumberer::new().starting_at(1))
        .collect::<Result<Vec<_>>>()?;
    assert_eq!(lines, vec!["1: a", "2: b"]);
    Ok(())
}

#[test]
fn numbering_past_the_last_index_fails_the_stage() {
    let mut lines = from_iter(strings(&["a", "b", "c"]))
        .stage(LineNumberer::new().starting_at(u64::MAX));

    assert_eq!(lines.next().unwrap().unwrap(), format!("{}: a", u64::MAX));
    let err = lines.next().unwrap().unwrap_err();
    assert!(
        matches!(err, Error::Stage { stage: "line_numberer", .. }),
        "unexpected error: {err}"
    );
    assert!(lines.next().is_none());
}

fn decode_lines(chunks: Vec<Bytes>) -> Result<Vec<String>> {
    from_iter(chunks)
        .stage(Utf8Decoder::new())
        .stage(LineSplitter::new())
        .collect()
}

#[test]
fn multibyte_char_split_across_chunks() -> Result<()> {
    let text = "café\nnaïve\n".as_bytes();
    // Cut inside the two-byte 'é'.
    let at = "caf".len() + 1;
    let chunks = vec![
        Bytes::copy_from_slice(&text[..at]),
        Bytes::copy_from_slice(&text[at..]),
    ];
    assert_eq!(decode_lines(chunks)?, vec!["café", "naïve"]);
    Ok(())
}

#[test]
fn invalid_bytes_are_replaced() -> Result<()> {
    let chunks = vec![Bytes::from_static(b"ok\n\xffbad\n")];
    assert_eq!(decode_lines(chunks)?, vec!["ok", "\u{FFFD}bad"]);
    Ok(())
}

#[test]
fn incomplete_sequence_at_end_is_replaced() -> Result<()> {
    let chunks = vec![Bytes::from_static(b"tail \xe2\x82")];
    assert_eq!(decode_lines(chunks)?, vec!["tail \u{FFFD}"]);
    Ok(())
}
