//! Integration tests for realistic editing sequences.
//!
//! These exercise the full stack — piece chain, history, markers, and
//! the line index — through the public API, the way an editor would.

use tessera_buffer::{BufferError, CaretPos, MarkerBias, PieceTable, Reader};

fn content(table: &PieceTable) -> String {
    String::from_utf8(table.text()).expect("document is valid UTF-8")
}

#[test]
fn test_type_word_then_undo_it_entirely() {
    let mut table = PieceTable::new(b"");

    for (i, ch) in "hello".char_indices() {
        table.insert(i, &ch.to_string());
    }
    assert_eq!(content(&table), "hello");
    // Single-rune appends merge into one piece but stay separate undo
    // steps.
    assert_eq!(table.piece_count(), 1);
    assert_eq!(table.undo_depth(), 5);

    while table.undo().is_some() {}
    assert_eq!(content(&table), "");
    assert_eq!(table.undo_depth(), 0);
    assert_eq!(table.redo_depth(), 5);

    while table.redo().is_some() {}
    assert_eq!(content(&table), "hello");
}

#[test]
fn test_replace_no_op_round_trip() {
    let mut table = PieceTable::new(b"hello world");
    let mut buf = vec![0u8; 5];
    let n = table.read_at(&mut buf, 0);
    buf.truncate(n);
    let snippet = String::from_utf8(buf).expect("ascii");

    // Rewriting a range with its own content changes nothing visible but
    // still records a step.
    table.replace(0, 5, &snippet);
    assert_eq!(content(&table), "hello world");
    assert_eq!(table.undo_depth(), 1);

    table.undo();
    assert_eq!(content(&table), "hello world");
}

#[test]
fn test_interleaved_edits_and_undo() {
    let mut table = PieceTable::new(b"fn main() {}");

    table.insert(11, "\n    println!(\"hi\");\n");
    assert_eq!(content(&table), "fn main() {\n    println!(\"hi\");\n}");
    assert_eq!(table.lines(), 3);

    table.replace(26, 28, "ho");
    assert!(content(&table).contains("\"ho\""));

    table.undo();
    assert!(content(&table).contains("\"hi\""));
    table.undo();
    assert_eq!(content(&table), "fn main() {}");
    assert_eq!(table.lines(), 1);
}

#[test]
fn test_grouped_batch_collapses_nested_groups() {
    let mut table = PieceTable::new(b"");

    table.group_op();
    table.insert(0, "one ");
    table.group_op();
    table.insert(4, "two ");
    table.ungroup_op();
    table.insert(8, "three");
    table.ungroup_op();

    assert_eq!(content(&table), "one two three");
    assert_eq!(table.undo_depth(), 3);

    // All three edits revert as a single batch.
    let carets = table.undo().expect("one batch");
    assert_eq!(carets.len(), 3);
    assert_eq!(content(&table), "");
    assert!(table.undo().is_none());

    let carets = table.redo().expect("one batch");
    assert_eq!(carets.len(), 3);
    assert_eq!(content(&table), "one two three");
}

#[test]
fn test_edits_outside_groups_stay_separate() {
    let mut table = PieceTable::new(b"");
    table.group_op();
    table.insert(0, "grouped ");
    table.ungroup_op();
    table.insert(8, "loose");

    table.undo();
    assert_eq!(content(&table), "grouped ");
    table.undo();
    assert_eq!(content(&table), "");
}

#[test]
fn test_marker_bias_at_insertion_point() {
    let mut table = PieceTable::new(b"hello,world");
    let forward = table.create_marker(6, MarkerBias::Forward);
    let backward = table.create_marker(6, MarkerBias::Backward);

    table.insert(6, "golang");
    assert_eq!(table.marker_offset(forward), Ok(12));
    assert_eq!(table.marker_offset(backward), Ok(6));
}

#[test]
fn test_marker_collapses_into_deleted_range() {
    let mut table = PieceTable::new(b"Hello,golang world");
    let inside = table.create_marker(9, MarkerBias::Backward);
    let after = table.create_marker(14, MarkerBias::Backward);

    table.erase(5, 13);
    assert_eq!(content(&table), "Helloworld");
    assert_eq!(table.marker_offset(inside), Ok(5));
    assert_eq!(table.marker_offset(after), Ok(6));

    table.undo();
    assert_eq!(table.marker_offset(inside), Ok(9));
    assert_eq!(table.marker_offset(after), Ok(14));
}

#[test]
fn test_markers_survive_undo_redo_cycles() {
    let mut table = PieceTable::new(b"abcdef");
    let marker = table.create_marker(3, MarkerBias::Forward);

    table.insert(0, "__");
    table.erase(4, 6);
    table.insert(4, "XY");

    let after_edits = table.marker_offset(marker).expect("live marker");

    table.undo();
    table.undo();
    table.undo();
    assert_eq!(table.marker_offset(marker), Ok(3));
    assert_eq!(content(&table), "abcdef");

    table.redo();
    table.redo();
    table.redo();
    assert_eq!(table.marker_offset(marker), Ok(after_edits));
}

#[test]
fn test_multibyte_round_trip() {
    let mut table = PieceTable::new(b"");
    table.insert(0, "héllo");
    table.insert(5, " wörld");
    assert_eq!(table.len(), 11);
    assert_eq!(table.byte_len(), 13);

    table.erase(1, 2);
    assert_eq!(content(&table), "hllo wörld");

    table.undo();
    assert_eq!(content(&table), "héllo wörld");
    assert_eq!(table.read_rune_at(1), Ok('é'));
}

#[test]
fn test_line_index_through_editor_session() {
    let mut table = PieceTable::new(b"");
    table.insert(0, "let x = 1;\nlet y = 2;");
    assert_eq!(table.lines(), 2);

    // Split the second statement onto its own block.
    table.insert(21, "\nlet z = x + y;");
    assert_eq!(table.lines(), 3);

    let (bytes, start) = table.read_line(2).expect("line 2");
    assert_eq!(bytes, b"let z = x + y;");
    assert_eq!(start, 22);

    // Join everything back into one line.
    table.erase(10, 11);
    table.erase(20, 21);
    assert_eq!(table.lines(), 1);

    table.undo();
    table.undo();
    assert_eq!(table.lines(), 3);
}

#[test]
fn test_reader_sees_committed_state() {
    let mut table = PieceTable::new(b"");
    table.insert(0, "alpha ");
    table.insert(6, "beta");

    let mut reader = Reader::new(&table);
    assert_eq!(reader.read_all(), b"alpha beta");
}

#[test]
fn test_caret_positions_follow_batches() {
    let mut table = PieceTable::new(b"0123456789");
    table.group_op();
    table.erase(0, 2);
    table.insert(0, "ab");
    table.ungroup_op();

    let carets = table.undo().expect("one batch");
    // LIFO: the insert reverts first (zero-width), then the erase
    // uncovers its restored range.
    assert_eq!(
        carets,
        vec![
            CaretPos { start: 0, end: 0 },
            CaretPos { start: 0, end: 2 },
        ]
    );
}

#[test]
fn test_dead_marker_errors() {
    let mut table = PieceTable::new(b"abc");
    let marker = table.create_marker(1, MarkerBias::Backward);
    table.destroy_marker(marker);
    assert_eq!(table.marker_offset(marker), Err(BufferError::DeadMarker));
}

#[test]
fn test_set_text_starts_a_fresh_session() {
    let mut table = PieceTable::new(b"old contents");
    table.insert(0, "scratch ");
    assert!(table.changed());

    table.set_text(b"new contents\n");
    assert!(table.changed());
    assert_eq!(content(&table), "new contents\n");
    assert_eq!(table.lines(), 2);
    assert!(table.undo().is_none());
}
