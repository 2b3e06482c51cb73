use super::*;
use std::io::Cursor;

fn read(text: &str) -> Vec<Result<Section, PbsError>> {
    SectionReader::new(Cursor::new(text.to_string()), "test.txt").collect()
}

const SAMPLE: &str = "\
# See the documentation on the wiki to learn how to edit this file.
#-------------------------------
[TACKLE]
Name = Tackle   # inline comment
Power = 40

[GROWL]
Name = Growl
";

#[test]
fn test_reads_sections_in_order() {
    let sections: Vec<Section> = read(SAMPLE).into_iter().map(Result::unwrap).collect();
    assert_eq!(sections.len(), 2);

    assert_eq!(sections[0].name, "TACKLE");
    assert_eq!(sections[0].header.line_number(), 3);
    assert_eq!(sections[0].entries.len(), 2);
    assert_eq!(sections[0].get("Name").unwrap().lines[0].value, "Tackle");
    assert_eq!(sections[0].get("Power").unwrap().lines[0].provenance.line_number(), 5);

    assert_eq!(sections[1].name, "GROWL");
    assert!(!sections[1].contains_key("Power"));
}

#[test]
fn test_header_name_is_trimmed() {
    let sections = read("[  SPACED  ]\nA = 1\n");
    assert_eq!(sections[0].as_ref().unwrap().name, "SPACED");
}

#[test]
fn test_empty_file_has_no_sections() {
    assert!(read("").is_empty());
    assert!(read("# only comments\n\n   \n").is_empty());
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let sections = read("\u{feff}[A]\nX = 1\n");
    assert_eq!(sections[0].as_ref().unwrap().name, "A");
}

#[test]
fn test_data_before_section_is_fatal() {
    let results = read("Name = Tackle\n[TACKLE]\n");
    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(PbsError::Format { message, provenance }) => {
            assert!(message.starts_with("Expected a section at the beginning of the file."));
            assert_eq!(provenance.line_number(), 1);
            assert_eq!(provenance.section(), None);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_bad_line_syntax_is_fatal() {
    let results = read("[A]\nX = 1\n[B]\nnot a key value\nY = 2\n");
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(PbsError::Format { message, provenance }) => {
            assert_eq!(message, "Bad line syntax (expected syntax like XXX=YYY).");
            assert_eq!(provenance.section(), Some("B"));
            assert_eq!(provenance.line_number(), 4);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_repeating_keys_accumulate() {
    let text = "[BULBASAUR]\nMove = TACKLE\nMove = GROWL\nMove = VINEWHIP\n";
    let section = SectionReader::new(Cursor::new(text), "pokemon.txt")
        .with_repeating_keys(["Move"])
        .next()
        .unwrap()
        .unwrap();

    let moves = section.get("Move").unwrap();
    assert!(moves.repeating);
    let values: Vec<&str> = moves.lines.iter().map(|l| l.value.as_str()).collect();
    assert_eq!(values, vec!["TACKLE", "GROWL", "VINEWHIP"]);
}

#[test]
fn test_duplicate_key_last_wins() {
    let section = read("[A]\nX = 1\nX = 2\n").remove(0).unwrap();
    let x = section.get("X").unwrap();
    assert_eq!(x.lines.len(), 1);
    assert_eq!(x.last().unwrap().value, "2");
}

#[test]
fn test_lines_in_file_order() {
    let section = SectionReader::new(Cursor::new("[A]\nX = 1\nY = 2\nX = 3\n"), "f.txt")
        .with_repeating_keys(["X"])
        .next()
        .unwrap()
        .unwrap();
    let keys: Vec<&str> = section.lines().map(|l| l.value.as_str()).collect();
    assert_eq!(keys, vec!["1", "2", "3"]);
}

#[test]
fn test_errors_keep_their_own_provenance() {
    let text = "[A]\nX = 1\n";
    let first = SectionReader::new(Cursor::new(format!("{text}bad one\n")), "f.txt")
        .next()
        .unwrap()
        .unwrap_err();
    let second = SectionReader::new(Cursor::new(format!("{text}\n\nbad two\n")), "f.txt")
        .next()
        .unwrap()
        .unwrap_err();

    assert_eq!(first.provenance().unwrap().line_number(), 3);
    assert_eq!(first.provenance().unwrap().text(), "bad one");
    assert_eq!(second.provenance().unwrap().line_number(), 5);
    assert_eq!(second.provenance().unwrap().text(), "bad two");
}

#[test]
fn test_cancellation_stops_without_partial_section() {
    let flag = Arc::new(AtomicBool::new(false));
    let mut reader = SectionReader::new(Cursor::new("[A]\nX = 1\n[B]\nY = 2\n"), "f.txt")
        .with_cancel(Arc::clone(&flag));

    assert_eq!(reader.next().unwrap().unwrap().name, "A");
    flag.store(true, Ordering::Relaxed);
    assert!(matches!(reader.next(), Some(Err(PbsError::Cancelled))));
    assert!(reader.next().is_none());
}

#[test]
fn test_stream_stops_after_fatal_error() {
    let mut reader = SectionReader::new(Cursor::new("oops\n[A]\nX = 1\n"), "f.txt");
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
}
