use super::*;

#[test]
fn display_names_the_condition() {
    let d = Diagnostic::UnknownOpcode {
        packet: Some(7),
        opcode: 12,
    };
    assert_eq!(d.to_string(), "unknown CDG instruction 12 at packet 7");

    let d = Diagnostic::OutOfBoundsDraw { row: 18, column: 3 };
    assert!(d.to_string().contains("row 18, column 3"));

    let d = Diagnostic::TruncatedStream { trailing_bytes: 5 };
    assert!(d.to_string().contains("5 trailing bytes"));
}

#[test]
fn collecting_sink_keeps_order() {
    let mut sink = CollectingSink::new();
    sink.report(Diagnostic::TruncatedStream { trailing_bytes: 1 });
    sink.report(Diagnostic::OutOfBoundsDraw { row: 0, column: 50 });
    assert_eq!(sink.len(), 2);
    assert_eq!(
        sink.take(),
        vec![
            Diagnostic::TruncatedStream { trailing_bytes: 1 },
            Diagnostic::OutOfBoundsDraw { row: 0, column: 50 },
        ]
    );
    assert!(sink.is_empty());
}

#[test]
fn closures_are_sinks() {
    let mut seen = 0;
    {
        let mut sink = |_d: Diagnostic| seen += 1;
        sink.report(Diagnostic::TruncatedStream { trailing_bytes: 2 });
        sink.report(Diagnostic::TruncatedStream { trailing_bytes: 3 });
    }
    assert_eq!(seen, 2);
}

#[test]
fn serializes_with_kind_tag() {
    let json = serde_json::to_value(Diagnostic::OutOfBoundsDraw { row: 1, column: 2 }).unwrap();
    assert_eq!(json["kind"], "out_of_bounds_draw");
    assert_eq!(json["column"], 2);
}
