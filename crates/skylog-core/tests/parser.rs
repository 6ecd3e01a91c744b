use skylog_core::log::{parse_log, FieldValue, ParseError};

#[test]
fn test_typing_matrix() {
    let records = parse_log("time,AX,label,empty\n0,-1.5e2,apogee,\n").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value("AX"), Some(&FieldValue::Number(-150.0)));
    assert_eq!(
        records[0].value("label"),
        Some(&FieldValue::Text("apogee".to_string()))
    );
    assert_eq!(records[0].value("empty"), None);
}

#[test]
fn test_null_time_row_dropped() {
    // A row whose time cell is empty or non-numeric never becomes a record.
    let records = parse_log("time,AX\n,1\nabc,2\n30,3\n").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].time, 30.0);
}

#[test]
fn test_time_only_row_dropped() {
    // Bookkeeping rows carrying nothing but a timestamp are filtered out.
    let records = parse_log("time,AX,AY\n10,,\n20,1,\n").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].time, 20.0);
}

#[test]
fn test_nan_time_row_dropped() {
    let records = parse_log("time,AX\nNaN,1\n5,2\n").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].time, 5.0);
}

#[test]
fn test_structural_errors() {
    assert_eq!(parse_log(""), Err(ParseError::Empty));
    assert_eq!(parse_log("AX,AY\n1,2\n"), Err(ParseError::MissingTimeColumn));
}

#[test]
fn test_header_only_log_is_valid() {
    let records = parse_log("time,AX\n").unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_crlf_and_padding() {
    let records = parse_log("time, AX\r\n0 , 1.5\r\n").unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number("AX"), Some(1.5));
}

#[test]
fn test_file_order_preserved() {
    let records = parse_log("time,AX\n20,1\n0,2\n10,3\n").unwrap();

    let times: Vec<f64> = records.iter().map(|r| r.time).collect();
    assert_eq!(times, vec![20.0, 0.0, 10.0]);
}
