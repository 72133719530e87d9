use json_bind::{Formatted, JsonValue};
use json_bind_time::{DateFormat, Rfc3339, TimestampMillis};
use time::macros::datetime;
use time::OffsetDateTime;

const DATES: &str = r#"{
    "lastUpdated": 1443769200000.0,
    "lastUpdatedPretty": "2015-10-02 07:00:00 +0000",
    "dates": ["2015-10-02 07:00:00 +0000", "2015-10-02 08:00:00 +0000", "2015-10-02 09:00:00 +0000"],
    "object": {"date": 1443769200000.0},
    "stamps": ["2015-10-02T07:00:00Z", "not a date"]
}"#;

fn doc() -> JsonValue {
    JsonValue::decode_str(DATES).unwrap()
}

#[test]
fn test_single_dates() {
    let doc = doc();
    let expected = datetime!(2015-10-02 07:00:00 UTC);
    assert_eq!(doc.format::<TimestampMillis>().retrieve("lastUpdated"), Some(expected));
    assert_eq!(doc.format::<DateFormat>().retrieve("lastUpdatedPretty"), Some(expected));
}

#[test]
fn test_date_array() {
    let dates = doc().format::<DateFormat>().retrieve_vec("dates").unwrap();
    assert_eq!(
        dates,
        vec![
            datetime!(2015-10-02 07:00:00 UTC),
            datetime!(2015-10-02 08:00:00 UTC),
            datetime!(2015-10-02 09:00:00 UTC),
        ]
    );
}

#[test]
fn test_date_object() {
    let object = doc().format::<TimestampMillis>().retrieve_map("object").unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["date"], datetime!(2015-10-02 07:00:00 UTC));
}

#[test]
fn test_wrong_formatter_is_absent() {
    let doc = doc();
    assert_eq!(doc.format::<DateFormat>().retrieve("lastUpdated"), None);
    assert_eq!(doc.format::<Rfc3339>().retrieve_vec("stamps"), None);
    assert!(doc.format::<Rfc3339>().decode_at("stamps").is_err());
    assert_eq!(doc.format::<TimestampMillis>().retrieve("missing"), None);
}

#[test]
fn test_dates_in_records() {
    #[derive(Debug, PartialEq)]
    struct Feed {
        updated: OffsetDateTime,
        pretty: OffsetDateTime,
        count: usize,
    }

    let doc = doc();
    let feed = doc
        .record()
        .field::<Formatted<TimestampMillis>>("lastUpdated")
        .field::<Formatted<DateFormat>>("lastUpdatedPretty")
        .field::<Vec<Formatted<DateFormat>>>("dates")
        .build(
            |updated: Formatted<TimestampMillis>,
             pretty: Formatted<DateFormat>,
             dates: Vec<Formatted<DateFormat>>| Feed {
                updated: updated.into_inner(),
                pretty: pretty.into_inner(),
                count: dates.len(),
            },
        );
    let expected = datetime!(2015-10-02 07:00:00 UTC);
    assert_eq!(
        feed,
        Some(Feed {
            updated: expected,
            pretty: expected,
            count: 3,
        })
    );
}

#[test]
fn test_encode_through_formatters() {
    let dates = vec![
        Formatted::<DateFormat>(datetime!(2015-10-02 07:00:00 UTC)),
        Formatted::<DateFormat>(datetime!(2015-10-02 08:00:00 +01:00)),
    ];
    let text = json_bind::to_string(&dates).unwrap();
    assert_eq!(text, r#"["2015-10-02 07:00:00 +0000","2015-10-02 08:00:00 +0100"]"#);

    let stamp = JsonValue::encode_with::<TimestampMillis>(&datetime!(1970-01-01 00:00:01 UTC));
    assert_eq!(stamp.unwrap(), JsonValue::from(1000));
}
