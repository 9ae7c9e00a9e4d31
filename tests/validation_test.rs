use metric_table_renderer::schemas::render::{ValidationError, parse_render_request};
use serde_json::json;

fn sample_row() -> serde_json::Value {
    json!({ "referring_domains": 10, "domain_rating": 55, "backlinks": 200 })
}

#[test]
fn accepts_minimal_valid_payload() {
    let payload = json!({ "id": "abc123", "body": [sample_row()] });
    let request = parse_render_request(&payload).unwrap();

    assert_eq!(request.id, "abc123");
    assert_eq!(request.rows.len(), 1);
    assert_eq!(request.rows[0].referring_domains, "10");
    assert_eq!(request.rows[0].domain_rating, "55");
    assert_eq!(request.rows[0].backlinks, "200");
}

#[test]
fn coerces_values_to_display_strings() {
    let payload = json!({
        "id": "abc123",
        "body": [
            { "referring_domains": "1,024", "domain_rating": 12.5, "backlinks": true }
        ]
    });
    let request = parse_render_request(&payload).unwrap();

    // Strings pass through unquoted; everything else renders as JSON.
    assert_eq!(request.rows[0].referring_domains, "1,024");
    assert_eq!(request.rows[0].domain_rating, "12.5");
    assert_eq!(request.rows[0].backlinks, "true");
}

#[test]
fn null_field_counts_as_present() {
    let payload = json!({
        "id": "abc123",
        "body": [
            { "referring_domains": null, "domain_rating": 55, "backlinks": 200 }
        ]
    });
    let request = parse_render_request(&payload).unwrap();
    assert_eq!(request.rows[0].referring_domains, "null");
}

#[test]
fn rejects_missing_or_invalid_id() {
    let row = sample_row();

    for payload in [
        json!({ "body": [row.clone()] }),
        json!({ "id": "", "body": [row.clone()] }),
        json!({ "id": 42, "body": [row.clone()] }),
    ] {
        assert_eq!(
            parse_render_request(&payload).unwrap_err(),
            ValidationError::MissingFields
        );
    }
}

#[test]
fn rejects_missing_or_invalid_body() {
    for payload in [
        json!({ "id": "abc123" }),
        json!({ "id": "abc123", "body": "rows" }),
        json!({ "id": "abc123", "body": [] }),
    ] {
        assert_eq!(
            parse_render_request(&payload).unwrap_err(),
            ValidationError::MissingFields
        );
    }
}

#[test]
fn rejects_row_missing_any_field() {
    for missing in ["referring_domains", "domain_rating", "backlinks"] {
        let mut row = sample_row();
        row.as_object_mut().unwrap().remove(missing);
        let payload = json!({ "id": "abc123", "body": [sample_row(), row] });

        assert_eq!(
            parse_render_request(&payload).unwrap_err(),
            ValidationError::IncompleteRow
        );
    }
}

#[test]
fn keeps_all_rows_for_the_renderer_to_truncate() {
    let rows: Vec<_> = (0..8).map(|_| sample_row()).collect();
    let payload = json!({ "id": "abc123", "body": rows });
    let request = parse_render_request(&payload).unwrap();
    assert_eq!(request.rows.len(), 8);
}
