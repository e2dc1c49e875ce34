use storedesk_core::{
    apply, ConfigurationError, FieldDescriptor, FieldRegistry, FieldValue, ListOptions, Query,
    Record, SortDirection,
};

fn order_registry() -> FieldRegistry {
    FieldRegistry::new(vec![
        FieldDescriptor::new("id", "ID"),
        FieldDescriptor::new("date", "Date"),
        FieldDescriptor::new("customer_name", "Customer"),
        FieldDescriptor::new("note", "Note").not_comparable(),
        FieldDescriptor::new("status", "Status"),
        FieldDescriptor::new("amount", "Amount").not_searchable(),
    ])
    .unwrap()
}

fn order(id: &str, customer: &str, note: &str, status: &str, amount: i64) -> Record {
    Record::new()
        .with("id", id)
        .with("date", "2024-04-01")
        .with("customer_name", customer)
        .with("note", note)
        .with("status", status)
        .with("amount", amount)
}

fn sample_orders() -> Vec<Record> {
    vec![
        order("O1", "Sato", "Rush delivery", "完了", 1200),
        order("O2", "Suzuki", "", "未完了", 300),
        order("O3", "sato trading", "gift wrap", "未完了", 1200),
        order("O4", "Tanaka", "call before", "完了", 50),
    ]
}

fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.get("id").map(FieldValue::render).unwrap_or_default())
        .collect()
}

#[test]
fn empty_keyword_returns_all_records_in_input_order() {
    let records = sample_orders();
    let page = apply(
        &records,
        &Query::default(),
        &order_registry(),
        &ListOptions::default(),
    )
    .unwrap();

    assert_eq!(page.rows, records);
    assert_eq!(page.total_matched, 4);
    assert_eq!(page.padded_rows, 0);
    assert_eq!(page.page_count(), 1);
}

#[test]
fn keyword_in_single_field_scope() {
    let records = vec![
        Record::new().with("id", "O1").with("status", "完了"),
        Record::new().with("id", "O2").with("status", "未完了"),
    ];
    let registry = FieldRegistry::new(vec![
        FieldDescriptor::new("id", "ID"),
        FieldDescriptor::new("status", "Status"),
    ])
    .unwrap();

    let page = apply(
        &records,
        &Query::new("O2").in_field("id"),
        &registry,
        &ListOptions::default(),
    )
    .unwrap();

    assert_eq!(page.rows, vec![records[1].clone()]);
    assert_eq!(page.total_matched, 1);
}

#[test]
fn keyword_matching_is_case_insensitive_substring() {
    let records = sample_orders();
    let page = apply(
        &records,
        &Query::new("SATO").in_field("customer_name"),
        &order_registry(),
        &ListOptions::default(),
    )
    .unwrap();

    assert_eq!(ids(&page.rows), vec!["O1", "O3"]);
    for row in &page.rows {
        let rendered = row.get("customer_name").unwrap().render().to_lowercase();
        assert!(rendered.contains("sato"));
    }
}

#[test]
fn all_scope_inspects_only_searchable_fields() {
    let records = sample_orders();
    let registry = order_registry();

    let by_note = apply(&records, &Query::new("wrap"), &registry, &ListOptions::default()).unwrap();
    assert_eq!(ids(&by_note.rows), vec!["O3"]);

    // `amount` is not searchable, so its value never matches under `All`.
    let by_amount = apply(&records, &Query::new("1200"), &registry, &ListOptions::default()).unwrap();
    assert!(by_amount.rows.is_empty());
    assert_eq!(by_amount.total_matched, 0);
}

#[test]
fn numeric_fields_match_their_base10_rendering() {
    let registry = FieldRegistry::new(vec![FieldDescriptor::new("amount", "Amount")]).unwrap();
    let records = vec![
        Record::new().with("amount", 1_234_567_i64),
        Record::new().with("amount", 42_i64),
    ];

    let page = apply(&records, &Query::new("4567"), &registry, &ListOptions::default()).unwrap();
    assert_eq!(page.total_matched, 1);

    let grouped = apply(&records, &Query::new("1,234"), &registry, &ListOptions::default()).unwrap();
    assert_eq!(grouped.total_matched, 0);
}

#[test]
fn sort_by_status_is_stable() {
    let records = sample_orders();
    let page = apply(
        &records,
        &Query::default().sorted_by("status", SortDirection::Ascending),
        &order_registry(),
        &ListOptions::default(),
    )
    .unwrap();

    // "完了" < "未完了" by code point; ties keep input order.
    assert_eq!(ids(&page.rows), vec!["O1", "O4", "O2", "O3"]);
}

#[test]
fn descending_sort_keeps_ties_in_input_order() {
    let records = sample_orders();
    let page = apply(
        &records,
        &Query::default().sorted_by("amount", SortDirection::Descending),
        &order_registry(),
        &ListOptions::default(),
    )
    .unwrap();

    assert_eq!(ids(&page.rows), vec!["O1", "O3", "O2", "O4"]);
}

#[test]
fn numeric_sort_is_not_lexicographic() {
    let registry = FieldRegistry::new(vec![FieldDescriptor::new("n", "N")]).unwrap();
    let records = vec![
        Record::new().with("n", 10_i64),
        Record::new().with("n", 9_i64),
        Record::new().with("n", 100_i64),
    ];
    let page = apply(
        &records,
        &Query::default().sorted_by("n", SortDirection::Ascending),
        &registry,
        &ListOptions::default(),
    )
    .unwrap();

    let values = page
        .rows
        .iter()
        .map(|row| row.get("n").unwrap().render())
        .collect::<Vec<_>>();
    assert_eq!(values, vec!["9", "10", "100"]);
}

#[test]
fn unknown_scope_field_is_a_configuration_error() {
    let err = apply(
        &sample_orders(),
        &Query::new("x").in_field("foo"),
        &order_registry(),
        &ListOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownField("foo".to_string()));
}

#[test]
fn unknown_scope_fails_even_with_empty_keyword() {
    let err = apply(
        &sample_orders(),
        &Query::default().in_field("foo"),
        &order_registry(),
        &ListOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownField("foo".to_string()));
}

#[test]
fn disallowed_fields_are_configuration_errors() {
    let registry = order_registry();
    let records = sample_orders();

    let scope_err = apply(
        &records,
        &Query::new("1").in_field("amount"),
        &registry,
        &ListOptions::default(),
    )
    .unwrap_err();
    assert_eq!(scope_err, ConfigurationError::NotSearchable("amount".to_string()));

    let sort_err = apply(
        &records,
        &Query::default().sorted_by("note", SortDirection::Ascending),
        &registry,
        &ListOptions::default(),
    )
    .unwrap_err();
    assert_eq!(sort_err, ConfigurationError::NotComparable("note".to_string()));

    let page_err = apply(&records, &Query::default(), &registry, &ListOptions::paged(0)).unwrap_err();
    assert_eq!(page_err, ConfigurationError::ZeroPageSize);
}

#[test]
fn pages_concatenate_to_full_sorted_sequence() {
    let records = (1..=7)
        .map(|n| order(&format!("O{n}"), "Sato", "", "未完了", 8 - n))
        .collect::<Vec<_>>();
    let registry = order_registry();
    let base = Query::default().sorted_by("amount", SortDirection::Ascending);

    let full = apply(&records, &base, &registry, &ListOptions::default()).unwrap();
    let first = apply(&records, &base, &registry, &ListOptions::paged(3)).unwrap();
    assert_eq!(first.total_matched, 7);
    assert_eq!(first.page_count(), 3);

    let mut concatenated = Vec::new();
    for page_index in 0..first.page_count() {
        let page = apply(
            &records,
            &base.clone().at_page(page_index),
            &registry,
            &ListOptions::paged(3),
        )
        .unwrap();
        assert_eq!(page.total_matched, 7);
        assert_eq!(page.page, page_index);
        concatenated.extend(page.rows);
    }

    assert_eq!(concatenated, full.rows);
    assert_eq!(ids(&concatenated)[0], "O7");
}

#[test]
fn padding_appends_blank_rows_without_changing_total() {
    let records = sample_orders();
    let options = ListOptions::paged(3).with_min_rows(15);
    let page = apply(
        &records,
        &Query::new("未完了").in_field("status"),
        &order_registry(),
        &options,
    )
    .unwrap();

    assert_eq!(page.total_matched, 2);
    assert_eq!(page.rows.len(), 15);
    assert_eq!(page.padded_rows, 13);
    assert_eq!(ids(page.matched_rows()), vec!["O2", "O3"]);
    for blank in &page.rows[2..] {
        assert!(blank.is_blank());
        assert_eq!(blank.len(), order_registry().descriptors().len());
    }
}

#[test]
fn padding_is_a_no_op_when_page_is_already_full() {
    let records = sample_orders();
    let page = apply(
        &records,
        &Query::default(),
        &order_registry(),
        &ListOptions::default().with_min_rows(2),
    )
    .unwrap();
    assert_eq!(page.rows.len(), 4);
    assert_eq!(page.padded_rows, 0);
}

#[test]
fn apply_is_idempotent_and_leaves_input_untouched() {
    let records = sample_orders();
    let snapshot = records.clone();
    let query = Query::new("a").sorted_by("customer_name", SortDirection::Descending);
    let options = ListOptions::paged(2).with_min_rows(3);

    let first = apply(&records, &query, &order_registry(), &options).unwrap();
    let second = apply(&records, &query, &order_registry(), &options).unwrap();

    assert_eq!(first, second);
    assert_eq!(records, snapshot);
}

#[test]
fn empty_record_set_is_valid() {
    let page = apply(
        &[],
        &Query::new("anything"),
        &order_registry(),
        &ListOptions::paged(10),
    )
    .unwrap();
    assert!(page.rows.is_empty());
    assert_eq!(page.total_matched, 0);
    assert_eq!(page.page_count(), 0);
}

#[test]
fn result_page_serializes_for_presentation_layer() {
    let records = vec![Record::new().with("id", "O1").with("status", "完了")];
    let registry = FieldRegistry::new(vec![
        FieldDescriptor::new("id", "ID"),
        FieldDescriptor::new("status", "Status"),
    ])
    .unwrap();
    let page = apply(&records, &Query::default(), &registry, &ListOptions::paged(5)).unwrap();

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["total_matched"], 1);
    assert_eq!(json["page_size"], 5);
    assert_eq!(json["rows"][0]["fields"][0][0], "id");
    assert_eq!(json["rows"][0]["fields"][0][1]["kind"], "text");
    assert_eq!(json["rows"][0]["fields"][0][1]["value"], "O1");
}
