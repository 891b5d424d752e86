//! Handling of empty cells and empty columns.
//!
//! Empty means null (an empty CSV cell) or the empty string. Columns that
//! allow empty values skip those cells entirely, including for whole-column
//! rules, while warnings keep the original row numbers.

use pretty_assertions::assert_eq;
use tabschema_core::{CsvOptions, Series, Table, Value, ValueKind, read_csv_str};
use tabschema_validator::{
    CanConvert, Column, CustomElementRule, CustomSeriesRule, DateFormat, HasType, InRange, InSet,
    IsDistinct, LeadingWhitespace, MatchesPattern, Rule, RuleExt, RuleRef, Schema, TargetType,
    TrailingWhitespace, Warning,
};

const SIGNUPS: &str = "\
email,signed_up,referrals
ada@example.com,2024-01-05,3
,2024-01-06,
grace@example.com,,x
ada@example.com,05/01/2024,4
";

fn signups() -> Table {
    read_csv_str(SIGNUPS, &CsvOptions::default()).unwrap()
}

fn rows(warnings: &[Warning], column: &str) -> Vec<usize> {
    warnings
        .iter()
        .filter(|w| w.column_name() == Some(column))
        .filter_map(Warning::row)
        .collect()
}

#[test]
fn test_empty_cells_fail_unless_allowed() {
    let strict = Schema::new(vec![
        Column::new("signed_up").rule(DateFormat::new("%Y-%m-%d").unwrap()),
    ])
    .unwrap();
    let lenient = Schema::new(vec![
        Column::new("signed_up")
            .rule(DateFormat::new("%Y-%m-%d").unwrap())
            .allow_empty(true),
    ])
    .unwrap();

    assert_eq!(rows(&strict.validate(&signups()).unwrap(), "signed_up"), vec![2, 3]);
    assert_eq!(rows(&lenient.validate(&signups()).unwrap(), "signed_up"), vec![3]);
}

#[test]
fn test_whole_column_rule_sees_only_non_empty_cells() {
    let schema = Schema::new(vec![
        Column::new("email").rule(IsDistinct::new()).allow_empty(true),
    ])
    .unwrap();

    let warnings = schema.validate(&signups()).unwrap();
    assert_eq!(rows(&warnings, "email"), vec![3]);
    assert_eq!(
        warnings[0].render(),
        "{row: 3, column: \"email\"}: \"ada@example.com\" contains values that are not unique"
    );
}

#[test]
fn test_mixed_column_fails_type_check_on_every_row() {
    let schema = Schema::new(vec![
        Column::new("referrals")
            .rule(HasType::new(ValueKind::Integer))
            .allow_empty(true),
    ])
    .unwrap();

    let warnings = schema.validate(&signups()).unwrap();
    assert_eq!(rows(&warnings, "referrals"), vec![0, 2, 3]);
    assert_eq!(warnings[0].message(), "did not have the type \"integer\"");
}

#[test]
fn test_conversion_with_untyped_loading() {
    let table = read_csv_str(SIGNUPS, &CsvOptions::default().with_infer_types(false)).unwrap();
    let schema = Schema::new(vec![
        Column::new("referrals")
            .rule(CanConvert::new(TargetType::Integer))
            .allow_empty(true),
    ])
    .unwrap();

    let warnings = schema.validate(&table).unwrap();
    assert_eq!(rows(&warnings, "referrals"), vec![2]);
}

#[test]
fn test_all_empty_column_allowed() {
    let table = Table::new(vec![Series::new("note", [Value::Null, Value::from("")])]).unwrap();
    let schema = Schema::new(vec![
        Column::new("note")
            .rule(IsDistinct::new())
            .rule(HasType::new(ValueKind::String))
            .allow_empty(true),
    ])
    .unwrap();

    assert!(schema.validate(&table).unwrap().is_empty());
}

#[test]
fn test_table_without_rows() {
    let table = Table::new(vec![Series::new("note", Vec::<Value>::new())]).unwrap();
    let schema = Schema::new(vec![Column::new("note").rule(HasType::new(ValueKind::Integer))]).unwrap();

    assert!(schema.validate(&table).unwrap().is_empty());
}

#[test]
fn test_every_rule_kind_on_empty_column() {
    let empty = Series::new("note", Vec::<Value>::new());
    let rules: Vec<RuleRef> = vec![
        MatchesPattern::new("a").unwrap().into_rule_ref(),
        InRange::new(0.0, 1.0).unwrap().into_rule_ref(),
        InSet::new(["x"]).unwrap().into_rule_ref(),
        LeadingWhitespace::new().into_rule_ref(),
        TrailingWhitespace::new().into_rule_ref(),
        CanConvert::new(TargetType::Float).into_rule_ref(),
        DateFormat::new("%Y").unwrap().into_rule_ref(),
        IsDistinct::new().into_rule_ref(),
        HasType::new(ValueKind::Integer).into_rule_ref(),
        CustomSeriesRule::new(|_: &Series| false, "never").into_rule_ref(),
        CustomElementRule::new(|_: &Value| false, "never").into_rule_ref(),
        IsDistinct::new().and(LeadingWhitespace::new()).not().into_rule_ref(),
    ];

    for rule in &rules {
        let result = rule.evaluate(&empty).unwrap();
        assert!(result.failures(0).is_empty(), "{} failed on no rows", rule.name());
    }

    let column = Column::with_rules("note", rules);
    assert!(column.validate(&empty).unwrap().is_empty());
}
