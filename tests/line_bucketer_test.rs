// ==========================================
// LineBucketer 集成测试
// ==========================================
// 测试范围:
// 1. 区位/区间 → 产线
// 2. 无效格口剔除
// 3. 透视矩阵形状
// ==========================================

mod helpers;

use chute_lines::api::{assign_lines, get_lines_from_chutes};
use chute_lines::engine::{LineBucketer, LineRuleTable};
use chute_lines::LineRule;
use helpers::test_data_builder::chute_rows;
use serde_json::Value;

fn matrix_rows(output: &str) -> Vec<Value> {
    serde_json::from_str(output).unwrap()
}

#[test]
fn test_reference_examples() {
    let bucketer = LineBucketer::default();
    assert_eq!(bucketer.line_of("A001"), Some("Line 1"));
    assert_eq!(bucketer.line_of("B500"), Some("Line 5"));
}

#[test]
fn test_every_default_range_boundary() {
    let bucketer = LineBucketer::default();
    let cases = [
        ("A001", "Line 1"),
        ("A152", "Line 1"),
        ("A153", "Line 2"),
        ("A300", "Line 2"),
        ("A301", "Line 3"),
        ("A448", "Line 3"),
        ("A449", "Line 4"),
        ("A600", "Line 4"),
        ("B001", "Line 7"),
        ("B148", "Line 7"),
        ("B149", "Line 8"),
        ("B306", "Line 8"),
        ("B307", "Line 6"),
        ("B450", "Line 6"),
        ("B451", "Line 5"),
        ("B600", "Line 5"),
    ];
    for (code, line) in cases {
        assert_eq!(bucketer.line_of(code), Some(line), "code {}", code);
    }
}

#[test]
fn test_out_of_range_codes_absent_from_every_column() {
    let output = get_lines_from_chutes(
        &chute_rows(&["C001", "A000", "A601", "B999", "ZZZ", "A001"]),
        &LineRuleTable::default(),
    );
    let rows = matrix_rows(&output);
    assert_eq!(rows.len(), 1);

    let cells: Vec<&str> = rows[0]
        .as_object()
        .unwrap()
        .values()
        .filter_map(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(cells, vec!["A001"]);
}

#[test]
fn test_matrix_rows_equal_largest_group() {
    let (matrix, report) = assign_lines(
        &chute_rows(&["A003", "A001", "a002", "B451", "A153"]),
        &LineRuleTable::default(),
    );
    assert_eq!(matrix.row_count(), 3);
    assert_eq!(matrix.column("Line 1"), vec!["A001", "A002", "A003"]);
    assert_eq!(matrix.column("Line 2"), vec!["A153", "", ""]);
    assert_eq!(matrix.column("Line 5"), vec!["B451", "", ""]);
    assert_eq!(report.assigned, 5);
    assert!(report.unassigned.is_empty());
}

#[test]
fn test_duplicate_codes_collapse() {
    let (matrix, report) = assign_lines(
        &chute_rows(&["A010", "a010", " A010", "A0105"]),
        &LineRuleTable::default(),
    );
    assert_eq!(report.distinct_codes, 1);
    assert_eq!(matrix.column("Line 1"), vec!["A010"]);
}

#[test]
fn test_every_row_has_every_line_key_in_order() {
    let output = get_lines_from_chutes(
        &chute_rows(&["A001", "B001", "B002"]),
        &LineRuleTable::default(),
    );
    let rows = matrix_rows(&output);
    assert_eq!(rows.len(), 2);
    for row in &rows {
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        let expected: Vec<String> = (1..=8).map(|i| format!("Line {}", i)).collect();
        assert_eq!(keys, expected.iter().collect::<Vec<_>>());
    }
    assert_eq!(rows[1]["Line 7"], "B002");
    assert_eq!(rows[1]["Line 1"], "");
}

#[test]
fn test_custom_table_and_column_order() {
    let table = LineRuleTable::new(
        vec![
            LineRule::new("C", 1, 50, "North"),
            LineRule::new("C", 51, 99, "South"),
        ],
        vec!["South".to_string(), "North".to_string()],
    )
    .unwrap();

    let (matrix, _) = assign_lines(&chute_rows(&["C010", "C075", "A001"]), &table);
    assert_eq!(matrix.columns, vec!["South", "North"]);
    assert_eq!(matrix.rows, vec![vec!["C075".to_string(), "C010".to_string()]]);
}

#[test]
fn test_malformed_and_empty_input() {
    let table = LineRuleTable::default();
    assert_eq!(get_lines_from_chutes("not json", &table), "[]");
    assert_eq!(get_lines_from_chutes("[]", &table), "[]");
    assert_eq!(get_lines_from_chutes(r#"[{"CHUTE": ""}]"#, &table), "[]");
}
