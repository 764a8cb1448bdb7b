use quickplot::error::FormatError;
use quickplot::format::{FormatSpec, format_cell, format_percent, human_format};
use quickplot::models::CellValue;

fn fmt(num: f64, currency: bool, decimals: usize) -> String {
    let spec = if currency {
        FormatSpec::currency(decimals)
    } else {
        FormatSpec::number(decimals)
    };
    human_format(num, &spec).unwrap()
}

#[test]
fn small_values_keep_no_suffix() {
    assert_eq!(fmt(42.0, false, 0), "42");
    assert_eq!(fmt(999.0, false, 0), "999");
    assert_eq!(fmt(123.456, false, 2), "123.46");
}

#[test]
fn magnitudes_get_suffixes() {
    assert_eq!(fmt(1500.0, false, 1), "1.5K");
    assert_eq!(fmt(3_000_000.0, false, 0), "3M");
    assert_eq!(fmt(7_250_000_000.0, false, 2), "7.25B");
    assert_eq!(fmt(4e12, false, 0), "4T");
    assert_eq!(fmt(1e15, false, 0), "1P");
}

#[test]
fn currency_prefix_and_half_even_rounding() {
    // 2.5 rounds to the even neighbour
    assert_eq!(fmt(2_500_000.0, true, 0), "$2M");
    assert_eq!(fmt(1234.0, true, 1), "$1.2K");
    assert_eq!(fmt(-1500.0, false, 0), "-2K");
    assert_eq!(fmt(-2000.0, true, 0), "$-2K");
}

#[test]
fn no_renormalisation_after_rounding() {
    assert_eq!(fmt(999_999.0, false, 0), "1000K");
}

#[test]
fn zero_ignores_decimals() {
    assert_eq!(fmt(0.0, false, 3), "0");
    assert_eq!(fmt(-0.0, false, 1), "0");
    assert_eq!(fmt(0.0, true, 2), "$0");
}

#[test]
fn invalid_inputs_are_errors() {
    assert!(matches!(
        FormatSpec::new(false, -1),
        Err(FormatError::InvalidArgument(_))
    ));
    let spec = FormatSpec::new(true, 2).unwrap();
    assert!(spec.use_currency());
    assert_eq!(spec.decimal_places(), 2);

    assert!(matches!(
        human_format(f64::NAN, &FormatSpec::number(0)),
        Err(FormatError::TypeMismatch(_))
    ));
    assert!(matches!(
        human_format(f64::INFINITY, &FormatSpec::number(0)),
        Err(FormatError::TypeMismatch(_))
    ));
    assert!(matches!(
        human_format(1e18, &FormatSpec::number(0)),
        Err(FormatError::OutOfRange { magnitude: 6, .. })
    ));
}

#[test]
fn cells_format_by_type() {
    let spec = FormatSpec::number(1);
    assert_eq!(format_cell(&CellValue::Int(2500), &spec).unwrap(), "2.5K");
    assert_eq!(format_cell(&CellValue::Float(42.0), &spec).unwrap(), "42.0");
    assert!(matches!(
        format_cell(&CellValue::Text("abc".into()), &spec),
        Err(FormatError::TypeMismatch(_))
    ));
    assert!(format_cell(&CellValue::Missing, &spec).is_err());
}

#[test]
fn percent_scales_by_xmax() {
    assert_eq!(format_percent(0.35, 1.0, 0).unwrap(), "35%");
    assert_eq!(format_percent(50.0, 100.0, 1).unwrap(), "50.0%");
    assert!(matches!(
        format_percent(1.0, 0.0, 0),
        Err(FormatError::InvalidArgument(_))
    ));
}

#[test]
fn spec_deserializes_from_json() {
    let spec: FormatSpec =
        serde_json::from_str(r#"{"use_currency":true,"decimal_places":1}"#).unwrap();
    assert_eq!(human_format(1_240_000.0, &spec).unwrap(), "$1.2M");
}

#[test]
fn same_inputs_give_same_output() {
    let values = [
        0.0, -0.0, 1.0, -1.0, 42.0, 999.0, 999.999, 1000.0, -1500.0, 999_999.0, 1e6, 2.5e6,
        1e9, -7.25e9, 1e12, 1e15, 9.99e17, 1e18, -1e21, f64::NAN,
    ];
    let specs = [
        FormatSpec::number(0),
        FormatSpec::number(1),
        FormatSpec::number(3),
        FormatSpec::currency(0),
        FormatSpec::currency(2),
    ];
    for spec in &specs {
        for &v in &values {
            let first = human_format(v, spec);
            let second = human_format(v, spec);
            assert_eq!(first, second, "{v} with {spec:?}");

            let cell = CellValue::Float(v);
            assert_eq!(format_cell(&cell, spec), format_cell(&cell, spec));
        }
        let cell = CellValue::Int(-2_500_000);
        assert_eq!(format_cell(&cell, spec), format_cell(&cell, spec));
    }
    assert!(matches!(
        human_format(1e18, &FormatSpec::currency(0)),
        Err(FormatError::OutOfRange { .. })
    ));
}
