use fms_common::{ExcelError, ExcelErrorKind, LiteralValue};

/// Coerce a scalar argument to `f64`. Missing arguments are `default`.
pub fn number_or(v: &LiteralValue, default: f64) -> Result<f64, ExcelError> {
    if let LiteralValue::Error(e) = v.as_scalar() {
        return Err(e.clone());
    }
    v.as_number_or(default)
}

/// Required numeric argument.
pub fn number(v: &LiteralValue) -> Result<f64, ExcelError> {
    if v.as_scalar().is_empty() {
        return Err(ExcelError::value("missing numeric argument"));
    }
    number_or(v, 0.0)
}

/// Integer argument, truncated toward zero like the `LONG` argument type.
pub fn int_or(v: &LiteralValue, default: i64) -> Result<i64, ExcelError> {
    let x = number_or(v, default as f64)?;
    if !x.is_finite() {
        return Err(ExcelError::new(ExcelErrorKind::Num)
            .with_message(format!("expected an integer, got {x}")));
    }
    Ok(x.trunc() as i64)
}

/// Non-negative integer argument, such as a row or column count.
pub fn count_or(v: &LiteralValue, default: usize) -> Result<usize, ExcelError> {
    let n = int_or(v, default as i64)?;
    usize::try_from(n).map_err(|_| ExcelError::value(format!("expected a count, got {n}")))
}

/// Boolean flag; a missing argument is `false`.
pub fn flag(v: &LiteralValue) -> Result<bool, ExcelError> {
    match v.as_scalar() {
        LiteralValue::Error(e) => Err(e.clone()),
        LiteralValue::Text(s) => match s.trim().to_ascii_uppercase().as_str() {
            "TRUE" => Ok(true),
            "FALSE" => Ok(false),
            _ => Err(ExcelError::value(format!("expected TRUE or FALSE, got {s}"))),
        },
        other => Ok(other.as_number()? != 0.0),
    }
}

pub fn text(v: &LiteralValue) -> Result<&str, ExcelError> {
    match v.as_scalar() {
        LiteralValue::Text(s) => Ok(s.as_str()),
        LiteralValue::Error(e) => Err(e.clone()),
        other => Err(ExcelError::value(format!("expected text, got {other}"))),
    }
}

/// Flatten an argument into numbers for index lists; `None` when missing.
pub fn index_list(v: &LiteralValue) -> Result<Option<Vec<i64>>, ExcelError> {
    match v {
        LiteralValue::Empty => Ok(None),
        LiteralValue::Array(rows) => rows
            .iter()
            .flatten()
            .map(|x| int_or(x, 0))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        other => Ok(Some(vec![int_or(other, 0)?])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercions() {
        assert_eq!(number(&LiteralValue::Int(2)), Ok(2.0));
        assert!(number(&LiteralValue::Empty).is_err());
        let blank = LiteralValue::Array(vec![vec![LiteralValue::Empty]]);
        assert_eq!(number_or(&blank, 1.0), Ok(1.0));
        assert_eq!(int_or(&blank, 4), Ok(4));
        assert!(number(&blank).is_err());
        assert_eq!(int_or(&LiteralValue::Number(-2.7), 0), Ok(-2));
        assert_eq!(int_or(&LiteralValue::Empty, 5), Ok(5));
        assert_eq!(
            int_or(&LiteralValue::Number(f64::NAN), 0).unwrap_err().kind,
            ExcelErrorKind::Num
        );
        assert!(count_or(&LiteralValue::Int(-1), 0).is_err());
        assert_eq!(flag(&LiteralValue::Empty), Ok(false));
        assert_eq!(flag(&LiteralValue::Text("true".into())), Ok(true));
        assert_eq!(text(&LiteralValue::Text("add".into())), Ok("add"));
        let err = ExcelError::new(ExcelErrorKind::Div);
        assert_eq!(number(&LiteralValue::Error(err.clone())), Err(err));
    }

    #[test]
    fn index_lists() {
        assert_eq!(index_list(&LiteralValue::Empty), Ok(None));
        assert_eq!(index_list(&LiteralValue::Int(3)), Ok(Some(vec![3])));
        let v = LiteralValue::Array(vec![vec![LiteralValue::Int(2)], vec![LiteralValue::Number(0.0)]]);
        assert_eq!(index_list(&v), Ok(Some(vec![2, 0])));
    }
}
