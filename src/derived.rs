//! Derived Metric Calculator
//!
//! The three measurement ratios added during the join pipeline:
//!
//! | Column          | Formula                        | Table              |
//! |-----------------|--------------------------------|--------------------|
//! | `Heterogeneity` | `Chain_length / Tape_length`   | rugosity           |
//! | `Density`       | `Number / Area`                | fish density       |
//! | `Size_mm`       | `Length_mm * Width_mm`         | juvenile size      |
//!
//! Operands are cast to Float64. No clamping and no unit conversion: a null
//! operand gives null, a zero denominator gives NaN, negatives pass through.
//! Rows are never dropped here.

use polars::prelude::*;

use crate::error::Result;
use crate::schema::columns::*;
use crate::utils::frame_ops::column;

/// `numerator / denominator`, NaN when the denominator is zero
pub fn ratio_expr(numerator: &str, denominator: &str) -> Expr {
    let num = col(numerator).cast(DataType::Float64);
    let den = col(denominator).cast(DataType::Float64);

    when(den.clone().eq(lit(0.0)))
        .then(lit(f64::NAN))
        .otherwise(num / den)
}

pub fn heterogeneity_expr() -> Expr {
    ratio_expr(CHAIN_LENGTH, TAPE_LENGTH).alias(HETEROGENEITY)
}

pub fn density_expr() -> Expr {
    ratio_expr(NUMBER, AREA).alias(DENSITY)
}

pub fn colony_size_expr() -> Expr {
    (col(LENGTH_MM).cast(DataType::Float64) * col(WIDTH_MM).cast(DataType::Float64)).alias(SIZE_MM)
}

fn with_metric(df: &DataFrame, expr: Expr, operands: [&str; 2], context: &str) -> Result<DataFrame> {
    for operand in operands {
        column(df, operand, context)?;
    }
    Ok(df.clone().lazy().with_column(expr).collect()?)
}

/// Add `Heterogeneity` (needs `Chain_length`, `Tape_length`)
pub fn with_heterogeneity(df: &DataFrame) -> Result<DataFrame> {
    with_metric(df, heterogeneity_expr(), [CHAIN_LENGTH, TAPE_LENGTH], "heterogeneity")
}

/// Add `Density` (needs `Number`, `Area`)
pub fn with_density(df: &DataFrame) -> Result<DataFrame> {
    with_metric(df, density_expr(), [NUMBER, AREA], "density")
}

/// Add `Size_mm` (needs `Length_mm`, `Width_mm`)
pub fn with_colony_size(df: &DataFrame) -> Result<DataFrame> {
    with_metric(df, colony_size_expr(), [LENGTH_MM, WIDTH_MM], "colony size")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_heterogeneity_ratio() {
        let df = df![
            "Chain_length" => &[8.0, 15.0],
            "Tape_length" => &[10.0, 10.0],
        ]
        .unwrap();

        let out = with_heterogeneity(&df).unwrap();
        let values = floats(&out, "Heterogeneity");
        assert_relative_eq!(values[0].unwrap(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(values[1].unwrap(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_and_null_denominators_keep_rows() {
        let df = df![
            "Chain_length" => &[Some(8.0), Some(8.0), None],
            "Tape_length" => &[Some(0.0), None, Some(10.0)],
        ]
        .unwrap();

        let out = with_heterogeneity(&df).unwrap();
        assert_eq!(out.height(), 3);

        let values = floats(&out, "Heterogeneity");
        assert!(values[0].unwrap().is_nan());
        assert_eq!(values[1], None);
        assert_eq!(values[2], None);
    }

    #[test]
    fn test_density_from_integer_counts() {
        let df = df![
            "Number" => &[3i64, 0, -2],
            "Area" => &[2i64, 5, 4],
        ]
        .unwrap();

        let out = with_density(&df).unwrap();
        let values = floats(&out, "Density");
        assert_relative_eq!(values[0].unwrap(), 1.5);
        assert_relative_eq!(values[1].unwrap(), 0.0);
        // Negative counts pass through
        assert_relative_eq!(values[2].unwrap(), -0.5);
    }

    #[test]
    fn test_colony_size_product() {
        let df = df![
            "Length_mm" => &[Some(4.0), None],
            "Width_mm" => &[Some(2.5), Some(3.0)],
        ]
        .unwrap();

        let out = with_colony_size(&df).unwrap();
        let values = floats(&out, "Size_mm");
        assert_relative_eq!(values[0].unwrap(), 10.0);
        assert_eq!(values[1], None);
    }

    #[test]
    fn test_missing_operand_is_error() {
        let df = df!["Number" => &[1.0]].unwrap();
        let err = with_density(&df).unwrap_err();
        assert!(err.to_string().contains("Area"));
    }
}
