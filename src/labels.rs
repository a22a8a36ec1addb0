// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::data::Table;
use anyhow::{Context, Result};

pub const INCOME_GROUP_COLUMN: &str = "Income Group";
pub const INCOME_SHARE_COLUMN: usize = 1;

/// Label for a donut slice, e.g. `High-Income (28.0%)`.
///
/// When several rows carry the same group name the first one wins.
pub fn income_label(table: &Table, group: &str) -> Result<String> {
    let group_col = table
        .column_index(INCOME_GROUP_COLUMN)
        .with_context(|| format!("{}: no '{}' column", table.name(), INCOME_GROUP_COLUMN))?;

    for row in 0..table.row_count() {
        if table.text(row, group_col)? == group {
            let percentage = table.number(row, INCOME_SHARE_COLUMN)?;
            return Ok(format!("{} ({:.1}%)", group, percentage));
        }
    }

    anyhow::bail!("{}: no income group named '{}'", table.name(), group)
}

/// Bar value label with two decimals
pub fn value_label(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn income_table(csv: &str) -> Table {
        Table::from_reader("Piechart.csv", csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_income_label_one_decimal() -> Result<()> {
        let table = income_table(fixtures::INCOME_CSV);
        assert_eq!(income_label(&table, "High-Income")?, "High-Income (28.0%)");
        assert_eq!(
            income_label(&table, "Upper Middle-Income")?,
            "Upper Middle-Income (42.0%)"
        );
        assert_eq!(income_label(&table, "Low-Income")?, "Low-Income (3.0%)");
        Ok(())
    }

    #[test]
    fn test_income_label_duplicate_takes_first_row() -> Result<()> {
        let table = income_table("Income Group,Percentage\nHigh-Income,28.0\nHigh-Income,99.0\n");
        assert_eq!(income_label(&table, "High-Income")?, "High-Income (28.0%)");
        Ok(())
    }

    #[test]
    fn test_income_label_unknown_group() {
        let table = income_table(fixtures::INCOME_CSV);
        let err = income_label(&table, "Middle-Earth").unwrap_err();
        assert!(err.to_string().contains("Middle-Earth"));
    }

    #[test]
    fn test_income_label_requires_group_column() {
        let table = income_table("Group,Percentage\nHigh-Income,28.0\n");
        assert!(income_label(&table, "High-Income").is_err());
    }

    #[test]
    fn test_value_label_two_decimals() {
        assert_eq!(value_label(1234.5), "1234.50");
        assert_eq!(value_label(99.999), "100.00");
        assert_eq!(value_label(0.0), "0.00");
    }
}
