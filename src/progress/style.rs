//! Year color assignment for display.

use std::collections::HashMap;

use serde::Serialize;

/// Default year palette.
pub const PALETTE: [&str; 7] = [
    "#9f8aff", "#ea7015", "#00b423", "#001161", "#e1ab19", "#ee135e", "#1fd6d6",
];

/// Colors assigned to displayed years.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearProgressStyle {
    /// Color per year
    pub year_colors: HashMap<i32, String>,
    /// Colors in year order
    pub colors: Vec<String>,
}

impl YearProgressStyle {
    /// Color assigned to a year.
    pub fn color_of(&self, year: i32) -> Option<&str> {
        self.year_colors.get(&year).map(String::as_str)
    }
}

/// Cycle the palette over the years in the given order.
pub fn assign_colors<S: AsRef<str>>(years: &[i32], palette: &[S]) -> YearProgressStyle {
    let mut style = YearProgressStyle::default();

    if palette.is_empty() {
        return style;
    }

    for (index, year) in years.iter().enumerate() {
        let color = palette[index % palette.len()].as_ref().to_string();
        style.year_colors.insert(*year, color.clone());
        style.colors.push(color);
    }

    style
}
