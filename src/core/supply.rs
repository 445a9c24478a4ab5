// DoseWatch - core/supply.rs
//
// Medicine supply figures behind the pill-shaped fill gauge.

use crate::core::model::Medicine;

/// Remaining tablets as a percentage of the total.
///
/// No medicine, an unknown total or a zero total yields 0. An unknown
/// remaining count counts as 0. The result is not clamped: a medicine with
/// more tablets left than its recorded total reports over 100.
pub fn fill_percentage(medicine: Option<&Medicine>) -> f32 {
    let Some(m) = medicine else {
        return 0.0;
    };
    match m.total_tablets {
        Some(total) if total > 0 => m.tablets_left.unwrap_or(0) as f32 / total as f32 * 100.0,
        _ => 0.0,
    }
}

/// Whole doses left at the medicine's per-dose tablet count.
pub fn doses_remaining(medicine: &Medicine) -> Option<u32> {
    let left = medicine.tablets_left?;
    if medicine.tablets_per_dose == 0 {
        return None;
    }
    Some(left / medicine.tablets_per_dose)
}

/// Everything the UI needs to draw a supply gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyGauge {
    /// Raw fill percentage (may exceed 100).
    pub percent: f32,
    pub tablets_left: u32,
    pub total_tablets: u32,
    pub low_stock: bool,
}

impl SupplyGauge {
    pub fn new(medicine: Option<&Medicine>, low_stock_percent: f32) -> Self {
        let percent = fill_percentage(medicine);
        Self {
            percent,
            tablets_left: medicine.and_then(|m| m.tablets_left).unwrap_or(0),
            total_tablets: medicine.and_then(|m| m.total_tablets).unwrap_or(0),
            low_stock: percent < low_stock_percent,
        }
    }

    /// Fill height for drawing, clamped to 0.0..=1.0.
    pub fn fraction(&self) -> f32 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }

    /// "N of M" caption under the gauge.
    pub fn caption(&self) -> String {
        format!("{} of {}", self.tablets_left, self.total_tablets)
    }
}
