//! Annual roll-up of monthly rows

use super::cashflows::{AnnualRow, MonthlyRow};

/// Group monthly rows into 12-month lease years
///
/// Produces `ceil(months / 12)` rows; the final year holds the remainder
/// when the term is not a whole number of years.
pub fn roll_up(monthly: &[MonthlyRow]) -> Vec<AnnualRow> {
    monthly
        .chunks(12)
        .enumerate()
        .map(|(i, bucket)| {
            let months = bucket.len();
            let sum = |f: fn(&MonthlyRow) -> f64| bucket.iter().map(f).sum::<f64>();

            let total = sum(|r| r.total);
            let average_area = sum(|r| r.occupied_area) / months as f64;
            let annualized = total / months as f64 * 12.0;
            let effective_rate_psf_yr = if average_area > 0.0 && annualized.is_finite() {
                annualized / average_area
            } else {
                0.0
            };

            AnnualRow {
                year: i + 1,
                months,
                base_rent: sum(|r| r.base_rent),
                opex: sum(|r| r.opex),
                parking: sum(|r| r.parking),
                ti_amortization: sum(|r| r.ti_amortization),
                misc: sum(|r| r.misc),
                total,
                average_area,
                effective_rate_psf_yr,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(month: usize, rent: f64, area: f64) -> MonthlyRow {
        MonthlyRow {
            base_rent: rent,
            total: rent,
            occupied_area: area,
            ..MonthlyRow::new(month)
        }
    }

    #[test]
    fn test_partial_final_year() {
        let monthly: Vec<_> = (0..30).map(|m| row(m, 1_000.0, 1_200.0)).collect();
        let annual = roll_up(&monthly);

        assert_eq!(annual.len(), 3);
        assert_eq!(annual[0].months, 12);
        assert_eq!(annual[2].months, 6);
        assert_eq!(annual[2].year, 3);
        assert_relative_eq!(annual[2].total, 6_000.0);
        // 1000/month on 1200 SF is $10/SF/yr regardless of bucket length
        assert_relative_eq!(annual[0].effective_rate_psf_yr, 10.0);
        assert_relative_eq!(annual[2].effective_rate_psf_yr, 10.0);
    }

    #[test]
    fn test_zero_area_guard() {
        let monthly: Vec<_> = (0..12).map(|m| row(m, 500.0, 0.0)).collect();
        let annual = roll_up(&monthly);
        assert_eq!(annual[0].effective_rate_psf_yr, 0.0);
        assert!(roll_up(&[]).is_empty());
    }
}
