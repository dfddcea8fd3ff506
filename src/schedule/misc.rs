//! One-time costs, recurring charges, broker fee and security deposit

use crate::lease::{clamp_non_negative, OtherCashFlows};

/// Miscellaneous cash flows by month
///
/// `first_month_rent` sizes the security deposit, which is paid in month 0
/// and refunded in the final month. One-time costs dated outside the term
/// are dropped.
pub fn build_misc(term_months: usize, other: &OtherCashFlows, first_month_rent: f64) -> Vec<f64> {
    let recurring = other.misc_monthly.filter(|v| v.is_finite()).unwrap_or(0.0);
    let mut misc = vec![recurring; term_months];
    if term_months == 0 {
        return misc;
    }

    if other.broker_fee.is_finite() {
        misc[0] += other.broker_fee;
    }

    let deposit = clamp_non_negative(first_month_rent) * clamp_non_negative(other.security_deposit_months);
    if deposit > 0.0 {
        misc[0] += deposit;
        misc[term_months - 1] -= deposit;
    }

    for cost in &other.one_time_costs {
        if !cost.amount.is_finite() {
            continue;
        }
        match usize::try_from(cost.month) {
            Ok(month) if month < term_months => misc[month] += cost.amount,
            _ => log::warn!(
                "One-time cost '{}' at month {} is outside the {}-month term; dropped",
                cost.name,
                cost.month,
                term_months
            ),
        }
    }

    misc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::OneTimeCost;

    fn cost(name: &str, amount: f64, month: i64) -> OneTimeCost {
        OneTimeCost { name: name.to_string(), amount, month }
    }

    #[test]
    fn test_broker_fee_deposit_and_recurring() {
        let other = OtherCashFlows {
            one_time_costs: Vec::new(),
            misc_monthly: Some(100.0),
            broker_fee: 5_000.0,
            security_deposit_months: 2.0,
        };
        let misc = build_misc(12, &other, 25_000.0);

        assert!((misc[0] - (100.0 + 5_000.0 + 50_000.0)).abs() < 1e-9);
        assert!((misc[5] - 100.0).abs() < 1e-9);
        assert!((misc[11] - (100.0 - 50_000.0)).abs() < 1e-9);
        assert!((misc.iter().sum::<f64>() - (1_200.0 + 5_000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_one_time_costs_outside_term_are_dropped() {
        let other = OtherCashFlows {
            one_time_costs: vec![cost("moving", 20_000.0, 0), cost("cabling", 8_000.0, 3), cost("late", 1.0, 12), cost("early", 1.0, -1)],
            ..Default::default()
        };
        let misc = build_misc(12, &other, 0.0);

        assert_eq!(misc[0], 20_000.0);
        assert_eq!(misc[3], 8_000.0);
        assert!((misc.iter().sum::<f64>() - 28_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_month_deposit_nets_out() {
        let other = OtherCashFlows { security_deposit_months: 1.0, ..Default::default() };
        let misc = build_misc(1, &other, 10_000.0);
        assert_eq!(misc, vec![0.0]);
        assert!(build_misc(0, &other, 10_000.0).is_empty());
    }
}
