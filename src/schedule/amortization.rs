//! Financing of tenant-funded improvement capital

use crate::lease::TiSchedule;

/// Level monthly payment that retires `principal` over `periods` months
///
/// Uses `P * r * (1+r)^n / ((1+r)^n - 1)` with `r = annual_rate / 12`;
/// straight-line `P / n` when `r <= 0`.
pub fn level_payment(principal: f64, annual_rate: f64, periods: usize) -> f64 {
    if periods == 0 || !principal.is_finite() {
        return 0.0;
    }
    let n = periods as f64;
    let r = annual_rate / 12.0;
    if !r.is_finite() || r <= 0.0 {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    let denominator = growth - 1.0;
    if denominator.abs() < f64::EPSILON || !denominator.is_finite() {
        return principal / n;
    }
    principal * r * growth / denominator
}

/// Monthly amortization payments for the unreimbursed TI amount
///
/// Payments run for `min(amortization term, lease term)` months and are zero
/// afterwards. Disabled amortization, no out-of-pocket capital or a negative
/// rate all produce an all-zero series.
pub fn build_amortization(term_months: usize, ti: &TiSchedule) -> Vec<f64> {
    let mut payments = vec![0.0; term_months];
    let principal = ti.out_of_pocket();

    if !ti.amortize_oop || principal <= 0.0 || ti.amortization_rate < 0.0 || ti.amortization_rate.is_nan() {
        log::debug!("TI amortization disabled (oop={:.2}, enabled={})", principal, ti.amortize_oop);
        return payments;
    }

    let periods = (ti.amortization_term_months.max(0) as usize).min(term_months);
    let payment = level_payment(principal, ti.amortization_rate, periods);
    for slot in payments.iter_mut().take(periods) {
        *slot = payment;
    }

    payments
}
