//! Property checks for the public calculator API over a spread of salaries.
//!
//! The sample grid covers every band edge, points either side of each edge and
//! a range of amounts deep inside the open top band.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use salary_core::{SalaryResult, TaxSchedule, compute_from_gross, compute_from_net};

fn sample_grosses() -> Vec<Decimal> {
    let mut grosses = vec![dec!(0), dec!(0.01), dec!(1), dec!(99.99)];
    for (lower, upper, _) in TaxSchedule::standard().bands() {
        grosses.push(lower);
        grosses.push(lower + dec!(0.01));
        if let Some(upper) = upper {
            grosses.push(upper - dec!(0.01));
            grosses.push((lower + upper) / dec!(2));
        }
    }
    grosses.extend([
        dec!(12345.67),
        dec!(20000),
        dec!(55555.55),
        dec!(250000),
        dec!(9876543.21),
    ]);
    grosses.sort();
    grosses.dedup();
    grosses
}

fn gross(value: Decimal) -> SalaryResult {
    compute_from_gross(value).unwrap()
}

#[test]
fn net_never_decreases_as_gross_rises() {
    let grosses = sample_grosses();

    for pair in grosses.windows(2) {
        let (a, b) = (gross(pair[0]), gross(pair[1]));
        assert!(
            a.net_salary <= b.net_salary,
            "net({}) = {} > net({}) = {}",
            pair[0],
            a.net_salary,
            pair[1],
            b.net_salary
        );
    }
}

#[test]
fn deductions_and_net_add_up_to_gross() {
    for g in sample_grosses() {
        let result = gross(g);

        assert_eq!(
            result.income_tax + result.pension_contribution + result.net_salary,
            g
        );
    }
}

#[test]
fn every_component_is_non_negative() {
    for g in sample_grosses() {
        let result = gross(g);

        assert!(result.income_tax >= Decimal::ZERO);
        assert!(result.pension_contribution >= Decimal::ZERO);
        assert!(result.net_salary >= Decimal::ZERO);
    }
}

#[test]
fn net_to_gross_recovers_gross_within_two_cents() {
    for g in sample_grosses() {
        let net = gross(g).net_salary;

        let recovered = compute_from_net(net).unwrap();

        assert!(
            (recovered.gross_salary - g).abs() <= dec!(0.02),
            "gross {g} recovered as {}",
            recovered.gross_salary
        );
    }
}

#[test]
fn net_to_gross_result_is_consistent_with_forward() {
    for net in [dec!(100), dec!(2500), dec!(3952.5), dec!(8000), dec!(40000)] {
        let result = compute_from_net(net).unwrap();

        assert_eq!(result, gross(result.gross_salary));
    }
}

#[test]
fn five_thousand_gross_scenario() {
    let result = gross(dec!(5000));

    assert_eq!(result.income_tax, dec!(697.5));
    assert_eq!(result.pension_contribution, dec!(350));
    assert_eq!(result.net_salary, dec!(3952.5));
}

#[test]
fn five_thousand_net_to_gross_scenario() {
    let result = compute_from_net(dec!(3952.5)).unwrap().rounded();

    assert!((result.gross_salary - dec!(5000)).abs() <= dec!(0.02));
    assert!((result.income_tax - dec!(697.5)).abs() <= dec!(0.02));
    assert!((result.pension_contribution - dec!(350)).abs() <= dec!(0.02));
}

#[test]
fn top_band_taxes_only_income_above_its_edge() {
    let below = gross(dec!(10900));
    let above = gross(dec!(20000));

    assert_eq!(above.income_tax - below.income_tax, dec!(9100) * dec!(0.35));
}

#[test]
fn first_taxed_unit_costs_ten_percent() {
    assert_eq!(gross(dec!(600)).income_tax, dec!(0));
    assert_eq!(gross(dec!(601)).income_tax, dec!(0.10));
}

#[test]
fn negative_amounts_are_rejected() {
    assert!(compute_from_gross(dec!(-0.01)).is_err());
    assert!(compute_from_net(dec!(-0.01)).is_err());
}
