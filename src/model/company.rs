use crate::core::{finite_or_zero, guarded_div, Percent};
use crate::model::market::MarketSnapshot;
use crate::parsing::{parse_amount, parse_percent_as_fraction};
use serde::{Deserialize, Serialize};

/// Raw text from the company panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInputs {
    pub annual_revenue: String,
    /// Share of customers acquired this year, on the 0-100 scale
    pub percent_new_customers: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    pub annual_revenue: f64,
    pub calculated_total_customers: f64,
    pub calculated_new_customers: f64,
    /// This company's revenue as a share of the whole market
    pub percent_of_market_rev_share: Percent,
}

impl CompanySnapshot {
    pub fn compute(inputs: &CompanyInputs, market: &MarketSnapshot) -> Self {
        let annual_revenue = parse_amount(&inputs.annual_revenue);
        let new_fraction = parse_percent_as_fraction(&inputs.percent_new_customers);

        let calculated_total_customers =
            finite_or_zero(guarded_div(annual_revenue, market.avg_customer_value));
        let share =
            finite_or_zero(guarded_div(annual_revenue, market.total_market_revenue) * 100.0);

        Self {
            annual_revenue,
            calculated_total_customers,
            calculated_new_customers: finite_or_zero(calculated_total_customers * new_fraction),
            percent_of_market_rev_share: Percent::new(share),
        }
    }
}
