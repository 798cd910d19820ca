use crate::core::finite_or_zero;
use crate::parsing::{parse_amount, parse_percent_as_fraction};
use serde::{Deserialize, Serialize};

/// Raw text from the market panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketInputs {
    pub audience_size: String,
    /// Percent of the audience expected to buy, on the 0-100 scale
    pub buyer_percent: String,
    pub avg_customer_value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub audience_size: f64,
    pub buyer_fraction: f64,
    pub avg_customer_value: f64,
    pub calculated_buyers: f64,
    pub total_market_revenue: f64,
}

impl MarketSnapshot {
    pub fn compute(inputs: &MarketInputs) -> Self {
        let audience_size = parse_amount(&inputs.audience_size);
        let buyer_fraction = parse_percent_as_fraction(&inputs.buyer_percent);
        let avg_customer_value = parse_amount(&inputs.avg_customer_value);

        let calculated_buyers = finite_or_zero(audience_size * buyer_fraction);

        Self {
            audience_size,
            buyer_fraction,
            avg_customer_value,
            calculated_buyers,
            total_market_revenue: finite_or_zero(calculated_buyers * avg_customer_value),
        }
    }
}
