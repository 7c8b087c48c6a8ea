//! Linear demand and cost primitives shared by every solver.
//!
//! One formulation, held fixed everywhere: inverse demand
//! `p = max(0, alpha - beta * Q)` and linear cost `c * q` (constant marginal
//! cost, no fixed cost). Both functions are total over non-negative inputs and
//! never return a negative price.

/// Market price at total output `total_quantity`, clamped at zero.
pub fn demand_price(alpha: f64, beta: f64, total_quantity: f64) -> f64 {
    (alpha - beta * total_quantity).max(0.0)
}

/// Production cost of `quantity` units at constant `marginal_cost`.
pub fn cost(quantity: f64, marginal_cost: f64) -> f64 {
    marginal_cost * quantity
}

/// Firm profit at a given market price.
pub fn profit(price: f64, quantity: f64, marginal_cost: f64) -> f64 {
    price * quantity - cost(quantity, marginal_cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_at_zero_output_is_the_intercept() {
        assert_eq!(demand_price(100.0, 0.5, 0.0), 100.0);
    }

    #[test]
    fn price_clamps_to_zero_past_the_choke_quantity() {
        // Choke quantity is alpha / beta = 200
        assert_eq!(demand_price(100.0, 0.5, 200.0), 0.0);
        assert_eq!(demand_price(100.0, 0.5, 500.0), 0.0);
    }

    #[test]
    fn cost_is_linear_with_no_fixed_component() {
        assert_eq!(cost(0.0, 10.0), 0.0);
        assert_eq!(cost(7.0, 10.0), 70.0);
        assert_eq!(cost(14.0, 10.0), 140.0);
    }

    #[test]
    fn profit_is_revenue_minus_cost() {
        assert_eq!(profit(55.0, 90.0, 10.0), 4050.0);
        // A firm selling nothing earns nothing
        assert_eq!(profit(55.0, 0.0, 10.0), 0.0);
    }
}
