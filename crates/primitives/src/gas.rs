use alloy_primitives::{utils::format_ether, U256};

/// The estimated and actual costs of an L2 transaction, split between the L1 data fee and the L2
/// execution fee. All amounts are in wei.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GasCostReport {
    /// The L1 data fee estimated by the gas price oracle.
    pub estimated_l1: U256,
    /// The L2 execution fee estimated as `gas_limit * max_fee_per_gas`.
    pub estimated_l2: U256,
    /// The L1 data fee charged, as reported by the receipt.
    pub actual_l1: U256,
    /// The L2 execution fee charged, `gas_used * effective_gas_price`.
    pub actual_l2: U256,
}

impl GasCostReport {
    /// Returns the estimated total cost.
    pub fn estimated_total(&self) -> U256 {
        self.estimated_l1.saturating_add(self.estimated_l2)
    }

    /// Returns the actual total cost.
    pub fn actual_total(&self) -> U256 {
        self.actual_l1.saturating_add(self.actual_l2)
    }

    /// Returns the absolute difference between the actual and the estimated total.
    pub fn difference(&self) -> U256 {
        let (estimated, actual) = (self.estimated_total(), self.actual_total());
        if actual >= estimated {
            actual - estimated
        } else {
            estimated - actual
        }
    }
}

impl std::fmt::Display for GasCostReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "L1 cost estimated: {}", format_ether(self.estimated_l1))?;
        writeln!(f, "L2 cost estimated: {}", format_ether(self.estimated_l2))?;
        writeln!(f, "Total estimated: {}", format_ether(self.estimated_total()))?;
        writeln!(f, "L1 cost actual: {}", format_ether(self.actual_l1))?;
        writeln!(f, "L2 cost actual: {}", format_ether(self.actual_l2))?;
        writeln!(f, "Total actual: {}", format_ether(self.actual_total()))?;
        write!(f, "Difference between actual and estimate: {}", format_ether(self.difference()))
    }
}
