use std::collections::BTreeMap;

use crate::domain::{Catalog, Money, ProductId};

/// Authoritative balance and units owned per product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipState {
    pub balance: Money,
    pub quantities: BTreeMap<ProductId, u64>,
}

impl OwnershipState {
    /// Full balance, zero units of every catalog product.
    pub fn opening(catalog: &Catalog, initial_balance: Money) -> Self {
        Self {
            balance: initial_balance,
            quantities: catalog.iter().map(|p| (p.id, 0)).collect(),
        }
    }

    pub fn quantity(&self, id: ProductId) -> u64 {
        self.quantities.get(&id).copied().unwrap_or(0)
    }
}

/// The (old, new) authoritative balance pair produced by a committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    pub from: Money,
    pub to: Money,
}
