use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::quantity::{clamp_requested, parse_requested};
use crate::domain::{BalanceChange, Catalog, Error, Money, OwnershipState, Product, ProductId};

/// Owns the authoritative balance and quantities.
///
/// Every mutation is computed on a candidate copy and committed only if the
/// resulting balance is non-negative, so callers never see a partial update.
/// Rejected requests leave the state untouched and report nothing beyond a
/// `None` return.
#[derive(Debug, Clone)]
pub struct Ledger {
    catalog: Catalog,
    initial_balance: Money,
    state: OwnershipState,
}

impl Ledger {
    /// Opens a ledger with nothing owned. A negative opening balance is refused.
    pub fn new(catalog: Catalog, initial_balance: Money) -> Result<Self, Error> {
        if initial_balance.is_negative() {
            return Err(Error::Config(format!(
                "starting balance must not be negative, got {}",
                initial_balance
            )));
        }

        let state = OwnershipState::opening(&catalog, initial_balance);
        Ok(Self {
            catalog,
            initial_balance,
            state,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &OwnershipState {
        &self.state
    }

    pub fn balance(&self) -> Money {
        self.state.balance
    }

    pub fn initial_balance(&self) -> Money {
        self.initial_balance
    }

    pub fn quantity(&self, id: ProductId) -> u64 {
        self.state.quantity(id)
    }

    pub fn total_spent(&self) -> Money {
        Money(self.initial_balance.0 - self.state.balance.0)
    }

    /// Catalog-ordered products the user currently owns, with their counts.
    pub fn purchases(&self) -> impl Iterator<Item = (&Product, u64)> {
        self.catalog
            .iter()
            .map(|p| (p, self.state.quantity(p.id)))
            .filter(|(_, qty)| *qty > 0)
    }

    /// Sum of `qty * price` over the catalog; ids missing from the map cost 0.
    /// `None` when the total does not fit, which callers treat as unaffordable.
    pub fn total_cost(&self, quantities: &BTreeMap<ProductId, u64>) -> Option<Money> {
        self.catalog.iter().try_fold(Money::zero(), |sum, p| {
            let qty = quantities.get(&p.id).copied().unwrap_or(0);
            let line = p.price.checked_times(qty)?;
            sum.0.checked_add(line.0).map(Money)
        })
    }

    pub fn set_quantity(&mut self, id: ProductId, requested: i64) -> Option<BalanceChange> {
        if self.catalog.get(id).is_none() {
            debug!(product = id, "rejected: unknown product");
            return None;
        }

        let qty = clamp_requested(requested);
        let mut candidate = self.state.quantities.clone();
        candidate.insert(id, qty);

        let balance = self
            .total_cost(&candidate)
            .and_then(|cost| self.initial_balance.checked_sub(cost))
            .filter(|b| !b.is_negative());

        let Some(balance) = balance else {
            debug!(product = id, qty, "rejected: insufficient balance");
            return None;
        };

        let change = BalanceChange {
            from: self.state.balance,
            to: balance,
        };
        self.state = OwnershipState {
            balance,
            quantities: candidate,
        };
        debug!(product = id, qty, balance = balance.0, "committed");

        Some(change)
    }

    /// Manual entry path: `raw` is read like a numeric text field.
    pub fn set_quantity_input(&mut self, id: ProductId, raw: &str) -> Option<BalanceChange> {
        self.set_quantity(id, parse_requested(raw))
    }

    pub fn buy(&mut self, id: ProductId) -> Option<BalanceChange> {
        let next = i64::try_from(self.quantity(id)).ok()?.checked_add(1)?;
        self.set_quantity(id, next)
    }

    pub fn sell(&mut self, id: ProductId) -> Option<BalanceChange> {
        let qty = self.quantity(id);
        if qty == 0 {
            return None;
        }
        // Fewer units always costs less, so this commits.
        self.set_quantity(id, i64::try_from(qty - 1).ok()?)
    }

    /// Buy affordance: `balance >= (qty + 1) * price`.
    pub fn can_buy(&self, id: ProductId) -> bool {
        let Some(product) = self.catalog.get(id) else {
            return false;
        };
        self.quantity(id)
            .checked_add(1)
            .and_then(|next| product.price.checked_times(next))
            .is_some_and(|cost| self.state.balance >= cost)
    }

    pub fn can_sell(&self, id: ProductId) -> bool {
        self.quantity(id) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INITIAL: Money = Money::units(100_000_000_000);

    fn ledger() -> Ledger {
        Ledger::new(Catalog::default(), INITIAL).unwrap()
    }

    fn assert_consistent(ledger: &Ledger) {
        let cost = ledger.total_cost(&ledger.state().quantities).unwrap();
        assert_eq!(ledger.balance().0, INITIAL.0 - cost.0);
        assert!(!ledger.balance().is_negative());
    }

    #[test]
    fn opens_with_full_balance_and_no_units() {
        let ledger = ledger();
        assert_eq!(ledger.balance(), INITIAL);
        assert_eq!(ledger.state().quantities.len(), 15);
        assert!(ledger.state().quantities.values().all(|q| *q == 0));
        assert_eq!(ledger.total_spent(), Money::zero());
        assert_eq!(ledger.purchases().count(), 0);
    }

    #[test]
    fn negative_opening_balance_is_refused() {
        let res = Ledger::new(Catalog::default(), Money(-5));
        assert!(matches!(res, Err(Error::Config(_))));

        let empty_wallet = Ledger::new(Catalog::default(), Money::zero()).unwrap();
        assert_eq!(empty_wallet.balance(), Money::zero());
        assert!(!empty_wallet.can_buy(8));
    }

    #[test]
    fn buy_commits_and_reports_change() {
        let mut ledger = ledger();
        let change = ledger.buy(1).unwrap();
        assert_eq!(change.from, INITIAL);
        assert_eq!(change.to, Money(99_999_500_000));
        assert_eq!(ledger.quantity(1), 1);
        assert_eq!(ledger.total_spent(), Money(500_000));
        assert_consistent(&ledger);
    }

    #[test]
    fn buy_stops_exactly_at_zero_balance() {
        let mut ledger = ledger();
        for _ in 0..200_000 {
            assert!(ledger.buy(1).is_some());
        }
        assert_eq!(ledger.quantity(1), 200_000);
        assert_eq!(ledger.balance(), Money::zero());

        let before = ledger.state().clone();
        assert_eq!(ledger.buy(1), None);
        assert_eq!(ledger.state(), &before);
        assert_eq!(ledger.quantity(1), 200_000);
    }

    #[test]
    fn sell_with_no_units_is_noop() {
        let mut ledger = ledger();
        let before = ledger.state().clone();
        assert_eq!(ledger.sell(3), None);
        assert_eq!(ledger.state(), &before);
    }

    #[test]
    fn buy_then_sell_restores_state() {
        let mut ledger = ledger();
        ledger.buy(2);
        let before = ledger.state().clone();
        ledger.buy(7);
        let change = ledger.sell(7).unwrap();
        assert_eq!(change.to, before.balance);
        assert_eq!(ledger.state(), &before);
    }

    #[test]
    fn over_budget_entry_is_rejected() {
        let mut ledger = ledger();
        ledger.set_quantity(15, 3).unwrap();
        let before = ledger.state().clone();

        assert_eq!(ledger.set_quantity_input(15, "999999999"), None);
        assert_eq!(ledger.set_quantity_input(15, "99999999999999999999999"), None);
        assert_eq!(ledger.state(), &before);
        assert_consistent(&ledger);
    }

    #[test]
    fn negative_or_garbage_entry_clamps_to_zero() {
        let mut ledger = ledger();
        ledger.set_quantity(4, 10).unwrap();
        assert_eq!(ledger.balance(), Money(INITIAL.0 - 500_000));

        let change = ledger.set_quantity_input(4, "-3").unwrap();
        assert_eq!(change.to, INITIAL);
        assert_eq!(ledger.quantity(4), 0);

        ledger.set_quantity(4, 2).unwrap();
        ledger.set_quantity_input(4, "abc").unwrap();
        assert_eq!(ledger.quantity(4), 0);
        assert_eq!(ledger.balance(), INITIAL);
    }

    #[test]
    fn unknown_product_is_rejected() {
        let mut ledger = ledger();
        assert_eq!(ledger.buy(99), None);
        assert_eq!(ledger.set_quantity(99, 1), None);
        assert!(!ledger.can_buy(99));
        assert_eq!(ledger.balance(), INITIAL);
    }

    #[test]
    fn affordances_follow_quantity_and_balance() {
        let catalog = Catalog::new(vec![Product::new(1, "Widget", Money(10))]).unwrap();
        let mut ledger = Ledger::new(catalog, Money(30)).unwrap();

        assert!(ledger.can_buy(1));
        assert!(!ledger.can_sell(1));

        ledger.buy(1).unwrap();
        // balance 20 >= 2 * 10
        assert!(ledger.can_buy(1));
        assert!(ledger.can_sell(1));

        ledger.buy(1).unwrap();
        // balance 10 < 3 * 10, even though one more unit still fits
        assert!(!ledger.can_buy(1));
        assert!(ledger.buy(1).is_some());
        assert_eq!(ledger.balance(), Money::zero());
    }

    #[test]
    fn purchases_are_catalog_ordered() {
        let mut ledger = ledger();
        ledger.buy(9);
        ledger.buy(2);
        ledger.buy(2);
        let owned: Vec<_> = ledger.purchases().map(|(p, q)| (p.id, q)).collect();
        assert_eq!(owned, vec![(2, 2), (9, 1)]);
        assert_eq!(ledger.total_spent(), Money(520_000));
    }
}
