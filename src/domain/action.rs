use crate::domain::ProductId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Buy(ProductId),
    Sell(ProductId),
    /// Manual quantity entry. `raw` is the text as typed.
    SetQuantity { id: ProductId, raw: String },
    Show,
    Help,
    Quit,
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Action::Buy(id) => write!(f, "buy,product={}", id),
            Action::Sell(id) => write!(f, "sell,product={}", id),
            Action::SetQuantity { id, raw } => write!(f, "set,product={},value={:?}", id, raw),
            Action::Show => write!(f, "show"),
            Action::Help => write!(f, "help"),
            Action::Quit => write!(f, "quit"),
        }
    }
}
