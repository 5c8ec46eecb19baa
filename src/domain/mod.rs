pub mod action;
pub mod error;
pub mod ledger;
pub mod money;
pub mod ownership;
pub mod product;
pub mod quantity;
pub mod traits;

pub use action::Action;
pub use error::Error;
pub use ledger::Ledger;
pub use money::Money;
pub use ownership::{BalanceChange, OwnershipState};
pub use product::{Catalog, Product, ProductId};
pub use traits::{ActionStream, DeadLetterQueue, View};
