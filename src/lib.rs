//! Budget-constrained shopping simulator.
//!
//! A [`Ledger`](domain::Ledger) spends a fixed starting balance on a fixed
//! catalog and refuses any change that would leave the balance negative. A
//! [`BalanceAnimator`](animator::BalanceAnimator) turns each committed change
//! into a displayed balance that moves linearly toward the new value. The
//! [`Engine`](engine::Engine) ties both to a stream of user commands.

pub mod animator;
pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod output;
pub mod ticker;
