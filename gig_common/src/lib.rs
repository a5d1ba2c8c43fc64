mod money;

pub mod op;

pub use money::{Cents, MoneyError, CURRENCY_CODE};
