pub mod fees;
pub mod impermanent_loss;

pub use fees::{annualize_pct, calculate_period_fees};
pub use impermanent_loss::{HodlBaseline, ImpermanentLoss, calculate_break_even_apr};
