pub mod concentrated_liquidity;
pub mod statistics;
