pub mod price;
pub mod price_range;
pub mod price_series;
pub mod simulation_input;
pub mod volatility;

pub use price::Price;
pub use price_range::PriceRange;
pub use price_series::{PricePoint, PriceSeries};
pub use simulation_input::SimulationInput;
pub use volatility::{VolatilityResult, VolatilitySource, VolatilityStatus};
