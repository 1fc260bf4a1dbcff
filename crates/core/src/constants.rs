use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Account id used for the consolidated ("Total Portfolio") reporting unit
pub const CONSOLIDATED_ACCOUNT_ID: &str = "TOTAL";

/// Conventional base NAV every series is rebased against
pub const BASE_NAV: Decimal = dec!(100);

/// Absolute distance from `BASE_NAV` within which a series counts as already rebased
pub const BASELINE_NEAR_TOLERANCE: Decimal = dec!(0.01);

/// Decimal precision for percent and display figures
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Computed returns with absolute percentage above this are treated as data errors
pub const RETURN_SANITY_LIMIT: Decimal = dec!(10000);
