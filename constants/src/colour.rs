use std::ops::RangeInclusive;

/// Red channel range of the vegetation point colour jitter.
pub const VEGETATION_RED: RangeInclusive<u8> = 28..=60;

/// Green channel range of the vegetation point colour jitter.
pub const VEGETATION_GREEN: RangeInclusive<u8> = 176..=230;

/// Blue channel range of the vegetation point colour jitter.
pub const VEGETATION_BLUE: RangeInclusive<u8> = 57..=100;

/// Alpha written for every vegetation point.
pub const VEGETATION_ALPHA: u8 = 100;
