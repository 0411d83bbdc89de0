/// Default thinning parameters for the vegetation point cloud.

/// Keep one point out of this many.
pub const KEEP_EVERY_NTH: u32 = 10;

/// LAS classification code kept by the thinning step (unclassified).
pub const KEEP_CLASS: u8 = 1;
