/// Stored in place of a decline reason when the vet declines without one.
pub const DEFAULT_DECLINE_REASON: &str = "No reason provided";

/// Cap on stored picture references per pet listing.
pub const MAX_PET_IMAGE_URLS: usize = 10;
