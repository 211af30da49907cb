use serde::{Deserialize, Serialize};
use std::fmt;

/// The entity families that carry vote counters and a success rate.
///
/// Both families share the same aggregate shape and differ only in the table
/// their rows live in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A mobile compatibility listing.
    Listing,
    /// A PC compatibility listing.
    PcListing,
}

impl TargetKind {
    /// All votable families, in a stable order.
    pub const ALL: [TargetKind; 2] = [TargetKind::Listing, TargetKind::PcListing];

    /// Name of the table holding rows of this family.
    pub fn table_name(&self) -> &'static str {
        match self {
            TargetKind::Listing => "listings",
            TargetKind::PcListing => "pc_listings",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Listing => write!(f, "listing"),
            TargetKind::PcListing => write!(f, "pc_listing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_are_distinct() {
        assert_eq!(TargetKind::Listing.table_name(), "listings");
        assert_eq!(TargetKind::PcListing.table_name(), "pc_listings");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&TargetKind::PcListing).unwrap();
        assert_eq!(json, "\"pc_listing\"");
        let kind: TargetKind = serde_json::from_str("\"listing\"").unwrap();
        assert_eq!(kind, TargetKind::Listing);
    }
}
