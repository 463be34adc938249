//! Region code to region ID lookup.

/// A region known to the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    /// Region code as reported in metadata, e.g. `EWR`.
    pub code: &'static str,
    /// Numeric region identifier used by the legacy API.
    pub id: &'static str,
    /// City the region is located in.
    pub name: &'static str,
}

/// All regions with a known numeric identifier.
pub const REGIONS: &[RegionInfo] = &[
    RegionInfo {
        code: "EWR",
        id: "1",
        name: "New Jersey",
    },
    RegionInfo {
        code: "ORD",
        id: "2",
        name: "Chicago",
    },
    RegionInfo {
        code: "DFW",
        id: "3",
        name: "Dallas",
    },
    RegionInfo {
        code: "SEA",
        id: "4",
        name: "Seattle",
    },
    RegionInfo {
        code: "LAX",
        id: "5",
        name: "Los Angeles",
    },
    RegionInfo {
        code: "ATL",
        id: "6",
        name: "Atlanta",
    },
    RegionInfo {
        code: "AMS",
        id: "7",
        name: "Amsterdam",
    },
    RegionInfo {
        code: "LHR",
        id: "8",
        name: "London",
    },
    RegionInfo {
        code: "FRA",
        id: "9",
        name: "Frankfurt",
    },
    RegionInfo {
        code: "SJC",
        id: "12",
        name: "Silicon Valley",
    },
    RegionInfo {
        code: "SYD",
        id: "19",
        name: "Sydney",
    },
    RegionInfo {
        code: "YTO",
        id: "22",
        name: "Toronto",
    },
    RegionInfo {
        code: "CDG",
        id: "24",
        name: "Paris",
    },
    RegionInfo {
        code: "NRT",
        id: "25",
        name: "Tokyo",
    },
    RegionInfo {
        code: "ICN",
        id: "34",
        name: "Seoul",
    },
    RegionInfo {
        code: "MIA",
        id: "39",
        name: "Miami",
    },
    RegionInfo {
        code: "SGP",
        id: "40",
        name: "Singapore",
    },
];

/// Look up the numeric region identifier for a region code.
///
/// Matching is exact and case-sensitive. Unknown codes return `None`.
///
/// ```
/// use vultr_metadata::region_code_to_id;
///
/// assert_eq!(region_code_to_id("EWR"), Some("1"));
/// assert_eq!(region_code_to_id("ewr"), None);
/// ```
pub fn region_code_to_id(code: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|region| region.code == code)
        .map(|region| region.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ewr() {
        assert_eq!(region_code_to_id("EWR"), Some("1"));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(region_code_to_id("unknown-code"), None);
        assert_eq!(region_code_to_id(""), None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(region_code_to_id("lax"), None);
        assert_eq!(region_code_to_id("LAX"), Some("5"));
    }

    #[test]
    fn test_table_has_unique_codes_and_ids() {
        let codes: HashSet<_> = REGIONS.iter().map(|r| r.code).collect();
        let ids: HashSet<_> = REGIONS.iter().map(|r| r.id).collect();
        assert_eq!(codes.len(), REGIONS.len());
        assert_eq!(ids.len(), REGIONS.len());
    }

    #[test]
    fn test_every_entry_resolves() {
        for region in REGIONS {
            assert_eq!(region_code_to_id(region.code), Some(region.id));
            assert!(region.id.parse::<u32>().is_ok(), "{} id", region.code);
        }
    }
}
