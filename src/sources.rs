//! Static profiles for the two supported quote pages.
//!
//! These are not user-configurable at runtime; only each source's base URL
//! can be overridden through the config file (which is also how the
//! integration tests point the service at a mock server).

use crate::extract::{SourceProfile, UnitRule};

pub const PHU_QUY_BASE_URL: &str = "https://giabac.phuquygroup.vn";
pub const PNJ_BASE_URL: &str = "https://www.pnj.com.vn";

/// Phu Quy silver bar quotes. Three-column rows with the buy price in the
/// third cell, quoted in full VND.
pub fn silver(base_url: &str) -> SourceProfile {
    SourceProfile {
        name: "silver",
        url: format!("{base_url}/"),
        match_phrases: vec![
            "bạc miếng phú quý 999",
            "bạc thương hiệu phú quý",
            "bạc miếng phú quý 999 1 lượng",
        ],
        min_cell_count: 3,
        price_column: 2,
        include_header_cells: false,
        unit_rule: UnitRule::None,
    }
}

/// PNJ gold ring quotes. The product-name cell is a `<th>`, the buy price
/// sits next to it, and prices are quoted in thousand VND per chi, hence
/// the scale rule.
pub fn gold(base_url: &str) -> SourceProfile {
    SourceProfile {
        name: "PNJ gold",
        url: format!("{base_url}/site/gia-vang"),
        match_phrases: vec!["nhẫn trơn pnj 999.9"],
        min_cell_count: 2,
        price_column: 1,
        include_header_cells: true,
        unit_rule: UnitRule::ScaleIfBelow {
            threshold: 1_000_000,
            factor: 1000,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silver_targets_site_root() {
        let profile = silver("http://127.0.0.1:9000");
        assert_eq!(profile.url, "http://127.0.0.1:9000/");
        assert_eq!(profile.price_column, 2);
        assert_eq!(profile.unit_rule, UnitRule::None);
    }

    #[test]
    fn gold_targets_quote_page() {
        let profile = gold(PNJ_BASE_URL);
        assert_eq!(profile.url, "https://www.pnj.com.vn/site/gia-vang");
        assert!(profile.include_header_cells);
        assert_eq!(
            profile.unit_rule,
            UnitRule::ScaleIfBelow {
                threshold: 1_000_000,
                factor: 1000
            }
        );
    }
}
