use serde::{Deserialize, Serialize};

/// Lightweight list entry as shown in the catalog grid.
///
/// Produced by the remote client from a raw list page; immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub id: u32,
    pub name: String,
    pub image_url: String,
}

/// One of an entry's typings, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    pub type_name: String,
}

/// A single base stat, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub base_stat: u32,
    pub stat_name: String,
}

/// Full entry fetched on demand for the detail view. Not cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullRecord {
    pub id: u32,
    pub name: String,
    /// Height in decimeters, as reported upstream.
    pub height: u32,
    /// Weight in decigrams, as reported upstream.
    pub weight: u32,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatLine>,
}

/// Stat bars in the detail view are scaled against this maximum.
pub const STAT_BAR_MAX: u32 = 200;

impl FullRecord {
    /// Height in meters for display.
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms for display.
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

/// Format a dex number the way the catalog displays it: `#001`, `#151`.
pub fn format_dex_id(id: u32) -> String {
    format!("#{id:03}")
}

/// Upper-case the first letter of each hyphen- or space-separated word.
///
/// Upstream names are lower-case ("pikachu", "mr-mime"); the views show
/// them title-cased.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c == '-' || c == ' ';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dex_id_pads_to_three_digits() {
        assert_eq!(format_dex_id(1), "#001");
        assert_eq!(format_dex_id(25), "#025");
        assert_eq!(format_dex_id(151), "#151");
    }

    #[test]
    fn test_title_case_simple_and_hyphenated() {
        assert_eq!(title_case("pikachu"), "Pikachu");
        assert_eq!(title_case("mr-mime"), "Mr-Mime");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_unit_conversions() {
        let record = FullRecord {
            id: 25,
            name: "pikachu".to_string(),
            height: 4,
            weight: 60,
            types: vec![],
            stats: vec![],
        };
        assert!((record.height_m() - 0.4).abs() < 1e-9);
        assert!((record.weight_kg() - 6.0).abs() < 1e-9);
    }
}
