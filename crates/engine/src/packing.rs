//! Packing list generation.
//!
//! The generated part of a list depends only on the travel style and the trip
//! length. Items the user adds by hand are stored as custom items and appended
//! after the generated ones.

use serde::{Deserialize, Serialize};

use crate::TravelStyle;

/// Clothing quantities stop growing after a week (laundry takes over).
const MAX_CLOTHING_DAYS: u32 = 7;

/// Most units of one custom item a list accepts.
pub const MAX_ITEM_QUANTITY: u32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingCategory {
    Documents,
    Clothing,
    Toiletries,
    Electronics,
    Extras,
    Custom,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingItem {
    /// Set for custom items only; generated items have no identity.
    pub id: Option<String>,
    pub name: String,
    pub category: PackingCategory,
    pub quantity: u32,
    pub packed: bool,
}

impl PackingItem {
    fn generated(name: &str, category: PackingCategory, quantity: u32) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            category,
            quantity,
            packed: false,
        }
    }
}

/// Items every trip of this style and length should carry.
#[must_use]
pub fn base_items(style: TravelStyle, days: u32) -> Vec<PackingItem> {
    use PackingCategory::*;

    let days = days.max(1);
    let clothing_days = days.min(MAX_CLOTHING_DAYS);

    let mut items = vec![
        PackingItem::generated("Passport / ID", Documents, 1),
        PackingItem::generated("Travel insurance details", Documents, 1),
        PackingItem::generated("Bank card and some cash", Documents, 1),
        PackingItem::generated("T-shirts", Clothing, clothing_days),
        PackingItem::generated("Underwear", Clothing, clothing_days),
        PackingItem::generated("Socks", Clothing, clothing_days),
        PackingItem::generated("Toothbrush and toothpaste", Toiletries, 1),
        PackingItem::generated("Phone charger", Electronics, 1),
        PackingItem::generated("Power adapter", Electronics, 1),
    ];

    match style {
        TravelStyle::Budget => {
            items.push(PackingItem::generated("Padlock", Extras, 1));
            items.push(PackingItem::generated("Quick-dry towel", Extras, 1));
            items.push(PackingItem::generated("Reusable water bottle", Extras, 1));
        }
        TravelStyle::MidRange => {
            items.push(PackingItem::generated("Day backpack", Extras, 1));
        }
        TravelStyle::Luxury => {
            items.push(PackingItem::generated("Formal outfit", Clothing, 1));
            items.push(PackingItem::generated("Dress shoes", Clothing, 1));
        }
    }

    if days > MAX_CLOTHING_DAYS {
        items.push(PackingItem::generated("Laundry bag", Extras, 1));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantity_of(items: &[PackingItem], name: &str) -> Option<u32> {
        items.iter().find(|i| i.name == name).map(|i| i.quantity)
    }

    #[test]
    fn clothing_scales_with_days_up_to_a_week() {
        let short = base_items(TravelStyle::MidRange, 3);
        assert_eq!(quantity_of(&short, "Socks"), Some(3));
        assert_eq!(quantity_of(&short, "Laundry bag"), None);

        let long = base_items(TravelStyle::MidRange, 12);
        assert_eq!(quantity_of(&long, "Socks"), Some(7));
        assert_eq!(quantity_of(&long, "Laundry bag"), Some(1));
    }

    #[test]
    fn zero_days_counts_as_one() {
        let items = base_items(TravelStyle::Budget, 0);
        assert_eq!(quantity_of(&items, "T-shirts"), Some(1));
    }

    #[test]
    fn style_specific_items() {
        assert!(quantity_of(&base_items(TravelStyle::Budget, 2), "Padlock").is_some());
        assert!(quantity_of(&base_items(TravelStyle::Luxury, 2), "Padlock").is_none());
        assert!(quantity_of(&base_items(TravelStyle::Luxury, 2), "Formal outfit").is_some());
    }

    #[test]
    fn generated_items_start_unpacked_without_id() {
        assert!(
            base_items(TravelStyle::Luxury, 4)
                .iter()
                .all(|i| i.id.is_none() && !i.packed)
        );
    }
}
