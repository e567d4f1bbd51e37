//! Variant resolution over a product's option selections.
//!
//! A product defines named options (e.g. "Color": Red, Blue) and a flat list of
//! variants, each carrying one `(option, value)` pair per option. The shopper's
//! in-progress choice is a [`Selections`] map. Everything here is a pure
//! function of explicit inputs; nothing reads ambient page state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{ProductOption, ProductVariant};

/// Currently chosen value for each option, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selections(IndexMap<String, String>);

impl Selections {
    /// Default selections for a product: the first listed value of each option.
    ///
    /// Options with an empty name or no values are skipped.
    #[must_use]
    pub fn defaults(options: &[ProductOption]) -> Self {
        Self(
            options
                .iter()
                .filter(|option| !option.name.is_empty())
                .filter_map(|option| {
                    option
                        .values
                        .first()
                        .map(|value| (option.name.clone(), value.clone()))
                })
                .collect(),
        )
    }

    /// Chosen value for an option.
    #[must_use]
    pub fn get(&self, option_name: &str) -> Option<&str> {
        self.0.get(option_name).map(String::as_str)
    }

    /// Iterate `(option, value)` pairs in option order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of options with a chosen value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no option has a chosen value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches(&self, variant: &ProductVariant) -> bool {
        variant
            .selected_options
            .iter()
            .all(|opt| self.get(&opt.name) == Some(opt.value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selections {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Find the variant whose selected options all match `selections`.
///
/// Returns `None` when the combination does not exist in the catalog; callers
/// treat that as an incomplete selection and disable purchasing.
#[must_use]
pub fn resolve_selected_variant<'a>(
    selections: &Selections,
    variants: &'a [ProductVariant],
) -> Option<&'a ProductVariant> {
    variants.iter().find(|variant| selections.matches(variant))
}

/// Whether choosing `value` for `option_name` can lead to a purchasable variant
/// while every other current selection stays fixed.
///
/// True iff some variant has `value` for `option_name`, agrees with all other
/// selected pairs, and is available for sale.
#[must_use]
pub fn is_option_value_reachable(
    option_name: &str,
    value: &str,
    selections: &Selections,
    variants: &[ProductVariant],
) -> bool {
    variants.iter().any(|variant| {
        let has_value = variant
            .selected_options
            .iter()
            .any(|opt| opt.name == option_name && opt.value == value);
        if !has_value {
            return false;
        }

        let others_match = selections
            .iter()
            .filter(|(name, _)| *name != option_name)
            .all(|(name, chosen)| {
                variant
                    .selected_options
                    .iter()
                    .any(|opt| opt.name == name && opt.value == chosen)
            });

        others_match && variant.available_for_sale
    })
}

/// Return new selections with exactly one option replaced.
///
/// Other options are left untouched even if the resulting combination matches
/// no variant.
#[must_use]
pub fn set_option(selections: &Selections, option_name: &str, value: &str) -> Selections {
    let mut next = selections.clone();
    next.0.insert(option_name.to_string(), value.to_string());
    next
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{Price, SelectedOption};

    fn variant(id: &str, color: &str, size: &str, available: bool) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: format!("{color} / {size}"),
            available_for_sale: available,
            quantity_available: Some(if available { 5 } else { 0 }),
            image: None,
            price: Price::new(Decimal::from(20), "USD"),
            selected_options: vec![
                SelectedOption::new("Color", color),
                SelectedOption::new("Size", size),
            ],
        }
    }

    fn options() -> Vec<ProductOption> {
        vec![
            ProductOption {
                id: "o1".to_string(),
                name: "Color".to_string(),
                values: vec!["Red".to_string(), "Blue".to_string()],
            },
            ProductOption {
                id: "o2".to_string(),
                name: "Size".to_string(),
                values: vec!["S".to_string(), "M".to_string()],
            },
        ]
    }

    fn full_grid() -> Vec<ProductVariant> {
        vec![
            variant("red-s", "Red", "S", true),
            variant("red-m", "Red", "M", true),
            variant("blue-s", "Blue", "S", true),
            variant("blue-m", "Blue", "M", true),
        ]
    }

    #[test]
    fn test_defaults_use_first_value() {
        let selections = Selections::defaults(&options());
        assert_eq!(selections.get("Color"), Some("Red"));
        assert_eq!(selections.get("Size"), Some("S"));
        assert_eq!(selections.len(), 2);
    }

    #[test]
    fn test_defaults_skip_empty_options() {
        let mut opts = options();
        opts.push(ProductOption {
            id: "o3".to_string(),
            name: "Material".to_string(),
            values: Vec::new(),
        });
        opts.push(ProductOption {
            id: "o4".to_string(),
            name: String::new(),
            values: vec!["x".to_string()],
        });
        let selections = Selections::defaults(&opts);
        assert_eq!(selections.len(), 2);
        assert_eq!(selections.get("Material"), None);
    }

    #[test]
    fn test_resolve_exact_combination() {
        let variants = full_grid();
        let selections: Selections = [("Color", "Red"), ("Size", "M")].into_iter().collect();
        let resolved = resolve_selected_variant(&selections, &variants).unwrap();
        assert_eq!(resolved.id, "red-m");
        assert_eq!(
            resolved.selected_options,
            vec![
                SelectedOption::new("Color", "Red"),
                SelectedOption::new("Size", "M")
            ]
        );
    }

    #[test]
    fn test_resolve_missing_combination_is_none() {
        let variants = vec![variant("red-s", "Red", "S", true)];
        let selections: Selections = [("Color", "Blue"), ("Size", "S")].into_iter().collect();
        assert!(resolve_selected_variant(&selections, &variants).is_none());
        assert!(resolve_selected_variant(&selections, &[]).is_none());
    }

    #[test]
    fn test_resolve_incomplete_selection_is_none() {
        let variants = full_grid();
        let selections: Selections = [("Color", "Red")].into_iter().collect();
        assert!(resolve_selected_variant(&selections, &variants).is_none());
    }

    #[test]
    fn test_reachable_when_available_combination_exists() {
        let variants = full_grid();
        let selections: Selections = [("Color", "Red"), ("Size", "M")].into_iter().collect();
        assert!(is_option_value_reachable("Color", "Blue", &selections, &variants));
    }

    #[test]
    fn test_unreachable_when_combination_sold_out() {
        let variants = vec![
            variant("red-m", "Red", "M", true),
            variant("blue-m", "Blue", "M", false),
            variant("blue-s", "Blue", "S", true),
        ];
        let selections: Selections = [("Color", "Red"), ("Size", "M")].into_iter().collect();
        assert!(!is_option_value_reachable("Color", "Blue", &selections, &variants));
        // Blue is still reachable once the size moves to S.
        let selections = set_option(&selections, "Size", "S");
        assert!(is_option_value_reachable("Color", "Blue", &selections, &variants));
    }

    #[test]
    fn test_unreachable_when_combination_missing() {
        let variants = vec![
            variant("red-m", "Red", "M", true),
            variant("blue-s", "Blue", "S", true),
        ];
        let selections: Selections = [("Color", "Red"), ("Size", "M")].into_iter().collect();
        assert!(!is_option_value_reachable("Color", "Blue", &selections, &variants));
        assert!(!is_option_value_reachable("Color", "Green", &selections, &variants));
    }

    #[test]
    fn test_set_option_does_not_cascade() {
        let variants = vec![
            variant("red-s", "Red", "S", true),
            variant("blue-m", "Blue", "M", true),
        ];
        let selections: Selections = [("Color", "Red"), ("Size", "S")].into_iter().collect();
        let next = set_option(&selections, "Color", "Blue");

        assert_eq!(next.get("Color"), Some("Blue"));
        assert_eq!(next.get("Size"), Some("S"));
        assert_eq!(selections.get("Color"), Some("Red"));
        assert!(resolve_selected_variant(&next, &variants).is_none());
    }

    #[test]
    fn test_set_option_keeps_option_order() {
        let selections = Selections::defaults(&options());
        let next = set_option(&selections, "Color", "Blue");
        let names: Vec<&str> = next.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Color", "Size"]);
    }
}
