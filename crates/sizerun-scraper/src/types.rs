//! Catalog API response types for the product and prices endpoints.
//!
//! ## Observed shape
//!
//! ### `id`
//! Numeric in observed responses, but modelled as number-or-string so a
//! stringified id does not fail the whole product.
//!
//! ### Required vs. optional fields
//! Everything is `Option` at the serde level. The fields the export cannot
//! do without (`id`, `sku`, `category`, the currency container) are checked
//! in [`crate::flatten`] so a missing one surfaces as
//! [`crate::ScraperError::MalformedProductData`] naming the field, rather than
//! an opaque serde message.
//!
//! ### `releaseDate`
//! ISO-8601 with a trailing `Z` (`"2015-05-30T23:59:59.999Z"`), or `null`.
//!
//! ### Prices
//! The prices endpoint returns a bare JSON array. Amounts are integers in
//! minor currency units; a `lastSoldPriceCents.amount` of `0` means the size
//! has never sold. `lowestPriceCents` may be an object with no `amount`.

use serde::Deserialize;

/// Product detail from the product endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    #[serde(default)]
    pub id: Option<CatalogId>,

    /// Base style code, e.g. `"555088-101"`.
    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub upper_material: Option<String>,

    #[serde(default)]
    pub brand_name: Option<String>,

    #[serde(default)]
    pub category: Option<Vec<String>>,

    #[serde(default)]
    pub single_gender: Option<String>,

    /// Holds the display currency; the amount inside is not used.
    #[serde(default)]
    pub localized_special_display_price_cents: Option<LocalizedPrice>,

    #[serde(default)]
    pub story: Option<String>,

    #[serde(default)]
    pub details: Option<String>,

    #[serde(default)]
    pub silhouette: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub release_date: Option<String>,

    /// Gallery in display order. Position matters for photo selection.
    #[serde(default)]
    pub product_template_external_pictures: Option<Vec<CatalogPicture>>,
}

/// Product id as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CatalogId {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogId::Number(n) => write!(f, "{n}"),
            CatalogId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedPrice {
    #[serde(default)]
    pub currency: Option<String>,
}

/// One gallery image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPicture {
    pub main_picture_url: String,
}

/// One size/price quote from the prices endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub size_option: SizeOption,
    pub last_sold_price_cents: Money,
    #[serde(default)]
    pub lowest_price_cents: Option<Money>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizeOption {
    /// Human-readable size, e.g. `"10.5"`. Used as the dedup key.
    pub presentation: String,
}

/// Amount in minor currency units.
#[derive(Debug, Clone, Deserialize)]
pub struct Money {
    #[serde(default)]
    pub amount: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{price_json, product_json};

    #[test]
    fn deserializes_full_product() {
        let product: CatalogProduct = serde_json::from_value(product_json(42, "555088-101")).unwrap();
        assert_eq!(product.id.unwrap().to_string(), "42");
        assert_eq!(product.sku.as_deref(), Some("555088-101"));
        assert_eq!(product.brand_name.as_deref(), Some("Air Jordan"));
        assert_eq!(
            product
                .localized_special_display_price_cents
                .and_then(|p| p.currency)
                .as_deref(),
            Some("USD")
        );
        assert_eq!(product.product_template_external_pictures.unwrap().len(), 4);
    }

    #[test]
    fn missing_fields_become_none() {
        let product: CatalogProduct = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(product.id.is_none());
        assert!(product.category.is_none());
        assert!(product.product_template_external_pictures.is_none());
    }

    #[test]
    fn string_id_is_accepted() {
        let product: CatalogProduct =
            serde_json::from_value(serde_json::json!({ "id": "abc-1" })).unwrap();
        assert_eq!(product.id, Some(CatalogId::Text("abc-1".to_owned())));
    }

    #[test]
    fn price_entry_without_lowest_amount() {
        let entry: PriceEntry = serde_json::from_value(price_json("9", 1999, None)).unwrap();
        assert_eq!(entry.size_option.presentation, "9");
        assert_eq!(entry.last_sold_price_cents.amount, Some(1999));
        assert!(entry.lowest_price_cents.unwrap().amount.is_none());
    }

    #[test]
    fn price_entry_without_size_option_is_rejected() {
        let result = serde_json::from_value::<PriceEntry>(serde_json::json!({
            "lastSoldPriceCents": { "amount": 100 }
        }));
        assert!(result.is_err());
    }
}
