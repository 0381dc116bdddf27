//! Flattening of one catalog product plus its price list into per-size
//! [`VariantRecord`]s.
//!
//! Product-level fields are resolved once; each kept size then gets a freshly
//! built record. Sizes are deduplicated on their presentation string, first
//! occurrence wins.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sizerun_core::VariantRecord;

use crate::error::ScraperError;
use crate::photos::{select_photos, PREFERRED_PHOTO_POSITIONS};
use crate::types::{CatalogProduct, PriceEntry};

/// Release-date cell for products without a release date.
pub const RELEASE_DATE_UNKNOWN: &str = "Намає інформації";

pub const IN_STOCK: &str = "В наявності";
pub const OUT_OF_STOCK: &str = "Немає в наявності";
pub const SHOWN: &str = "Да";
pub const HIDDEN: &str = "Нет";

/// Flattens `product` and its `prices` into one record per distinct size.
///
/// Records follow price-list order after dedup. The first kept size carries
/// the product SKU as-is, the n-th following one carries `"{sku}-{n}"`.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedProductData`] when the product lacks
/// `id`, `sku`, `category` or the display currency, when `releaseDate` is
/// present but unparseable, or when a kept price entry has no last-sold
/// amount.
pub fn flatten_product(
    product: &CatalogProduct,
    prices: &[PriceEntry],
) -> Result<Vec<VariantRecord>, ScraperError> {
    let base = ProductFields::resolve(product)?;

    let mut seen_sizes: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for entry in prices {
        let size = entry.size_option.presentation.as_str();
        if !seen_sizes.insert(size) {
            continue;
        }
        let sku = suffixed_sku(base.sku, records.len());
        records.push(base.variant(entry, sku)?);
    }

    Ok(records)
}

/// Product-level values shared by every size of one product.
struct ProductFields<'a> {
    product: &'a CatalogProduct,
    id: String,
    sku: &'a str,
    category: String,
    currency: &'a str,
    release_date: String,
    photos: Option<String>,
}

impl<'a> ProductFields<'a> {
    fn resolve(product: &'a CatalogProduct) -> Result<Self, ScraperError> {
        let label = product_label(product);
        let missing = |field: &str| ScraperError::MalformedProductData {
            product: label.clone(),
            reason: format!("missing {field}"),
        };

        let id = product.id.as_ref().ok_or_else(|| missing("id"))?.to_string();
        let sku = product.sku.as_deref().ok_or_else(|| missing("sku"))?;
        let category = product
            .category
            .as_ref()
            .ok_or_else(|| missing("category"))?
            .join(", ");
        let currency = product
            .localized_special_display_price_cents
            .as_ref()
            .and_then(|price| price.currency.as_deref())
            .ok_or_else(|| missing("localizedSpecialDisplayPriceCents.currency"))?;

        let release_date = format_release_date(product.release_date.as_deref()).map_err(|e| {
            ScraperError::MalformedProductData {
                product: label.clone(),
                reason: format!(
                    "unparseable releaseDate {:?}: {e}",
                    product.release_date.as_deref().unwrap_or_default()
                ),
            }
        })?;

        let photos = product
            .product_template_external_pictures
            .as_deref()
            .and_then(|pictures| select_photos(pictures, &PREFERRED_PHOTO_POSITIONS));

        Ok(Self {
            product,
            id,
            sku,
            category,
            currency,
            release_date,
            photos,
        })
    }

    fn variant(&self, entry: &PriceEntry, sku: String) -> Result<VariantRecord, ScraperError> {
        let size = &entry.size_option.presentation;
        let last_sold = entry.last_sold_price_cents.amount.ok_or_else(|| {
            ScraperError::MalformedProductData {
                product: self.id.clone(),
                reason: format!("size {size} has no lastSoldPriceCents.amount"),
            }
        })?;
        let lowest = entry
            .lowest_price_cents
            .as_ref()
            .and_then(|money| money.amount);

        let in_stock = last_sold != 0;
        let p = self.product;

        Ok(VariantRecord {
            id: self.id.clone(),
            parent_sku: self.sku.to_owned(),
            display_sku: self.sku.to_owned(),
            name_ru: p.name.clone(),
            name_ua: p.name.clone(),
            variant_name_ru: p.name.clone(),
            variant_name_ua: p.name.clone(),
            upper_material: p.upper_material.clone(),
            brand_name: p.brand_name.clone(),
            section: p.brand_name.clone(),
            category: self.category.clone(),
            gender: p.single_gender.clone(),
            currency: self.currency.to_owned(),
            photos: self.photos.clone(),
            description_ru: p.story.clone(),
            description_ua: p.story.clone(),
            short_description_ru: p.details.clone(),
            short_description_ua: p.details.clone(),
            collection: p.silhouette.clone(),
            product_type: p.product_type.clone(),
            color: p.color.clone(),
            release_date: self.release_date.clone(),
            sku,
            size: size.clone(),
            price: minor_units_to_amount(last_sold),
            old_price: minor_units_to_amount(lowest.unwrap_or(last_sold)),
            availability: if in_stock { IN_STOCK } else { OUT_OF_STOCK }.to_owned(),
            display: if in_stock { SHOWN } else { HIDDEN }.to_owned(),
        })
    }
}

/// `sku` for the first kept size, `sku-n` for the n-th one after it.
fn suffixed_sku(sku: &str, kept_before: usize) -> String {
    if kept_before == 0 {
        sku.to_owned()
    } else {
        format!("{sku}-{kept_before}")
    }
}

/// Minor currency units to a two-decimal amount, exactly (1999 → 19.99).
#[must_use]
pub fn minor_units_to_amount(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Renders an ISO-8601 release date as `DD.MM.YYYY`.
///
/// Accepts RFC 3339 timestamps, naive timestamps with an optional trailing
/// `Z`, and plain dates. `None` or a blank string yields
/// [`RELEASE_DATE_UNKNOWN`].
///
/// # Errors
///
/// Returns the `chrono` parse error when the value matches none of the
/// accepted shapes.
pub fn format_release_date(raw: Option<&str>) -> Result<String, chrono::ParseError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(RELEASE_DATE_UNKNOWN.to_owned());
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.format("%d.%m.%Y").to_string());
    }

    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    let date = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(naive, "%Y-%m-%d"))?;

    Ok(date.format("%d.%m.%Y").to_string())
}

/// Best available name for a product in error messages.
fn product_label(product: &CatalogProduct) -> String {
    product
        .id
        .as_ref()
        .map(ToString::to_string)
        .or_else(|| product.sku.clone())
        .unwrap_or_else(|| "<unidentified product>".to_owned())
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod tests;
