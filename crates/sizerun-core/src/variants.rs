use rust_decimal::Decimal;
use serde::Serialize;

/// Column labels of the tabular export, in export order.
///
/// These are the headers the downstream catalog import expects and must stay
/// in sync with the `serde(rename)` attributes on [`VariantRecord`].
pub const EXPORT_COLUMNS: [&str; 28] = [
    "id",
    "Родительський артикул",
    "Артикул для отображения на сайте",
    "Название(RU)",
    "Название(UA)",
    "Название модификации(RU)",
    "Название модификации(UA)",
    "Матеріал верха",
    "Назва бренду",
    "Розділ",
    "Категорія товару",
    "Для кого",
    "Валюта",
    "Фото",
    "Описание товара(RU)",
    "Описание товара(UA)",
    "Короткое описание(RU)",
    "Короткое описание(UA)",
    "Колекція",
    "Тип",
    "Колір",
    "Дата релізу",
    "Артикул",
    "Розмір",
    "Ціна",
    "Стара ціна",
    "Наявність",
    "Отображать",
];

/// One size of one product, flattened for export.
///
/// Field order is the export column order. Text values pulled from the
/// catalog are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantRecord {
    /// Catalog product id, stringified.
    pub id: String,
    #[serde(rename = "Родительський артикул")]
    pub parent_sku: String,
    #[serde(rename = "Артикул для отображения на сайте")]
    pub display_sku: String,
    #[serde(rename = "Название(RU)")]
    pub name_ru: Option<String>,
    #[serde(rename = "Название(UA)")]
    pub name_ua: Option<String>,
    #[serde(rename = "Название модификации(RU)")]
    pub variant_name_ru: Option<String>,
    #[serde(rename = "Название модификации(UA)")]
    pub variant_name_ua: Option<String>,
    #[serde(rename = "Матеріал верха")]
    pub upper_material: Option<String>,
    #[serde(rename = "Назва бренду")]
    pub brand_name: Option<String>,
    /// Storefront section; the brand name doubles as the section.
    #[serde(rename = "Розділ")]
    pub section: Option<String>,
    /// Category list joined with `", "`.
    #[serde(rename = "Категорія товару")]
    pub category: String,
    #[serde(rename = "Для кого")]
    pub gender: Option<String>,
    #[serde(rename = "Валюта")]
    pub currency: String,
    /// Selected picture URLs joined with `"; "`. `None` when the product has
    /// no pictures.
    #[serde(rename = "Фото")]
    pub photos: Option<String>,
    #[serde(rename = "Описание товара(RU)")]
    pub description_ru: Option<String>,
    #[serde(rename = "Описание товара(UA)")]
    pub description_ua: Option<String>,
    #[serde(rename = "Короткое описание(RU)")]
    pub short_description_ru: Option<String>,
    #[serde(rename = "Короткое описание(UA)")]
    pub short_description_ua: Option<String>,
    #[serde(rename = "Колекція")]
    pub collection: Option<String>,
    #[serde(rename = "Тип")]
    pub product_type: Option<String>,
    #[serde(rename = "Колір")]
    pub color: Option<String>,
    /// `DD.MM.YYYY`, or the "no information" sentinel.
    #[serde(rename = "Дата релізу")]
    pub release_date: String,
    /// Base SKU for the first size, `SKU-N` for the N-th following size.
    #[serde(rename = "Артикул")]
    pub sku: String,
    #[serde(rename = "Розмір")]
    pub size: String,
    #[serde(rename = "Ціна")]
    pub price: Decimal,
    #[serde(rename = "Стара ціна")]
    pub old_price: Decimal,
    #[serde(rename = "Наявність")]
    pub availability: String,
    #[serde(rename = "Отображать")]
    pub display: String,
}
