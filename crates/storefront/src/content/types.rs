//! Editorial content documents from the headless CMS.
//!
//! The CMS owns these schemas; the structs mirror the projections the
//! content query selects. Every section is optional - merchandising fills
//! them in per product, and most products have only some.

use serde::{Deserialize, Serialize};

/// Reference to an image asset managed by the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// The asset reference token (resolved to a CDN URL by the view layer).
    pub asset: Option<AssetRef>,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt: Option<String>,
}

/// Raw asset pointer inside an [`ImageRef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// FAQ section for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFaqs {
    /// Section title (e.g. "FAQs").
    pub title: Option<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

/// One marketing highlight (image plus copy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
}

/// Highlights section for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductHighlights {
    /// Section title (e.g. "Product Highlights").
    pub title: Option<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// One feature bullet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub icon: Option<ImageRef>,
}

/// Features section for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeatures {
    pub title: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Editorial description sections overriding/extending the catalog copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescription {
    pub description: Option<String>,
    pub product_details: Option<String>,
    pub returns_and_refunds: Option<String>,
    pub care_instructions: Option<String>,
}

/// All editorial content for one product handle, fetched in a single query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductContent {
    pub faqs: Option<ProductFaqs>,
    pub highlights: Option<ProductHighlights>,
    pub features: Option<ProductFeatures>,
    pub description: Option<ProductDescription>,
}
