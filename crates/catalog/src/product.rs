use core::str::FromStr;
use serde::{Deserialize, Serialize};

use vitrine_core::{DomainError, DomainResult, Entity};

/// Product identifier (assigned by the catalog source).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))?;
        Ok(Self(raw))
    }
}

/// Garment size (closed set).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl Size {
    /// Every size the store sells, in display order.
    pub const ALL: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];

    pub fn label(&self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
        }
    }
}

impl core::fmt::Display for Size {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XS" => Ok(Size::Xs),
            "S" => Ok(Size::S),
            "M" => Ok(Size::M),
            "L" => Ok(Size::L),
            "XL" => Ok(Size::Xl),
            "XXL" => Ok(Size::Xxl),
            other => Err(DomainError::invalid_selection(format!(
                "unknown size '{other}'"
            ))),
        }
    }
}

/// Garment color (closed set; the collection is monochrome).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Gray,
}

impl Color {
    /// Every color the store sells, in display order.
    pub const ALL: [Color; 3] = [Color::Black, Color::White, Color::Gray];

    pub fn label(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Gray => "Gray",
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Color {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "white" => Ok(Color::White),
            "gray" => Ok(Color::Gray),
            other => Err(DomainError::invalid_selection(format!(
                "unknown color '{other}'"
            ))),
        }
    }
}

/// A purchasable product.
///
/// Products are immutable once constructed; the catalog source owns them and
/// hands out a read-only sequence. Prices are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: u64,
    original_price: Option<u64>,
    image: String,
    sizes: Vec<Size>,
    colors: Vec<Color>,
    brand: String,
    category: String,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: u64,
        original_price: Option<u64>,
        image: impl Into<String>,
        sizes: Vec<Size>,
        colors: Vec<Color>,
        brand: impl Into<String>,
        category: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if sizes.is_empty() {
            return Err(DomainError::validation(
                "product must offer at least one size",
            ));
        }

        if colors.is_empty() {
            return Err(DomainError::validation(
                "product must offer at least one color",
            ));
        }

        if let Some(original) = original_price {
            if original < price {
                return Err(DomainError::validation(
                    "original price cannot undercut the current price",
                ));
            }
        }

        Ok(Self {
            id,
            name,
            price,
            original_price,
            image: image.into(),
            sizes,
            colors,
            brand: brand.into(),
            category: category.into(),
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn original_price(&self) -> Option<u64> {
        self.original_price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn offers_size(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }

    pub fn offers_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Whether a pre-discount price exists for strikethrough display.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some()
    }

    /// Percentage saved relative to the original price, rounded down.
    ///
    /// `None` when there is no original price or no actual saving.
    pub fn discount_percent(&self) -> Option<u64> {
        match self.original_price {
            Some(original) if original > self.price => {
                Some((original - self.price) * 100 / original)
            }
            _ => None,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
