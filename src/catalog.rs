//! The shop catalogue and its client-side filtering.
//!
//! Products are fixed data listed in display order. Searching never fails: an
//! empty query matches everything and an unknown category matches nothing.

use std::fmt;

/// A price in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u32);

impl Price {
    /// Create a price from cents.
    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    /// The price in cents.
    #[must_use]
    pub const fn cents(self) -> u32 {
        self.0
    }

    /// The price of `quantity` units, saturating on overflow.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Product groupings shown as filter chips in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Category {
    /// Course textbooks.
    Textbook,
    /// Clothing.
    Apparel,
    /// Stationery.
    Supplies,
    /// Bags and other gear.
    Accessories,
}

impl Category {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Textbook => "Textbook",
            Self::Apparel => "Apparel",
            Self::Supplies => "Supplies",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stock indicator shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Plenty on the shelf.
    InStock,
    /// Few copies left.
    LowStock,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
        })
    }
}

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Listing identifier.
    pub id: u32,
    /// Product title.
    pub title: &'static str,
    /// Author or brand line.
    pub author: &'static str,
    /// Current price.
    pub price: Price,
    /// Price before the current discount, if any.
    pub original_price: Option<Price>,
    /// Product grouping.
    pub category: Category,
    /// Average rating out of five, in tenths.
    pub rating_tenths: u8,
    /// Stock indicator.
    pub availability: Availability,
}

impl Product {
    /// Whole-percent saving against the original price.
    ///
    /// Returns `None` when the product is not discounted.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?.cents();
        let saving = original.checked_sub(self.price.cents())?;
        if original == 0 || saving == 0 {
            return None;
        }
        let rounded = (u64::from(saving) * 100 + u64::from(original) / 2) / u64::from(original);
        u32::try_from(rounded).ok()
    }

    /// Number of filled stars on the product card.
    #[must_use]
    pub const fn full_stars(&self) -> u8 {
        self.rating_tenths / 10
    }

    fn matches(&self, needle: &str) -> bool {
        [self.title, self.author, self.category.label()]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Products listed in the shop, in display order.
pub static PRODUCTS: &[Product] = &[
    Product {
        id: 1,
        title: "Introduction to Psychology",
        author: "James W. Kalat",
        price: Price::from_cents(12_999),
        original_price: Some(Price::from_cents(15_999)),
        category: Category::Textbook,
        rating_tenths: 45,
        availability: Availability::InStock,
    },
    Product {
        id: 2,
        title: "Cardinal Hoodie",
        author: "Ball State Apparel",
        price: Price::from_cents(4_999),
        original_price: None,
        category: Category::Apparel,
        rating_tenths: 50,
        availability: Availability::InStock,
    },
    Product {
        id: 3,
        title: "Calculus: Early Transcendentals",
        author: "James Stewart",
        price: Price::from_cents(19_999),
        original_price: Some(Price::from_cents(24_999)),
        category: Category::Textbook,
        rating_tenths: 43,
        availability: Availability::LowStock,
    },
    Product {
        id: 4,
        title: "Ball State T-Shirt",
        author: "Ball State Apparel",
        price: Price::from_cents(2_499),
        original_price: None,
        category: Category::Apparel,
        rating_tenths: 48,
        availability: Availability::InStock,
    },
    Product {
        id: 5,
        title: "Business Communication Today",
        author: "Courtland L. Bovée",
        price: Price::from_cents(8_999),
        original_price: Some(Price::from_cents(11_999)),
        category: Category::Textbook,
        rating_tenths: 42,
        availability: Availability::InStock,
    },
    Product {
        id: 6,
        title: "Cardinal Notebook Set",
        author: "Office Supplies",
        price: Price::from_cents(1_599),
        original_price: None,
        category: Category::Supplies,
        rating_tenths: 46,
        availability: Availability::InStock,
    },
    Product {
        id: 7,
        title: "Chemistry: The Central Science",
        author: "Theodore E. Brown",
        price: Price::from_cents(17_999),
        original_price: Some(Price::from_cents(21_999)),
        category: Category::Textbook,
        rating_tenths: 47,
        availability: Availability::InStock,
    },
    Product {
        id: 8,
        title: "Ball State Backpack",
        author: "Ball State Gear",
        price: Price::from_cents(5_999),
        original_price: None,
        category: Category::Accessories,
        rating_tenths: 49,
        availability: Availability::InStock,
    },
];

/// Filter the catalogue.
///
/// `query` is a case-insensitive substring matched against title, author and
/// category; surrounding whitespace is ignored and a blank query matches every
/// product. Results keep listing order.
pub fn search(
    query: &str,
    category: Option<Category>,
) -> impl Iterator<Item = &'static Product> + use<> {
    let needle = query.trim().to_lowercase();
    PRODUCTS.iter().filter(move |product| {
        category.is_none_or(|wanted| product.category == wanted)
            && (needle.is_empty() || product.matches(&needle))
    })
}
