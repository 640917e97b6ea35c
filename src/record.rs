//! Records the index stores.
//!
//! The tree only needs three things from a record: a numeric sort key, a
//! secondary field to tell apart records that share a key, and a stable
//! identity for the caller's collection. Everything else is payload.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Stable identity of a record in the caller's collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

/// Anything that can be placed in a [`BalancedIndex`](crate::tree::BalancedIndex).
pub trait Record {
    /// The raw numeric sort key. Validated by the index before use.
    fn sort_key(&self) -> f64;

    /// Secondary field used to break ties between equal keys.
    fn tie_break(&self) -> &str;

    /// Stable identity, used by the catalog for removal and update.
    fn id(&self) -> RecordId;
}

/// A catalogue product, keyed by price and tie-broken by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub category: String,
}

impl Product {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        price: f64,
        stock: u32,
        category: impl Into<String>,
    ) -> Product {
        return Product {
            id: RecordId(id),
            name: name.into(),
            price,
            stock,
            category: category.into(),
        };
    }

    /// Value of the units on hand.
    pub fn stock_value(&self) -> f64 {
        return self.price * self.stock as f64;
    }
}

impl Record for Product {
    fn sort_key(&self) -> f64 {
        return self.price;
    }

    fn tie_break(&self) -> &str {
        return &self.name;
    }

    fn id(&self) -> RecordId {
        return self.id;
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "[{}] {} - {:.2} ({} un.)", self.id, self.name, self.price, self.stock);
    }
}

// name, price, category, stock
const SAMPLE: &[(&str, f64, &str, u32)] = &[
    ("Dell Inspiron Notebook", 3499.90, "Electronics", 15),
    ("Logitech MX Master Mouse", 349.90, "Electronics", 45),
    ("Redragon Mechanical Keyboard", 289.90, "Electronics", 30),
    ("LG 27in Monitor", 1299.90, "Electronics", 12),
    ("Logitech C920 Webcam", 449.90, "Electronics", 25),
    ("Sony WH-1000XM4 Headphones", 1599.90, "Electronics", 18),
    ("Samsung 1TB SSD", 499.90, "Electronics", 50),
    ("Kingston 64GB Flash Drive", 39.90, "Electronics", 100),
    ("Basic Black T-Shirt", 49.90, "Clothing", 80),
    ("Men's Jeans", 129.90, "Clothing", 45),
    ("Nike Air Max Sneakers", 599.90, "Clothing", 30),
    ("Leather Jacket", 399.90, "Clothing", 20),
    ("Floral Dress", 159.90, "Clothing", 35),
    ("Hooded Sweatshirt", 119.90, "Clothing", 55),
    ("Specialty Coffee 250g", 24.90, "Food", 120),
    ("Lindt Chocolate 100g", 18.90, "Food", 150),
    ("Extra Virgin Olive Oil 500ml", 34.90, "Food", 80),
    ("Organic Honey 300g", 29.90, "Food", 60),
    ("Whole Grain Crackers", 12.90, "Food", 200),
    ("DXRacer Gaming Chair", 1499.90, "Furniture", 10),
    ("Office Desk", 899.90, "Furniture", 15),
    ("Bookshelf", 349.90, "Furniture", 12),
    ("Recliner", 799.90, "Furniture", 8),
    ("Introduction to Algorithms", 189.90, "Books", 25),
    ("Clean Code", 79.90, "Books", 40),
    ("Design Patterns", 99.90, "Books", 30),
    ("Data Structures in C", 69.90, "Books", 35),
    ("Python for Data Analysis", 89.90, "Books", 28),
    ("LEGO Star Wars", 299.90, "Toys", 20),
    ("Barbie Doll", 89.90, "Toys", 45),
    ("Hot Wheels 5-Pack", 49.90, "Toys", 60),
    ("1000-Piece Puzzle", 59.90, "Toys", 35),
    ("Imported Perfume 100ml", 249.90, "Beauty", 40),
    ("Complete Makeup Kit", 179.90, "Beauty", 30),
    ("Facial Moisturizer", 89.90, "Beauty", 55),
    ("Shampoo and Conditioner Kit", 69.90, "Beauty", 70),
    ("Nike Soccer Ball", 149.90, "Sports", 40),
    ("Wilson Tennis Racket", 399.90, "Sports", 15),
    ("Mountain Bike", 1899.90, "Sports", 8),
    ("5kg Dumbbells (pair)", 89.90, "Sports", 50),
    ("Yoga Mat", 79.90, "Sports", 45),
    ("Executive Backpack", 199.90, "Other", 35),
    ("1L Thermos", 69.90, "Other", 60),
    ("Automatic Umbrella", 49.90, "Other", 80),
    ("Casio Digital Watch", 299.90, "Other", 25),
    ("Desk Lamp", 0.0, "Other", 0),
    ("Gift Card", 50.0, "", 0),
];

/// A fixed demo catalogue. Ids run from 1 in list order.
///
/// Several prices repeat on purpose so the duplicate-key path gets exercised.
pub fn sample_products() -> Vec<Product> {
    return SAMPLE
        .iter()
        .enumerate()
        .map(|(i, (name, price, category, stock))| {
            Product::new(i as u64 + 1, *name, *price, *stock, *category)
        })
        .collect();
}
