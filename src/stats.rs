//! Summary figures over a product collection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Product;

/// Label for products without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Per-category totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub count: usize,
    /// Sum of price * stock.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_products: usize,
    pub total_stock_value: f64,
    pub total_units: u64,
    pub average_price: f64,
    pub most_expensive: Option<Product>,
    pub cheapest: Option<Product>,
    pub out_of_stock: usize,
    pub by_category: BTreeMap<String, CategoryTotals>,
    /// `ceil(log2(n + 1))`, the height of a perfectly balanced tree over n records.
    pub theoretical_height: u32,
}

impl CatalogStats {
    pub fn from_records(records: &[Product]) -> CatalogStats {
        let mut stats = CatalogStats {
            total_products: records.len(),
            total_stock_value: 0.0,
            total_units: 0,
            average_price: 0.0,
            most_expensive: None,
            cheapest: None,
            out_of_stock: 0,
            by_category: BTreeMap::new(),
            theoretical_height: theoretical_height(records.len()),
        };
        let mut price_sum = 0.0;

        for product in records {
            let value = product.stock_value();
            stats.total_stock_value += value;
            stats.total_units += product.stock as u64;
            price_sum += product.price;
            if product.stock == 0 {
                stats.out_of_stock += 1;
            }

            // first record to reach the extreme wins
            if stats.most_expensive.as_ref().is_none_or(|max| product.price > max.price) {
                stats.most_expensive = Some(product.clone());
            }
            if stats.cheapest.as_ref().is_none_or(|min| product.price < min.price) {
                stats.cheapest = Some(product.clone());
            }

            let category = if product.category.is_empty() {
                UNCATEGORIZED
            } else {
                product.category.as_str()
            };
            let totals = stats.by_category.entry(category.to_string()).or_default();
            totals.count += 1;
            totals.value += value;
        }

        if !records.is_empty() {
            stats.average_price = price_sum / records.len() as f64;
        }
        return stats;
    }
}

/// Smallest possible height of a binary tree holding `n` nodes.
pub fn theoretical_height(n: usize) -> u32 {
    if n == 0 {
        return 0;
    }
    return (n + 1).next_power_of_two().trailing_zeros();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_products;

    #[test]
    fn empty_collection() {
        let stats = CatalogStats::from_records(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.average_price, 0.0);
        assert!(stats.most_expensive.is_none());
        assert!(stats.cheapest.is_none());
        assert_eq!(stats.theoretical_height, 0);
    }

    #[test]
    fn theoretical_heights() {
        // ceil(log2(n + 1))
        let expected = [(1, 1), (2, 2), (3, 2), (4, 3), (7, 3), (8, 4), (47, 6), (1000, 10)];
        for (n, h) in expected {
            assert_eq!(theoretical_height(n), h, "n = {}", n);
        }
    }

    #[test]
    fn totals() {
        let records = vec![
            Product::new(1, "a", 10.0, 2, "Toys"),
            Product::new(2, "b", 30.0, 0, "Toys"),
            Product::new(3, "c", 5.0, 4, ""),
            Product::new(4, "d", 30.0, 1, "Books"),
        ];
        let stats = CatalogStats::from_records(&records);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.total_units, 7);
        assert_eq!(stats.total_stock_value, 70.0);
        assert_eq!(stats.average_price, 18.75);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.most_expensive.unwrap().name, "b");
        assert_eq!(stats.cheapest.unwrap().name, "c");
        assert_eq!(stats.by_category["Toys"], CategoryTotals { count: 2, value: 20.0 });
        assert_eq!(stats.by_category[UNCATEGORIZED].count, 1);
        assert_eq!(stats.by_category.len(), 3);
    }

    #[test]
    fn sample_catalogue() {
        let stats = CatalogStats::from_records(&sample_products());
        assert_eq!(stats.total_products, 47);
        assert_eq!(stats.most_expensive.unwrap().price, 3499.90);
        assert_eq!(stats.cheapest.unwrap().price, 0.0);
        assert_eq!(stats.out_of_stock, 2);
        assert_eq!(stats.theoretical_height, 6);
    }
}
