use std::collections::HashSet;

use crate::domain::{Error, Money};

pub type ProductId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money, // unit price, always positive
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Fixed, ordered list of purchasable products. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, Error> {
        if products.is_empty() {
            return Err(Error::Catalog("catalog has no products".to_string()));
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(Error::Catalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if product.price <= Money::zero() {
                return Err(Error::Catalog(format!(
                    "product {} has non-positive price {}",
                    product.id, product.price
                )));
            }
        }

        Ok(Self { products })
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let products = [
            (1, "Laptop", 500_000),
            (2, "Phone", 200_000),
            (3, "Tablet", 150_000),
            (4, "Headphones", 50_000),
            (5, "Smart Watch", 100_000),
            (6, "Monitor", 250_000),
            (7, "Keyboard", 30_000),
            (8, "Mouse", 20_000),
            (9, "Printer", 120_000),
            (10, "Camera", 400_000),
            (11, "Speaker", 80_000),
            (12, "Microphone", 60_000),
            (13, "External Disk", 90_000),
            (14, "Game Console", 350_000),
            (15, "Television", 700_000),
        ]
        .into_iter()
        .map(|(id, name, price)| Product::new(id, name, Money(price)))
        .collect();

        Self { products }
    }
}
