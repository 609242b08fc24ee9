//! Sorting and filtering of product listings.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Featured products first, otherwise source order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    Rating,
    /// Sort by name A-Z.
    Name,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price-low",
            SortOption::PriceDesc => "price-high",
            SortOption::Rating => "rating",
            SortOption::Name => "name",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "featured" => Some(SortOption::Featured),
            "price-low" => Some(SortOption::PriceAsc),
            "price-high" => Some(SortOption::PriceDesc),
            "rating" => Some(SortOption::Rating),
            "name" => Some(SortOption::Name),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Name => "Name: A-Z",
        }
    }
}

/// Listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProductFilter {
    #[default]
    All,
    InStock,
    Featured,
    /// Products with an original price above the current one.
    Sale,
}

impl ProductFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductFilter::All => "all",
            ProductFilter::InStock => "in-stock",
            ProductFilter::Featured => "featured",
            ProductFilter::Sale => "sale",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(ProductFilter::All),
            "in-stock" => Some(ProductFilter::InStock),
            "featured" => Some(ProductFilter::Featured),
            "sale" => Some(ProductFilter::Sale),
            _ => None,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::InStock => product.in_stock,
            ProductFilter::Featured => product.featured,
            ProductFilter::Sale => product.is_on_sale(),
        }
    }
}

/// Filter then sort a listing. Sorting is stable.
pub fn arrange(
    mut products: Vec<Product>,
    filter: ProductFilter,
    sort: SortOption,
) -> Vec<Product> {
    products.retain(|p| filter.matches(p));
    match sort {
        SortOption::Featured => products.sort_by_key(|p| !p.featured),
        SortOption::PriceAsc => products.sort_by_key(|p| p.price.amount_cents),
        SortOption::PriceDesc => {
            products.sort_by_key(|p| std::cmp::Reverse(p.price.amount_cents))
        }
        SortOption::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOption::Name => products.sort_by_key(|p| p.name.to_lowercase()),
    }
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductImage;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};

    fn product(id: u64, name: &str, price: i64, rating: f32) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            description: String::new(),
            detailed_description: None,
            price: Money::new(price, Currency::INR),
            original_price: None,
            stock: None,
            in_stock: true,
            image: ProductImage::Icon("\u{2728}".to_string()),
            category: None,
            features: vec![],
            specifications: vec![],
            benefits: vec![],
            usage: None,
            rating,
            reviews: 0,
            featured: false,
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn listing() -> Vec<Product> {
        let mut wax = product(10, "carnauba Wax", 459_900, 4.7);
        wax.featured = true;
        let mut coating = product(9, "Ceramic Coating", 899_900, 4.8);
        coating.original_price = Some(Money::new(999_900, Currency::INR));
        let mut protector = product(14, "Fabric Protector", 219_900, 4.5);
        protector.in_stock = false;
        vec![coating, wax, protector]
    }

    #[test]
    fn test_sorts() {
        assert_eq!(
            names(&arrange(listing(), ProductFilter::All, SortOption::Featured)),
            ["carnauba Wax", "Ceramic Coating", "Fabric Protector"]
        );
        assert_eq!(
            names(&arrange(listing(), ProductFilter::All, SortOption::PriceAsc)),
            ["Fabric Protector", "carnauba Wax", "Ceramic Coating"]
        );
        assert_eq!(
            names(&arrange(listing(), ProductFilter::All, SortOption::PriceDesc)),
            ["Ceramic Coating", "carnauba Wax", "Fabric Protector"]
        );
        assert_eq!(
            names(&arrange(listing(), ProductFilter::All, SortOption::Rating)),
            ["Ceramic Coating", "carnauba Wax", "Fabric Protector"]
        );
        assert_eq!(
            names(&arrange(listing(), ProductFilter::All, SortOption::Name)),
            ["carnauba Wax", "Ceramic Coating", "Fabric Protector"]
        );
    }

    #[test]
    fn test_filters() {
        assert_eq!(arrange(listing(), ProductFilter::InStock, SortOption::Featured).len(), 2);
        assert_eq!(
            names(&arrange(listing(), ProductFilter::Featured, SortOption::Featured)),
            ["carnauba Wax"]
        );
        assert_eq!(
            names(&arrange(listing(), ProductFilter::Sale, SortOption::Featured)),
            ["Ceramic Coating"]
        );
    }

    #[test]
    fn test_option_strings() {
        assert_eq!(SortOption::from_str("price-low"), Some(SortOption::PriceAsc));
        assert_eq!(SortOption::from_str(SortOption::Rating.as_str()), Some(SortOption::Rating));
        assert_eq!(ProductFilter::from_str("IN-STOCK"), Some(ProductFilter::InStock));
        assert_eq!(ProductFilter::from_str("cheap"), None);
    }
}
