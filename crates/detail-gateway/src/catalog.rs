//! The catalog embedded in the binary, served when the backend cannot be
//! reached or has nothing to show.

use detail_commerce::catalog::{static_category, Category, StaticProduct, StoreCategory};
use detail_commerce::ids::{CategoryId, ProductId};
use detail_commerce::money::{Currency, Money};

const fn inr(rupees: i64) -> Money {
    Money::new(rupees * 100, Currency::INR)
}

pub static PRODUCTS: [StaticProduct; 9] = [
    StaticProduct {
        id: 1,
        category: StoreCategory::CarWash,
        name: "Premium Car Shampoo",
        price: inr(2_499),
        description: "Professional grade car shampoo with pH neutral formula",
        detailed_description: "Our Premium Car Shampoo is specially formulated with advanced pH-neutral technology that gently removes dirt and grime while preserving your car's protective wax coating. Enriched with natural lubricants and foam boosters for a scratch-free wash experience.",
        features: &["pH Neutral Formula", "Scratch-Free", "Biodegradable", "Concentrated Formula"],
        specifications: &[
            ("Volume", "500ml"),
            ("Dilution Ratio", "1:200"),
            ("pH Level", "7.0"),
            ("Fragrance", "Fresh Citrus"),
        ],
        benefits: &[
            "Safe for all paint types and finishes",
            "Creates rich, lubricating foam",
            "Removes stubborn dirt and road grime",
            "Environmentally friendly formula",
        ],
        usage: "Dilute 25ml in 5 liters of water. Apply with wash mitt in straight lines. Rinse thoroughly.",
        rating: 4.8,
        reviews: 124,
    },
    StaticProduct {
        id: 2,
        category: StoreCategory::CarWash,
        name: "Foam Cannon Soap",
        price: inr(1_999),
        description: "Thick foam formula for pressure washers",
        detailed_description: "Specially designed for foam cannons and pressure washers, this high-foaming formula creates thick, clingy foam that dwells on surfaces longer for superior cleaning power.",
        features: &["High Foam", "Pressure Washer Compatible", "Long Dwell Time", "Safe on All Surfaces"],
        specifications: &[
            ("Volume", "1L"),
            ("Foam Ratio", "1:10"),
            ("Coverage", "Up to 20 cars"),
            ("Scent", "Tropical"),
        ],
        benefits: &[
            "Maximum foam production",
            "Extended contact time",
            "Superior dirt encapsulation",
            "Professional results at home",
        ],
        usage: "Mix 100ml with 1L water in foam cannon. Apply to vehicle and let dwell for 2-3 minutes before rinsing.",
        rating: 4.7,
        reviews: 89,
    },
    StaticProduct {
        id: 3,
        category: StoreCategory::CarWash,
        name: "Waterless Car Wash",
        price: inr(1_699),
        description: "Clean your car without water",
        detailed_description: "Revolutionary waterless wash formula that cleans, shines, and protects in one step. Perfect for quick touch-ups and eco-friendly washing.",
        features: &["No Water Required", "Scratch-Free", "UV Protection", "Quick Application"],
        specifications: &[
            ("Volume", "750ml"),
            ("Coverage", "15-20 washes"),
            ("Application", "Spray & Wipe"),
            ("Drying Time", "Instant"),
        ],
        benefits: &[
            "Saves water and time",
            "Perfect for apartments",
            "Adds protective coating",
            "Safe on all surfaces",
        ],
        usage: "Spray on dirty surface, wipe with microfiber towel in straight lines, flip towel and buff to shine.",
        rating: 4.6,
        reviews: 67,
    },
    StaticProduct {
        id: 5,
        category: StoreCategory::DetailingTools,
        name: "Microfiber Towel Set",
        price: inr(2_999),
        description: "Professional grade microfiber towels",
        detailed_description: "Premium 380 GSM microfiber towels designed for professional detailing. Ultra-soft fibers safely lift dirt and debris while being gentle on all surfaces.",
        features: &["380 GSM", "Lint-Free", "Scratch-Free", "Machine Washable"],
        specifications: &[
            ("Set Size", "5 Towels"),
            ("Dimensions", "40cm x 40cm"),
            ("Weight", "380 GSM"),
            ("Composition", "80% Polyester, 20% Polyamide"),
        ],
        benefits: &[
            "Superior absorption capacity",
            "Lint and streak-free finish",
            "Durable and long-lasting",
            "Safe for all vehicle surfaces",
        ],
        usage: "Use damp for cleaning, dry for polishing. Wash separately in cold water without fabric softener.",
        rating: 4.9,
        reviews: 156,
    },
    StaticProduct {
        id: 6,
        category: StoreCategory::DetailingTools,
        name: "Detailing Brush Kit",
        price: inr(3_499),
        description: "Complete brush set for all surfaces",
        detailed_description: "Professional 8-piece brush kit with varying bristle softness for different surfaces. From delicate paint to tough wheel cleaning.",
        features: &["8-Piece Set", "Various Bristle Types", "Ergonomic Handles", "Color Coded"],
        specifications: &[
            ("Kit Size", "8 Brushes"),
            ("Handle Material", "Non-slip rubber"),
            ("Bristle Types", "Natural & Synthetic"),
            ("Sizes", "Various"),
        ],
        benefits: &[
            "Complete detailing solution",
            "Safe for all surfaces",
            "Professional results",
            "Durable construction",
        ],
        usage: "Select appropriate brush for surface. Use gentle circular motions. Clean brushes after each use.",
        rating: 4.8,
        reviews: 92,
    },
    StaticProduct {
        id: 9,
        category: StoreCategory::Protection,
        name: "Ceramic Coating",
        price: inr(8_999),
        description: "9H hardness ceramic protection",
        detailed_description: "Professional-grade ceramic coating that provides unmatched protection with 9H hardness. Creates a permanent bond with your paint for years of protection against UV rays, chemicals, and environmental contaminants.",
        features: &["9H Hardness", "UV Protection", "Chemical Resistant", "5-Year Durability"],
        specifications: &[
            ("Volume", "30ml"),
            ("Coverage", "1-2 vehicles"),
            ("Cure Time", "24 hours"),
            ("Durability", "5+ years"),
        ],
        benefits: &[
            "Maximum scratch resistance",
            "Permanent paint protection",
            "Enhanced gloss and depth",
            "Self-cleaning properties",
        ],
        usage: "Apply to clean, decontaminated paint in cool conditions. Work in 2x2 sections. Allow to cure for 24 hours.",
        rating: 4.8,
        reviews: 78,
    },
    StaticProduct {
        id: 10,
        category: StoreCategory::Protection,
        name: "Carnauba Wax",
        price: inr(4_599),
        description: "Premium Brazilian carnauba wax",
        detailed_description: "Grade #1 Brazilian carnauba wax provides deep, warm shine with excellent water beading. Hand-harvested from Copernicia prunifera palm trees.",
        features: &["Grade #1 Carnauba", "Deep Gloss", "Water Repellent", "Natural Protection"],
        specifications: &[
            ("Volume", "200g"),
            ("Carnauba Content", "51%"),
            ("Coverage", "8-10 applications"),
            ("Origin", "Brazil"),
        ],
        benefits: &[
            "Unmatched depth and warmth",
            "Superior water beading",
            "Natural UV protection",
            "Show car finish",
        ],
        usage: "Apply thin layer with applicator pad. Allow to haze for 5-10 minutes. Buff with microfiber towel.",
        rating: 4.7,
        reviews: 134,
    },
    StaticProduct {
        id: 13,
        category: StoreCategory::InteriorCare,
        name: "Leather Conditioner",
        price: inr(2_699),
        description: "Keeps leather soft and supple",
        detailed_description: "Premium leather conditioner formulated with natural oils and UV protectants. Restores and maintains leather's natural softness while providing protection against cracking and fading.",
        features: &["Natural Oils", "UV Protection", "Anti-Crack Formula", "Pleasant Scent"],
        specifications: &[
            ("Volume", "250ml"),
            ("Coverage", "20-25 sq ft"),
            ("Base", "Water-based"),
            ("Fragrance", "Leather Scent"),
        ],
        benefits: &[
            "Prevents cracking and drying",
            "Restores natural flexibility",
            "UV protection prevents fading",
            "Maintains factory appearance",
        ],
        usage: "Clean leather first. Apply thin layer with microfiber cloth. Allow to penetrate for 10 minutes, then buff excess.",
        rating: 4.6,
        reviews: 92,
    },
    StaticProduct {
        id: 14,
        category: StoreCategory::InteriorCare,
        name: "Fabric Protector",
        price: inr(2_199),
        description: "Repels stains and spills",
        detailed_description: "Advanced nano-technology fabric protector creates an invisible barrier against stains, spills, and UV damage on all fabric surfaces.",
        features: &["Nano Protection", "Stain Resistant", "UV Blocking", "Breathable"],
        specifications: &[
            ("Volume", "400ml"),
            ("Coverage", "2-3 vehicles"),
            ("Protection", "6 months"),
            ("Technology", "Nano-coating"),
        ],
        benefits: &[
            "Invisible protection barrier",
            "Easy spill cleanup",
            "Maintains fabric breathability",
            "Long-lasting protection",
        ],
        usage: "Vacuum fabric first. Spray evenly 6 inches away. Allow to dry completely before use.",
        rating: 4.5,
        reviews: 76,
    },
];

/// What each category sells, as listed on its card.
pub fn category_items(category: StoreCategory) -> &'static [&'static str] {
    match category {
        StoreCategory::CarWash => &["Shampoos", "Soaps", "Cleaners", "Degreasers"],
        StoreCategory::DetailingTools => {
            &["Microfiber Towels", "Brushes", "Applicators", "Buckets"]
        }
        StoreCategory::Protection => &["Wax", "Sealants", "Ceramic Coatings", "UV Protection"],
        StoreCategory::InteriorCare => {
            &["Leather Care", "Fabric Cleaners", "Dashboard Care", "Air Fresheners"]
        }
    }
}

/// Embedded products in a category, or all of them for `None`.
///
/// An id outside the store categories has no embedded products.
pub fn products_in(category: Option<&CategoryId>) -> Vec<&'static StaticProduct> {
    match category {
        None => PRODUCTS.iter().collect(),
        Some(id) => match StoreCategory::from_id(id) {
            Some(wanted) => PRODUCTS.iter().filter(|p| p.category == wanted).collect(),
            None => Vec::new(),
        },
    }
}

pub fn product(id: &ProductId) -> Option<&'static StaticProduct> {
    let number = id.as_number()?;
    PRODUCTS.iter().find(|p| p.id == number)
}

pub fn category(category: StoreCategory) -> Category {
    static_category(
        category,
        category_items(category).iter().map(|i| i.to_string()).collect(),
    )
}

pub fn categories() -> Vec<Category> {
    StoreCategory::ALL.into_iter().map(category).collect()
}
