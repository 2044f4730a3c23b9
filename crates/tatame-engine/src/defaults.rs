//! Seed configuration for a fresh installation.
//!
//! Loaded when the corresponding store slot has never been written.
//! Prices follow the academy's billing convention (plan prices in
//! centavos, as configured by the front desk).

use tatame_model::{BeltColor, GraduationRule, Plan, Product};

/// Membership plans offered out of the box.
pub fn default_plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "p1".into(),
            name: "Mensal".into(),
            price: 10000.0,
            duration_months: 1,
        },
        Plan {
            id: "p2".into(),
            name: "Trimestral".into(),
            price: 27000.0,
            duration_months: 3,
        },
        Plan {
            id: "p3".into(),
            name: "Semestral".into(),
            price: 50000.0,
            duration_months: 6,
        },
        Plan {
            id: "p4".into(),
            name: "Anual".into(),
            price: 90000.0,
            duration_months: 12,
        },
    ]
}

/// IBJJF-style promotion thresholds for the adult belts.
pub fn default_graduation_rules() -> Vec<GraduationRule> {
    vec![
        GraduationRule {
            belt: BeltColor::White,
            classes_required: 40,
            months_required: 4,
        },
        GraduationRule {
            belt: BeltColor::Blue,
            classes_required: 150,
            months_required: 24,
        },
        GraduationRule {
            belt: BeltColor::Purple,
            classes_required: 200,
            months_required: 24,
        },
        GraduationRule {
            belt: BeltColor::Brown,
            classes_required: 250,
            months_required: 12,
        },
    ]
}

/// Storefront catalog. Static from the core's perspective.
pub fn product_catalog() -> Vec<Product> {
    vec![
        Product {
            id: "p1".into(),
            name: "Kimono Tatame Pro".into(),
            price: 450.0,
            category: "Uniforme".into(),
            stock: 15,
            image_url: "https://picsum.photos/seed/kimono/200".into(),
        },
        Product {
            id: "p2".into(),
            name: "Rashguard Elite".into(),
            price: 180.0,
            category: "Uniforme".into(),
            stock: 22,
            image_url: "https://picsum.photos/seed/rash/200".into(),
        },
        Product {
            id: "p3".into(),
            name: "Faixa Premium".into(),
            price: 80.0,
            category: "Acessório".into(),
            stock: 50,
            image_url: "https://picsum.photos/seed/belt/200".into(),
        },
    ]
}
