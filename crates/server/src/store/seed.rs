//! Fixed seed content.
//!
//! Installed once at first start when no snapshot files exist. Seed image
//! paths point at bundled assets outside the managed upload directory, so
//! deleting a seed product never touches the filesystem.

use chrono::{DateTime, TimeZone, Utc};

use artiva_core::{
    Category, CategoryId, LocalizedText, Product, ProductId, Slug, User, UserId,
};

fn seed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid seed timestamp")
}

/// The initial product collection.
#[must_use]
pub fn products() -> Vec<Product> {
    let created_at = seed_time();
    vec![
        Product {
            id: ProductId::new("1"),
            name: LocalizedText::new()
                .with("en", "Salad Bowl")
                .with("it", "Insalatiera"),
            description: LocalizedText::new()
                .with("en", "Hand-thrown serving bowl with a speckled glaze.")
                .with("it", "Insalatiera tornita a mano con smalto puntinato."),
            category: Slug::new("bowls"),
            image: Some("/assets/products/salad-bowl.jpg".to_owned()),
            dimensions: "⌀ 26 cm, h 10 cm".to_owned(),
            material: "glazed stoneware".to_owned(),
            created_at,
            updated_at: None,
        },
        Product {
            id: ProductId::new("2"),
            name: LocalizedText::new()
                .with("en", "Bud Vase")
                .with("it", "Vaso monofiore"),
            description: LocalizedText::new()
                .with("en", "Slender vase for a single stem.")
                .with("it", "Vaso sottile per un singolo stelo."),
            category: Slug::new("vases"),
            image: Some("/assets/products/bud-vase.jpg".to_owned()),
            dimensions: "⌀ 6 cm, h 18 cm".to_owned(),
            material: "terracotta".to_owned(),
            created_at,
            updated_at: None,
        },
        Product {
            id: ProductId::new("3"),
            name: LocalizedText::new()
                .with("en", "Serving Bowl")
                .with("it", "Ciotola da portata"),
            description: LocalizedText::new()
                .with("en", "Wide low bowl for the centre of the table.")
                .with("it", "Ciotola ampia e bassa per il centrotavola."),
            category: Slug::new("bowls"),
            image: Some("/assets/products/serving-bowl.jpg".to_owned()),
            dimensions: "⌀ 32 cm, h 7 cm".to_owned(),
            material: "glazed stoneware".to_owned(),
            created_at,
            updated_at: None,
        },
    ]
}

/// The initial category collection.
///
/// Slugs match what derivation from the English name would produce.
#[must_use]
pub fn categories() -> Vec<Category> {
    vec![
        Category {
            id: CategoryId::new("1"),
            name: LocalizedText::new().with("en", "Bowls").with("it", "Ciotole"),
            slug: Slug::new("bowls"),
        },
        Category {
            id: CategoryId::new("2"),
            name: LocalizedText::new().with("en", "Vases").with("it", "Vasi"),
            slug: Slug::new("vases"),
        },
    ]
}

/// The fixed user list.
///
/// Compiled in and never written to disk; passwords are plaintext by design
/// of the credential check.
#[must_use]
pub fn users() -> Vec<User> {
    vec![
        User {
            id: UserId::new("1"),
            username: "admin".to_owned(),
            password: "terracotta".to_owned(),
            role: "admin".to_owned(),
        },
        User {
            id: UserId::new("2"),
            username: "editor".to_owned(),
            password: "maiolica".to_owned(),
            role: "editor".to_owned(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_three_seed_products_with_unique_ids() {
        let products = products();
        assert_eq!(products.len(), 3);

        let mut ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(products.iter().all(|p| p.updated_at.is_none()));
    }

    #[test]
    fn test_seed_images_are_bundled_assets() {
        assert!(
            products()
                .iter()
                .all(|p| p.image.as_deref().unwrap().starts_with("/assets/"))
        );
    }

    #[test]
    fn test_seed_category_slugs_match_derivation() {
        for category in categories() {
            let derived = Slug::derive(category.name.en().unwrap());
            assert_eq!(category.slug, derived);
        }
    }

    #[test]
    fn test_seed_usernames_are_unique() {
        let users = users();
        let mut names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), users.len());
    }
}
