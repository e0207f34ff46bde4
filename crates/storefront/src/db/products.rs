//! Product catalog.

use foodipy_core::{Category, Price, ProductId};

use super::RepositoryError;
use crate::models::product::{NewProduct, Product, ProductPatch};
use crate::store::{Store, keys};

/// Repository for catalog operations.
///
/// Plain collection mutations keyed by id; the only invariant beyond id
/// lookup is the first-run seed.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The stored catalog, seeding and persisting the default listings if
    /// nothing is stored yet.
    ///
    /// An explicitly emptied catalog stays empty - only an absent (or
    /// unreadable) key triggers the seed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be accessed.
    pub fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        if let Some(products) = self.store.read_collection_opt(keys::PRODUCTS)? {
            return Ok(products);
        }

        let seeded = default_catalog();
        self.store.write_collection(keys::PRODUCTS, &seeded)?;
        tracing::info!(count = seeded.len(), "seeded default catalog");
        Ok(seeded)
    }

    /// Look up a listing by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be accessed.
    pub fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Add a listing to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let mut products = self.list()?;
        let product = Product {
            id: ProductId::generate(),
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            category: new.category,
            in_stock: new.in_stock,
        };
        products.push(product.clone());
        self.store.write_collection(keys::PRODUCTS, &products)?;

        tracing::debug!(product = %product.id, "created listing");
        Ok(product)
    }

    /// Apply a partial update to a listing. Fields left `None` keep their
    /// stored value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the id is absent.
    pub fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, RepositoryError> {
        let mut products = self.list()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(image) = patch.image {
            product.image = image;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(in_stock) = patch.in_stock {
            product.in_stock = in_stock;
        }

        let updated = product.clone();
        self.store.write_collection(keys::PRODUCTS, &products)?;

        tracing::debug!(product = %updated.id, "updated listing");
        Ok(updated)
    }

    /// Remove a listing. Deleting an unknown id is a no-op; items already
    /// snapshotted onto orders are unaffected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the store cannot be written.
    pub fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut products = self.list()?;
        products.retain(|p| p.id != id);
        self.store.write_collection(keys::PRODUCTS, &products)?;
        Ok(())
    }
}

/// The nine listings every fresh install starts with.
fn default_catalog() -> Vec<Product> {
    let listing = |name: &str, description: &str, cents: i64, image: &str, category: Category| {
        Product {
            id: ProductId::generate(),
            name: name.to_owned(),
            description: description.to_owned(),
            price: Price::from_cents(cents),
            image: image.to_owned(),
            category,
            in_stock: true,
        }
    };

    vec![
        listing(
            "Margherita Pizza",
            "Classic pizza with fresh tomatoes, mozzarella, and basil",
            1299,
            "https://images.unsplash.com/photo-1574071318508-1cdbab80d002?w=500",
            Category::Pizza,
        ),
        listing(
            "Pepperoni Pizza",
            "Delicious pepperoni pizza with cheese and herbs",
            1499,
            "https://images.unsplash.com/photo-1628840042765-356cda07504e?w=500",
            Category::Pizza,
        ),
        listing(
            "Caesar Salad",
            "Fresh romaine lettuce with Caesar dressing and croutons",
            899,
            "https://images.unsplash.com/photo-1546793665-c74683f339c1?w=500",
            Category::Salad,
        ),
        listing(
            "Grilled Chicken Burger",
            "Juicy grilled chicken with lettuce, tomato, and special sauce",
            1099,
            "https://images.unsplash.com/photo-1606755962773-d324e0a13086?w=500",
            Category::Burger,
        ),
        listing(
            "Chicken Pasta",
            "Creamy pasta with grilled chicken and vegetables",
            1399,
            "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9?w=500",
            Category::Pasta,
        ),
        listing(
            "Spaghetti Carbonara",
            "Traditional Italian pasta with bacon and creamy sauce",
            1299,
            "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9?w=500",
            Category::Pasta,
        ),
        listing(
            "Greek Salad",
            "Fresh vegetables with feta cheese and olives",
            999,
            "https://images.unsplash.com/photo-1546793665-c74683f339c1?w=500",
            Category::Salad,
        ),
        listing(
            "Chocolate Cake",
            "Rich chocolate cake with frosting",
            699,
            "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=500",
            Category::Dessert,
        ),
        listing(
            "Ice Cream Sundae",
            "Vanilla ice cream with chocolate sauce and toppings",
            599,
            "https://images.unsplash.com/photo-1563805042-7684c019e1cb?w=500",
            Category::Dessert,
        ),
    ]
}
