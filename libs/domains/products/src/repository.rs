use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Every read and write to the product store goes through this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Slice of products ordered by id, plus the total row count
    async fn find_page(&self, offset: u64, limit: u64) -> ProductResult<(Vec<Product>, u64)>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Insert when `id` is `None`, otherwise overwrite the row with that id.
    ///
    /// Overwriting a missing row fails with [`ProductError::NotFound`].
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Returns whether a row was removed. Absence is not an error.
    async fn delete_by_id(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_page(&self, offset: u64, limit: u64) -> ProductResult<(Vec<Product>, u64)> {
        let products = self.products.read().await;
        let total = products.len() as u64;

        let page = products
            .values()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let id = match product.id {
            Some(id) => {
                if !products.contains_key(&id) {
                    return Err(ProductError::NotFound(id));
                }
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };

        product.id = Some(id);
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }
}
