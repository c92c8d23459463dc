//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ProductError, ProductResult};
use crate::mapping::{to_dto, to_entity};
use crate::models::{PageParams, PaginatedResponse, ProductDto};
use crate::repository::ProductRepository;

/// Offsets must fit a signed 64-bit bind parameter.
const MAX_OFFSET: u64 = i64::MAX as u64;

fn page_out_of_range() -> ProductError {
    let mut error = ValidationError::new("range");
    error.message = Some("page * size exceeds the largest supported offset".into());
    error.add_param("max_offset".into(), &MAX_OFFSET);

    let mut errors = ValidationErrors::new();
    errors.add("page", error);
    ProductError::Validation(errors)
}

/// Product service providing business logic operations
///
/// Validates input, translates page numbers into offset/limit windows and
/// maps between stored records and DTOs.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of products, ordered by id.
    ///
    /// `size` must be within 1..=100 and `page * size` must fit an `i64`.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        page: u64,
        size: u64,
    ) -> ProductResult<PaginatedResponse<ProductDto>> {
        PageParams { page, size }.validate()?;

        let offset = page
            .checked_mul(size)
            .filter(|offset| *offset <= MAX_OFFSET)
            .ok_or_else(page_out_of_range)?;
        let (products, total) = self.repository.find_page(offset, size).await?;

        Ok(PaginatedResponse {
            content: products.into_iter().map(to_dto).collect(),
            total_pages: total.div_ceil(size),
            total_elements: total,
            number: page,
            size,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<ProductDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(to_dto)
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a product; a client-supplied id is discarded.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn save_product(&self, input: ProductDto) -> ProductResult<ProductDto> {
        input.validate()?;

        let mut product = to_entity(input);
        product.id = None;

        let saved = self.repository.save(product).await?;
        Ok(to_dto(saved))
    }

    /// Replace every mutable field of the product at `id`.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn update_product(&self, id: i64, input: ProductDto) -> ProductResult<ProductDto> {
        input.validate()?;

        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.name = input.name;
        product.description = input.description;
        product.price = input.price;
        product.quantity = input.quantity;

        let saved = self.repository.save(product).await?;
        Ok(to_dto(saved))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if !self.repository.delete_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};
    use mockall::predicate::eq;

    fn dto(name: &str) -> ProductDto {
        ProductDto {
            id: None,
            name: name.to_string(),
            description: "A product used in service tests".to_string(),
            price: 19.99,
            quantity: 3,
        }
    }

    fn stored(id: i64, name: &str) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            description: "A product used in service tests".to_string(),
            price: 19.99,
            quantity: 3,
        }
    }

    #[tokio::test]
    async fn test_get_products_translates_page_to_offset() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_page()
            .with(eq(20), eq(10))
            .times(1)
            .returning(|_, _| Ok((vec![stored(21, "Widget")], 25)));

        let service = ProductService::new(mock_repo);
        let page = service.get_products(2, 10).await.unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, Some(21));
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 2);
        assert_eq!(page.size, 10);
    }

    #[tokio::test]
    async fn test_get_products_empty_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_page()
            .returning(|_, _| Ok((vec![], 0)));

        let service = ProductService::new(mock_repo);
        let page = service.get_products(0, 10).await.unwrap();

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_get_products_rejects_invalid_size() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_page().never();

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get_products(0, 0).await,
            Err(ProductError::Validation(_))
        ));
        assert!(matches!(
            service.get_products(0, 101).await,
            Err(ProductError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_get_products_rejects_offset_beyond_bigint() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_page().never();

        let service = ProductService::new(mock_repo);
        for (page, size) in [(u64::MAX, 100), (922_337_203_685_477_581, 10)] {
            match service.get_products(page, size).await {
                Err(ProductError::Validation(errors)) => {
                    assert!(errors.field_errors().contains_key("page"));
                }
                other => panic!("expected validation error, got {:?}", other.map(|p| p.number)),
            }
        }
    }

    #[tokio::test]
    async fn test_get_products_largest_offset_reaches_gateway() {
        // 922337203685477580 * 10 = i64::MAX - 7
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_page()
            .with(eq(9_223_372_036_854_775_800), eq(10))
            .returning(|_, _| Ok((vec![], 4)));

        let service = ProductService::new(mock_repo);
        let page = service.get_products(922_337_203_685_477_580, 10).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_save_product_clears_client_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_save()
            .withf(|product| product.id.is_none())
            .times(1)
            .returning(|mut product| {
                product.id = Some(1);
                Ok(product)
            });

        let service = ProductService::new(mock_repo);
        let mut input = dto("Widget");
        input.id = Some(999);

        let created = service.save_product(input).await.unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.name, "Widget");
    }

    #[tokio::test]
    async fn test_save_product_rejects_invalid_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_save().never();

        let service = ProductService::new(mock_repo);
        let mut input = dto("Widget");
        input.price = 0.0;

        assert!(matches!(
            service.save_product(input).await,
            Err(ProductError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_product_missing_never_saves() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProductService::new(mock_repo);
        let result = service.update_product(5, dto("Widget Pro")).await;
        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_update_product_keeps_path_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(5))
            .returning(|id| Ok(Some(stored(id, "Widget"))));
        mock_repo
            .expect_save()
            .withf(|product| product.id == Some(5) && product.name == "Widget Pro")
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let mut input = dto("Widget Pro");
        input.id = Some(77);
        input.quantity = 9;

        let updated = service.update_product(5, input).await.unwrap();
        assert_eq!(updated.id, Some(5));
        assert_eq!(updated.quantity, 9);
    }

    #[tokio::test]
    async fn test_delete_product_absent_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete_by_id()
            .with(eq(3))
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.delete_product(3).await,
            Err(ProductError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_get_product_maps_missing_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get_product(8).await,
            Err(ProductError::NotFound(8))
        ));
    }

    #[tokio::test]
    async fn test_saved_product_reads_back_identically() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let input = dto("Round Trip");
        let created = service.save_product(input.clone()).await.unwrap();
        let fetched = service.get_product(created.id.unwrap()).await.unwrap();

        assert_eq!(fetched.name, input.name);
        assert_eq!(fetched.description, input.description);
        assert_eq!(fetched.price, input.price);
        assert_eq!(fetched.quantity, input.quantity);
    }

    #[tokio::test]
    async fn test_pages_concatenate_to_full_set() {
        let service = ProductService::new(InMemoryProductRepository::new());
        for i in 0..23 {
            service.save_product(dto(&format!("Product {:02}", i))).await.unwrap();
        }

        let mut seen = Vec::new();
        let mut page = 0;
        loop {
            let result = service.get_products(page, 5).await.unwrap();
            assert_eq!(result.total_pages, 5);
            if result.content.is_empty() {
                break;
            }
            seen.extend(result.content.into_iter().map(|p| p.id.unwrap()));
            page += 1;
        }

        assert_eq!(seen, (1..=23).collect::<Vec<i64>>());
    }
}
