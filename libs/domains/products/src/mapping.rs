//! Field-for-field conversion between [`Product`] and [`ProductDto`].

use crate::models::{Product, ProductDto};

pub fn to_dto(product: Product) -> ProductDto {
    ProductDto {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        quantity: product.quantity,
    }
}

pub fn to_entity(dto: ProductDto) -> Product {
    Product {
        id: dto.id,
        name: dto.name,
        description: dto.description,
        price: dto.price,
        quantity: dto.quantity,
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        to_dto(product)
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        to_entity(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dto_copies_every_field() {
        let product = Product {
            id: Some(4),
            name: "Widget".to_string(),
            description: "A useful widget".to_string(),
            price: 2.5,
            quantity: 3,
        };
        let dto = to_dto(product.clone());
        assert_eq!(dto.id, Some(4));
        assert_eq!(dto.name, product.name);
        assert_eq!(dto.description, product.description);
        assert_eq!(dto.price, product.price);
        assert_eq!(dto.quantity, product.quantity);
    }

    #[test]
    fn test_to_entity_keeps_absent_id() {
        let dto = ProductDto {
            id: None,
            name: "Widget".to_string(),
            description: "A useful widget".to_string(),
            price: 2.5,
            quantity: 3,
        };
        let product: Product = dto.into();
        assert_eq!(product.id, None);
        assert_eq!(product.quantity, 3);
    }
}
