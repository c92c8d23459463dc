use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::Product;

/// SeaORM entity for the `products` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            price: model.price,
            quantity: model.quantity,
        }
    }
}

// A present id targets an existing row; an absent one lets the sequence assign it
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: match product.id {
                Some(id) => Unchanged(id),
                None => NotSet,
            },
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            quantity: Set(product.quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: Option<i64>) -> Product {
        Product {
            id,
            name: "Widget".to_string(),
            description: "A useful widget".to_string(),
            price: 9.99,
            quantity: 5,
        }
    }

    #[test]
    fn test_new_product_leaves_id_unset() {
        let active: ActiveModel = product(None).into();
        assert_eq!(active.id, NotSet);
        assert_eq!(active.name, Set("Widget".to_string()));
    }

    #[test]
    fn test_existing_product_keeps_id_unchanged() {
        let active: ActiveModel = product(Some(7)).into();
        assert_eq!(active.id, Unchanged(7));
        assert_eq!(active.quantity, Set(5));
    }

    #[test]
    fn test_model_into_product() {
        let model = Model {
            id: 3,
            name: "Gadget".to_string(),
            description: "A shiny gadget".to_string(),
            price: 1.5,
            quantity: 2,
        };
        let product: Product = model.into();
        assert_eq!(product.id, Some(3));
        assert_eq!(product.name, "Gadget");
    }
}
