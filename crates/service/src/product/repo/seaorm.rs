use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, ColumnTrait, Set, NotSet};

use models::product;

use crate::product::domain::{NewProduct, Product};
use crate::product::repository::{ProductRepository, RepositoryError};

pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

impl From<product::Model> for Product {
    fn from(m: product::Model) -> Self {
        Product { id: m.id, name: m.name, description: m.description, price: m.price, stock: m.stock }
    }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Product, RepositoryError> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Product::from)
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let am = product::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            description: Set(new.description),
            price: Set(new.price),
            stock: Set(new.stock),
        };
        let created = am.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn update(&self, p: &Product) -> Result<(), RepositoryError> {
        let am = product::ActiveModel {
            id: NotSet,
            name: Set(p.name.clone()),
            description: Set(p.description.clone()),
            price: Set(p.price),
            stock: Set(p.stock),
        };
        let res = product::Entity::update_many()
            .set(am)
            .filter(product::Column::Id.eq(p.id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let res = product::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
