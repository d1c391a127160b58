//! 产品存储访问
//!
//! [`ProductRepository`] 对外只暴露单行级别的参数化操作：查询返回行，
//! 写操作返回生成的 id 或受影响行数。

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::model::{Product, ProductFields};

#[cfg(feature = "database")]
pub use mysql::MySqlProductRepository;

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("column `{0}` cannot be null")]
    NullColumn(&'static str),
}

/// 产品表的数据访问接口
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// 插入一行，返回存储生成的 id
    async fn insert(&self, fields: &ProductFields) -> Result<i64, StoreError>;

    /// 覆盖一行的全部可变列，返回受影响行数
    async fn update(&self, id: i64, fields: &ProductFields) -> Result<u64, StoreError>;

    /// 返回受影响行数
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(feature = "database")]
mod mysql {
    use async_trait::async_trait;
    use sqlx::mysql::MySqlPool;

    use super::{ProductRepository, StoreError};
    use crate::app::product::model::{Product, ProductFields};

    // 统一 id 与 preco 的列类型，兼容 INT/BIGINT 与 DECIMAL/DOUBLE
    macro_rules! select_products {
        () => {
            "SELECT CAST(id AS SIGNED) AS id, nome AS name, descricao AS description, \
             CAST(preco AS DOUBLE) AS price FROM produtos"
        };
    }

    /// 基于 sqlx MySQL 连接池的实现
    #[derive(Clone)]
    pub struct MySqlProductRepository {
        pool: MySqlPool,
    }

    impl MySqlProductRepository {
        pub fn new(pool: MySqlPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl ProductRepository for MySqlProductRepository {
        async fn list(&self) -> Result<Vec<Product>, StoreError> {
            let products = sqlx::query_as::<_, Product>(select_products!())
                .fetch_all(&self.pool)
                .await?;
            Ok(products)
        }

        async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
            let product = sqlx::query_as::<_, Product>(concat!(select_products!(), " WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(product)
        }

        async fn insert(&self, fields: &ProductFields) -> Result<i64, StoreError> {
            let result =
                sqlx::query("INSERT INTO produtos (nome, descricao, preco) VALUES (?, ?, ?)")
                    .bind(fields.name.as_deref())
                    .bind(fields.description.as_deref())
                    .bind(fields.price)
                    .execute(&self.pool)
                    .await?;
            Ok(result.last_insert_id() as i64)
        }

        async fn update(&self, id: i64, fields: &ProductFields) -> Result<u64, StoreError> {
            let result =
                sqlx::query("UPDATE produtos SET nome = ?, descricao = ?, preco = ? WHERE id = ?")
                    .bind(fields.name.as_deref())
                    .bind(fields.description.as_deref())
                    .bind(fields.price)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
            Ok(result.rows_affected())
        }

        async fn delete(&self, id: i64) -> Result<u64, StoreError> {
            let result = sqlx::query("DELETE FROM produtos WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// 内存实现，行为与 `produtos` 表一致：自增 id、nome/preco 非空、返回受影响行数
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<MemoryTable>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// 校验非空列，返回 (nome, preco)
fn required_columns(fields: &ProductFields) -> Result<(String, f64), StoreError> {
    let name = fields.name.clone().ok_or(StoreError::NullColumn("nome"))?;
    let price = fields.price.ok_or(StoreError::NullColumn("preco"))?;
    Ok((name, price))
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, fields: &ProductFields) -> Result<i64, StoreError> {
        let (name, price) = required_columns(fields)?;

        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            Product {
                id,
                name,
                description: fields.description.clone(),
                price,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, fields: &ProductFields) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(0);
        };

        let (name, price) = required_columns(fields)?;
        row.name = name;
        row.description = fields.description.clone();
        row.price = price;
        Ok(1)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let removed = self.table.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
