//! Category reference-data logic

use crate::domain::CategoryDto;
use crate::error::Result;
use crate::repository::CategoryRepository;
use std::sync::Arc;

pub struct CategoryService<R: CategoryRepository> {
    repo: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The category set is small reference data, so the listing is complete
    /// and unpaginated, in id order.
    pub async fn find_all(&self) -> Result<Vec<CategoryDto>> {
        let categories = self.repo.find_all().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::repository::category::MockCategoryRepository;

    #[tokio::test]
    async fn test_find_all_returns_dtos_in_order() {
        let mut mock = MockCategoryRepository::new();
        mock.expect_find_all().returning(|| {
            Ok(vec![
                Category {
                    id: 1,
                    name: "Books".to_string(),
                },
                Category {
                    id: 2,
                    name: "Electronics".to_string(),
                },
            ])
        });

        let service = CategoryService::new(Arc::new(mock));
        let categories = service.find_all().await.unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].name, "Books");
        assert_eq!(categories[1].id, 2);
    }
}
