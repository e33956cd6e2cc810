use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtDetails;

use crate::domain::user::models::NonSensitiveUserView;
use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserDirectory;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user read operations.
pub struct UserService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> UserService<D>
where
    D: UserDirectory,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> UserServicePort for UserService<D>
where
    D: UserDirectory,
{
    async fn get_user(&self, id: &UserId) -> Result<NonSensitiveUserView, UserError> {
        self.directory
            .find_by_id(id)
            .await?
            .map(|ref user| user.into())
            .ok_or(UserError::UserNotFound(id.to_string()))
    }

    async fn list_users(
        &self,
        page: PageRequest,
    ) -> Result<Page<NonSensitiveUserView>, UserError> {
        let page = self.directory.list(&page).await?;
        Ok(page.map(|ref user| user.into()))
    }

    async fn get_user_details(&self, email: &str) -> Result<JwtDetails, UserError> {
        self.directory
            .find_by_email(email)
            .await?
            .map(|user| user.details())
            .ok_or_else(|| UserError::UserNotFound(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::BcryptHash;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::User;

    mock! {
        pub TestUserDirectory {}

        #[async_trait]
        impl UserDirectory for TestUserDirectory {
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn save(&self, user: NewUser) -> Result<User, UserError>;
            async fn list(&self, page: &PageRequest) -> Result<Page<User>, UserError>;
        }
    }

    fn user(id: i64, email: &str) -> User {
        User {
            id: UserId(id),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: BcryptHash::from_string(
                "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW",
            )
            .unwrap(),
            registration_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_id()
            .withf(|id| *id == UserId(3))
            .times(1)
            .returning(|_| Ok(Some(user(3, "three@focust.local"))));

        let service = UserService::new(Arc::new(directory));

        let view = service.get_user(&UserId(3)).await.unwrap();
        assert_eq!(view.id, UserId(3));
        assert_eq!(view.email.as_str(), "three@focust.local");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(directory));

        let result = service.get_user(&UserId(99)).await;
        assert!(matches!(result, Err(UserError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_projects_views() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_list()
            .withf(|page| page.index() == 0 && page.size() == 15)
            .times(1)
            .returning(|_| {
                Ok(Page {
                    entries: vec![user(1, "a@focust.local"), user(2, "b@focust.local")],
                    index: 0,
                    total: 2,
                })
            });

        let service = UserService::new(Arc::new(directory));

        let page = service
            .list_users(PageRequest::from_page_number(1).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(
            page.entries.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![UserId(1), UserId(2)]
        );
    }

    #[tokio::test]
    async fn test_list_users_empty_page() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_list()
            .times(1)
            .returning(|page| Err(UserError::EmptyPage(page.index())));

        let service = UserService::new(Arc::new(directory));

        let result = service
            .list_users(PageRequest::from_page_number(4).unwrap())
            .await;
        assert!(matches!(result, Err(UserError::EmptyPage(3))));
    }

    #[tokio::test]
    async fn test_get_user_details() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_email()
            .withf(|email| email == "user@focust.local")
            .times(1)
            .returning(|email| Ok(Some(user(5, email))));

        let service = UserService::new(Arc::new(directory));

        let details = service.get_user_details("user@focust.local").await.unwrap();
        assert_eq!(details, JwtDetails::new(5, "user@focust.local"));
    }

    #[tokio::test]
    async fn test_get_user_details_unknown_email() {
        let mut directory = MockTestUserDirectory::new();

        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(directory));

        let result = service.get_user_details("ghost@focust.local").await;
        assert!(matches!(result, Err(UserError::UserNotFound(_))));
    }
}
