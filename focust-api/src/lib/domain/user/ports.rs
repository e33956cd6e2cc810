use async_trait::async_trait;
use auth::JwtDetails;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::NonSensitiveUserView;
use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<NonSensitiveUserView, UserError>;

    /// Retrieve one page of users ordered by id.
    ///
    /// # Errors
    /// * `EmptyPage` - The page holds no users
    /// * `DatabaseError` - Database operation failed
    async fn list_users(
        &self,
        page: PageRequest,
    ) -> Result<Page<NonSensitiveUserView>, UserError>;

    /// Resolve the identity behind an email taken from a token.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_user_details(&self, email: &str) -> Result<JwtDetails, UserError>;
}

/// Lookup, creation and pagination of user rows.
///
/// Email uniqueness is enforced by the backing store.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve user by email (exact, case-sensitive match).
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Persist a new user, assigning its id.
    ///
    /// # Returns
    /// Stored user entity
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve one page of users ordered by id ascending.
    ///
    /// # Errors
    /// * `EmptyPage` - The page holds no users
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, page: &PageRequest) -> Result<Page<User>, UserError>;
}
