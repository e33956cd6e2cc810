use async_trait::async_trait;
use auth::BcryptHash;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Page;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::UserError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    registration_date: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let password_hash = BcryptHash::from_string(row.password_hash.trim_end()).map_err(|e| {
            UserError::DatabaseError(format!("Stored password hash of user {} is invalid: {}", row.id, e))
        })?;

        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash,
            registration_date: row.registration_date,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, registration_date
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, registration_date
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn save(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, registration_date)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, registration_date
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.password_hash.to_string())
        .bind(user.registration_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return UserError::DuplicateEmail(user.email.to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        User::try_from(row)
    }

    async fn list(&self, page: &PageRequest) -> Result<Page<User>, UserError> {
        let offset = i64::try_from(page.offset())
            .map_err(|_| UserError::EmptyPage(page.index()))?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, registration_date
            FROM users
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.size()))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if rows.is_empty() {
            return Err(UserError::EmptyPage(page.index()));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let entries = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            entries,
            index: page.index(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}
