use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListParams},
        responses::UserListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建账号
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to create user"))?;

        Ok(result.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取账号
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to query user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出账号
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListParams,
    ) -> Result<UserListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search)))
                    .add(Column::DisplayName.like(contains_pattern(search))),
            );
        }

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| read_error(e, "Failed to count users"))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| read_error(e, "Failed to list users"))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update last login"))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新账号信息（password 字段须为哈希值）
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to update user"))?;

        self.get_user_by_id_impl(id).await
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Failed to delete user"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| read_error(e, "Failed to count users"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortalError;
    use crate::models::PaginationQuery;
    use crate::models::users::entities::UserRole;

    fn new_user(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password: "hash".to_string(),
            role,
            display_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage
            .create_user_impl(new_user("registrar1", UserRole::Registrar))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Registrar);
        assert_eq!(user.status, UserStatus::Active);

        let by_email = storage
            .get_user_by_username_or_email_impl("registrar1@uni.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await;
        storage
            .create_user_impl(new_user("editor01", UserRole::Editor))
            .await
            .unwrap();
        let err = storage
            .create_user_impl(new_user("editor01", UserRole::Editor))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_role() {
        let storage = SeaOrmStorage::in_memory().await;
        for (name, role) in [
            ("admin001", UserRole::Admin),
            ("editor01", UserRole::Editor),
            ("editor02", UserRole::Editor),
        ] {
            storage.create_user_impl(new_user(name, role)).await.unwrap();
        }

        let list = storage
            .list_users_with_pagination_impl(UserListParams {
                pagination: PaginationQuery::default(),
                role: Some(UserRole::Editor),
                status: None,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.pagination.total, 2);
    }
}
