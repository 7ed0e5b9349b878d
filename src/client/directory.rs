//! Member and department operations. Each one is a single `invoke` with a fixed endpoint.

use serde::Serialize;
use serde_json::Value;

use crate::{
    DirectoryClient, endpoint::Endpoint, errors::Error, request_context::ApiRequest,
    types::BatchDeleteRequest,
};

/// Upper bound the API accepts for `user/batchdelete`.
pub const MAX_BATCH_DELETE: usize = 200;

impl DirectoryClient {
    pub async fn create_user<T: Serialize + ?Sized>(&self, user: &T) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::UserCreate).json(user)?)
            .await
    }

    pub async fn get_user(&self, userid: &str) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::UserGet).query("userid", userid))
            .await
    }

    pub async fn update_user<T: Serialize + ?Sized>(&self, user: &T) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::UserUpdate).json(user)?)
            .await
    }

    pub async fn delete_user(&self, userid: &str) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::UserDelete).query("userid", userid))
            .await
    }

    /// Deletes up to [`MAX_BATCH_DELETE`] members in one call.
    pub async fn delete_users<S: AsRef<str>>(&self, userids: &[S]) -> Result<Value, Error> {
        if userids.len() > MAX_BATCH_DELETE {
            return Err(Error::InvalidArgument(format!(
                "user/batchdelete accepts at most {} ids, got {}",
                MAX_BATCH_DELETE,
                userids.len()
            )));
        }
        let body = BatchDeleteRequest {
            useridlist: userids.iter().map(|id| id.as_ref()).collect(),
        };
        self.invoke(ApiRequest::new(Endpoint::UserBatchDelete).json(&body)?)
            .await
    }

    /// Members of a department, ids and names only. `fetch_child` recurses into sub-departments.
    pub async fn list_users_simple(
        &self,
        department_id: u64,
        fetch_child: bool,
    ) -> Result<Value, Error> {
        self.invoke(department_query(Endpoint::UserSimpleList, department_id, fetch_child))
            .await
    }

    pub async fn list_users(&self, department_id: u64, fetch_child: bool) -> Result<Value, Error> {
        self.invoke(department_query(Endpoint::UserList, department_id, fetch_child))
            .await
    }

    /// See [`crate::types::InviteRequest`] for the usual body shape.
    pub async fn invite_users<T: Serialize + ?Sized>(&self, invite: &T) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::BatchInvite).json(invite)?)
            .await
    }

    pub async fn create_department<T: Serialize + ?Sized>(
        &self,
        department: &T,
    ) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::DepartmentCreate).json(department)?)
            .await
    }

    pub async fn update_department<T: Serialize + ?Sized>(
        &self,
        department: &T,
    ) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::DepartmentUpdate).json(department)?)
            .await
    }

    pub async fn delete_department(&self, id: u64) -> Result<Value, Error> {
        self.invoke(ApiRequest::new(Endpoint::DepartmentDelete).query("id", id))
            .await
    }

    /// Lists `id` and all of its descendants, or the whole organization when `id` is `None`.
    pub async fn list_departments(&self, id: Option<u64>) -> Result<Value, Error> {
        let mut request = ApiRequest::new(Endpoint::DepartmentList);
        if let Some(id) = id {
            request = request.query("id", id);
        }
        self.invoke(request).await
    }
}

fn department_query(endpoint: Endpoint, department_id: u64, fetch_child: bool) -> ApiRequest {
    ApiRequest::new(endpoint)
        .query("department_id", department_id)
        .query("fetch_child", u8::from(fetch_child))
}
