use std::fmt;

use reqwest::Method;

/// Every directory API route this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    GetToken,
    UserCreate,
    UserGet,
    UserUpdate,
    UserDelete,
    UserBatchDelete,
    UserSimpleList,
    UserList,
    BatchInvite,
    DepartmentCreate,
    DepartmentUpdate,
    DepartmentDelete,
    DepartmentList,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::GetToken => "gettoken",
            Endpoint::UserCreate => "user/create",
            Endpoint::UserGet => "user/get",
            Endpoint::UserUpdate => "user/update",
            Endpoint::UserDelete => "user/delete",
            Endpoint::UserBatchDelete => "user/batchdelete",
            Endpoint::UserSimpleList => "user/simplelist",
            Endpoint::UserList => "user/list",
            Endpoint::BatchInvite => "batch/invite",
            Endpoint::DepartmentCreate => "department/create",
            Endpoint::DepartmentUpdate => "department/update",
            Endpoint::DepartmentDelete => "department/delete",
            Endpoint::DepartmentList => "department/list",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::UserCreate
            | Endpoint::UserUpdate
            | Endpoint::UserBatchDelete
            | Endpoint::BatchInvite
            | Endpoint::DepartmentCreate
            | Endpoint::DepartmentUpdate => Method::POST,
            _ => Method::GET,
        }
    }

    /// `gettoken` is the only route called without an access token.
    pub fn requires_token(self) -> bool {
        self != Endpoint::GetToken
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
