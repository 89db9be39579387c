//! Demo domain for end-to-end matrix tests.
//!
//! A todo-list service with per-list access control, an in-memory user
//! directory, and [`TodoFixture`], which logs matrix identities into the
//! service.
//!
//! # Example
//!
//! ```ignore
//! use idmatrix_tests::prelude::*;
//!
//! let class = TestClass::new(configuration, TodoFixture::setup)
//!     .method(TestMethod::new("get_private_list", |ctx| {
//!         let id = ctx.fixture_mut().service.create_todo_list("x", Visibility::Private)?;
//!         ctx.log_in_as(LoginRole::Consumer)?;
//!         let table = ctx.expectations().to_fail(any_of(["role:USER"])?);
//!         ctx.check(table, |f| f.service.get_todo_list(id).map(|_| ()))
//!     }));
//! ```

mod failure;
mod todo;

pub use failure::AuthFailure;
pub use fixture::TodoFixture;
pub use todo::{TodoItem, TodoList, TodoService, Visibility, ADMIN};
pub use users::{DirectoryError, DirectoryResult, User, UserDirectory};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AuthFailure, TodoFixture, TodoService, User, Visibility};
    pub use idmatrix_core::{ConfigError, Identifier};
    pub use idmatrix_expectation::{any_of, Expectation, Failure, Outcome};
    pub use idmatrix_filter::RuleDeclaration;
    pub use idmatrix_matrix::{Declaration, MatrixConfiguration, RunnerSelector};
    pub use idmatrix_runner::{
        CellContext, LoginRole, MatrixRunner, MethodStatus, RunSummary, RunnerConfig, TestClass,
        TestFailure, TestMethod,
    };
}
