//! In-memory todo-list service with per-list access control.

use std::collections::BTreeMap;

use tracing::debug;

use idmatrix_expectation::{Failure, Outcome};

use crate::failure::AuthFailure;
use crate::users::User;

pub const ADMIN: &str = "ADMIN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub visibility: Visibility,
    pub items: Vec<TodoItem>,
}

/// Lists are readable by everyone when public, otherwise by their owner and
/// admins. Only the owner and admins modify a list; only admins delete one.
#[derive(Debug, Default)]
pub struct TodoService {
    lists: BTreeMap<u64, TodoList>,
    current: Option<User>,
    next_id: u64,
}

type ServiceOutcome<T> = Outcome<T, AuthFailure>;

impl TodoService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `user` the caller of subsequent operations. `None` logs out.
    pub fn log_in(&mut self, user: Option<User>) {
        debug!(user = ?user.as_ref().map(|u| u.username.as_str()), "Service login");
        self.current = user;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn create_todo_list(&mut self, name: &str, visibility: Visibility) -> ServiceOutcome<u64> {
        let owner = self.authenticated()?.username.clone();
        let id = self.next_id();
        self.lists.insert(
            id,
            TodoList {
                id,
                name: name.to_string(),
                owner,
                visibility,
                items: Vec::new(),
            },
        );
        Ok(id)
    }

    pub fn get_todo_list(&self, id: u64) -> ServiceOutcome<TodoList> {
        let list = self.find(id)?;
        if list.visibility == Visibility::Public {
            return Ok(list.clone());
        }
        let user = self.authenticated()?;
        Self::authorize_owner(user, list)?;
        Ok(list.clone())
    }

    pub fn add_item(&mut self, list_id: u64, text: &str) -> ServiceOutcome<u64> {
        let user = self.authenticated()?.clone();
        Self::authorize_owner(&user, self.find(list_id)?)?;

        let id = self.next_id();
        let list = self
            .lists
            .get_mut(&list_id)
            .ok_or_else(|| Failure::new(AuthFailure::NotFound, format!("list {}", list_id)))?;
        list.items.push(TodoItem {
            id,
            text: text.to_string(),
            done: false,
        });
        Ok(id)
    }

    pub fn complete_item(&mut self, list_id: u64, item_id: u64) -> ServiceOutcome<()> {
        let user = self.authenticated()?.clone();
        Self::authorize_owner(&user, self.find(list_id)?)?;

        let item = self
            .lists
            .get_mut(&list_id)
            .and_then(|l| l.items.iter_mut().find(|i| i.id == item_id))
            .ok_or_else(|| Failure::new(AuthFailure::NotFound, format!("item {}", item_id)))?;
        if item.done {
            return Err(Failure::new(
                AuthFailure::IllegalState,
                format!("item {} is already done", item_id),
            ));
        }
        item.done = true;
        Ok(())
    }

    pub fn delete_todo_list(&mut self, id: u64) -> ServiceOutcome<()> {
        let user = self.authenticated()?;
        self.find(id)?;
        if !user.has_role(ADMIN) {
            return Err(Failure::new(
                AuthFailure::AccessDenied,
                format!("{} may not delete list {}", user.username, id),
            ));
        }
        self.lists.remove(&id);
        Ok(())
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    fn authenticated(&self) -> ServiceOutcome<&User> {
        self.current
            .as_ref()
            .ok_or_else(|| Failure::new(AuthFailure::CredentialsNotFound, "not logged in"))
    }

    fn authorize_owner(user: &User, list: &TodoList) -> ServiceOutcome<()> {
        if user.username == list.owner || user.has_role(ADMIN) {
            Ok(())
        } else {
            Err(Failure::new(
                AuthFailure::AccessDenied,
                format!("{} may not access list {}", user.username, list.id),
            ))
        }
    }

    fn find(&self, id: u64) -> ServiceOutcome<&TodoList> {
        self.lists
            .get(&id)
            .ok_or_else(|| Failure::new(AuthFailure::NotFound, format!("list {}", id)))
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(name: &str, role: &str) -> User {
        User {
            username: name.to_string(),
            roles: vec![role.to_string()],
        }
    }

    fn service_with_private_list() -> (TodoService, u64) {
        let mut service = TodoService::new();
        service.log_in(Some(user("alice", "USER")));
        let id = service.create_todo_list("groceries", Visibility::Private).unwrap();
        (service, id)
    }

    #[test]
    fn test_anonymous_cannot_create() {
        let mut service = TodoService::new();
        let err = service.create_todo_list("x", Visibility::Public).unwrap_err();
        assert_eq!(err.kind, AuthFailure::CredentialsNotFound);
    }

    #[test]
    fn test_private_list_access() {
        let (mut service, id) = service_with_private_list();
        assert_eq!(service.get_todo_list(id).unwrap().owner, "alice");

        service.log_in(Some(user("bob", "USER")));
        assert_eq!(service.get_todo_list(id).unwrap_err().kind, AuthFailure::AccessDenied);

        service.log_in(Some(user("root", ADMIN)));
        assert!(service.get_todo_list(id).is_ok());

        service.log_in(None);
        assert_eq!(
            service.get_todo_list(id).unwrap_err().kind,
            AuthFailure::CredentialsNotFound
        );
    }

    #[test]
    fn test_public_list_is_readable_anonymously() {
        let mut service = TodoService::new();
        service.log_in(Some(user("alice", "USER")));
        let id = service.create_todo_list("books", Visibility::Public).unwrap();
        service.log_in(None);
        assert_eq!(service.get_todo_list(id).unwrap().name, "books");
    }

    #[test]
    fn test_items() {
        let (mut service, id) = service_with_private_list();
        let item = service.add_item(id, "milk").unwrap();
        service.complete_item(id, item).unwrap();
        assert_eq!(
            service.complete_item(id, item).unwrap_err().kind,
            AuthFailure::IllegalState
        );

        service.log_in(Some(user("bob", "USER")));
        assert_eq!(service.add_item(id, "eggs").unwrap_err().kind, AuthFailure::AccessDenied);
    }

    #[test]
    fn test_delete_requires_admin() {
        let (mut service, id) = service_with_private_list();
        assert_eq!(service.delete_todo_list(id).unwrap_err().kind, AuthFailure::AccessDenied);

        service.log_in(Some(user("root", ADMIN)));
        service.delete_todo_list(id).unwrap();
        assert_eq!(service.list_count(), 0);
        assert_eq!(service.delete_todo_list(id).unwrap_err().kind, AuthFailure::NotFound);
    }
}
