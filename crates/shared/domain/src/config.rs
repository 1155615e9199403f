//! Config aggregate - the graph of users and groups.
//!
//! A config owns its users and groups. Relations between them (primary group,
//! group members) are lookups by id or name, so elements can be built in any
//! order and attached later.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::ROOT_USER_NAME;
use crate::error::{DomainError, DomainResult};
use crate::group::Group;
use crate::user::User;

/// Anything that can be attached to a [`Config`].
#[derive(Debug, Clone)]
pub enum Element {
    User(User),
    Group(Group),
}

impl From<User> for Element {
    fn from(user: User) -> Self {
        Element::User(user)
    }
}

impl From<Group> for Element {
    fn from(group: Group) -> Self {
        Element::Group(group)
    }
}

/// Ordered collection of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Users(Vec<User>);

impl Users {
    /// All users in attach order
    pub fn all(&self) -> std::slice::Iter<'_, User> {
        self.0.iter()
    }

    /// The administrative account, if present
    pub fn root(&self) -> Option<&User> {
        self.by_name(ROOT_USER_NAME)
    }

    /// Find a user by login name
    pub fn by_name(&self, name: &str) -> Option<&User> {
        self.0.iter().find(|user| user.name == name)
    }

    /// All users with the given uid
    pub fn by_uid<'a>(&'a self, uid: &'a str) -> impl Iterator<Item = &'a User> + 'a {
        self.0
            .iter()
            .filter(move |user| user.uid.as_deref() == Some(uid))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Users {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

/// Ordered collection of groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Groups(Vec<Group>);

impl Groups {
    /// All groups in attach order
    pub fn all(&self) -> std::slice::Iter<'_, Group> {
        self.0.iter()
    }

    /// Find a group by name
    pub fn by_name(&self, name: &str) -> Option<&Group> {
        self.0.iter().find(|group| group.name == name)
    }

    /// First group with the given gid
    pub fn by_gid(&self, gid: &str) -> Option<&Group> {
        self.0.iter().find(|group| group.gid.as_deref() == Some(gid))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

/// Users and groups configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    users: Users,
    groups: Groups,
}

impl Config {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    /// Mutable access to a user by login name
    pub fn user_mut(&mut self, name: &str) -> Option<&mut User> {
        self.users.0.iter_mut().find(|user| user.name == name)
    }

    /// Attach users and groups, keeping the given order.
    ///
    /// Nothing is attached if any element clashes by name with an element of
    /// the same kind, either already attached or earlier in `elements`.
    ///
    /// # Errors
    /// Returns a conflict error naming the first duplicated element.
    pub fn attach<I, E>(&mut self, elements: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        let elements: Vec<Element> = elements.into_iter().map(Into::into).collect();
        self.check_names(&elements)?;

        for element in elements {
            match element {
                Element::User(user) => self.users.0.push(user),
                Element::Group(group) => self.groups.0.push(group),
            }
        }

        Ok(())
    }

    fn check_names(&self, elements: &[Element]) -> DomainResult<()> {
        let mut user_names = HashSet::new();
        let mut group_names = HashSet::new();

        for element in elements {
            match element {
                Element::User(user) => {
                    if self.users.by_name(&user.name).is_some()
                        || !user_names.insert(user.name.as_str())
                    {
                        return Err(DomainError::conflict(format!("User {}", user.name)));
                    }
                }
                Element::Group(group) => {
                    if self.groups.by_name(&group.name).is_some()
                        || !group_names.insert(group.name.as_str())
                    {
                        return Err(DomainError::conflict(format!("Group {}", group.name)));
                    }
                }
            }
        }

        Ok(())
    }

    /// Remove a user by login name
    pub fn detach_user(&mut self, name: &str) -> Option<User> {
        let index = self.users.0.iter().position(|user| user.name == name)?;
        Some(self.users.0.remove(index))
    }
}
