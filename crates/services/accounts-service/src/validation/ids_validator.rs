//! Detection of users and groups sharing the same numeric id.

use std::collections::hash_map::{Entry, HashMap};

use domain::{Config, Issue, IssueList, GROUP_GID_LOCATION, USER_UID_LOCATION};

/// Reports colliding uids and gids of a config as warnings.
pub struct IdsValidator<'a> {
    config: &'a Config,
}

impl<'a> IdsValidator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Issues for every shared uid followed by every shared gid.
    ///
    /// Ids are reported in the order they first appear; elements without an id
    /// are ignored.
    pub fn issues(&self) -> IssueList {
        let mut list = IssueList::new();
        list.concat(self.duplicated_users());
        list.concat(self.duplicated_groups());
        list
    }

    fn duplicated_users(&self) -> IssueList {
        let users = self
            .config
            .users()
            .all()
            .map(|user| (user.uid.as_deref(), user.name.as_str()));

        collisions(users)
            .into_iter()
            .map(|(uid, names)| {
                Issue::warn(
                    format!("Users {} have same UID {}.", names.join(", "), uid),
                    USER_UID_LOCATION,
                )
            })
            .collect()
    }

    fn duplicated_groups(&self) -> IssueList {
        let groups = self
            .config
            .groups()
            .all()
            .map(|group| (group.gid.as_deref(), group.name.as_str()));

        collisions(groups)
            .into_iter()
            .map(|(gid, names)| {
                Issue::warn(
                    format!("Groups {} have same GID {}.", names.join(", "), gid),
                    GROUP_GID_LOCATION,
                )
            })
            .collect()
    }
}

/// Group names by id, keeping only ids shared by more than one name.
fn collisions<'c>(
    elements: impl Iterator<Item = (Option<&'c str>, &'c str)>,
) -> Vec<(&'c str, Vec<&'c str>)> {
    let mut buckets: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (id, name) in elements {
        let Some(id) = id else { continue };
        match index.entry(id) {
            Entry::Occupied(slot) => buckets[*slot.get()].1.push(name),
            Entry::Vacant(slot) => {
                slot.insert(buckets.len());
                buckets.push((id, vec![name]));
            }
        }
    }

    buckets.retain(|(_, names)| names.len() > 1);
    buckets
}
