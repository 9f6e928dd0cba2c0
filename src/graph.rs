//! Bipartite user–item interaction graph.
//!
//! Both adjacency views are stored: `users_to_items` drives item sampling and
//! `items_to_users` drives referrer selection. They always hold the same edge
//! multiset.

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct InteractionGraph {
    num_items: usize,
    users_to_items: Vec<Vec<usize>>,
    items_to_users: Vec<Vec<usize>>,
}

impl InteractionGraph {
    /// Build from the user view, deriving the item view by transposition.
    ///
    /// Fails with [`Error::InvalidGraph`] when there are no users, no items, or an
    /// edge references an item id `>= num_items`.
    pub fn new(num_items: usize, users_to_items: Vec<Vec<usize>>) -> Result<Self> {
        check_users_to_items(num_items, &users_to_items)?;
        let items_to_users = transpose(num_items, &users_to_items);
        Ok(Self { num_items, users_to_items, items_to_users })
    }

    /// Build from both views, checking that one is the transpose of the other.
    pub fn from_parts(
        num_items: usize,
        users_to_items: Vec<Vec<usize>>,
        items_to_users: Vec<Vec<usize>>,
    ) -> Result<Self> {
        check_users_to_items(num_items, &users_to_items)?;
        if items_to_users.len() != num_items {
            return Err(Error::InvalidGraph(format!(
                "items_to_users has {} rows, expected {num_items}",
                items_to_users.len()
            )));
        }
        let num_users = users_to_items.len();
        for (item, users) in items_to_users.iter().enumerate() {
            if let Some(&user) = users.iter().find(|&&u| u >= num_users) {
                return Err(Error::InvalidGraph(format!(
                    "item {item} references user {user}, but there are only {num_users} users"
                )));
            }
        }

        // Compare edge multisets row by row.
        let derived = transpose(num_items, &users_to_items);
        for (item, (given, expected)) in items_to_users.iter().zip(&derived).enumerate() {
            let mut given = given.clone();
            given.sort_unstable();
            if &given != expected {
                return Err(Error::InvalidGraph(format!(
                    "items_to_users row {item} is not consistent with users_to_items"
                )));
            }
        }

        Ok(Self { num_items, users_to_items, items_to_users })
    }

    pub fn num_users(&self) -> usize {
        self.users_to_items.len()
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn num_edges(&self) -> usize {
        self.users_to_items.iter().map(Vec::len).sum()
    }

    /// Items `user` interacted with, in input order. Empty for unknown users.
    pub fn items_of(&self, user: usize) -> &[usize] {
        self.users_to_items.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Users that interacted with `item`, by ascending user id. Empty for unknown items.
    pub fn users_of(&self, item: usize) -> &[usize] {
        self.items_to_users.get(item).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn check_users_to_items(num_items: usize, users_to_items: &[Vec<usize>]) -> Result<()> {
    if num_items == 0 {
        return Err(Error::InvalidGraph("empty slice of item weights".into()));
    }
    if users_to_items.is_empty() {
        return Err(Error::InvalidGraph("empty users to items adjacency table".into()));
    }
    for (user, items) in users_to_items.iter().enumerate() {
        if let Some(&item) = items.iter().find(|&&i| i >= num_items) {
            return Err(Error::InvalidGraph(format!(
                "user {user} references item {item}, but there are only {num_items} item weights"
            )));
        }
    }
    Ok(())
}

/// Iterating users in order yields rows already sorted by user id.
fn transpose(num_items: usize, users_to_items: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut items_to_users = vec![Vec::new(); num_items];
    for (user, items) in users_to_items.iter().enumerate() {
        for &item in items {
            items_to_users[item].push(user);
        }
    }
    items_to_users
}
