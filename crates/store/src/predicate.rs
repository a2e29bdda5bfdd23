//! Typed, composable query predicates.
//!
//! Scoped reads never splice untyped filter objects together. A query is a
//! [`Predicate`] tree over a per-resource leaf type; the isolation layer
//! AND-merges its own predicate into the caller's, and the storage backend
//! translates the tree into its native filter form (the in-memory backend
//! evaluates it directly via [`LeafMatch`]).

use serde::{Deserialize, Serialize};

/// A leaf condition that can be tested against a record.
pub trait LeafMatch<R> {
    fn matches(&self, record: &R) -> bool;
}

/// A composable predicate over leaf conditions of type `L`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate<L> {
    /// Matches every record. Only ever produced for admin principals.
    MatchAll,
    /// Matches no record. The fail-closed default for empty scope lists.
    MatchNone,
    Leaf(L),
    And(Vec<Predicate<L>>),
    Or(Vec<Predicate<L>>),
}

impl<L> Predicate<L> {
    /// Conjunction, collapsing trivial branches.
    pub fn and(parts: Vec<Self>) -> Self {
        let mut kept = Vec::with_capacity(parts.len());
        for p in parts {
            match p {
                Predicate::MatchNone => return Predicate::MatchNone,
                Predicate::MatchAll => {}
                other => kept.push(other),
            }
        }
        match kept.len() {
            0 => Predicate::MatchAll,
            1 => kept.into_iter().next().unwrap_or(Predicate::MatchAll),
            _ => Predicate::And(kept),
        }
    }

    /// Disjunction, collapsing trivial branches.
    pub fn or(parts: Vec<Self>) -> Self {
        let mut kept = Vec::with_capacity(parts.len());
        for p in parts {
            match p {
                Predicate::MatchAll => return Predicate::MatchAll,
                Predicate::MatchNone => {}
                other => kept.push(other),
            }
        }
        match kept.len() {
            0 => Predicate::MatchNone,
            1 => kept.into_iter().next().unwrap_or(Predicate::MatchNone),
            _ => Predicate::Or(kept),
        }
    }

    pub fn and_with(self, other: Self) -> Self {
        Self::and(vec![self, other])
    }

    pub fn or_with(self, other: Self) -> Self {
        Self::or(vec![self, other])
    }

    /// Evaluate the predicate against a record.
    pub fn evaluate<R>(&self, record: &R) -> bool
    where
        L: LeafMatch<R>,
    {
        match self {
            Predicate::MatchAll => true,
            Predicate::MatchNone => false,
            Predicate::Leaf(leaf) => leaf.matches(record),
            Predicate::And(parts) => parts.iter().all(|p| p.evaluate(record)),
            Predicate::Or(parts) => parts.iter().any(|p| p.evaluate(record)),
        }
    }
}

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Offset for pagination (0-based).
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(50).min(1000), // cap at 1000
            offset: offset.unwrap_or(0),
        }
    }

    /// Unpaginated: used internally when chaining one scoped query into
    /// another (e.g. visible leases feeding the rent-payment filter).
    pub fn all() -> Self {
        Self {
            limit: u32::MAX,
            offset: 0,
        }
    }
}
