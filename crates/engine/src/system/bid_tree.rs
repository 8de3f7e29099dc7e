//! Arena of bids: openings at the roots, rebids as children.

use crate::condition::Condition;
use crate::error::{BidPath, BuildError};
use bridge_types::{Call, HandMetrics, Strain};
use indexmap::IndexMap;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BidId(usize);

impl BidId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub id: BidId,
    /// Lower-case denotation as written in the rule source, e.g. `"1n"`.
    pub denotation: String,
    pub call: Call,
    pub description: String,
    pub condition: Condition,
    pub parent: Option<BidId>,
    /// Identifier from the rule source, kept for diagnostics.
    pub source_id: Option<String>,
    children: IndexMap<String, BidId>,
}

impl Bid {
    pub fn new(
        call: Call,
        denotation: impl Into<String>,
        description: impl Into<String>,
        condition: Condition,
    ) -> Self {
        Self {
            id: BidId(0),
            denotation: denotation.into(),
            call,
            description: description.into(),
            condition,
            parent: None,
            source_id: None,
            children: IndexMap::new(),
        }
    }

    pub fn accept<H: HandMetrics + ?Sized>(&self, hand: &H) -> bool {
        self.condition.accept(hand)
    }

    pub fn strain(&self) -> Option<Strain> {
        self.call.strain()
    }
}

/// Owns every bid of a system. Bids never change once inserted.
#[derive(Debug, Clone, Default)]
pub struct BidTree {
    bids: Vec<Bid>,
    openings: IndexMap<String, BidId>,
}

impl BidTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `bid` under `parent`, or as an opening when `parent` is `None`.
    pub fn insert(&mut self, parent: Option<BidId>, mut bid: Bid) -> Result<BidId, BuildError> {
        let id = BidId(self.bids.len());
        let siblings = match parent {
            Some(parent) => &self.bids[parent.0].children,
            None => &self.openings,
        };
        if siblings.contains_key(&bid.denotation) {
            let path = match parent {
                Some(parent) => self.path(parent).child(bid.denotation),
                None => BidPath::default().child(bid.denotation),
            };
            return Err(BuildError::DuplicateDenotation { path });
        }

        bid.id = id;
        bid.parent = parent;
        let key = bid.denotation.clone();
        self.bids.push(bid);
        match parent {
            Some(parent) => self.bids[parent.0].children.insert(key, id),
            None => self.openings.insert(key, id),
        };
        Ok(id)
    }

    pub fn openings(&self) -> impl Iterator<Item = &Bid> {
        self.openings.values().map(|id| &self.bids[id.0])
    }

    pub fn opening(&self, denotation: &str) -> Option<&Bid> {
        self.openings
            .get(&denotation.trim().to_lowercase())
            .map(|id| &self.bids[id.0])
    }

    pub fn get(&self, id: BidId) -> Option<&Bid> {
        self.bids.get(id.0)
    }

    pub fn children(&self, id: BidId) -> impl Iterator<Item = &Bid> {
        self.bids
            .get(id.0)
            .into_iter()
            .flat_map(|bid| bid.children.values())
            .map(|child| &self.bids[child.0])
    }

    pub fn child(&self, id: BidId, denotation: &str) -> Option<&Bid> {
        let bid = self.bids.get(id.0)?;
        bid.children
            .get(&denotation.trim().to_lowercase())
            .map(|child| &self.bids[child.0])
    }

    /// Denotations from the opening down to `id` itself.
    pub fn ancestors(&self, id: BidId) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.bids.get(id.0);
        while let Some(bid) = current {
            chain.push(bid.denotation.as_str());
            current = bid.parent.and_then(|p| self.bids.get(p.0));
        }
        chain.reverse();
        chain
    }

    pub fn path(&self, id: BidId) -> BidPath {
        BidPath(self.ancestors(id).into_iter().map(String::from).collect())
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Every bid in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Bid> {
        self.bids.iter()
    }
}

impl Index<BidId> for BidTree {
    type Output = Bid;

    fn index(&self, id: BidId) -> &Bid {
        &self.bids[id.0]
    }
}
