//! Propagation graph reconstruction for a single message.
//!
//! Every delivery record is an edge `sender -> recipient`. Walking the edges
//! from the originator recovers the forwarding chains the message travelled.

use std::collections::{BTreeMap, BTreeSet};

use super::error::AnalysisError;
use super::types::*;

/// Hop counts derived from one propagation graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HopCounts {
    /// Forwarding hops in the longest chain from the originator
    pub last_delivery_hop: usize,
    /// Node count of the longest leaf-dropping enumerated path
    pub enumerated_path_hop: usize,
}

/// Per-host result of the depth-first walk
#[derive(Debug, Clone, Copy)]
struct Reach {
    /// Hosts in the longest chain starting here, this host included
    chain: usize,
    /// Longest path emitted by leaf-dropping enumeration from here
    enumerated: Option<usize>,
}

/// Sender to recipient forwarding graph of one message group.
///
/// A repeated `(sender, recipient)` pair keeps the later record. Records where
/// a host lists itself as sender announce the message locally and add no edge.
#[derive(Debug, Clone)]
pub struct PropagationGraph<'a> {
    message_id: &'a str,
    originator: Option<&'a str>,
    edges: BTreeMap<&'a str, BTreeMap<&'a str, &'a MessageLogRecord>>,
}

impl<'a> PropagationGraph<'a> {
    /// Build the graph from a time-sorted message group
    pub fn from_group(group: &'a MessageGroup) -> Self {
        let mut edges: BTreeMap<&'a str, BTreeMap<&'a str, &'a MessageLogRecord>> =
            BTreeMap::new();

        for record in &group.records {
            if record.is_self_delivery() {
                continue;
            }
            edges
                .entry(record.sender_id.as_str())
                .or_default()
                .insert(record.host_id.as_str(), record);
        }

        Self {
            message_id: &group.message_id,
            originator: group.originator(),
            edges,
        }
    }

    pub fn originator(&self) -> Option<&'a str> {
        self.originator
    }

    /// Hosts that received the message directly from `sender`, in lexical order
    pub fn recipients(&self, sender: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.edges
            .get(sender)
            .into_iter()
            .flat_map(|recipients| recipients.keys().copied())
    }

    /// Record behind the edge `sender -> recipient`
    pub fn edge(&self, sender: &str, recipient: &str) -> Option<&'a MessageLogRecord> {
        self.edges.get(sender)?.get(recipient).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    fn cycle_at(&self, host: &str) -> AnalysisError {
        AnalysisError::CyclicPropagationGraph {
            message_id: self.message_id.to_string(),
            host: host.to_string(),
        }
    }

    /// Post-order walk from the originator computing [`Reach`] for every
    /// reachable host. Fails if a host is reached again from its own chain.
    fn walk(&self) -> Result<BTreeMap<&'a str, Reach>, AnalysisError> {
        let mut done: BTreeMap<&'a str, Reach> = BTreeMap::new();
        let Some(root) = self.originator else {
            return Ok(done);
        };

        let mut on_path: BTreeSet<&'a str> = BTreeSet::new();
        let mut stack: Vec<(&'a str, Vec<&'a str>)> = Vec::new();
        on_path.insert(root);
        stack.push((root, self.recipients(root).collect()));

        while let Some((node, pending)) = stack.last_mut() {
            let node = *node;
            match pending.pop() {
                Some(next) => {
                    if on_path.contains(next) {
                        return Err(self.cycle_at(next));
                    }
                    if done.contains_key(next) {
                        continue;
                    }
                    on_path.insert(next);
                    stack.push((next, self.recipients(next).collect()));
                }
                None => {
                    let mut reach = Reach {
                        chain: 1,
                        enumerated: None,
                    };
                    for recipient in self.recipients(node) {
                        if let Some(child) = done.get(recipient) {
                            reach.chain = reach.chain.max(child.chain + 1);
                            if let Some(len) = child.enumerated {
                                reach.enumerated =
                                    Some(reach.enumerated.map_or(len + 1, |cur| cur.max(len + 1)));
                            }
                        }
                    }
                    done.insert(node, reach);
                    on_path.remove(node);
                    stack.pop();
                }
            }
        }

        Ok(done)
    }

    /// Compute both hop counts in a single walk
    pub fn hop_counts(&self) -> Result<HopCounts, AnalysisError> {
        let reach = self.walk()?;
        let root = self.originator.and_then(|root| reach.get(root));

        Ok(HopCounts {
            last_delivery_hop: root.map_or(0, |r| r.chain - 1),
            enumerated_path_hop: root.and_then(|r| r.enumerated).unwrap_or(0),
        })
    }

    /// Forwarding hops in the longest chain from the originator
    pub fn last_delivery_hop(&self) -> Result<usize, AnalysisError> {
        Ok(self.hop_counts()?.last_delivery_hop)
    }

    /// One longest forwarding chain, preferring lexically smaller hosts on ties
    pub fn longest_chain(&self) -> Result<Vec<&'a str>, AnalysisError> {
        let reach = self.walk()?;
        let mut chain = Vec::new();
        let Some(mut current) = self.originator else {
            return Ok(chain);
        };

        while let Some(r) = reach.get(current) {
            chain.push(current);
            let next = self
                .recipients(current)
                .find(|host| reach.get(host).map_or(false, |child| child.chain + 1 == r.chain));
            match next {
                Some(host) => current = host,
                None => break,
            }
        }

        Ok(chain)
    }

    /// Every chain from the originator to a host that forwarded no further.
    ///
    /// Chains come out in lexical depth-first order. The number of chains can
    /// grow exponentially with redundant deliveries.
    pub fn delivery_paths(&self) -> Result<Vec<Vec<&'a str>>, AnalysisError> {
        let mut paths = Vec::new();
        let Some(root) = self.originator else {
            return Ok(paths);
        };

        let mut stack: Vec<Vec<&'a str>> = vec![vec![root]];
        while let Some(path) = stack.pop() {
            let last = path[path.len() - 1];
            let recipients: Vec<&'a str> = self.recipients(last).collect();
            if recipients.is_empty() {
                paths.push(path);
                continue;
            }
            for next in recipients.into_iter().rev() {
                if path.contains(&next) {
                    return Err(self.cycle_at(next));
                }
                let mut extended = path.clone();
                extended.push(next);
                stack.push(extended);
            }
        }

        Ok(paths)
    }
}
