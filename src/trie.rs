//! Dictionary trie with adaptive per-node child storage and incremental
//! prefix matching

use crate::character::TypedRune;
use std::collections::BTreeMap;

/// Children kept as a sorted inline array up to this fan-out.
const ARRAY_LENGTH_LIMIT: usize = 8;
/// Children kept as a sorted map up to this fan-out; beyond it the node
/// switches to bucketed storage.
const MAP_LENGTH_LIMIT: usize = 1000;
/// Bucket count for high-fan-out nodes.
const HYBRID_BUCKETS: usize = 256;
/// Start of the CJK Unified Ideographs block; the bucket hash is centered
/// on it because high fan-out only occurs under Han prefixes.
const CJK_UNIFIED_BASE: u32 = 0x4E00;

type NodeId = u32;

const ROOT: NodeId = 0;

#[derive(Debug)]
enum Children {
    /// Sorted by key; at most `ARRAY_LENGTH_LIMIT` entries.
    Array(Vec<(char, NodeId)>),
    Map(BTreeMap<char, NodeId>),
    /// `HYBRID_BUCKETS` sorted buckets keyed by `(cp - 0x4E00) % buckets`.
    Hybrid(Vec<Vec<(char, NodeId)>>),
}

// The key of a node lives in its parent's child table, so the node itself
// only carries the terminal flag and its own children.
#[derive(Debug)]
struct Node {
    terminal: bool,
    children: Children,
    child_count: usize,
}

impl Node {
    fn new() -> Self {
        Node {
            terminal: false,
            children: Children::Array(Vec::new()),
            child_count: 0,
        }
    }
}

fn bucket_of(ch: char) -> usize {
    ((ch as u32).wrapping_sub(CJK_UNIFIED_BASE) as usize) % HYBRID_BUCKETS
}

/// Result of a trie probe. Carries the deepest matched node so a later
/// [`DictTrie::match_extend`] can continue from it without re-walking.
///
/// The node handle is an index into the trie that produced the hit; it
/// stays valid because nodes are never mutated or removed after load.
#[derive(Debug, Clone)]
pub(crate) struct Hit {
    state: u8,
    /// Byte span covered so far; end is exclusive.
    pub byte_begin: usize,
    pub byte_end: usize,
    /// Rune span covered so far; end is inclusive.
    pub char_begin: usize,
    pub char_end: usize,
    node: Option<NodeId>,
}

const STATE_MATCH: u8 = 0x01;
const STATE_PREFIX: u8 = 0x02;

impl Hit {
    /// The covered span is a complete dictionary term.
    pub fn is_match(&self) -> bool {
        self.state & STATE_MATCH != 0
    }

    /// The covered span is a proper prefix of at least one term.
    pub fn is_prefix(&self) -> bool {
        self.state & STATE_PREFIX != 0
    }

    pub fn is_unmatch(&self) -> bool {
        self.state == 0
    }
}

/// Prefix trie keyed by code point. Nodes live in an arena and are created
/// only during load; probes never mutate storage, so a loaded trie is safe
/// to share across threads.
#[derive(Debug)]
pub(crate) struct DictTrie {
    nodes: Vec<Node>,
    term_count: usize,
}

impl DictTrie {
    pub fn new() -> Self {
        DictTrie {
            nodes: vec![Node::new()],
            term_count: 0,
        }
    }

    pub fn term_count(&self) -> usize {
        self.term_count
    }

    pub fn is_empty(&self) -> bool {
        self.term_count == 0
    }

    /// Inserts one term, walking and creating nodes per code point.
    pub fn insert(&mut self, word: &str) {
        let mut node = ROOT;
        for ch in word.chars() {
            node = self.child_or_insert(node, ch);
        }
        if node != ROOT && !self.nodes[node as usize].terminal {
            self.nodes[node as usize].terminal = true;
            self.term_count += 1;
        }
    }

    /// Walks `count` runes from `start` and reports how far the walk got.
    /// `count == 0` means "to the end of the rune array".
    pub fn match_runes(&self, runes: &[TypedRune], start: usize, count: usize) -> Hit {
        let count = if count == 0 || start + count > runes.len() {
            runes.len() - start
        } else {
            count
        };
        let mut hit = Hit {
            state: 0,
            byte_begin: runes[start].byte_offset,
            byte_end: runes[start].next_byte_position(),
            char_begin: start,
            char_end: start,
            node: None,
        };
        let mut node = ROOT;
        for rune in &runes[start..start + count] {
            match self.child_of(node, rune.ch) {
                Some(child) => node = child,
                None => return hit,
            }
        }
        hit.byte_end = runes[start + count - 1].next_byte_position();
        hit.char_end = start + count - 1;
        self.flag_node(node, &mut hit);
        hit
    }

    /// Extends `hit` by exactly one rune at `index`, updating its span and
    /// flags in place. An unmatched extension clears the node handle.
    pub fn match_extend(&self, runes: &[TypedRune], index: usize, hit: &mut Hit) {
        let Some(node) = hit.node else {
            hit.state = 0;
            return;
        };
        match self.child_of(node, runes[index].ch) {
            Some(child) => {
                hit.byte_end = runes[index].next_byte_position();
                hit.char_end = index;
                self.flag_node(child, hit);
            }
            None => {
                hit.state = 0;
                hit.node = None;
            }
        }
    }

    fn flag_node(&self, node: NodeId, hit: &mut Hit) {
        let n = &self.nodes[node as usize];
        hit.state = 0;
        hit.node = None;
        if n.terminal {
            hit.state |= STATE_MATCH;
        }
        if n.child_count > 0 {
            hit.state |= STATE_PREFIX;
            hit.node = Some(node);
        }
    }

    fn child_of(&self, node: NodeId, ch: char) -> Option<NodeId> {
        match &self.nodes[node as usize].children {
            Children::Array(entries) => entries
                .binary_search_by_key(&ch, |&(k, _)| k)
                .ok()
                .map(|i| entries[i].1),
            Children::Map(map) => map.get(&ch).copied(),
            Children::Hybrid(buckets) => {
                let bucket = &buckets[bucket_of(ch)];
                bucket
                    .binary_search_by_key(&ch, |&(k, _)| k)
                    .ok()
                    .map(|i| bucket[i].1)
            }
        }
    }

    fn child_or_insert(&mut self, node: NodeId, ch: char) -> NodeId {
        if let Some(existing) = self.child_of(node, ch) {
            return existing;
        }
        let child = self.nodes.len() as NodeId;
        self.nodes.push(Node::new());

        let parent = &mut self.nodes[node as usize];
        parent.child_count += 1;
        let fan_out = parent.child_count;

        // Promotion is one-way: Array -> Map -> Hybrid, at the limits.
        match &mut parent.children {
            Children::Array(entries) if fan_out > ARRAY_LENGTH_LIMIT => {
                let mut map: BTreeMap<char, NodeId> = entries.drain(..).collect();
                map.insert(ch, child);
                parent.children = Children::Map(map);
            }
            Children::Array(entries) => {
                let pos = entries.partition_point(|&(k, _)| k < ch);
                entries.insert(pos, (ch, child));
            }
            Children::Map(map) if fan_out > MAP_LENGTH_LIMIT => {
                // Sorted map iteration keeps every bucket sorted.
                let mut buckets = vec![Vec::new(); HYBRID_BUCKETS];
                for (&k, &id) in map.iter() {
                    buckets[bucket_of(k)].push((k, id));
                }
                let slot = &mut buckets[bucket_of(ch)];
                let pos = slot.partition_point(|&(k, _)| k < ch);
                slot.insert(pos, (ch, child));
                parent.children = Children::Hybrid(buckets);
            }
            Children::Map(map) => {
                map.insert(ch, child);
            }
            Children::Hybrid(buckets) => {
                let bucket = &mut buckets[bucket_of(ch)];
                let pos = bucket.partition_point(|&(k, _)| k < ch);
                bucket.insert(pos, (ch, child));
            }
        }
        child
    }
}
