//! Netlist data structures: blocks, terminals, and nets.
//!
//! The [`Netlist`] is loaded once from the input description and is the
//! central structure the floorplanning engine operates on. Block dimensions,
//! terminal positions, and net membership are immutable after load; only
//! block *rectangles* change, rewritten by the packer on every pack pass.

use crate::geom::Rect;
use crate::ids::{BlockId, NetId, TerminalId};
use mosaic_common::Arena;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A rectangular hard macro to be placed.
///
/// `width`/`height` describe the unrotated footprint. The placed rectangle is
/// written by the packer and holds the result of the most recent pack pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Arena ID of this block.
    pub id: BlockId,
    /// Block name from the input description.
    pub name: String,
    /// Unrotated width.
    pub width: u64,
    /// Unrotated height.
    pub height: u64,
    /// Placed rectangle, valid after a pack pass.
    pub rect: Rect,
}

impl Block {
    /// Returns the effective width under the given orientation.
    pub fn width(&self, rotated: bool) -> u64 {
        if rotated {
            self.height
        } else {
            self.width
        }
    }

    /// Returns the effective height under the given orientation.
    pub fn height(&self, rotated: bool) -> u64 {
        if rotated {
            self.width
        } else {
            self.height
        }
    }
}

/// A fixed I/O terminal. Immutable after load; used only as a net endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    /// Arena ID of this terminal.
    pub id: TerminalId,
    /// Terminal name from the input description.
    pub name: String,
    /// Fixed x coordinate.
    pub x: u64,
    /// Fixed y coordinate.
    pub y: u64,
}

/// One endpoint of a net: either a placeable block or a fixed terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetPin {
    /// A block endpoint; its position is the center of the placed rectangle.
    Block(BlockId),
    /// A terminal endpoint at a fixed position.
    Terminal(TerminalId),
}

/// A net connecting blocks and/or terminals. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    /// Arena ID of this net.
    pub id: NetId,
    /// Net endpoints.
    pub pins: Vec<NetPin>,
}

/// The complete circuit description: blocks, terminals, and nets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist {
    /// All blocks, indexed by [`BlockId`].
    pub blocks: Arena<BlockId, Block>,
    /// All terminals, indexed by [`TerminalId`].
    pub terminals: Arena<TerminalId, Terminal>,
    /// All nets, indexed by [`NetId`].
    pub nets: Arena<NetId, Net>,
    /// Name to pin index, shared between blocks and terminals (the input
    /// format references both through one namespace).
    #[serde(skip)]
    pin_by_name: HashMap<String, NetPin>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a block and returns its ID.
    pub fn add_block(&mut self, name: impl Into<String>, width: u64, height: u64) -> BlockId {
        let name = name.into();
        let id = self.blocks.alloc(Block {
            id: BlockId::from_raw(self.blocks.len() as u32),
            name: name.clone(),
            width,
            height,
            rect: Rect::default(),
        });
        self.pin_by_name.insert(name, NetPin::Block(id));
        id
    }

    /// Adds a terminal and returns its ID.
    pub fn add_terminal(&mut self, name: impl Into<String>, x: u64, y: u64) -> TerminalId {
        let name = name.into();
        let id = self.terminals.alloc(Terminal {
            id: TerminalId::from_raw(self.terminals.len() as u32),
            name: name.clone(),
            x,
            y,
        });
        self.pin_by_name.insert(name, NetPin::Terminal(id));
        id
    }

    /// Adds a net over the given pins and returns its ID.
    pub fn add_net(&mut self, pins: Vec<NetPin>) -> NetId {
        self.nets.alloc(Net {
            id: NetId::from_raw(self.nets.len() as u32),
            pins,
        })
    }

    /// Looks up a block or terminal endpoint by name.
    pub fn pin_by_name(&self, name: &str) -> Option<NetPin> {
        self.pin_by_name.get(name).copied()
    }

    /// Returns the block with the given ID.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }

    /// Returns a mutable reference to the block with the given ID.
    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id]
    }

    /// Returns the terminal with the given ID.
    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id]
    }

    /// Returns the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the position of a net endpoint: the placed-rectangle center
    /// for a block, the fixed location for a terminal.
    pub fn pin_position(&self, pin: NetPin) -> (f64, f64) {
        match pin {
            NetPin::Block(id) => self.blocks[id].rect.center(),
            NetPin::Terminal(id) => {
                let t = &self.terminals[id];
                (t.x as f64, t.y as f64)
            }
        }
    }

    /// Computes the half-perimeter wirelength of one net: the half-perimeter
    /// of the bounding box of its endpoint positions.
    ///
    /// Recomputed on every call since block positions change between packs.
    /// Nets with fewer than two endpoints have zero wirelength.
    pub fn net_hpwl(&self, id: NetId) -> f64 {
        let net = &self.nets[id];
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &pin in &net.pins {
            let (x, y) = self.pin_position(pin);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if net.pins.is_empty() {
            return 0.0;
        }
        (max_x - min_x) + (max_y - min_y)
    }

    /// Computes the total half-perimeter wirelength across all nets.
    pub fn total_hpwl(&self) -> f64 {
        self.nets.iter().map(|(id, _)| self.net_hpwl(id)).sum()
    }

    /// Rebuilds the name index after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.pin_by_name.clear();
        let pins: Vec<(String, NetPin)> = self
            .blocks
            .iter()
            .map(|(id, b)| (b.name.clone(), NetPin::Block(id)))
            .chain(
                self.terminals
                    .iter()
                    .map(|(id, t)| (t.name.clone(), NetPin::Terminal(id))),
            )
            .collect();
        self.pin_by_name.extend(pins);
    }
}
