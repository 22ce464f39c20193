//! Parsers for the `.block` and `.nets` circuit descriptions.
//!
//! Both formats are whitespace-token streams:
//!
//! ```text
//! Outline: <width> <height>
//! NumBlocks: <n>
//! NumTerminals: <m>
//! <name> <width> <height>          (n times)
//! <name> terminal <x> <y>          (m times)
//! ```
//!
//! ```text
//! NumNets: <k>
//! NetDegree: <d>                   (k times)
//! <name> ...                       (d names)
//! ```

use crate::error::ParseError;
use mosaic_model::Netlist;
use std::path::Path;

/// A fully loaded circuit: the netlist plus the chip outline limits.
#[derive(Debug)]
pub struct Circuit {
    /// Blocks, terminals, and nets.
    pub netlist: Netlist,
    /// Chip outline `(width, height)` limits.
    pub outline: (u64, u64),
}

/// Reads and parses both description files.
pub fn load_circuit(block_path: &Path, nets_path: &Path) -> Result<Circuit, ParseError> {
    let blocks = std::fs::read_to_string(block_path)?;
    let nets = std::fs::read_to_string(nets_path)?;
    let (netlist, outline) = parse_blocks(&blocks)?;
    let mut circuit = Circuit { netlist, outline };
    parse_nets(&nets, &mut circuit.netlist)?;
    Ok(circuit)
}

/// Parses the `.block` description: outline, blocks, and terminals.
pub fn parse_blocks(text: &str) -> Result<(Netlist, (u64, u64)), ParseError> {
    let mut tokens = Tokens::new(text);
    let mut netlist = Netlist::new();

    tokens.literal("Outline:")?;
    let width = tokens.number("outline width")?;
    let height = tokens.number("outline height")?;

    tokens.literal("NumBlocks:")?;
    let block_count = tokens.number("block count")?;

    tokens.literal("NumTerminals:")?;
    let terminal_count = tokens.number("terminal count")?;

    for _ in 0..block_count {
        let name = tokens.next("a block name")?.to_string();
        let w = tokens.number("block width")?;
        let h = tokens.number("block height")?;
        netlist.add_block(name, w, h);
    }

    for _ in 0..terminal_count {
        let name = tokens.next("a terminal name")?.to_string();
        tokens.literal("terminal")?;
        let x = tokens.number("terminal x")?;
        let y = tokens.number("terminal y")?;
        netlist.add_terminal(name, x, y);
    }

    Ok((netlist, (width, height)))
}

/// Parses the `.nets` description, resolving endpoint names against the
/// blocks and terminals already loaded into the netlist.
pub fn parse_nets(text: &str, netlist: &mut Netlist) -> Result<(), ParseError> {
    let mut tokens = Tokens::new(text);

    tokens.literal("NumNets:")?;
    let net_count = tokens.number("net count")?;

    for _ in 0..net_count {
        tokens.literal("NetDegree:")?;
        let degree = tokens.number("net degree")?;
        let mut pins = Vec::with_capacity(degree as usize);
        for _ in 0..degree {
            let name = tokens.next("an endpoint name")?;
            let pin = netlist
                .pin_by_name(name)
                .ok_or_else(|| ParseError::UnknownEndpoint(name.to_string()))?;
            pins.push(pin);
        }
        netlist.add_net(pins);
    }

    Ok(())
}

/// Whitespace token cursor shared by both parsers.
struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace(),
        }
    }

    fn next(&mut self, expected: &str) -> Result<&'a str, ParseError> {
        self.iter.next().ok_or_else(|| ParseError::UnexpectedEof {
            expected: expected.to_string(),
        })
    }

    fn literal(&mut self, keyword: &str) -> Result<(), ParseError> {
        let found = self.next(&format!("'{keyword}'"))?;
        if found == keyword {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("'{keyword}'"),
                found: found.to_string(),
            })
        }
    }

    fn number(&mut self, what: &str) -> Result<u64, ParseError> {
        let token = self.next(what)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            token: token.to_string(),
            what: what.to_string(),
        })
    }
}
