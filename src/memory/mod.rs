//! Named-variable memory store written by the executor and read by the
//! debugger's inspection commands.

mod value;

pub use value::Value;

use std::io::{self, Write};

use indexmap::IndexMap;

/// Ordered table of named cells. A cell's address is its insertion index
/// and never changes once the name is bound.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    cells: IndexMap<String, Value>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned snapshot of the named cell, `None` if the name was never bound.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.cells.get(name).cloned()
    }

    /// Bind or overwrite `name`, returning the cell's address.
    pub fn write(&mut self, name: &str, value: Value) -> usize {
        match self.cells.get_full_mut(name) {
            Some((addr, _, cell)) => {
                *cell = value;
                addr
            }
            None => {
                let (addr, _) = self.cells.insert_full(name.to_string(), value);
                addr
            }
        }
    }

    pub fn address_of(&self, name: &str) -> Option<usize> {
        self.cells.get_index_of(name)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in address order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &str, &Value)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(addr, (name, value))| (addr, name.as_str(), value))
    }

    /// Dump every cell, one per line.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "**MEMORY PRINT**")?;
        writeln!(out, "Number of cells: {}", self.len())?;
        writeln!(out, "Contents:")?;
        for (addr, name, value) in self.cells() {
            writeln!(out, " {addr}: {name} ({}): {value}", value.kind_name())?;
        }
        writeln!(out, "**END PRINT**")
    }
}
