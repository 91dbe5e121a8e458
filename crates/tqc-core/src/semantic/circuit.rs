//! One circuit scope: logical qubits plus modules.

use indexmap::IndexMap;
use log::debug;

use crate::{
    draw::{Palette, Solid},
    identifier::Id,
    semantic::{Lattice, LogicalQubit, Module},
};

/// The logical qubits and modules of one scope.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    lattice: Lattice,
    logical_qubits: Vec<LogicalQubit>,
    modules: Vec<Module>,
}

/// Solids of a circuit together with the qubit id index.
#[derive(Debug, Clone, Default)]
pub struct CircuitSolids {
    solids: Vec<Solid>,
    qubit_index: IndexMap<Id, Vec<usize>>,
}

impl CircuitSolids {
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// Returns the positions in [`solids`](Self::solids) owned by qubit `id`.
    pub fn qubit_solids(&self, id: Id) -> &[usize] {
        self.qubit_index.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn qubit_index(&self) -> &IndexMap<Id, Vec<usize>> {
        &self.qubit_index
    }

    /// Splits into the solid list and the qubit index.
    pub fn into_parts(self) -> (Vec<Solid>, IndexMap<Id, Vec<usize>>) {
        (self.solids, self.qubit_index)
    }
}

impl Circuit {
    pub fn new(lattice: Lattice, logical_qubits: Vec<LogicalQubit>, modules: Vec<Module>) -> Self {
        Self {
            lattice,
            logical_qubits,
            modules,
        }
    }

    /// Appends more qubits and modules to this scope.
    pub fn add(&mut self, logical_qubits: Vec<LogicalQubit>, modules: Vec<Module>) {
        self.logical_qubits.extend(logical_qubits);
        self.modules.extend(modules);
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn logical_qubits(&self) -> &[LogicalQubit] {
        &self.logical_qubits
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Finds the first module with the given id.
    pub fn module(&self, id: Id) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    /// Builds every solid of the scope, qubits first.
    ///
    /// Qubits sharing an id are indexed together.
    pub fn create_solids(&self, palette: &Palette) -> CircuitSolids {
        let mut solids = Vec::new();
        let mut qubit_index: IndexMap<Id, Vec<usize>> = IndexMap::new();

        for qubit in &self.logical_qubits {
            let qubit_solids = qubit.create_solids(&self.lattice, palette);
            let start = solids.len();
            qubit_index
                .entry(qubit.id())
                .or_default()
                .extend(start..start + qubit_solids.len());
            solids.extend(qubit_solids);
        }
        for module in &self.modules {
            solids.extend(module.create_solids(palette));
        }

        debug!(
            qubits = self.logical_qubits.len(),
            modules = self.modules.len(),
            solids = solids.len();
            "Created circuit solids"
        );

        CircuitSolids {
            solids,
            qubit_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::{
        draw::{SolidOwner, Visual},
        geometry::{Pos, Size},
        semantic::{Edge, EdgeKind, QubitKind},
    };

    fn single_block_qubit(id: &str, lattice: &Lattice) -> LogicalQubit {
        let edge = Edge::between(
            EdgeKind::Block,
            Pos::new(0.0, 0.0, 0.0),
            Pos::new(3.0, 0.0, 0.0),
            lattice,
            Visual::new(),
        )
        .unwrap();
        LogicalQubit::new(
            QubitKind::Rough,
            Id::new(id),
            vec![edge],
            Rc::new(json!({"id": id})),
        )
    }

    #[test]
    fn test_single_block_scenario() {
        let lattice = Lattice::new(0.0);
        let qubit = single_block_qubit("q0", &lattice);

        let edge = &qubit.edges()[0];
        assert_eq!(edge.size().to_array(), [2.0, 1.0, 1.0]);
        assert_eq!(edge.pos().to_array(), [1.5, 0.0, 0.0]);

        let circuit = Circuit::new(lattice, vec![qubit], vec![]);
        let result = circuit.create_solids(&Palette::default());
        assert_eq!(result.solids().len(), 3);
        assert!(result
            .solids()
            .iter()
            .all(|solid| solid.owner() == &SolidOwner::qubit(Id::new("q0"))));
        assert_eq!(result.qubit_solids(Id::new("q0")), &[0, 1, 2]);
    }

    #[test]
    fn test_qubits_before_modules_and_duplicate_ids_merge() {
        let lattice = Lattice::new(0.0);
        let module = Module::new(
            Id::new("box"),
            Pos::ORIGIN,
            Size::UNIT,
            &lattice,
            Visual::new(),
            Rc::new(json!({"id": "box"})),
        );
        let mut circuit = Circuit::new(lattice, vec![single_block_qubit("dup", &lattice)], vec![module]);
        circuit.add(vec![single_block_qubit("dup", &lattice)], vec![]);

        let result = circuit.create_solids(&Palette::default());
        assert_eq!(result.solids().len(), 7);
        assert!(result.solids()[6].owner().is_module());
        assert_eq!(result.qubit_solids(Id::new("dup")), &[0, 1, 2, 3, 4, 5]);
        assert!(result.qubit_solids(Id::new("box")).is_empty());
        assert!(circuit.module(Id::new("box")).is_some());
    }
}
