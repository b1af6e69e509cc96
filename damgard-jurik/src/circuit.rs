//! Boolean circuit description shared with multiparty protocols.
//!
//! Only the in-memory structure is defined here; parsing a circuit from a
//! file is left to [`CircuitReader`] implementations.

use crate::errors::DJCryptoError;

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateType {
    And,
    Xor,
}

/// A two-input gate writing to `output_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gate {
    pub input_index_1: usize,
    pub input_index_2: usize,
    pub output_index: usize,
    pub gate_type: GateType,
}

/// Gates in evaluation order plus the input and output wires owned by each party.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Circuit {
    gates: Vec<Gate>,
    party_inputs: Vec<Vec<usize>>,
    party_outputs: Vec<Vec<usize>>,
}

pub trait CircuitReader {
    fn read_circuit(&self, path: &Path) -> Result<Circuit, DJCryptoError>;
}

impl Circuit {
    /// `party_inputs[i]` and `party_outputs[i]` are the wires of party `i`;
    /// both must list the same number of parties.
    pub fn try_with(
        gates: Vec<Gate>,
        party_inputs: Vec<Vec<usize>>,
        party_outputs: Vec<Vec<usize>>,
    ) -> Result<Self, DJCryptoError> {
        if party_inputs.len() != party_outputs.len() {
            return Err(DJCryptoError::ParameterInvalid(format!(
                "Inputs are listed for {} parties but outputs for {}",
                party_inputs.len(),
                party_outputs.len()
            )));
        }

        Ok(Self {
            gates,
            party_inputs,
            party_outputs,
        })
    }

    pub fn number_of_parties(&self) -> usize {
        self.party_inputs.len()
    }

    pub fn party_inputs(&self, party: usize) -> Result<&[usize], DJCryptoError> {
        self.party_inputs
            .get(party)
            .map(Vec::as_slice)
            .ok_or_else(|| unknown_party(party, self.number_of_parties()))
    }

    pub fn party_outputs(&self, party: usize) -> Result<&[usize], DJCryptoError> {
        self.party_outputs
            .get(party)
            .map(Vec::as_slice)
            .ok_or_else(|| unknown_party(party, self.number_of_parties()))
    }

    pub fn and_gate_count(&self) -> usize {
        self.count_gates(GateType::And)
    }

    pub fn xor_gate_count(&self) -> usize {
        self.count_gates(GateType::Xor)
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Total number of input wires over all parties.
    pub fn input_count(&self) -> usize {
        self.party_inputs.iter().map(Vec::len).sum()
    }

    pub fn output_count(&self) -> usize {
        self.party_outputs.iter().map(Vec::len).sum()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    fn count_gates(&self, gate_type: GateType) -> usize {
        self.gates
            .iter()
            .filter(|gate| gate.gate_type == gate_type)
            .count()
    }
}

fn unknown_party(party: usize, parties: usize) -> DJCryptoError {
    DJCryptoError::ParameterInvalid(format!(
        "Party {} does not exist in a circuit with {} parties",
        party, parties
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(input_index_1: usize, input_index_2: usize, output_index: usize, gate_type: GateType) -> Gate {
        Gate {
            input_index_1,
            input_index_2,
            output_index,
            gate_type,
        }
    }

    /// Two parties, one bit each: out = (a AND b) XOR a.
    fn two_party_circuit() -> Result<Circuit, DJCryptoError> {
        Circuit::try_with(
            vec![gate(0, 1, 2, GateType::And), gate(2, 0, 3, GateType::Xor)],
            vec![vec![0], vec![1]],
            vec![vec![3], vec![]],
        )
    }

    #[test]
    fn test_circuit_accessors() -> Result<(), DJCryptoError> {
        let circuit = two_party_circuit()?;

        assert_eq!(circuit.number_of_parties(), 2);
        assert_eq!(circuit.party_inputs(1)?, &[1]);
        assert_eq!(circuit.party_outputs(0)?, &[3]);
        assert!(circuit.party_outputs(1)?.is_empty());
        assert_eq!(circuit.and_gate_count(), 1);
        assert_eq!(circuit.xor_gate_count(), 1);
        assert_eq!(circuit.gate_count(), 2);
        assert_eq!(circuit.input_count(), 2);
        assert_eq!(circuit.output_count(), 1);
        assert_eq!(circuit.gates()[1].gate_type, GateType::Xor);
        Ok(())
    }

    #[test]
    fn test_unknown_party() -> Result<(), DJCryptoError> {
        let circuit = two_party_circuit()?;
        assert!(matches!(circuit.party_inputs(2), Err(DJCryptoError::ParameterInvalid(_))));
        assert!(matches!(circuit.party_outputs(5), Err(DJCryptoError::ParameterInvalid(_))));
        Ok(())
    }

    #[test]
    fn test_party_count_mismatch() {
        assert!(Circuit::try_with(Vec::new(), vec![vec![0]], Vec::new()).is_err());
        assert_eq!(Circuit::default().gate_count(), 0);
    }

    struct FixedReader;

    impl CircuitReader for FixedReader {
        fn read_circuit(&self, _path: &Path) -> Result<Circuit, DJCryptoError> {
            two_party_circuit()
        }
    }

    #[test]
    fn test_reader_trait() -> Result<(), DJCryptoError> {
        let circuit = FixedReader.read_circuit(Path::new("and_xor.txt"))?;
        assert_eq!(circuit.gate_count(), 2);
        Ok(())
    }
}
