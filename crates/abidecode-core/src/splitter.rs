//! Indexed / non-indexed partition of an event's inputs.

use crate::abi::AbiParameter;

/// An event's inputs split by where the EVM stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitParameters<'a> {
    /// Stored in `topics[1..]`, declaration order
    pub indexed: Vec<&'a AbiParameter>,
    /// Stored in the data blob, declaration order
    pub non_indexed: Vec<&'a AbiParameter>,
}

/// Partition `inputs` into indexed and non-indexed subsequences, each in its
/// relative order.
pub fn split_parameters(inputs: &[AbiParameter]) -> SplitParameters<'_> {
    let (indexed, non_indexed): (Vec<_>, Vec<_>) = inputs.iter().partition(|p| p.indexed);
    SplitParameters {
        indexed,
        non_indexed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(params: &[&AbiParameter]) -> Vec<String> {
        params.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn keeps_relative_order() {
        let inputs = vec![
            AbiParameter::new("a", "uint256"),
            AbiParameter::new("b", "address").indexed(),
            AbiParameter::new("c", "bool"),
            AbiParameter::new("d", "bytes32").indexed(),
            AbiParameter::new("e", "uint8"),
        ];
        let split = split_parameters(&inputs);
        assert_eq!(names(&split.indexed), ["b", "d"]);
        assert_eq!(names(&split.non_indexed), ["a", "c", "e"]);
        assert_eq!(split.indexed.len() + split.non_indexed.len(), inputs.len());
    }

    #[test]
    fn random_flag_patterns_partition_exactly() {
        // xorshift64: deterministic patterns without a dev-dependency
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        for _ in 0..200 {
            let len = (next() % 12) as usize;
            let flags = next();
            let inputs: Vec<AbiParameter> = (0..len)
                .map(|i| {
                    let p = AbiParameter::new(format!("p{i}"), "uint256");
                    if flags >> i & 1 == 1 {
                        p.indexed()
                    } else {
                        p
                    }
                })
                .collect();

            let split = split_parameters(&inputs);
            assert_eq!(split.indexed.len() + split.non_indexed.len(), len);
            assert!(split.indexed.iter().all(|p| p.indexed));
            assert!(split.non_indexed.iter().all(|p| !p.indexed));

            let want_indexed: Vec<_> = inputs
                .iter()
                .filter(|p| p.indexed)
                .map(|p| p.name.clone())
                .collect();
            let want_data: Vec<_> = inputs
                .iter()
                .filter(|p| !p.indexed)
                .map(|p| p.name.clone())
                .collect();
            assert_eq!(names(&split.indexed), want_indexed);
            assert_eq!(names(&split.non_indexed), want_data);
        }
    }

    #[test]
    fn empty_input() {
        let split = split_parameters(&[]);
        assert!(split.indexed.is_empty());
        assert!(split.non_indexed.is_empty());
    }
}
