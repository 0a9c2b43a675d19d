//! Pairing sent instructions with received answers by id.
//!
//! A response batch decodes to a list of `[id, result]` pairs. Pairing is a
//! per-instruction lookup, so answers may arrive in any order; the output
//! always follows instruction order.

use std::collections::HashMap;

use super::answer::Answer;
use super::instruction::Instruction;
use super::value::NestedValue;
use crate::error::{Result, SlimError};

/// Match every instruction to its answer.
///
/// Duplicate answer ids keep the first occurrence. Answers whose id names no
/// instruction are ignored.
///
/// # Errors
///
/// - `Protocol` if the batch is not a list of `[scalar id, value]` pairs.
/// - `CorrelationMiss` for the first instruction without an answer.
///
/// # Example
///
/// ```
/// use slim_client::protocol::{match_instructions_to_answers, Answer, Instruction, NestedValue};
///
/// let instructions = vec![Instruction::Import {
///     id: "1".to_string(),
///     path: "fitnesse.slim.test".to_string(),
/// }];
/// let batch = NestedValue::list([NestedValue::list(["1", "OK"])]);
///
/// let pairs = match_instructions_to_answers(instructions, batch).unwrap();
/// assert_eq!(pairs[0].1, Answer::Ok(NestedValue::scalar("OK")));
/// ```
pub fn match_instructions_to_answers(
    instructions: Vec<Instruction>,
    answer_batch: NestedValue,
) -> Result<Vec<(Instruction, Answer)>> {
    let entries = answer_batch
        .into_list()
        .ok_or_else(|| SlimError::Protocol("Answer batch is not a list".to_string()))?;

    let mut results: HashMap<String, NestedValue> = HashMap::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let (id, result) = split_entry(entry).ok_or_else(|| {
            SlimError::Protocol(format!(
                "Answer entry {} is not an [id, result] pair",
                index
            ))
        })?;
        results.entry(id).or_insert(result);
    }

    instructions
        .into_iter()
        .map(|instruction| {
            let result = results
                .get(instruction.id())
                .cloned()
                .ok_or_else(|| SlimError::CorrelationMiss {
                    id: instruction.id().to_string(),
                })?;
            Ok((instruction, Answer::classify(result)))
        })
        .collect()
}

/// Split `[Scalar(id), result]` into its parts.
fn split_entry(entry: NestedValue) -> Option<(String, NestedValue)> {
    let mut pair = entry.into_list()?;
    if pair.len() != 2 {
        return None;
    }
    let result = pair.pop()?;
    match pair.pop()? {
        NestedValue::Scalar(id) => Some((id, result)),
        NestedValue::List(_) => None,
    }
}
