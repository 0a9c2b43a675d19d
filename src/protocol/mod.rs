//! Protocol module - wire format, data model, and instruction/answer matching.
//!
//! This module implements the SLIM protocol entities:
//! - 6-digit length field and sentinel constants
//! - `NestedValue`, `Instruction` and `Answer`
//! - Correlation of an answer batch back to the instructions that produced it
//! - Response buffer for accumulating partial reads

mod answer;
mod correlation;
mod instruction;
mod response_buffer;
mod value;
mod wire_format;

pub use answer::Answer;
pub use correlation::match_instructions_to_answers;
pub use instruction::{Instruction, InstructionBatch, DEFAULT_ID_PREFIX};
pub use response_buffer::ResponseBuffer;
pub use value::NestedValue;
pub use wire_format::{
    decode_length, push_length, BYE, DELIMITER, EXCEPTION_PREFIX, LENGTH_FIELD_SIZE, LIST_CLOSE,
    LIST_OPEN, MAX_ENCODABLE_LENGTH, VOID_VALUE,
};
