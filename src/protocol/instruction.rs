//! Client-issued SLIM instructions and an id-assigning batch builder.
//!
//! # Example
//!
//! ```
//! use slim_client::protocol::InstructionBatch;
//!
//! let mut batch = InstructionBatch::new();
//! batch.import("fitnesse.slim.test");
//! batch.make("fraction", "Fraction", Vec::<String>::new());
//! batch.call("fraction", "quotient", Vec::<String>::new());
//!
//! let instructions = batch.into_instructions();
//! assert_eq!(instructions[2].id(), "id_3");
//! ```

use std::collections::HashSet;

use crate::error::{Result, SlimError};

/// One operation sent to the SLIM server.
///
/// `id` is the correlation key for the matching answer and must be unique
/// within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Add a path (package/namespace) to the server's fixture search path.
    Import { id: String, path: String },
    /// Construct `class` with `arguments` and store it as `instance`.
    Make {
        id: String,
        instance: String,
        class: String,
        arguments: Vec<String>,
    },
    /// Invoke `method` on `instance`.
    Call {
        id: String,
        instance: String,
        method: String,
        arguments: Vec<String>,
    },
    /// Invoke `method` on `instance` and bind the result to `symbol`.
    CallAndAssign {
        id: String,
        instance: String,
        symbol: String,
        method: String,
        arguments: Vec<String>,
    },
}

impl Instruction {
    /// Correlation id.
    pub fn id(&self) -> &str {
        match self {
            Self::Import { id, .. }
            | Self::Make { id, .. }
            | Self::Call { id, .. }
            | Self::CallAndAssign { id, .. } => id,
        }
    }

    /// Verb as it appears on the wire.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Import { .. } => "import",
            Self::Make { .. } => "make",
            Self::Call { .. } => "call",
            Self::CallAndAssign { .. } => "callAndAssign",
        }
    }

    /// Wire elements in order: `[id, verb, fields..., arguments...]`.
    pub fn wire_elements(&self) -> Vec<&str> {
        let mut elements = vec![self.id(), self.verb()];
        match self {
            Self::Import { path, .. } => elements.push(path),
            Self::Make {
                instance,
                class,
                arguments,
                ..
            } => {
                elements.push(instance);
                elements.push(class);
                elements.extend(arguments.iter().map(String::as_str));
            }
            Self::Call {
                instance,
                method,
                arguments,
                ..
            } => {
                elements.push(instance);
                elements.push(method);
                elements.extend(arguments.iter().map(String::as_str));
            }
            Self::CallAndAssign {
                instance,
                symbol,
                method,
                arguments,
                ..
            } => {
                elements.push(symbol);
                elements.push(instance);
                elements.push(method);
                elements.extend(arguments.iter().map(String::as_str));
            }
        }
        elements
    }
}

/// Default prefix for generated ids.
pub const DEFAULT_ID_PREFIX: &str = "id";

/// Builds a batch of instructions with generated ids `<prefix>_<n>`.
///
/// Ids start at 1 and are unique within the batch. Generated ids skip any
/// id already taken by a pushed instruction.
#[derive(Debug, Clone)]
pub struct InstructionBatch {
    prefix: String,
    next: usize,
    ids: HashSet<String>,
    instructions: Vec<Instruction>,
}

impl InstructionBatch {
    /// Create an empty batch using the default `id` prefix.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    /// Create an empty batch with a custom id prefix.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
            ids: HashSet::new(),
            instructions: Vec::new(),
        }
    }

    fn next_id(&mut self) -> String {
        loop {
            let id = format!("{}_{}", self.prefix, self.next);
            self.next += 1;
            if !self.ids.contains(&id) {
                self.ids.insert(id.clone());
                return id;
            }
        }
    }

    /// Append a hand-built instruction, keeping its id.
    ///
    /// # Errors
    ///
    /// `Protocol` if another instruction in the batch already uses the id;
    /// the batch is left unchanged.
    pub fn push(&mut self, instruction: Instruction) -> Result<()> {
        if !self.ids.insert(instruction.id().to_string()) {
            return Err(SlimError::Protocol(format!(
                "Duplicate instruction id '{}'",
                instruction.id()
            )));
        }
        self.instructions.push(instruction);
        Ok(())
    }

    /// Append an `import`. Returns the assigned id.
    pub fn import(&mut self, path: &str) -> String {
        let id = self.next_id();
        self.instructions.push(Instruction::Import {
            id: id.clone(),
            path: path.to_string(),
        });
        id
    }

    /// Append a `make`. Returns the assigned id.
    pub fn make<I, A>(&mut self, instance: &str, class: &str, arguments: I) -> String
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let id = self.next_id();
        self.instructions.push(Instruction::Make {
            id: id.clone(),
            instance: instance.to_string(),
            class: class.to_string(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        id
    }

    /// Append a `call`. Returns the assigned id.
    pub fn call<I, A>(&mut self, instance: &str, method: &str, arguments: I) -> String
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let id = self.next_id();
        self.instructions.push(Instruction::Call {
            id: id.clone(),
            instance: instance.to_string(),
            method: method.to_string(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        id
    }

    /// Append a `callAndAssign`. Returns the assigned id.
    pub fn call_and_assign<I, A>(
        &mut self,
        symbol: &str,
        instance: &str,
        method: &str,
        arguments: I,
    ) -> String
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let id = self.next_id();
        self.instructions.push(Instruction::CallAndAssign {
            id: id.clone(),
            instance: instance.to_string(),
            symbol: symbol.to_string(),
            method: method.to_string(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        id
    }

    /// Number of instructions in the batch.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions in insertion order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the batch.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl Default for InstructionBatch {
    fn default() -> Self {
        Self::new()
    }
}
