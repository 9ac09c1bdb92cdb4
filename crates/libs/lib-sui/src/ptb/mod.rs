//! # Programmable Transactions
//!
//! Minimal builder for Sui programmable transaction blocks, producing the
//! BCS-encoded `TransactionData` a wallet signs.
//!
//! ```rust
//! use lib_sui::ptb::{AccountAddress, ProgrammableTransactionBuilder};
//!
//! let mut ptb = ProgrammableTransactionBuilder::new();
//! let amount = ptb.pure(&1_000u64).unwrap();
//! let coin = ptb.split_coin(lib_sui::ptb::Argument::GasCoin, amount);
//! let recipient = ptb.pure(&AccountAddress::FRAMEWORK).unwrap();
//! ptb.transfer_objects(vec![coin], recipient);
//! let pt = ptb.finish();
//! assert_eq!(pt.commands.len(), 2);
//! ```

// region: --- Modules
pub mod types;
// endregion: --- Modules

use serde::Serialize;
use thiserror::Error;

pub use types::*;

/// Builds the input and command lists of a programmable transaction.
#[derive(Debug, Default)]
pub struct ProgrammableTransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl ProgrammableTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pure (BCS-serialized) input.
    pub fn pure<T: Serialize>(&mut self, value: &T) -> Result<Argument, Error> {
        let bytes = bcs::to_bytes(value).map_err(|e| Error::Encode(e.to_string()))?;
        Ok(self.input(CallArg::Pure(bytes)))
    }

    pub fn object(&mut self, object: ObjectArg) -> Argument {
        self.input(CallArg::Object(object))
    }

    fn input(&mut self, arg: CallArg) -> Argument {
        self.inputs.push(arg);
        Argument::Input((self.inputs.len() - 1) as u16)
    }

    /// Append a command and return the argument referring to its result.
    pub fn command(&mut self, command: Command) -> Argument {
        self.commands.push(command);
        Argument::Result((self.commands.len() - 1) as u16)
    }

    pub fn move_call(
        &mut self,
        package: ObjectId,
        module: &str,
        function: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Argument {
        self.command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module: module.to_string(),
            function: function.to_string(),
            type_arguments,
            arguments,
        })))
    }

    /// Split a single coin of `amount` off `coin`.
    pub fn split_coin(&mut self, coin: Argument, amount: Argument) -> Argument {
        match self.command(Command::SplitCoins(coin, vec![amount])) {
            Argument::Result(idx) => Argument::NestedResult(idx, 0),
            other => other,
        }
    }

    pub fn merge_coins(&mut self, target: Argument, sources: Vec<Argument>) {
        self.command(Command::MergeCoins(target, sources));
    }

    pub fn transfer_objects(&mut self, objects: Vec<Argument>, recipient: Argument) {
        self.command(Command::TransferObjects(objects, recipient));
    }

    pub fn finish(self) -> ProgrammableTransaction {
        ProgrammableTransaction {
            inputs: self.inputs,
            commands: self.commands,
        }
    }
}

/// Nested result `index` of the command that produced `result`.
pub fn nested(result: Argument, index: u16) -> Argument {
    match result {
        Argument::Result(idx) => Argument::NestedResult(idx, index),
        other => other,
    }
}

// region:    --- Error
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid type tag: {0}")]
    InvalidTypeTag(String),

    #[error("invalid object digest: {0}")]
    InvalidDigest(String),

    #[error("BCS encoding failed: {0}")]
    Encode(String),
}

impl From<Error> for lib_core::AppError {
    fn from(err: Error) -> Self {
        lib_core::AppError::TransactionBuildFailed(err.to_string())
    }
}
// endregion: --- Error
