//! The sum-typed transaction object graph.
//!
//! Variants map to enums with payloads rather than structs with unused
//! fields; encode and decode switch exhaustively on the kind byte, and the
//! sum types are closed — there is no extension point.

use ethereum_types::H256;
use serde::{Deserialize, Serialize};

pub(crate) const INPUT_COIN: u8 = 0x00;
pub(crate) const INPUT_CONTRACT: u8 = 0x01;

pub(crate) const OUTPUT_COIN: u8 = 0x00;
pub(crate) const OUTPUT_WITHDRAWAL: u8 = 0x01;
pub(crate) const OUTPUT_CHANGE: u8 = 0x02;
pub(crate) const OUTPUT_VARIABLE: u8 = 0x03;
pub(crate) const OUTPUT_CONTRACT: u8 = 0x04;
pub(crate) const OUTPUT_CONTRACT_CREATED: u8 = 0x05;

pub(crate) const TX_SCRIPT: u8 = 0x00;
pub(crate) const TX_CREATE: u8 = 0x01;

/// A transaction input.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Input {
    /// Spends a coin UTXO, authorized by a witness or a predicate.
    Coin {
        /// Pointer to the UTXO being spent.
        utxo_id: H256,
        /// Owning address the coin was sent to.
        owner: H256,
        /// Amount of coins.
        amount: u64,
        /// Color (asset id) of the coins.
        color: H256,
        /// Index of the authorizing witness in the transaction's list.
        witness_index: u8,
        /// Block height before which the input cannot be spent.
        maturity: u32,
        /// Predicate bytecode; empty when witness-authorized.
        predicate: Vec<u8>,
        /// Arguments fed to the predicate.
        predicate_data: Vec<u8>,
    },

    /// Brings a contract's state into the transaction.
    Contract {
        /// Pointer to the contract's current UTXO.
        utxo_id: H256,
        /// Root of the contract's balance tree before execution.
        balance_root: H256,
        /// Root of the contract's state tree before execution.
        state_root: H256,
        /// The contract being called.
        contract_id: H256,
    },
}

/// A transaction output.
///
/// The four coin-shaped variants share one byte layout and differ only in
/// the discriminant, which must survive a decode/encode round trip
/// unnormalized — they are semantically distinct downstream.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// A plain coin sent to an address.
    Coin {
        /// Receiving address pointer.
        to: H256,
        /// Amount of coins.
        amount: u64,
        /// Index into the block's color registry.
        color_index: u32,
    },

    /// A coin leaving the rollup to the settlement chain.
    Withdrawal {
        /// Receiving address pointer.
        to: H256,
        /// Amount of coins.
        amount: u64,
        /// Index into the block's color registry.
        color_index: u32,
    },

    /// Unspent input value returned to the owner.
    Change {
        /// Receiving address pointer.
        to: H256,
        /// Amount of coins.
        amount: u64,
        /// Index into the block's color registry.
        color_index: u32,
    },

    /// An output whose amount is only known at execution time.
    Variable {
        /// Receiving address pointer.
        to: H256,
        /// Amount of coins.
        amount: u64,
        /// Index into the block's color registry.
        color_index: u32,
    },

    /// A contract's state after execution, paired with its input.
    Contract {
        /// Index of the matching [`Input::Contract`].
        input_index: u8,
        /// Root of the contract's balance tree after execution.
        balance_root: H256,
        /// Root of the contract's state tree after execution.
        state_root: H256,
    },

    /// Registers a newly deployed contract. The only variant with no
    /// amount/color fields at all.
    ContractCreated {
        /// The deployed contract's id.
        contract_id: H256,
    },
}

/// A witness: an opaque byte blob whose structure this layer does not
/// interpret (signatures, predicates' spend data, deployed bytecode).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    /// The raw witness bytes; at most `u16::MAX` of them on the wire.
    pub data: Vec<u8>,
}

/// A transaction. The container exclusively owns its input, output, and
/// witness records.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Transaction {
    /// Executes a script.
    Script {
        /// Price per unit of gas.
        gas_price: u64,
        /// Maximum gas the transaction may consume.
        gas_limit: u64,
        /// Block height before which the transaction cannot be included.
        maturity: u32,
        /// Script bytecode.
        script: Vec<u8>,
        /// Script input data.
        script_data: Vec<u8>,
        /// Inputs, in wire order.
        inputs: Vec<Input>,
        /// Outputs, in wire order.
        outputs: Vec<Output>,
        /// Witnesses, in wire order.
        witnesses: Vec<Witness>,
    },

    /// Deploys a contract.
    Create {
        /// Price per unit of gas.
        gas_price: u64,
        /// Maximum gas the transaction may consume.
        gas_limit: u64,
        /// Block height before which the transaction cannot be included.
        maturity: u32,
        /// Length of the deployed bytecode held in the referenced witness.
        bytecode_length: u16,
        /// Index of the witness carrying the bytecode.
        bytecode_witness_index: u8,
        /// Salt distinguishing otherwise-identical deployments.
        salt: H256,
        /// Contracts the deployed code may call statically.
        static_contracts: Vec<H256>,
        /// Inputs, in wire order.
        inputs: Vec<Input>,
        /// Outputs, in wire order.
        outputs: Vec<Output>,
        /// Witnesses, in wire order.
        witnesses: Vec<Witness>,
    },
}
