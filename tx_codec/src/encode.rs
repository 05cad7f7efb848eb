//! Wire serialization: kind discriminant first, then big-endian fields,
//! tightly packed with no padding.

use bytes::{BufMut, BytesMut};
use ethereum_types::H256;

use crate::error::{CodecError, CodecResult};
use crate::types::*;

/// Writes a `u16` length prefix followed by the blob itself.
fn put_blob(buf: &mut BytesMut, field: &'static str, blob: &[u8]) -> CodecResult<()> {
    let len = u16::try_from(blob.len()).map_err(|_| CodecError::LengthOverflow {
        field,
        len: blob.len(),
        max: u16::MAX as usize,
    })?;
    buf.put_u16(len);
    buf.put_slice(blob);
    Ok(())
}

/// Writes a `u8` list count.
fn put_count(buf: &mut BytesMut, field: &'static str, count: usize) -> CodecResult<()> {
    let count = u8::try_from(count).map_err(|_| CodecError::LengthOverflow {
        field,
        len: count,
        max: u8::MAX as usize,
    })?;
    buf.put_u8(count);
    Ok(())
}

fn put_h256(buf: &mut BytesMut, h: &H256) {
    buf.put_slice(h.as_bytes());
}

impl Input {
    /// Serializes this input, discriminant byte first.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut buf = BytesMut::new();
        self.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) -> CodecResult<()> {
        match self {
            Input::Coin {
                utxo_id,
                owner,
                amount,
                color,
                witness_index,
                maturity,
                predicate,
                predicate_data,
            } => {
                buf.put_u8(INPUT_COIN);
                put_h256(buf, utxo_id);
                put_h256(buf, owner);
                buf.put_u64(*amount);
                put_h256(buf, color);
                buf.put_u8(*witness_index);
                buf.put_u32(*maturity);
                put_blob(buf, "predicate", predicate)?;
                put_blob(buf, "predicate_data", predicate_data)?;
            }
            Input::Contract {
                utxo_id,
                balance_root,
                state_root,
                contract_id,
            } => {
                buf.put_u8(INPUT_CONTRACT);
                put_h256(buf, utxo_id);
                put_h256(buf, balance_root);
                put_h256(buf, state_root);
                put_h256(buf, contract_id);
            }
        }
        Ok(())
    }
}

impl Output {
    /// Serializes this output, discriminant byte first.
    ///
    /// The four coin-shaped variants emit identical layouts under their own
    /// discriminants; the discriminant is never normalized.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut buf = BytesMut::new();
        self.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) -> CodecResult<()> {
        match self {
            Output::Coin {
                to,
                amount,
                color_index,
            } => encode_coin_shaped(buf, OUTPUT_COIN, to, *amount, *color_index),
            Output::Withdrawal {
                to,
                amount,
                color_index,
            } => encode_coin_shaped(buf, OUTPUT_WITHDRAWAL, to, *amount, *color_index),
            Output::Change {
                to,
                amount,
                color_index,
            } => encode_coin_shaped(buf, OUTPUT_CHANGE, to, *amount, *color_index),
            Output::Variable {
                to,
                amount,
                color_index,
            } => encode_coin_shaped(buf, OUTPUT_VARIABLE, to, *amount, *color_index),
            Output::Contract {
                input_index,
                balance_root,
                state_root,
            } => {
                buf.put_u8(OUTPUT_CONTRACT);
                buf.put_u8(*input_index);
                put_h256(buf, balance_root);
                put_h256(buf, state_root);
            }
            Output::ContractCreated { contract_id } => {
                buf.put_u8(OUTPUT_CONTRACT_CREATED);
                put_h256(buf, contract_id);
            }
        }
        Ok(())
    }
}

fn encode_coin_shaped(buf: &mut BytesMut, kind: u8, to: &H256, amount: u64, color_index: u32) {
    buf.put_u8(kind);
    put_h256(buf, to);
    buf.put_u64(amount);
    buf.put_u32(color_index);
}

impl Witness {
    /// Serializes this witness: a `u16` data length followed by the data.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut buf = BytesMut::new();
        self.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }

    pub(crate) fn encode_into(&self, buf: &mut BytesMut) -> CodecResult<()> {
        put_blob(buf, "witness_data", &self.data)
    }
}

impl Transaction {
    /// Serializes the whole transaction: kind discriminant, kind-specific
    /// header, then every input, output, and witness in list order.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut buf = BytesMut::new();
        match self {
            Transaction::Script {
                gas_price,
                gas_limit,
                maturity,
                script,
                script_data,
                inputs,
                outputs,
                witnesses,
            } => {
                buf.put_u8(TX_SCRIPT);
                buf.put_u64(*gas_price);
                buf.put_u64(*gas_limit);
                buf.put_u32(*maturity);
                put_blob(&mut buf, "script", script)?;
                put_blob(&mut buf, "script_data", script_data)?;
                put_count(&mut buf, "inputs", inputs.len())?;
                put_count(&mut buf, "outputs", outputs.len())?;
                put_count(&mut buf, "witnesses", witnesses.len())?;
                encode_records(&mut buf, inputs, outputs, witnesses)?;
            }
            Transaction::Create {
                gas_price,
                gas_limit,
                maturity,
                bytecode_length,
                bytecode_witness_index,
                salt,
                static_contracts,
                inputs,
                outputs,
                witnesses,
            } => {
                buf.put_u8(TX_CREATE);
                buf.put_u64(*gas_price);
                buf.put_u64(*gas_limit);
                buf.put_u32(*maturity);
                buf.put_u16(*bytecode_length);
                buf.put_u8(*bytecode_witness_index);
                put_count(&mut buf, "static_contracts", static_contracts.len())?;
                put_count(&mut buf, "inputs", inputs.len())?;
                put_count(&mut buf, "outputs", outputs.len())?;
                put_count(&mut buf, "witnesses", witnesses.len())?;
                put_h256(&mut buf, salt);
                for contract_id in static_contracts {
                    put_h256(&mut buf, contract_id);
                }
                encode_records(&mut buf, inputs, outputs, witnesses)?;
            }
        }
        Ok(buf.to_vec())
    }
}

fn encode_records(
    buf: &mut BytesMut,
    inputs: &[Input],
    outputs: &[Output],
    witnesses: &[Witness],
) -> CodecResult<()> {
    for input in inputs {
        input.encode_into(buf)?;
    }
    for output in outputs {
        output.encode_into(buf)?;
    }
    for witness in witnesses {
        witness.encode_into(buf)?;
    }
    Ok(())
}
