//! Wire decompression.
//!
//! The raw byte blob is the sole source of truth: every read is
//! bounds-checked, and length fields are validated against the remaining
//! input before any slice is taken. Each decoder consumes exactly the bytes
//! its encoder emitted and reports that count, which is how a container
//! advances its cursor across a record list it cannot pre-measure.

use ethereum_types::H256;
use log::trace;

use crate::error::{CodecError, CodecResult};
use crate::types::*;

/// Bounds-checked cursor over an input slice.
struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn consumed(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(CodecError::UnexpectedEof {
            offset: self.pos,
            needed: n,
        })?;
        if end > self.bytes.len() {
            return Err(CodecError::UnexpectedEof {
                offset: self.pos,
                needed: end - self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn advance(&mut self, n: usize) -> CodecResult<()> {
        self.take(n).map(|_| ())
    }

    fn take_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_u16(&mut self) -> CodecResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn take_u32(&mut self) -> CodecResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn take_u64(&mut self) -> CodecResult<u64> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn take_h256(&mut self) -> CodecResult<H256> {
        Ok(H256::from_slice(self.take(32)?))
    }

    /// Reads a `u16` length prefix, then exactly that many bytes.
    fn take_blob(&mut self) -> CodecResult<Vec<u8>> {
        let len = self.take_u16()? as usize;
        Ok(self.take(len)?.to_vec())
    }
}

impl Input {
    /// Decompresses one input from the front of `bytes`, returning it along
    /// with the number of bytes consumed.
    pub fn decode(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        let mut cur = ByteCursor::new(bytes);
        let input = match cur.take_u8()? {
            INPUT_COIN => Input::Coin {
                utxo_id: cur.take_h256()?,
                owner: cur.take_h256()?,
                amount: cur.take_u64()?,
                color: cur.take_h256()?,
                witness_index: cur.take_u8()?,
                maturity: cur.take_u32()?,
                predicate: cur.take_blob()?,
                predicate_data: cur.take_blob()?,
            },
            INPUT_CONTRACT => Input::Contract {
                utxo_id: cur.take_h256()?,
                balance_root: cur.take_h256()?,
                state_root: cur.take_h256()?,
                contract_id: cur.take_h256()?,
            },
            value => {
                return Err(CodecError::UnknownDiscriminant {
                    kind: "input",
                    value,
                })
            }
        };
        Ok((input, cur.consumed()))
    }
}

impl Output {
    /// Decompresses one output from the front of `bytes`, returning it along
    /// with the number of bytes consumed. The decoded variant reflects the
    /// wire discriminant exactly, even across the four layout-identical
    /// coin-shaped kinds.
    pub fn decode(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        let mut cur = ByteCursor::new(bytes);
        let output = match cur.take_u8()? {
            kind @ (OUTPUT_COIN | OUTPUT_WITHDRAWAL | OUTPUT_CHANGE | OUTPUT_VARIABLE) => {
                let to = cur.take_h256()?;
                let amount = cur.take_u64()?;
                let color_index = cur.take_u32()?;
                match kind {
                    OUTPUT_COIN => Output::Coin {
                        to,
                        amount,
                        color_index,
                    },
                    OUTPUT_WITHDRAWAL => Output::Withdrawal {
                        to,
                        amount,
                        color_index,
                    },
                    OUTPUT_CHANGE => Output::Change {
                        to,
                        amount,
                        color_index,
                    },
                    _ => Output::Variable {
                        to,
                        amount,
                        color_index,
                    },
                }
            }
            OUTPUT_CONTRACT => Output::Contract {
                input_index: cur.take_u8()?,
                balance_root: cur.take_h256()?,
                state_root: cur.take_h256()?,
            },
            OUTPUT_CONTRACT_CREATED => Output::ContractCreated {
                contract_id: cur.take_h256()?,
            },
            value => {
                return Err(CodecError::UnknownDiscriminant {
                    kind: "output",
                    value,
                })
            }
        };
        Ok((output, cur.consumed()))
    }
}

impl Witness {
    /// Decompresses one witness from the front of `bytes`, returning it
    /// along with the number of bytes consumed.
    pub fn decode(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        let mut cur = ByteCursor::new(bytes);
        let witness = Witness {
            data: cur.take_blob()?,
        };
        Ok((witness, cur.consumed()))
    }
}

/// Decodes `count` records off `cur` by asking each record for its own
/// consumed length; the container never knows a record's size in advance.
fn decode_list<T>(
    cur: &mut ByteCursor<'_>,
    count: u8,
    decode_one: impl Fn(&[u8]) -> CodecResult<(T, usize)>,
) -> CodecResult<Vec<T>> {
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let (record, used) = decode_one(cur.remaining())?;
        cur.advance(used)?;
        records.push(record);
    }
    Ok(records)
}

impl Transaction {
    /// Decompresses a whole transaction from the front of `bytes`, returning
    /// it along with the number of bytes consumed.
    pub fn decode(bytes: &[u8]) -> CodecResult<(Self, usize)> {
        let mut cur = ByteCursor::new(bytes);
        let tx = match cur.take_u8()? {
            TX_SCRIPT => {
                let gas_price = cur.take_u64()?;
                let gas_limit = cur.take_u64()?;
                let maturity = cur.take_u32()?;
                // The cursor advances by each blob's decoded length; the
                // length prefix alone never moves it.
                let script = cur.take_blob()?;
                let script_data = cur.take_blob()?;
                let inputs_count = cur.take_u8()?;
                let outputs_count = cur.take_u8()?;
                let witnesses_count = cur.take_u8()?;
                Transaction::Script {
                    gas_price,
                    gas_limit,
                    maturity,
                    script,
                    script_data,
                    inputs: decode_list(&mut cur, inputs_count, Input::decode)?,
                    outputs: decode_list(&mut cur, outputs_count, Output::decode)?,
                    witnesses: decode_list(&mut cur, witnesses_count, Witness::decode)?,
                }
            }
            TX_CREATE => {
                let gas_price = cur.take_u64()?;
                let gas_limit = cur.take_u64()?;
                let maturity = cur.take_u32()?;
                let bytecode_length = cur.take_u16()?;
                let bytecode_witness_index = cur.take_u8()?;
                let static_contracts_count = cur.take_u8()?;
                let inputs_count = cur.take_u8()?;
                let outputs_count = cur.take_u8()?;
                let witnesses_count = cur.take_u8()?;
                let salt = cur.take_h256()?;
                let mut static_contracts = Vec::with_capacity(static_contracts_count as usize);
                for _ in 0..static_contracts_count {
                    static_contracts.push(cur.take_h256()?);
                }
                Transaction::Create {
                    gas_price,
                    gas_limit,
                    maturity,
                    bytecode_length,
                    bytecode_witness_index,
                    salt,
                    static_contracts,
                    inputs: decode_list(&mut cur, inputs_count, Input::decode)?,
                    outputs: decode_list(&mut cur, outputs_count, Output::decode)?,
                    witnesses: decode_list(&mut cur, witnesses_count, Witness::decode)?,
                }
            }
            value => {
                return Err(CodecError::UnknownDiscriminant {
                    kind: "transaction",
                    value,
                })
            }
        };

        trace!("decoded transaction: {} bytes consumed", cur.consumed());
        Ok((tx, cur.consumed()))
    }
}
