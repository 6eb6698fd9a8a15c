use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use std::ops::Deref;

/// A transaction hash.
pub type TxHash = B256;

/// The raw signature values carried by a signed transaction.
///
/// Interpreting these (recovery id handling, replay protection) is the
/// sender resolver's concern; this type is plain data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    /// The R field of the signature.
    pub r: U256,
    /// The S field of the signature.
    pub s: U256,
    /// The parity of the Y coordinate of the public key.
    pub odd_y_parity: bool,
}

/// A legacy transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxLegacy {
    /// The chain id committed to by a replay-protected (EIP-155) signature,
    /// `None` for unprotected signatures.
    pub chain_id: Option<u64>,
    /// Nonce of the sending account.
    pub nonce: u64,
    /// Price the sender pays per unit of gas.
    pub gas_price: u128,
    /// The maximum amount of gas the transaction may consume.
    pub gas_limit: u64,
    /// Call target, or contract creation.
    pub to: TxKind,
    /// Value transferred to the target.
    pub value: U256,
    /// Input data.
    pub input: Bytes,
}

/// An EIP-1559 dynamic fee transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxEip1559 {
    /// The chain id of the transaction.
    pub chain_id: u64,
    /// Nonce of the sending account.
    pub nonce: u64,
    /// The maximum amount of gas the transaction may consume.
    pub gas_limit: u64,
    /// The maximum total fee per gas the sender is willing to pay.
    pub max_fee_per_gas: u128,
    /// The maximum priority fee per gas on top of the block base fee.
    pub max_priority_fee_per_gas: u128,
    /// Call target, or contract creation.
    pub to: TxKind,
    /// Value transferred to the target.
    pub value: U256,
    /// Input data.
    pub input: Bytes,
}

/// A raw transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transaction {
    /// Legacy transaction.
    Legacy(TxLegacy),
    /// EIP-1559 dynamic fee transaction.
    Eip1559(TxEip1559),
}

impl Transaction {
    /// Returns the chain id the signature commits to, if any.
    pub const fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::Eip1559(tx) => Some(tx.chain_id),
        }
    }

    /// Returns the nonce of the sending account.
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
        }
    }

    /// Returns the gas limit of the transaction.
    pub const fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::Eip1559(tx) => tx.gas_limit,
        }
    }

    /// Returns the call target, or contract creation.
    pub const fn to(&self) -> TxKind {
        match self {
            Self::Legacy(tx) => tx.to,
            Self::Eip1559(tx) => tx.to,
        }
    }

    /// Returns the value transferred to the target.
    pub const fn value(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.value,
            Self::Eip1559(tx) => tx.value,
        }
    }

    /// Returns the input data.
    pub const fn input(&self) -> &Bytes {
        match self {
            Self::Legacy(tx) => &tx.input,
            Self::Eip1559(tx) => &tx.input,
        }
    }

    /// Returns true if the transaction uses the EIP-1559 fee market.
    pub const fn is_dynamic_fee(&self) -> bool {
        matches!(self, Self::Eip1559(_))
    }

    /// Returns the price per unit of gas the sender ends up paying under the
    /// given block base fee.
    ///
    /// For dynamic fee transactions this is
    /// `min(max_fee_per_gas, base_fee + max_priority_fee_per_gas)`; without a
    /// base fee the full `max_fee_per_gas` is charged.
    pub fn effective_gas_price(&self, base_fee: Option<u64>) -> u128 {
        match self {
            Self::Legacy(tx) => tx.gas_price,
            Self::Eip1559(tx) => match base_fee {
                Some(base_fee) => tx
                    .max_fee_per_gas
                    .min(base_fee as u128 + tx.max_priority_fee_per_gas),
                None => tx.max_fee_per_gas,
            },
        }
    }
}

/// A transaction together with its signature and hash.
///
/// The hash is computed by whatever decoded the transaction; decoding and
/// hashing are out of scope for this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransactionSigned {
    /// Transaction hash.
    pub hash: TxHash,
    /// The transaction signature.
    pub signature: Signature,
    /// Raw transaction body.
    pub transaction: Transaction,
}

impl TransactionSigned {
    /// Creates a new signed transaction from its parts.
    pub const fn new(transaction: Transaction, signature: Signature, hash: TxHash) -> Self {
        Self { hash, signature, transaction }
    }

    /// Returns the transaction hash.
    pub const fn hash(&self) -> TxHash {
        self.hash
    }
}

impl Deref for TransactionSigned {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target {
        &self.transaction
    }
}

/// An executable message, derived from a transaction once its sender is
/// known.
///
/// Built exactly once per transaction and consumed by the execution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender of the message.
    pub from: Address,
    /// Target of the message, or contract creation.
    pub to: TxKind,
    /// Nonce of the sending account.
    pub nonce: u64,
    /// The maximum amount of gas the message may consume.
    pub gas_limit: u64,
    /// Effective price per unit of gas under the block's base fee.
    pub gas_price: u128,
    /// Value transferred to the target.
    pub value: U256,
    /// Input data.
    pub input: Bytes,
}

impl Message {
    /// Builds the message for `tx` as sent by `sender` under the given block
    /// base fee.
    pub fn new(tx: &TransactionSigned, sender: Address, base_fee: Option<u64>) -> Self {
        Self {
            from: sender,
            to: tx.to(),
            nonce: tx.nonce(),
            gas_limit: tx.gas_limit(),
            gas_price: tx.effective_gas_price(base_fee),
            value: tx.value(),
            input: tx.input().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn legacy_effective_gas_price_ignores_base_fee() {
        let tx = Transaction::Legacy(TxLegacy { gas_price: 70, ..Default::default() });
        assert_eq!(tx.effective_gas_price(None), 70);
        assert_eq!(tx.effective_gas_price(Some(100)), 70);
    }

    #[test]
    fn dynamic_fee_effective_gas_price_is_capped() {
        let tx = Transaction::Eip1559(TxEip1559 {
            max_fee_per_gas: 100,
            max_priority_fee_per_gas: 30,
            ..Default::default()
        });
        // below the cap: base fee plus the full tip
        assert_eq!(tx.effective_gas_price(Some(50)), 80);
        // at the cap: the tip is cut down
        assert_eq!(tx.effective_gas_price(Some(90)), 100);
        // no base fee: the maximum is charged
        assert_eq!(tx.effective_gas_price(None), 100);
    }

    #[test]
    fn message_carries_resolved_sender_and_effective_price() {
        let sender = address!("a94f5374fce5edbc8e2a8697c15331677e6ebf0b");
        let to = address!("095e7baea6a6c7c4c2dfeb977efac326af552d87");
        let signed = TransactionSigned::new(
            Transaction::Eip1559(TxEip1559 {
                chain_id: 1,
                nonce: 7,
                gas_limit: 21_000,
                max_fee_per_gas: 100,
                max_priority_fee_per_gas: 10,
                to: TxKind::Call(to),
                value: U256::from(1),
                input: Bytes::default(),
            }),
            Signature::default(),
            B256::with_last_byte(1),
        );

        let message = Message::new(&signed, sender, Some(40));
        assert_eq!(message.from, sender);
        assert_eq!(message.to, TxKind::Call(to));
        assert_eq!(message.nonce, 7);
        assert_eq!(message.gas_limit, 21_000);
        assert_eq!(message.gas_price, 50);
        assert_eq!(message.value, U256::from(1));
    }
}
