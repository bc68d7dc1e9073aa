//! Aggregates of embedded transfers.

use crate::{entity::Transaction, transfer::EmbeddedTransferTransaction};
use bytes::BufMut;
use catbuffer_codec::{types::group, Cursor, EncodeSize, Error, FixedSize, Read, Write};

/// A byte-budgeted list of embedded transfers.
///
/// The group is bounded by `payload_size`, the total encoded length of the transactions, rather
/// than by a count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateTransactionBody {
    pub transactions: Vec<EmbeddedTransferTransaction>,
}

impl AggregateTransactionBody {
    /// Total encoded length of the transactions.
    pub fn payload_size(&self) -> Result<u32, Error> {
        group::size(&self.transactions)
    }
}

impl Write for AggregateTransactionBody {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.payload_size()?.write(buf)?;
        group::write_all(&self.transactions, buf)
    }
}

impl Read for AggregateTransactionBody {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let payload_size = u32::read(cursor)?;
        let transactions = group::read_budgeted(cursor, payload_size as u64)?;
        Ok(Self { transactions })
    }
}

impl EncodeSize for AggregateTransactionBody {
    fn encode_size(&self) -> usize {
        u32::SIZE + group::encode_size_all(&self.transactions)
    }
}

/// A signed aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateTransaction {
    pub transaction: Transaction,
    pub body: AggregateTransactionBody,
}

impl Write for AggregateTransaction {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.transaction.write(buf)?;
        self.body.write(buf)
    }
}

impl Read for AggregateTransaction {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let transaction = Transaction::read(cursor)?;
        let body = AggregateTransactionBody::read(cursor)?;
        Ok(Self { transaction, body })
    }
}

impl EncodeSize for AggregateTransaction {
    fn encode_size(&self) -> usize {
        Transaction::SIZE + self.body.encode_size()
    }
}
