//! Transfers of mosaics and an optional message to a recipient.

use crate::{
    entity::{EmbeddedTransaction, Transaction},
    mosaic::Mosaic,
    types::Address,
};
use bytes::{BufMut, Bytes};
use catbuffer_codec::{
    types::group, Cursor, EncodeSize, Error, FixedSize, Read, Uint, Write,
};

/// Body of a transfer.
///
/// Wire order is `recipient | message_size | mosaics_count | message | mosaics`. Both size
/// fields precede the content they describe and are derived on write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferTransactionBody {
    pub recipient: Address,
    pub message: Bytes,
    pub mosaics: Vec<Mosaic>,
}

impl TransferTransactionBody {
    /// Length of the message.
    pub fn message_size(&self) -> Result<u16, Error> {
        u16::derive(self.message.len())
    }

    /// Number of mosaics.
    pub fn mosaics_count(&self) -> Result<u8, Error> {
        group::count(&self.mosaics)
    }
}

impl Write for TransferTransactionBody {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.recipient.write(buf)?;
        self.message_size()?.write(buf)?;
        self.mosaics_count()?.write(buf)?;
        buf.put_slice(&self.message);
        group::write_all(&self.mosaics, buf)
    }
}

impl Read for TransferTransactionBody {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let recipient = Address::read(cursor)?;
        let message_size = u16::read(cursor)?;
        let mosaics_count = u8::read(cursor)?;
        let message = Bytes::copy_from_slice(cursor.read_bytes(message_size as usize)?);
        let mosaics = group::read_counted(cursor, mosaics_count as u64)?;
        Ok(Self {
            recipient,
            message,
            mosaics,
        })
    }
}

impl EncodeSize for TransferTransactionBody {
    fn encode_size(&self) -> usize {
        Address::SIZE
            + u16::SIZE
            + u8::SIZE
            + self.message.len()
            + group::encode_size_all(&self.mosaics)
    }
}

/// A signed transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferTransaction {
    pub transaction: Transaction,
    pub body: TransferTransactionBody,
}

impl Write for TransferTransaction {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.transaction.write(buf)?;
        self.body.write(buf)
    }
}

impl Read for TransferTransaction {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let transaction = Transaction::read(cursor)?;
        let body = TransferTransactionBody::read(cursor)?;
        Ok(Self { transaction, body })
    }
}

impl EncodeSize for TransferTransaction {
    fn encode_size(&self) -> usize {
        Transaction::SIZE + self.body.encode_size()
    }
}

/// A transfer carried inside an aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbeddedTransferTransaction {
    pub transaction: EmbeddedTransaction,
    pub body: TransferTransactionBody,
}

impl Write for EmbeddedTransferTransaction {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.transaction.write(buf)?;
        self.body.write(buf)
    }
}

impl Read for EmbeddedTransferTransaction {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let transaction = EmbeddedTransaction::read(cursor)?;
        let body = TransferTransactionBody::read(cursor)?;
        Ok(Self { transaction, body })
    }
}

impl EncodeSize for EmbeddedTransferTransaction {
    fn encode_size(&self) -> usize {
        EmbeddedTransaction::SIZE + self.body.encode_size()
    }
}
