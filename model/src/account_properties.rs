//! Account property transactions.
//!
//! Each transaction adds or removes values from one of an account's property lists. The three
//! variants only differ in the kind of value being modified.

use crate::{
    entity::{EmbeddedTransaction, Transaction},
    types::{Address, EntityType, MosaicId},
};
use bytes::BufMut;
use catbuffer_codec::{types::group, Cursor, EncodeSize, Error, FixedSize, Read, Write};

/// A single addition or removal of `value`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountPropertiesModification<V> {
    pub modification_type: u8,
    pub value: V,
}

pub type AddressModification = AccountPropertiesModification<Address>;
pub type MosaicModification = AccountPropertiesModification<MosaicId>;
pub type EntityTypeModification = AccountPropertiesModification<EntityType>;

impl<V: Write> Write for AccountPropertiesModification<V> {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.modification_type.write(buf)?;
        self.value.write(buf)
    }
}

impl<V: Read> Read for AccountPropertiesModification<V> {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let modification_type = u8::read(cursor)?;
        let value = V::read(cursor)?;
        Ok(Self {
            modification_type,
            value,
        })
    }
}

impl<V: FixedSize> FixedSize for AccountPropertiesModification<V> {
    const SIZE: usize = u8::SIZE + V::SIZE;
}

/// Property type followed by a counted list of modifications.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountPropertiesTransactionBody<V> {
    pub property_type: u8,
    pub modifications: Vec<AccountPropertiesModification<V>>,
}

impl<V> AccountPropertiesTransactionBody<V> {
    /// Number of modifications.
    pub fn modifications_count(&self) -> Result<u8, Error> {
        group::count(&self.modifications)
    }
}

impl<V: Write> Write for AccountPropertiesTransactionBody<V> {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.property_type.write(buf)?;
        self.modifications_count()?.write(buf)?;
        group::write_all(&self.modifications, buf)
    }
}

impl<V: Read> Read for AccountPropertiesTransactionBody<V> {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let property_type = u8::read(cursor)?;
        let modifications_count = u8::read(cursor)?;
        let modifications = group::read_counted(cursor, modifications_count as u64)?;
        Ok(Self {
            property_type,
            modifications,
        })
    }
}

impl<V: FixedSize> EncodeSize for AccountPropertiesTransactionBody<V> {
    fn encode_size(&self) -> usize {
        u8::SIZE + u8::SIZE + group::encode_size_all(&self.modifications)
    }
}

/// A signed account property transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountPropertiesTransaction<V> {
    pub transaction: Transaction,
    pub body: AccountPropertiesTransactionBody<V>,
}

pub type AccountPropertiesAddressTransaction = AccountPropertiesTransaction<Address>;
pub type AccountPropertiesMosaicTransaction = AccountPropertiesTransaction<MosaicId>;
pub type AccountPropertiesEntityTypeTransaction = AccountPropertiesTransaction<EntityType>;

impl<V: Write> Write for AccountPropertiesTransaction<V> {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.transaction.write(buf)?;
        self.body.write(buf)
    }
}

impl<V: Read> Read for AccountPropertiesTransaction<V> {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let transaction = Transaction::read(cursor)?;
        let body = AccountPropertiesTransactionBody::read(cursor)?;
        Ok(Self { transaction, body })
    }
}

impl<V: FixedSize> EncodeSize for AccountPropertiesTransaction<V> {
    fn encode_size(&self) -> usize {
        Transaction::SIZE + self.body.encode_size()
    }
}

/// An account property transaction carried inside an aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbeddedAccountPropertiesTransaction<V> {
    pub transaction: EmbeddedTransaction,
    pub body: AccountPropertiesTransactionBody<V>,
}

pub type EmbeddedAccountPropertiesAddressTransaction =
    EmbeddedAccountPropertiesTransaction<Address>;
pub type EmbeddedAccountPropertiesMosaicTransaction =
    EmbeddedAccountPropertiesTransaction<MosaicId>;
pub type EmbeddedAccountPropertiesEntityTypeTransaction =
    EmbeddedAccountPropertiesTransaction<EntityType>;

impl<V: Write> Write for EmbeddedAccountPropertiesTransaction<V> {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.transaction.write(buf)?;
        self.body.write(buf)
    }
}

impl<V: Read> Read for EmbeddedAccountPropertiesTransaction<V> {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let transaction = EmbeddedTransaction::read(cursor)?;
        let body = AccountPropertiesTransactionBody::read(cursor)?;
        Ok(Self { transaction, body })
    }
}

impl<V: FixedSize> EncodeSize for EmbeddedAccountPropertiesTransaction<V> {
    fn encode_size(&self) -> usize {
        EmbeddedTransaction::SIZE + self.body.encode_size()
    }
}
