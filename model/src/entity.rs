//! Headers shared by every transaction.
//!
//! A transaction is a concatenation of fixed headers followed by its body:
//!
//! ```text
//! full:     size | signature | signer version type | fee deadline | body
//! embedded: size |             signer version type |                body
//! ```

use crate::types::{EntityType, Key, Signature};
use bytes::BufMut;
use catbuffer_codec::{Cursor, Error, FixedSize, Read, Write};

/// The total length of the entity that follows.
///
/// The size is carried as ordinary content. It is neither checked against the input nor
/// recomputed on encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizePrefixedEntity {
    pub size: u32,
}

impl Write for SizePrefixedEntity {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.size.write(buf)
    }
}

impl Read for SizePrefixedEntity {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            size: u32::read(cursor)?,
        })
    }
}

impl FixedSize for SizePrefixedEntity {
    const SIZE: usize = u32::SIZE;
}

/// The signature of a top-level transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifiableEntity {
    pub signature: Signature,
}

impl Default for VerifiableEntity {
    fn default() -> Self {
        Self { signature: [0; 64] }
    }
}

impl Write for VerifiableEntity {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.signature.write(buf)
    }
}

impl Read for VerifiableEntity {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(Self {
            signature: Signature::read(cursor)?,
        })
    }
}

impl FixedSize for VerifiableEntity {
    const SIZE: usize = Signature::SIZE;
}

/// Signer, version, and type of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntityBody {
    pub signer: Key,
    pub version: u16,
    pub entity_type: EntityType,
}

impl Write for EntityBody {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.signer.write(buf)?;
        self.version.write(buf)?;
        self.entity_type.write(buf)
    }
}

impl Read for EntityBody {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let signer = Key::read(cursor)?;
        let version = u16::read(cursor)?;
        let entity_type = EntityType::read(cursor)?;
        Ok(Self {
            signer,
            version,
            entity_type,
        })
    }
}

impl FixedSize for EntityBody {
    const SIZE: usize = Key::SIZE + u16::SIZE + EntityType::SIZE;
}

/// Header of a top-level transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    pub entity: SizePrefixedEntity,
    pub verifiable: VerifiableEntity,
    pub body: EntityBody,
    pub fee: u64,
    pub deadline: u64,
}

impl Write for Transaction {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.entity.write(buf)?;
        self.verifiable.write(buf)?;
        self.body.write(buf)?;
        self.fee.write(buf)?;
        self.deadline.write(buf)
    }
}

impl Read for Transaction {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let entity = SizePrefixedEntity::read(cursor)?;
        let verifiable = VerifiableEntity::read(cursor)?;
        let body = EntityBody::read(cursor)?;
        let fee = u64::read(cursor)?;
        let deadline = u64::read(cursor)?;
        Ok(Self {
            entity,
            verifiable,
            body,
            fee,
            deadline,
        })
    }
}

impl FixedSize for Transaction {
    const SIZE: usize = SizePrefixedEntity::SIZE
        + VerifiableEntity::SIZE
        + EntityBody::SIZE
        + u64::SIZE
        + u64::SIZE;
}

/// Header of a transaction carried inside an aggregate.
///
/// Embedded transactions are signed by the aggregate, so they carry neither a signature nor a
/// fee and deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmbeddedTransaction {
    pub entity: SizePrefixedEntity,
    pub body: EntityBody,
}

impl Write for EmbeddedTransaction {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.entity.write(buf)?;
        self.body.write(buf)
    }
}

impl Read for EmbeddedTransaction {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let entity = SizePrefixedEntity::read(cursor)?;
        let body = EntityBody::read(cursor)?;
        Ok(Self { entity, body })
    }
}

impl FixedSize for EmbeddedTransaction {
    const SIZE: usize = SizePrefixedEntity::SIZE + EntityBody::SIZE;
}
