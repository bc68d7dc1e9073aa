use crate::types::{Amount, MosaicId};
use bytes::BufMut;
use catbuffer_codec::{Cursor, Error, FixedSize, Read, Write};

/// A quantity of a single mosaic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mosaic {
    pub mosaic_id: MosaicId,
    pub amount: Amount,
}

impl Write for Mosaic {
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.mosaic_id.write(buf)?;
        self.amount.write(buf)
    }
}

impl Read for Mosaic {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        let mosaic_id = MosaicId::read(cursor)?;
        let amount = Amount::read(cursor)?;
        Ok(Self { mosaic_id, amount })
    }
}

impl FixedSize for Mosaic {
    const SIZE: usize = MosaicId::SIZE + Amount::SIZE;
}
